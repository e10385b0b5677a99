//! SeaORM -> DomainError translation helpers.
//!
//! Adapters return `sea_orm::DbErr`; the repos layer converts through
//! `map_db_err` so that higher layers only ever see `DomainError`. Details
//! are sanitized: raw driver messages go to logs, not response bodies.

use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::trace_ctx;

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// Extract table.column from SQLite "UNIQUE constraint failed: table.column" error messages.
fn extract_sqlite_table_column(error_msg: &str) -> Option<&str> {
    if let Some(prefix) = error_msg.find("UNIQUE constraint failed: ") {
        let rest = &error_msg[prefix + "UNIQUE constraint failed: ".len()..];
        // Take up to the end or first space/newline/quote
        let table_column = rest
            .split_whitespace()
            .next()
            .or_else(|| rest.split('\n').next())
            .or_else(|| rest.split('"').next());
        return table_column;
    }
    None
}

/// Map a unique-constraint violation to a domain conflict.
///
/// The books table carries a single unique constraint: the primary key on
/// isbn. SQLite reports it as `books.isbn`, Postgres as `books_pkey`.
fn map_unique_violation(error_msg: &str) -> DomainError {
    if extract_sqlite_table_column(error_msg) == Some("books.isbn")
        || error_msg.contains("books_pkey")
    {
        return DomainError::conflict(
            ConflictKind::DuplicateIsbn,
            "A book with this isbn already exists",
        );
    }
    DomainError::conflict(
        ConflictKind::Other("Unique".into()),
        "Unique constraint violation",
    )
}

/// Translate a `DbErr` into a `DomainError` with sanitized detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();
    let trace_id = trace_ctx::trace_id();

    match &e {
        sea_orm::DbErr::RecordNotFound(_) => {
            return DomainError::not_found(NotFoundKind::Other("Record".into()), "Record not found");
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(trace_id = %trace_id, raw_error = %error_msg, "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        _ => {}
    }

    if mentions_sqlstate(&error_msg, "23505")
        || error_msg.contains("duplicate key value violates unique constraint")
        || error_msg.contains("UNIQUE constraint failed")
    {
        warn!(trace_id = %trace_id, raw_error = %error_msg, "Unique constraint violation");
        return map_unique_violation(&error_msg);
    }

    if error_msg.contains("timeout") || error_msg.contains("pool") {
        warn!(trace_id = %trace_id, raw_error = %error_msg, "Database timeout or pool issue");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    error!(trace_id = %trace_id, raw_error = %error_msg, "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_not_found_maps_to_not_found() {
        let err = sea_orm::DbErr::RecordNotFound("books.isbn not found".to_string());
        assert!(matches!(
            map_db_err(err),
            DomainError::NotFound(NotFoundKind::Other(_), _)
        ));
    }

    #[test]
    fn sqlite_unique_violation_on_isbn_maps_to_duplicate_isbn() {
        let err = sea_orm::DbErr::Custom(
            "error returned from database: UNIQUE constraint failed: books.isbn".to_string(),
        );
        assert!(matches!(
            map_db_err(err),
            DomainError::Conflict(ConflictKind::DuplicateIsbn, _)
        ));
    }

    #[test]
    fn postgres_unique_violation_on_pkey_maps_to_duplicate_isbn() {
        let err = sea_orm::DbErr::Custom(
            "duplicate key value violates unique constraint \"books_pkey\"".to_string(),
        );
        assert!(matches!(
            map_db_err(err),
            DomainError::Conflict(ConflictKind::DuplicateIsbn, _)
        ));
    }

    #[test]
    fn unknown_unique_violation_falls_back_to_generic_conflict() {
        let err =
            sea_orm::DbErr::Custom("UNIQUE constraint failed: other.column".to_string());
        assert!(matches!(
            map_db_err(err),
            DomainError::Conflict(ConflictKind::Other(_), _)
        ));
    }

    #[test]
    fn timeout_maps_to_infra_timeout() {
        let err = sea_orm::DbErr::Custom("statement timeout expired".to_string());
        assert!(matches!(
            map_db_err(err),
            DomainError::Infra(InfraErrorKind::Timeout, _)
        ));
    }

    #[test]
    fn unhandled_errors_map_to_infra_other() {
        let err = sea_orm::DbErr::Custom("something unexpected".to_string());
        assert!(matches!(
            map_db_err(err),
            DomainError::Infra(InfraErrorKind::Other(_), _)
        ));
    }
}
