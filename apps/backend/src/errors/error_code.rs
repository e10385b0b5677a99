//! Error codes for the bookstore backend API.
//!
//! This module defines all error codes used throughout the application.
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the bookstore backend API.
///
/// Each variant maps to a canonical SCREAMING_SNAKE_CASE string that appears
/// in HTTP responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request Validation
    /// General validation error
    ValidationError,
    /// General bad request error (malformed body, wrong field types)
    BadRequest,

    // Resource Not Found
    /// Book not found
    BookNotFound,
    /// General not found error
    NotFound,

    // Business Logic Conflicts
    /// A book already exists for the requested isbn
    DuplicateIsbn,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // System Errors
    /// Database unavailable
    DbUnavailable,
    /// Database timeout
    DbTimeout,
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::BadRequest => "BAD_REQUEST",
            ErrorCode::BookNotFound => "BOOK_NOT_FOUND",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::DuplicateIsbn => "DUPLICATE_ISBN",
            ErrorCode::Conflict => "CONFLICT",
            ErrorCode::DbUnavailable => "DB_UNAVAILABLE",
            ErrorCode::DbTimeout => "DB_TIMEOUT",
            ErrorCode::Internal => "INTERNAL",
            ErrorCode::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::ErrorCode;

    #[test]
    fn codes_are_screaming_snake_case() {
        let codes = [
            ErrorCode::ValidationError,
            ErrorCode::BadRequest,
            ErrorCode::BookNotFound,
            ErrorCode::NotFound,
            ErrorCode::DuplicateIsbn,
            ErrorCode::Conflict,
            ErrorCode::DbUnavailable,
            ErrorCode::DbTimeout,
            ErrorCode::Internal,
            ErrorCode::ConfigError,
        ];
        for code in codes {
            assert!(code
                .as_str()
                .chars()
                .all(|c| c.is_ascii_uppercase() || c == '_'));
        }
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(ErrorCode::DuplicateIsbn.to_string(), "DUPLICATE_ISBN");
        assert_eq!(ErrorCode::BookNotFound.to_string(), "BOOK_NOT_FOUND");
    }
}
