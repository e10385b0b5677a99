//! SeaORM adapter for the book record store - generic over ConnectionTrait.

use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, QueryOrder, Set, Unchanged};

use crate::entities::books;

pub mod dto;

pub use dto::BookCreate;

// Adapter functions return DbErr; the repos layer maps to DomainError via map_db_err.

/// All rows, ordered by isbn. The table carries no insertion-sequence column,
/// so primary-key order is the deterministic listing order.
pub async fn list_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<books::Model>, sea_orm::DbErr> {
    books::Entity::find()
        .order_by_asc(books::Column::Isbn)
        .all(conn)
        .await
}

pub async fn find_by_isbn<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    isbn: &str,
) -> Result<Option<books::Model>, sea_orm::DbErr> {
    books::Entity::find_by_id(isbn.to_owned()).one(conn).await
}

/// Insert a new row. The primary-key constraint enforces isbn uniqueness, so
/// the uniqueness check and the insert are a single atomic statement.
pub async fn insert_book<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: BookCreate,
) -> Result<books::Model, sea_orm::DbErr> {
    let book_active = books::ActiveModel {
        isbn: Set(dto.isbn),
        amazon_url: Set(dto.amazon_url),
        author: Set(dto.author),
        language: Set(dto.language),
        pages: Set(dto.pages),
        publisher: Set(dto.publisher),
        title: Set(dto.title),
        year: Set(dto.year),
    };

    book_active.insert(conn).await
}

/// Persist a fully merged row. The isbn identifies the row and is never part
/// of the SET list.
pub async fn update_book<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    merged: books::Model,
) -> Result<books::Model, sea_orm::DbErr> {
    let book_active = books::ActiveModel {
        isbn: Unchanged(merged.isbn),
        amazon_url: Set(merged.amazon_url),
        author: Set(merged.author),
        language: Set(merged.language),
        pages: Set(merged.pages),
        publisher: Set(merged.publisher),
        title: Set(merged.title),
        year: Set(merged.year),
    };

    book_active.update(conn).await
}

pub async fn delete_by_isbn<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    isbn: &str,
) -> Result<u64, sea_orm::DbErr> {
    let res = books::Entity::delete_by_id(isbn.to_owned()).exec(conn).await?;
    Ok(res.rows_affected)
}
