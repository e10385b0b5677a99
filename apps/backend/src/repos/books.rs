//! Book repository functions for the domain layer (generic over ConnectionTrait).
//!
//! This is the only layer that distinguishes "not found" from other failures:
//! update and delete look the row up before mutating so a missing isbn is
//! reported as `NotFound` rather than "wrote zero rows". Callers are expected
//! to run update/delete inside a transaction (`db::txn::with_txn`) so the
//! lookup-then-mutate sequence is atomic at the storage layer.

use sea_orm::ConnectionTrait;
use serde::{Deserialize, Serialize};

use crate::adapters::books_sea as books_adapter;
pub use crate::adapters::books_sea::BookCreate;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::infra::db_errors::map_db_err;

/// Book domain model. Serializes 1:1 to the wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub isbn: String,
    pub amazon_url: String,
    pub author: String,
    pub language: String,
    pub pages: i32,
    pub publisher: String,
    pub title: String,
    pub year: i32,
}

/// Sparse field set for partial updates. `None` keeps the stored value; the
/// isbn is deliberately absent because it identifies the row and is never
/// overwritten.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BookPatch {
    pub amazon_url: Option<String>,
    pub author: Option<String>,
    pub language: Option<String>,
    pub pages: Option<i32>,
    pub publisher: Option<String>,
    pub title: Option<String>,
    pub year: Option<i32>,
}

impl BookPatch {
    /// True when no field is supplied (the merge is a no-op).
    pub fn is_empty(&self) -> bool {
        self.amazon_url.is_none()
            && self.author.is_none()
            && self.language.is_none()
            && self.pages.is_none()
            && self.publisher.is_none()
            && self.title.is_none()
            && self.year.is_none()
    }
}

impl Book {
    /// The merged view of this book with `patch` applied: supplied fields win,
    /// omitted fields keep their stored value, the isbn never changes.
    pub fn merged(&self, patch: &BookPatch) -> Book {
        Book {
            isbn: self.isbn.clone(),
            amazon_url: patch
                .amazon_url
                .clone()
                .unwrap_or_else(|| self.amazon_url.clone()),
            author: patch.author.clone().unwrap_or_else(|| self.author.clone()),
            language: patch
                .language
                .clone()
                .unwrap_or_else(|| self.language.clone()),
            pages: patch.pages.unwrap_or(self.pages),
            publisher: patch
                .publisher
                .clone()
                .unwrap_or_else(|| self.publisher.clone()),
            title: patch.title.clone().unwrap_or_else(|| self.title.clone()),
            year: patch.year.unwrap_or(self.year),
        }
    }
}

/// All stored books, in deterministic (isbn) order.
pub async fn list<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<Vec<Book>, DomainError> {
    let models = books_adapter::list_all(conn).await.map_err(map_db_err)?;
    Ok(models.into_iter().map(Book::from).collect())
}

pub async fn get<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    isbn: &str,
) -> Result<Book, DomainError> {
    let model = books_adapter::find_by_isbn(conn, isbn)
        .await
        .map_err(map_db_err)?
        .ok_or_else(|| book_not_found(isbn))?;
    Ok(Book::from(model))
}

/// Insert a new book. A duplicate isbn surfaces as a `Conflict`.
pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    fields: BookCreate,
) -> Result<Book, DomainError> {
    validate_pages(fields.pages)?;
    let model = books_adapter::insert_book(conn, fields)
        .await
        .map_err(map_db_err)?;
    Ok(Book::from(model))
}

/// Merge `patch` onto the stored book and persist the merged whole.
pub async fn update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    isbn: &str,
    patch: BookPatch,
) -> Result<Book, DomainError> {
    let existing = books_adapter::find_by_isbn(conn, isbn)
        .await
        .map_err(map_db_err)?
        .map(Book::from)
        .ok_or_else(|| book_not_found(isbn))?;

    if patch.is_empty() {
        return Ok(existing);
    }

    let merged = existing.merged(&patch);
    validate_pages(merged.pages)?;

    let model = books_adapter::update_book(conn, merged.into())
        .await
        .map_err(map_db_err)?;
    Ok(Book::from(model))
}

pub async fn delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    isbn: &str,
) -> Result<(), DomainError> {
    books_adapter::find_by_isbn(conn, isbn)
        .await
        .map_err(map_db_err)?
        .ok_or_else(|| book_not_found(isbn))?;

    books_adapter::delete_by_isbn(conn, isbn)
        .await
        .map_err(map_db_err)?;
    Ok(())
}

fn book_not_found(isbn: &str) -> DomainError {
    DomainError::not_found(NotFoundKind::Book, format!("No book with isbn {isbn}"))
}

fn validate_pages(pages: i32) -> Result<(), DomainError> {
    if pages < 1 {
        return Err(DomainError::validation(format!(
            "pages must be positive, got {pages}"
        )));
    }
    Ok(())
}

// Conversions between SeaORM models and the domain model

impl From<crate::entities::books::Model> for Book {
    fn from(model: crate::entities::books::Model) -> Self {
        Self {
            isbn: model.isbn,
            amazon_url: model.amazon_url,
            author: model.author,
            language: model.language,
            pages: model.pages,
            publisher: model.publisher,
            title: model.title,
            year: model.year,
        }
    }
}

impl From<Book> for crate::entities::books::Model {
    fn from(book: Book) -> Self {
        Self {
            isbn: book.isbn,
            amazon_url: book.amazon_url,
            author: book.author,
            language: book.language,
            pages: book.pages,
            publisher: book.publisher,
            title: book.title,
            year: book.year,
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn sample_book() -> Book {
        Book {
            isbn: "01".to_string(),
            amazon_url: "www.test.com".to_string(),
            author: "Joana Marie".to_string(),
            language: "English".to_string(),
            pages: 100,
            publisher: "Test Press".to_string(),
            title: "The Book".to_string(),
            year: 1989,
        }
    }

    #[test]
    fn merged_with_empty_patch_is_identity() {
        let book = sample_book();
        assert_eq!(book.merged(&BookPatch::default()), book);
    }

    #[test]
    fn merged_overwrites_only_supplied_fields() {
        let book = sample_book();
        let patch = BookPatch {
            author: Some("Haha Test".to_string()),
            pages: Some(200),
            ..BookPatch::default()
        };

        let merged = book.merged(&patch);
        assert_eq!(merged.isbn, "01");
        assert_eq!(merged.author, "Haha Test");
        assert_eq!(merged.pages, 200);
        // Untouched fields keep their stored value
        assert_eq!(merged.title, book.title);
        assert_eq!(merged.year, book.year);
        assert_eq!(merged.amazon_url, book.amazon_url);
    }

    #[test]
    fn patch_is_empty_only_without_fields() {
        assert!(BookPatch::default().is_empty());
        let patch = BookPatch {
            year: Some(2002),
            ..BookPatch::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn validate_pages_rejects_non_positive() {
        assert!(validate_pages(1).is_ok());
        assert!(validate_pages(0).is_err());
        assert!(validate_pages(-3).is_err());
    }

    prop_compose! {
        fn arb_book()(
            isbn in "[0-9]{2,10}",
            amazon_url in ".{0,20}",
            author in ".{0,20}",
            language in ".{0,12}",
            pages in 1..5000i32,
            publisher in ".{0,20}",
            title in ".{0,20}",
            year in 1450..2100i32,
        ) -> Book {
            Book { isbn, amazon_url, author, language, pages, publisher, title, year }
        }
    }

    prop_compose! {
        fn arb_patch()(
            amazon_url in proptest::option::of(".{0,20}"),
            author in proptest::option::of(".{0,20}"),
            language in proptest::option::of(".{0,12}"),
            pages in proptest::option::of(1..5000i32),
            publisher in proptest::option::of(".{0,20}"),
            title in proptest::option::of(".{0,20}"),
            year in proptest::option::of(1450..2100i32),
        ) -> BookPatch {
            BookPatch { amazon_url, author, language, pages, publisher, title, year }
        }
    }

    proptest! {
        // Merge law: supplied fields win, omitted fields keep their prior
        // value, and the isbn is never touched.
        #[test]
        fn merge_law_holds(book in arb_book(), patch in arb_patch()) {
            let merged = book.merged(&patch);

            prop_assert_eq!(&merged.isbn, &book.isbn);
            prop_assert_eq!(
                &merged.amazon_url,
                patch.amazon_url.as_ref().unwrap_or(&book.amazon_url)
            );
            prop_assert_eq!(
                &merged.author,
                patch.author.as_ref().unwrap_or(&book.author)
            );
            prop_assert_eq!(
                &merged.language,
                patch.language.as_ref().unwrap_or(&book.language)
            );
            prop_assert_eq!(merged.pages, patch.pages.unwrap_or(book.pages));
            prop_assert_eq!(
                &merged.publisher,
                patch.publisher.as_ref().unwrap_or(&book.publisher)
            );
            prop_assert_eq!(&merged.title, patch.title.as_ref().unwrap_or(&book.title));
            prop_assert_eq!(merged.year, patch.year.unwrap_or(book.year));
        }

        // Merging twice with the same patch is a no-op after the first merge.
        #[test]
        fn merge_is_idempotent(book in arb_book(), patch in arb_patch()) {
            let once = book.merged(&patch);
            let twice = once.merged(&patch);
            prop_assert_eq!(once, twice);
        }
    }
}
