//! Data transfer objects for the books adapter.

/// Full field set for inserting a new book row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookCreate {
    pub isbn: String,
    pub amazon_url: String,
    pub author: String,
    pub language: String,
    pub pages: i32,
    pub publisher: String,
    pub title: String,
    pub year: i32,
}
