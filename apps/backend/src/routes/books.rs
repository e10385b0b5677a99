//! Book resource HTTP routes.
//!
//! Adapts inbound requests to record-store calls and store results to
//! status-coded responses. Create/update payloads arrive wrapped in a `data`
//! envelope; responses use the `book`/`books`/`message` envelopes.

use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::repos::books::{self, Book, BookCreate, BookPatch};
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct BookResponse {
    book: Book,
}

#[derive(Debug, Serialize)]
struct BooksResponse {
    books: Vec<Book>,
}

#[derive(Debug, Serialize)]
struct MessageResponse {
    message: &'static str,
}

/// Create payload: every field is required. Serde rejects missing keys and
/// mistyped values before the store is reached.
#[derive(Debug, Deserialize)]
pub struct CreateBookRequest {
    pub data: CreateBookData,
}

#[derive(Debug, Deserialize)]
pub struct CreateBookData {
    pub isbn: String,
    pub amazon_url: String,
    pub author: String,
    pub language: String,
    pub pages: i32,
    pub publisher: String,
    pub title: String,
    pub year: i32,
}

/// Update payload: every field is optional; omitted fields keep their stored
/// value. An `isbn` key is accepted but ignored - it never changes which row
/// the update targets.
#[derive(Debug, Deserialize)]
pub struct UpdateBookRequest {
    pub data: UpdateBookData,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateBookData {
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default)]
    pub amazon_url: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub pages: Option<i32>,
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
}

impl From<CreateBookData> for BookCreate {
    fn from(data: CreateBookData) -> Self {
        Self {
            isbn: data.isbn,
            amazon_url: data.amazon_url,
            author: data.author,
            language: data.language,
            pages: data.pages,
            publisher: data.publisher,
            title: data.title,
            year: data.year,
        }
    }
}

impl From<UpdateBookData> for BookPatch {
    fn from(data: UpdateBookData) -> Self {
        Self {
            amazon_url: data.amazon_url,
            author: data.author,
            language: data.language,
            pages: data.pages,
            publisher: data.publisher,
            title: data.title,
            year: data.year,
        }
    }
}

async fn list_books(
    req: HttpRequest,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let all = with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move { books::list(txn).await.map_err(AppError::from) })
    })
    .await?;

    Ok(HttpResponse::Ok().json(BooksResponse { books: all }))
}

async fn get_book(
    req: HttpRequest,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let isbn = path.into_inner();
    let book = with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move { books::get(txn, &isbn).await.map_err(AppError::from) })
    })
    .await?;

    Ok(HttpResponse::Ok().json(BookResponse { book }))
}

async fn create_book(
    req: HttpRequest,
    app_state: web::Data<AppState>,
    body: ValidatedJson<CreateBookRequest>,
) -> Result<HttpResponse, AppError> {
    let fields = BookCreate::from(body.into_inner().data);

    let book = with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move { books::create(txn, fields).await.map_err(AppError::from) })
    })
    .await?;

    Ok(HttpResponse::Created().json(BookResponse { book }))
}

async fn update_book(
    req: HttpRequest,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
    body: ValidatedJson<UpdateBookRequest>,
) -> Result<HttpResponse, AppError> {
    let isbn = path.into_inner();
    let data = body.into_inner().data;

    if let Some(payload_isbn) = &data.isbn {
        if payload_isbn != &isbn {
            debug!(path_isbn = %isbn, "isbn in update payload ignored");
        }
    }
    let patch = BookPatch::from(data);

    // Lookup-then-merge-then-persist runs as one transaction.
    let book = with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move { books::update(txn, &isbn, patch).await.map_err(AppError::from) })
    })
    .await?;

    Ok(HttpResponse::Ok().json(BookResponse { book }))
}

async fn delete_book(
    req: HttpRequest,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let isbn = path.into_inner();

    with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move { books::delete(txn, &isbn).await.map_err(AppError::from) })
    })
    .await?;

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Book deleted",
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list_books))
            .route(web::post().to(create_book)),
    );
    cfg.service(
        web::resource("/{isbn}")
            .route(web::get().to(get_book))
            .route(web::put().to(update_book))
            .route(web::delete().to(delete_book)),
    );
}
