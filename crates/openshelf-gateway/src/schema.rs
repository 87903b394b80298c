use openshelf_common::Book;
use serde::{Deserialize, Serialize};

/// Request body for creating a book.
#[derive(Debug, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub description: String,
}

/// Request body for editing a book.
#[derive(Debug, Deserialize)]
pub struct EditBook {
    pub title: String,
    pub description: String,
}

/// A book as exposed over the API. The soft-delete flag never leaves the
/// persistence layer.
#[derive(Debug, Serialize)]
pub struct BookResponse {
    pub id: String,
    pub title: String,
    pub description: String,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            id: book.id,
            title: book.title,
            description: book.description,
        }
    }
}

/// Generic list envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: Vec<T>,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}
