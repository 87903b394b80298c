use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A book record as persisted in the store. Deleting a book only flips
/// `is_deleted`; the row is kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub description: String,
    pub is_deleted: bool,
}

impl Book {
    /// Creates a new book with a generated id.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            description: description.into(),
            is_deleted: false,
        }
    }
}
