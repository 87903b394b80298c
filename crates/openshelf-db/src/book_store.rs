use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use openshelf_common::{Book, Error, Result};
use rusqlite::{Connection, Row, params};
use tracing::info;

/// Persistence adapter for book records. Expects the schema to already be in
/// place; the migration runner is responsible for that at startup.
pub struct BookStore {
    conn: Mutex<Connection>,
}

impl BookStore {
    pub fn open(db_path: &Path) -> Result<Self> {
        info!("opening book store at {}", db_path.display());
        let conn = Connection::open(db_path)
            .map_err(|e| Error::Database(format!("failed to open database: {e}")))?;

        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
            .map_err(|e| Error::Database(format!("failed to set pragmas: {e}")))?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn connection(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| Error::Database("book store lock poisoned".into()))
    }

    /// Lists all books that have not been soft-deleted.
    pub fn list_books(&self) -> Result<Vec<Book>> {
        let conn = self.connection()?;
        let mut stmt = conn
            .prepare(
                "SELECT id, title, description, is_deleted
                 FROM books
                 WHERE is_deleted = 0
                 ORDER BY rowid",
            )
            .map_err(|e| Error::Database(format!("failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map([], row_to_book)
            .map_err(|e| Error::Database(format!("failed to query books: {e}")))?;

        let mut books = Vec::new();
        for row in rows {
            books.push(row.map_err(|e| Error::Database(format!("failed to read book row: {e}")))?);
        }
        Ok(books)
    }

    pub fn create_book(&self, title: &str, description: &str) -> Result<Book> {
        let book = Book::new(title, description);
        let conn = self.connection()?;
        conn.execute(
            "INSERT INTO books (id, title, description, is_deleted) VALUES (?1, ?2, ?3, 0)",
            params![book.id, book.title, book.description],
        )
        .map_err(|e| Error::Database(format!("failed to create book: {e}")))?;
        Ok(book)
    }

    pub fn get_book(&self, id: &str) -> Result<Option<Book>> {
        let conn = self.connection()?;
        let mut stmt = conn
            .prepare("SELECT id, title, description, is_deleted FROM books WHERE id = ?1")
            .map_err(|e| Error::Database(format!("failed to prepare query: {e}")))?;

        match stmt.query_row(params![id], row_to_book) {
            Ok(book) => Ok(Some(book)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Error::Database(format!("failed to fetch book: {e}"))),
        }
    }

    /// Updates title and description. Returns `None` when no such row exists;
    /// a soft-deleted book can still be edited.
    pub fn update_book(&self, id: &str, title: &str, description: &str) -> Result<Option<Book>> {
        let conn = self.connection()?;
        let updated = conn
            .execute(
                "UPDATE books SET title = ?2, description = ?3 WHERE id = ?1",
                params![id, title, description],
            )
            .map_err(|e| Error::Database(format!("failed to update book: {e}")))?;
        drop(conn);

        if updated == 0 {
            return Ok(None);
        }
        self.get_book(id)
    }

    /// Flags a book as deleted. Returns `false` when the id is unknown or the
    /// book was already soft-deleted.
    pub fn soft_delete_book(&self, id: &str) -> Result<bool> {
        let conn = self.connection()?;
        let updated = conn
            .execute(
                "UPDATE books SET is_deleted = 1 WHERE id = ?1 AND is_deleted = 0",
                params![id],
            )
            .map_err(|e| Error::Database(format!("failed to delete book: {e}")))?;
        Ok(updated > 0)
    }
}

fn row_to_book(row: &Row<'_>) -> rusqlite::Result<Book> {
    Ok(Book {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        is_deleted: row.get(3)?,
    })
}
