pub mod book_store;
pub mod migrations;

pub use book_store::BookStore;
pub use migrations::{ConnectionFactory, MigrationScript, SqliteDatabase, run_migration};
