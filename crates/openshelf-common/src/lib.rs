pub mod book;
pub mod error;

pub use book::Book;
pub use error::{Error, Result};
