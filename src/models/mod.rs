//! Data models for the catalog

pub mod author;
pub mod book;
pub mod book_instance;
pub mod genre;

// Re-export commonly used types
pub use author::{Author, AuthorView, CreateAuthor};
pub use book::{Book, BookView, CreateBook};
pub use book_instance::{BookInstance, BookInstanceView, CreateBookInstance, InstanceStatus};
pub use genre::{CreateGenre, Genre, GenreView};
