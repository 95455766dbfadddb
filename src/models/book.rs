//! Book model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::{author::AuthorView, genre::Genre, genre::GenreView, Author};

/// Full book model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author_id: i32,
    pub summary: String,
    pub isbn: String,
}

impl Book {
    pub fn url(&self) -> String {
        format!("/catalog/book/{}", self.id)
    }
}

/// Book with its references resolved, as handed to page templates.
///
/// `author` and `genres` are filled by an explicit second read batching the
/// collected ids; list pages leave `genres` empty.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookView {
    pub id: i32,
    pub title: String,
    pub summary: String,
    pub isbn: String,
    pub url: String,
    pub author: Option<AuthorView>,
    pub genres: Vec<GenreView>,
}

impl BookView {
    pub fn from_parts(book: Book, author: Option<Author>, genres: Vec<Genre>) -> Self {
        Self {
            url: book.url(),
            id: book.id,
            title: book.title,
            summary: book.summary,
            isbn: book.isbn,
            author: author.map(AuthorView::from),
            genres: genres.into_iter().map(GenreView::from).collect(),
        }
    }
}

/// Sanitized book payload for create and full replace
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBook {
    pub title: String,
    pub author_id: i32,
    pub summary: String,
    pub isbn: String,
    pub genre_ids: Vec<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_resolves_author_and_url() {
        let book = Book {
            id: 11,
            title: "The Name of the Wind".to_string(),
            author_id: 3,
            summary: "A story told in three days.".to_string(),
            isbn: "9780756404741".to_string(),
        };
        let author = Author {
            id: 3,
            first_name: "Patrick".to_string(),
            family_name: "Rothfuss".to_string(),
            date_of_birth: None,
            date_of_death: None,
        };
        let view = BookView::from_parts(book, Some(author), vec![]);
        assert_eq!(view.url, "/catalog/book/11");
        assert_eq!(view.author.unwrap().name, "Rothfuss, Patrick");
        assert!(view.genres.is_empty());
    }
}
