//! Author management service

use crate::{
    error::AppResult,
    models::{
        author::{Author, AuthorView, CreateAuthor},
        book::{Book, BookView},
    },
    repository::Repository,
};

/// Outcome of an author delete attempt
pub enum AuthorDeletion {
    Deleted,
    HasBooks(AuthorView, Vec<BookView>),
}

#[derive(Clone)]
pub struct AuthorsService {
    repository: Repository,
}

impl AuthorsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<AuthorView>> {
        let authors = self.repository.authors.list().await?;
        Ok(authors.into_iter().map(AuthorView::from).collect())
    }

    pub async fn get(&self, id: i32) -> AppResult<Author> {
        self.repository.authors.get_by_id(id).await
    }

    /// Author plus their books, fetched concurrently
    pub async fn detail(&self, id: i32) -> AppResult<(AuthorView, Vec<BookView>)> {
        let (author, books) = tokio::try_join!(
            self.repository.authors.get_by_id(id),
            self.repository.books.list_by_author(id),
        )?;
        Ok((AuthorView::from(author), into_book_views(books)))
    }

    pub async fn create(&self, data: CreateAuthor) -> AppResult<Author> {
        self.repository.authors.create(&data).await
    }

    pub async fn replace(&self, id: i32, data: CreateAuthor) -> AppResult<Author> {
        self.repository.authors.replace(id, &data).await
    }

    /// Delete unless books still reference the author
    pub async fn delete(&self, id: i32) -> AppResult<AuthorDeletion> {
        let (author, books) = tokio::try_join!(
            self.repository.authors.get_by_id(id),
            self.repository.books.list_by_author(id),
        )?;
        if !books.is_empty() {
            return Ok(AuthorDeletion::HasBooks(
                AuthorView::from(author),
                into_book_views(books),
            ));
        }
        self.repository.authors.delete(id).await?;
        Ok(AuthorDeletion::Deleted)
    }
}

fn into_book_views(books: Vec<Book>) -> Vec<BookView> {
    books
        .into_iter()
        .map(|b| BookView::from_parts(b, None, vec![]))
        .collect()
}
