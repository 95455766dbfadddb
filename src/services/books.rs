//! Book catalog service

use std::collections::HashMap;

use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{
        author::AuthorView,
        book::{Book, BookView, CreateBook},
        book_instance::BookInstanceView,
        genre::GenreView,
    },
    repository::Repository,
};

/// Record counts for the catalog home page
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CatalogCounts {
    pub book_count: i64,
    pub book_instance_count: i64,
    pub book_instance_available_count: i64,
    pub author_count: i64,
    pub genre_count: i64,
}

/// Outcome of a book delete attempt
pub enum BookDeletion {
    Deleted,
    HasCopies(BookView, Vec<BookInstanceView>),
}

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// All record counts, gathered concurrently
    pub async fn index_counts(&self) -> AppResult<CatalogCounts> {
        let (book_count, book_instance_count, book_instance_available_count, author_count, genre_count) =
            tokio::try_join!(
                self.repository.books.count(),
                self.repository.book_instances.count(),
                self.repository.book_instances.count_available(),
                self.repository.authors.count(),
                self.repository.genres.count(),
            )?;
        Ok(CatalogCounts {
            book_count,
            book_instance_count,
            book_instance_available_count,
            author_count,
            genre_count,
        })
    }

    /// All books with their authors resolved in a second, batched read
    pub async fn list(&self) -> AppResult<Vec<BookView>> {
        let books = self.repository.books.list().await?;

        let mut author_ids: Vec<i32> = books.iter().map(|b| b.author_id).collect();
        author_ids.sort_unstable();
        author_ids.dedup();
        let authors: HashMap<i32, _> = self
            .repository
            .authors
            .get_many(&author_ids)
            .await?
            .into_iter()
            .map(|a| (a.id, a))
            .collect();

        Ok(books
            .into_iter()
            .map(|b| {
                let author = authors.get(&b.author_id).cloned();
                BookView::from_parts(b, author, vec![])
            })
            .collect())
    }

    /// Book with author and genres resolved, plus its copies
    pub async fn detail(&self, id: i32) -> AppResult<(BookView, Vec<BookInstanceView>)> {
        let (book, instances, genre_ids) = tokio::try_join!(
            self.repository.books.get_by_id(id),
            self.repository.book_instances.list_by_book(id),
            self.repository.books.genre_ids_for(id),
        )?;
        let (author, genres) = tokio::try_join!(
            self.repository.authors.get_by_id(book.author_id),
            self.repository.genres.get_many(&genre_ids),
        )?;

        let view = BookView::from_parts(book, Some(author), genres);
        let copies = instances
            .into_iter()
            .map(|i| BookInstanceView::from_parts(i, None))
            .collect();
        Ok((view, copies))
    }

    /// Reference options for the book form, fetched concurrently
    pub async fn form_options(&self) -> AppResult<(Vec<AuthorView>, Vec<GenreView>)> {
        let (authors, genres) = tokio::try_join!(
            self.repository.authors.list(),
            self.repository.genres.list(),
        )?;
        Ok((
            authors.into_iter().map(AuthorView::from).collect(),
            genres.into_iter().map(GenreView::from).collect(),
        ))
    }

    /// Current record with references resolved, plus the form options,
    /// for the pre-filled update form
    pub async fn update_view(
        &self,
        id: i32,
    ) -> AppResult<(BookView, Vec<AuthorView>, Vec<GenreView>)> {
        let ((book, _copies), (authors, genres)) =
            tokio::try_join!(self.detail(id), self.form_options())?;
        Ok((book, authors, genres))
    }

    pub async fn create(&self, data: CreateBook) -> AppResult<Book> {
        // Referenced author must exist before the insert is attempted
        self.repository.authors.get_by_id(data.author_id).await?;
        self.repository.books.create(&data).await
    }

    pub async fn replace(&self, id: i32, data: CreateBook) -> AppResult<Book> {
        self.repository.authors.get_by_id(data.author_id).await?;
        self.repository.books.replace(id, &data).await
    }

    /// Delete unless copies still reference the book
    pub async fn delete(&self, id: i32) -> AppResult<BookDeletion> {
        let (view, copies) = self.detail(id).await?;
        if !copies.is_empty() {
            return Ok(BookDeletion::HasCopies(view, copies));
        }
        self.repository.books.delete(id).await?;
        Ok(BookDeletion::Deleted)
    }
}
