//! Genre management service

use crate::{
    error::AppResult,
    models::{
        book::{Book, BookView},
        genre::{CreateGenre, Genre, GenreView},
    },
    repository::Repository,
};

/// Outcome of a genre save: duplicates resolve to the existing record
pub enum GenreSaved {
    Created(Genre),
    Existing(Genre),
}

/// Outcome of a genre delete attempt
pub enum GenreDeletion {
    Deleted,
    HasBooks(GenreView, Vec<BookView>),
}

#[derive(Clone)]
pub struct GenresService {
    repository: Repository,
}

impl GenresService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<GenreView>> {
        let genres = self.repository.genres.list().await?;
        Ok(genres.into_iter().map(GenreView::from).collect())
    }

    pub async fn get(&self, id: i32) -> AppResult<Genre> {
        self.repository.genres.get_by_id(id).await
    }

    /// Genre plus the books referencing it, fetched concurrently
    pub async fn detail(&self, id: i32) -> AppResult<(GenreView, Vec<BookView>)> {
        let (genre, books) = tokio::try_join!(
            self.repository.genres.get_by_id(id),
            self.repository.books.list_by_genre(id),
        )?;
        Ok((GenreView::from(genre), into_book_views(books)))
    }

    /// Create a genre unless one with the same name (case-insensitive)
    /// already exists; duplicates resolve to the existing record.
    pub async fn create(&self, data: CreateGenre) -> AppResult<GenreSaved> {
        if let Some(existing) = self.repository.genres.find_by_name_ci(&data.name).await? {
            tracing::debug!("Genre '{}' already exists as id={}", data.name, existing.id);
            return Ok(GenreSaved::Existing(existing));
        }
        let created = self.repository.genres.create(&data).await?;
        Ok(GenreSaved::Created(created))
    }

    pub async fn replace(&self, id: i32, data: CreateGenre) -> AppResult<Genre> {
        self.repository.genres.replace(id, &data).await
    }

    /// Delete unless books still reference the genre; dependents re-surface
    /// so the confirmation view can list them.
    pub async fn delete(&self, id: i32) -> AppResult<GenreDeletion> {
        let (genre, books) = tokio::try_join!(
            self.repository.genres.get_by_id(id),
            self.repository.books.list_by_genre(id),
        )?;
        if !books.is_empty() {
            return Ok(GenreDeletion::HasBooks(
                GenreView::from(genre),
                into_book_views(books),
            ));
        }
        self.repository.genres.delete(id).await?;
        Ok(GenreDeletion::Deleted)
    }
}

fn into_book_views(books: Vec<Book>) -> Vec<BookView> {
    books
        .into_iter()
        .map(|b| BookView::from_parts(b, None, vec![]))
        .collect()
}
