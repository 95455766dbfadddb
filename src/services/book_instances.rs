//! Book instance (physical copy) management service

use std::collections::HashMap;

use crate::{
    error::AppResult,
    models::{
        book::Book,
        book_instance::{BookInstance, BookInstanceView, CreateBookInstance},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct BookInstancesService {
    repository: Repository,
}

impl BookInstancesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// All copies, status-sorted, with their books resolved in a second,
    /// batched read
    pub async fn list(&self) -> AppResult<Vec<BookInstanceView>> {
        let instances = self.repository.book_instances.list().await?;

        let mut book_ids: Vec<i32> = instances.iter().map(|i| i.book_id).collect();
        book_ids.sort_unstable();
        book_ids.dedup();
        let books: HashMap<i32, Book> = self
            .repository
            .books
            .get_many(&book_ids)
            .await?
            .into_iter()
            .map(|b| (b.id, b))
            .collect();

        Ok(instances
            .into_iter()
            .map(|i| {
                let book = books.get(&i.book_id).cloned();
                BookInstanceView::from_parts(i, book)
            })
            .collect())
    }

    /// Copy with its book resolved
    pub async fn detail(&self, id: i32) -> AppResult<BookInstanceView> {
        let instance = self.repository.book_instances.get_by_id(id).await?;
        let book = self.repository.books.get_by_id(instance.book_id).await?;
        Ok(BookInstanceView::from_parts(instance, Some(book)))
    }

    /// Book titles for the copy form's reference dropdown
    pub async fn form_books(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list().await
    }

    pub async fn create(&self, data: CreateBookInstance) -> AppResult<BookInstance> {
        // Referenced book must exist before the insert is attempted
        self.repository.books.get_by_id(data.book_id).await?;
        self.repository.book_instances.create(&data).await
    }

    pub async fn replace(&self, id: i32, data: CreateBookInstance) -> AppResult<BookInstance> {
        self.repository.books.get_by_id(data.book_id).await?;
        self.repository.book_instances.replace(id, &data).await
    }

    /// Copies have no dependents in this model, so deletion is unconditional
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.book_instances.delete(id).await
    }
}
