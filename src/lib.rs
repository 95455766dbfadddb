//! Book catalog server
//!
//! A CRUD backend for a small library catalog: books, authors, genres and
//! physical book copies. Handlers produce structured page payloads or
//! redirects; rendering them to HTML is the front-end's job.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod validation;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
