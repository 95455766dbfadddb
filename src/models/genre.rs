//! Genre model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Full genre model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Genre {
    pub id: i32,
    pub name: String,
}

impl Genre {
    /// Detail-page path, computed on read and never persisted
    pub fn url(&self) -> String {
        format!("/catalog/genre/{}", self.id)
    }
}

/// Genre with display fields resolved, as handed to page templates
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GenreView {
    pub id: i32,
    pub name: String,
    pub url: String,
}

impl From<Genre> for GenreView {
    fn from(genre: Genre) -> Self {
        Self {
            url: genre.url(),
            id: genre.id,
            name: genre.name,
        }
    }
}

/// Sanitized genre payload for create and full replace
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateGenre {
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_points_at_detail_page() {
        let genre = Genre {
            id: 7,
            name: "Fantasy".to_string(),
        };
        assert_eq!(genre.url(), "/catalog/genre/7");
    }
}
