//! Author model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Full author model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Author {
    pub id: i32,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl Author {
    pub fn url(&self) -> String {
        format!("/catalog/author/{}", self.id)
    }

    /// Display name, family name first
    pub fn name(&self) -> String {
        format!("{}, {}", self.family_name, self.first_name)
    }

    /// Birth-death range with blanks for missing dates
    pub fn lifespan(&self) -> String {
        let fmt = |d: &Option<NaiveDate>| {
            d.map(|d| d.format("%b %-d, %Y").to_string())
                .unwrap_or_default()
        };
        format!("{} - {}", fmt(&self.date_of_birth), fmt(&self.date_of_death))
    }
}

/// Author with display fields resolved, as handed to page templates
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthorView {
    pub id: i32,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
    pub name: String,
    pub lifespan: String,
    pub url: String,
}

impl From<Author> for AuthorView {
    fn from(author: Author) -> Self {
        Self {
            url: author.url(),
            name: author.name(),
            lifespan: author.lifespan(),
            id: author.id,
            first_name: author.first_name,
            family_name: author.family_name,
            date_of_birth: author.date_of_birth,
            date_of_death: author.date_of_death,
        }
    }
}

/// Sanitized author payload for create and full replace
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAuthor {
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author() -> Author {
        Author {
            id: 3,
            first_name: "Patrick".to_string(),
            family_name: "Rothfuss".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1973, 6, 6),
            date_of_death: None,
        }
    }

    #[test]
    fn name_is_family_first() {
        assert_eq!(author().name(), "Rothfuss, Patrick");
    }

    #[test]
    fn lifespan_leaves_missing_dates_blank() {
        assert_eq!(author().lifespan(), "Jun 6, 1973 - ");
    }

    #[test]
    fn view_carries_computed_fields() {
        let view = AuthorView::from(author());
        assert_eq!(view.url, "/catalog/author/3");
        assert_eq!(view.name, "Rothfuss, Patrick");
    }
}
