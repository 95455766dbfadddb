//! Book instance (physical copy) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::book::Book;

/// Loan status of a physical copy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum InstanceStatus {
    Available,
    Maintenance,
    Loaned,
    Reserved,
}

impl InstanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstanceStatus::Available => "Available",
            InstanceStatus::Maintenance => "Maintenance",
            InstanceStatus::Loaned => "Loaned",
            InstanceStatus::Reserved => "Reserved",
        }
    }
}

impl From<&str> for InstanceStatus {
    /// Unknown or empty values decode to the default status
    fn from(v: &str) -> Self {
        match v {
            "Available" => InstanceStatus::Available,
            "Loaned" => InstanceStatus::Loaned,
            "Reserved" => InstanceStatus::Reserved,
            _ => InstanceStatus::Maintenance,
        }
    }
}

impl Default for InstanceStatus {
    fn default() -> Self {
        InstanceStatus::Maintenance
    }
}

/// Full book instance model from database.
///
/// `status` is the raw stored text; decode through [`BookInstance::status`].
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookInstance {
    pub id: i32,
    pub book_id: i32,
    pub imprint: String,
    pub status: String,
    pub due_back: DateTime<Utc>,
}

impl BookInstance {
    pub fn url(&self) -> String {
        format!("/catalog/bookinstance/{}", self.id)
    }

    pub fn status(&self) -> InstanceStatus {
        InstanceStatus::from(self.status.as_str())
    }

    /// Medium date for detail pages, e.g. `Oct 6, 2014`
    pub fn due_back_formatted(&self) -> String {
        self.due_back.format("%b %-d, %Y").to_string()
    }

    /// ISO date for form prefill
    pub fn due_back_yyyy_mm_dd(&self) -> String {
        self.due_back.format("%Y-%m-%d").to_string()
    }
}

/// Book instance with its book resolved and display dates formatted
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookInstanceView {
    pub id: i32,
    pub imprint: String,
    pub status: InstanceStatus,
    pub due_back: DateTime<Utc>,
    pub due_back_formatted: String,
    pub due_back_yyyy_mm_dd: String,
    pub url: String,
    pub book: Option<Book>,
}

impl BookInstanceView {
    pub fn from_parts(instance: BookInstance, book: Option<Book>) -> Self {
        Self {
            url: instance.url(),
            status: instance.status(),
            due_back_formatted: instance.due_back_formatted(),
            due_back_yyyy_mm_dd: instance.due_back_yyyy_mm_dd(),
            id: instance.id,
            imprint: instance.imprint,
            due_back: instance.due_back,
            book,
        }
    }
}

/// Sanitized book instance payload for create and full replace.
///
/// A missing `due_back` falls back to the row default (creation time) on
/// insert and leaves the stored date untouched on replace.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBookInstance {
    pub book_id: i32,
    pub imprint: String,
    pub status: InstanceStatus,
    pub due_back: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn instance(status: &str) -> BookInstance {
        BookInstance {
            id: 5,
            book_id: 11,
            imprint: "Fourth printing".to_string(),
            status: status.to_string(),
            due_back: Utc.with_ymd_and_hms(2014, 10, 6, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn status_decodes_stored_text() {
        assert_eq!(instance("Available").status(), InstanceStatus::Available);
        assert_eq!(instance("Loaned").status(), InstanceStatus::Loaned);
    }

    #[test]
    fn unknown_status_falls_back_to_maintenance() {
        assert_eq!(instance("").status(), InstanceStatus::Maintenance);
        assert_eq!(instance("Lost").status(), InstanceStatus::Maintenance);
    }

    #[test]
    fn due_back_display_formats() {
        let i = instance("Available");
        assert_eq!(i.due_back_formatted(), "Oct 6, 2014");
        assert_eq!(i.due_back_yyyy_mm_dd(), "2014-10-06");
    }

    #[test]
    fn url_points_at_detail_page() {
        assert_eq!(instance("Available").url(), "/catalog/bookinstance/5");
    }
}
