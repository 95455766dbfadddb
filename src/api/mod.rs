//! API handlers for the catalog endpoints
//!
//! GET handlers produce [`Page`] payloads (a view name, a title and the
//! template context); the front-end turns those into HTML. POST handlers
//! either redirect (303) on success or re-render the page they came from.

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod genres;
pub mod health;
pub mod openapi;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

/// Renderable page payload
#[derive(Serialize, ToSchema)]
pub struct Page<T>
where
    T: for<'a> ToSchema<'a>,
{
    /// Template the front-end should render
    pub view: &'static str,
    /// Page title
    pub title: String,
    /// Template context
    pub context: T,
}

impl<T> Page<T>
where
    T: Serialize + for<'a> ToSchema<'a>,
{
    pub fn new(view: &'static str, title: impl Into<String>, context: T) -> Self {
        Self {
            view,
            title: title.into(),
            context,
        }
    }

    /// Render with 200
    pub fn render(self) -> Response {
        Json(self).into_response()
    }

    /// Re-render after failed validation: same page body, 422 status so
    /// consumers can tell the outcome apart without parsing the context
    pub fn render_invalid(self) -> Response {
        (StatusCode::UNPROCESSABLE_ENTITY, Json(self)).into_response()
    }
}

/// Redirect after a successful POST; 303 so the follow-up is always a GET
pub fn see_other(path: &str) -> Response {
    Redirect::to(path).into_response()
}
