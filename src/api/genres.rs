//! Genre endpoints

use axum::{
    extract::{Form, Path, State},
    response::Response,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{
        book::BookView,
        genre::{CreateGenre, GenreView},
    },
    services::genres::{GenreDeletion, GenreSaved},
    validation::{FieldError, TextField},
};

use super::{see_other, Page};

fn name_rule() -> TextField {
    TextField::required("name", "Genre name required")
}

/// Raw genre form submission
#[derive(Debug, Deserialize, ToSchema)]
pub struct GenreFormData {
    #[serde(default)]
    pub name: String,
}

/// Raw genre delete confirmation submission
#[derive(Debug, Deserialize, ToSchema)]
pub struct GenreDeleteFormData {
    pub genreid: i32,
}

/// Submitted values echoed back into a re-rendered form
#[derive(Debug, Serialize, ToSchema)]
pub struct GenreFormValues {
    pub id: Option<i32>,
    pub name: String,
}

#[derive(Serialize, ToSchema)]
pub struct GenreListContext {
    pub genre_list: Vec<GenreView>,
}

#[derive(Serialize, ToSchema)]
pub struct GenreDetailContext {
    pub genre: GenreView,
    pub genre_books: Vec<BookView>,
}

#[derive(Serialize, ToSchema)]
pub struct GenreFormContext {
    pub genre: Option<GenreFormValues>,
    pub errors: Vec<FieldError>,
}

#[derive(Serialize, ToSchema)]
pub struct GenreDeleteContext {
    pub genre: GenreView,
    pub genre_books: Vec<BookView>,
}

/// List all genres
#[utoipa::path(
    get,
    path = "/catalog/genres",
    tag = "genres",
    responses(
        (status = 200, description = "Genre list page", body = Page<GenreListContext>)
    )
)]
pub async fn list_genres(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Page<GenreListContext>>> {
    let genre_list = state.services.genres.list().await?;
    Ok(Json(Page::new(
        "genre_list",
        "Genre List",
        GenreListContext { genre_list },
    )))
}

/// Genre detail with its books
#[utoipa::path(
    get,
    path = "/catalog/genre/{id}",
    tag = "genres",
    params(("id" = i32, Path, description = "Genre ID")),
    responses(
        (status = 200, description = "Genre detail page", body = Page<GenreDetailContext>),
        (status = 404, description = "Genre not found")
    )
)]
pub async fn genre_detail(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Page<GenreDetailContext>>> {
    let (genre, genre_books) = state.services.genres.detail(id).await?;
    Ok(Json(Page::new(
        "genre_detail",
        "Genre Detail",
        GenreDetailContext { genre, genre_books },
    )))
}

/// Empty genre create form
#[utoipa::path(
    get,
    path = "/catalog/genre/create",
    tag = "genres",
    responses(
        (status = 200, description = "Genre form page", body = Page<GenreFormContext>)
    )
)]
pub async fn genre_create_form() -> Json<Page<GenreFormContext>> {
    Json(Page::new(
        "genre_form",
        "Create Genre",
        GenreFormContext {
            genre: None,
            errors: vec![],
        },
    ))
}

/// Create a genre; a same-name genre (case-insensitive) resolves to a
/// redirect to the existing record instead of a duplicate
#[utoipa::path(
    post,
    path = "/catalog/genre/create",
    tag = "genres",
    responses(
        (status = 303, description = "Redirect to the genre detail page"),
        (status = 422, description = "Validation failed, form re-rendered", body = Page<GenreFormContext>)
    )
)]
pub async fn genre_create(
    State(state): State<crate::AppState>,
    Form(form): Form<GenreFormData>,
) -> AppResult<Response> {
    let mut errors = Vec::new();
    let name = name_rule().apply(&form.name, &mut errors);

    if !errors.is_empty() {
        return Ok(Page::new(
            "genre_form",
            "Create Genre",
            GenreFormContext {
                genre: Some(GenreFormValues { id: None, name }),
                errors,
            },
        )
        .render_invalid());
    }

    let saved = state.services.genres.create(CreateGenre { name }).await?;
    let genre = match saved {
        GenreSaved::Created(genre) | GenreSaved::Existing(genre) => genre,
    };
    Ok(see_other(&genre.url()))
}

/// Pre-filled genre update form
#[utoipa::path(
    get,
    path = "/catalog/genre/{id}/update",
    tag = "genres",
    params(("id" = i32, Path, description = "Genre ID")),
    responses(
        (status = 200, description = "Genre form page", body = Page<GenreFormContext>),
        (status = 404, description = "Genre not found")
    )
)]
pub async fn genre_update_form(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Page<GenreFormContext>>> {
    let genre = state.services.genres.get(id).await?;
    Ok(Json(Page::new(
        "genre_form",
        "Update Genre",
        GenreFormContext {
            genre: Some(GenreFormValues {
                id: Some(genre.id),
                name: genre.name,
            }),
            errors: vec![],
        },
    )))
}

/// Replace a genre by ID
#[utoipa::path(
    post,
    path = "/catalog/genre/{id}/update",
    tag = "genres",
    params(("id" = i32, Path, description = "Genre ID")),
    responses(
        (status = 303, description = "Redirect to the genre detail page"),
        (status = 404, description = "Genre not found"),
        (status = 422, description = "Validation failed, form re-rendered", body = Page<GenreFormContext>)
    )
)]
pub async fn genre_update(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Form(form): Form<GenreFormData>,
) -> AppResult<Response> {
    let mut errors = Vec::new();
    let name = name_rule().apply(&form.name, &mut errors);

    if !errors.is_empty() {
        // The identifier stays on the re-rendered form so resubmission
        // still addresses the same record
        return Ok(Page::new(
            "genre_form",
            "Update Genre",
            GenreFormContext {
                genre: Some(GenreFormValues { id: Some(id), name }),
                errors,
            },
        )
        .render_invalid());
    }

    let genre = state
        .services
        .genres
        .replace(id, CreateGenre { name })
        .await?;
    Ok(see_other(&genre.url()))
}

/// Genre delete confirmation with its dependent books
#[utoipa::path(
    get,
    path = "/catalog/genre/{id}/delete",
    tag = "genres",
    params(("id" = i32, Path, description = "Genre ID")),
    responses(
        (status = 200, description = "Delete confirmation page", body = Page<GenreDeleteContext>),
        (status = 404, description = "Genre not found")
    )
)]
pub async fn genre_delete_form(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Page<GenreDeleteContext>>> {
    let (genre, genre_books) = state.services.genres.detail(id).await?;
    Ok(Json(Page::new(
        "genre_delete",
        "Delete Genre",
        GenreDeleteContext { genre, genre_books },
    )))
}

/// Delete a genre unless books still reference it; dependents re-render
/// the confirmation page instead
#[utoipa::path(
    post,
    path = "/catalog/genre/{id}/delete",
    tag = "genres",
    params(("id" = i32, Path, description = "Genre ID")),
    responses(
        (status = 303, description = "Redirect to the genre list"),
        (status = 200, description = "Dependent books exist, confirmation re-rendered", body = Page<GenreDeleteContext>),
        (status = 404, description = "Genre not found")
    )
)]
pub async fn genre_delete(
    State(state): State<crate::AppState>,
    Path(_id): Path<i32>,
    Form(form): Form<GenreDeleteFormData>,
) -> AppResult<Response> {
    match state.services.genres.delete(form.genreid).await? {
        GenreDeletion::Deleted => Ok(see_other("/catalog/genres")),
        GenreDeletion::HasBooks(genre, genre_books) => Ok(Page::new(
            "genre_delete",
            "Delete Genre",
            GenreDeleteContext { genre, genre_books },
        )
        .render()),
    }
}
