//! Author endpoints

use axum::{
    extract::{Form, Path, State},
    response::Response,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{
        author::{AuthorView, CreateAuthor},
        book::BookView,
    },
    services::authors::AuthorDeletion,
    validation::{DateField, FieldError, TextField},
};

use super::{see_other, Page};

/// Raw author form submission
#[derive(Debug, Deserialize, ToSchema)]
pub struct AuthorFormData {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub family_name: String,
    #[serde(default)]
    pub date_of_birth: String,
    #[serde(default)]
    pub date_of_death: String,
}

/// Raw author delete confirmation submission
#[derive(Debug, Deserialize, ToSchema)]
pub struct AuthorDeleteFormData {
    pub authorid: i32,
}

/// Submitted values echoed back into a re-rendered form
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthorFormValues {
    pub id: Option<i32>,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: String,
    pub date_of_death: String,
}

#[derive(Serialize, ToSchema)]
pub struct AuthorListContext {
    pub author_list: Vec<AuthorView>,
}

#[derive(Serialize, ToSchema)]
pub struct AuthorDetailContext {
    pub author: AuthorView,
    pub author_books: Vec<BookView>,
}

#[derive(Serialize, ToSchema)]
pub struct AuthorFormContext {
    pub author: Option<AuthorFormValues>,
    pub errors: Vec<FieldError>,
}

#[derive(Serialize, ToSchema)]
pub struct AuthorDeleteContext {
    pub author: AuthorView,
    pub author_books: Vec<BookView>,
}

/// Sanitized form output: the candidate payload plus the values to echo back
struct ValidatedAuthor {
    payload: Option<CreateAuthor>,
    values: AuthorFormValues,
    errors: Vec<FieldError>,
}

fn validate_author(id: Option<i32>, form: &AuthorFormData) -> ValidatedAuthor {
    let mut errors = Vec::new();
    let first_name =
        TextField::required("first_name", "First name must be specified").apply(&form.first_name, &mut errors);
    let family_name =
        TextField::required("family_name", "Family name must be specified").apply(&form.family_name, &mut errors);
    let date_of_birth: Option<NaiveDate> =
        DateField::new("date_of_birth", "Invalid date of birth").apply(&form.date_of_birth, &mut errors);
    let date_of_death: Option<NaiveDate> =
        DateField::new("date_of_death", "Invalid date of death").apply(&form.date_of_death, &mut errors);

    let values = AuthorFormValues {
        id,
        first_name: first_name.clone(),
        family_name: family_name.clone(),
        date_of_birth: form.date_of_birth.trim().to_string(),
        date_of_death: form.date_of_death.trim().to_string(),
    };
    let payload = errors.is_empty().then_some(CreateAuthor {
        first_name,
        family_name,
        date_of_birth,
        date_of_death,
    });
    ValidatedAuthor {
        payload,
        values,
        errors,
    }
}

/// List all authors
#[utoipa::path(
    get,
    path = "/catalog/authors",
    tag = "authors",
    responses(
        (status = 200, description = "Author list page", body = Page<AuthorListContext>)
    )
)]
pub async fn list_authors(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Page<AuthorListContext>>> {
    let author_list = state.services.authors.list().await?;
    Ok(Json(Page::new(
        "author_list",
        "Author List",
        AuthorListContext { author_list },
    )))
}

/// Author detail with their books
#[utoipa::path(
    get,
    path = "/catalog/author/{id}",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Author detail page", body = Page<AuthorDetailContext>),
        (status = 404, description = "Author not found")
    )
)]
pub async fn author_detail(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Page<AuthorDetailContext>>> {
    let (author, author_books) = state.services.authors.detail(id).await?;
    Ok(Json(Page::new(
        "author_detail",
        "Author Detail",
        AuthorDetailContext {
            author,
            author_books,
        },
    )))
}

/// Empty author create form
#[utoipa::path(
    get,
    path = "/catalog/author/create",
    tag = "authors",
    responses(
        (status = 200, description = "Author form page", body = Page<AuthorFormContext>)
    )
)]
pub async fn author_create_form() -> Json<Page<AuthorFormContext>> {
    Json(Page::new(
        "author_form",
        "Create Author",
        AuthorFormContext {
            author: None,
            errors: vec![],
        },
    ))
}

/// Create an author
#[utoipa::path(
    post,
    path = "/catalog/author/create",
    tag = "authors",
    responses(
        (status = 303, description = "Redirect to the author detail page"),
        (status = 422, description = "Validation failed, form re-rendered", body = Page<AuthorFormContext>)
    )
)]
pub async fn author_create(
    State(state): State<crate::AppState>,
    Form(form): Form<AuthorFormData>,
) -> AppResult<Response> {
    let validated = validate_author(None, &form);
    match validated.payload {
        None => Ok(Page::new(
            "author_form",
            "Create Author",
            AuthorFormContext {
                author: Some(validated.values),
                errors: validated.errors,
            },
        )
        .render_invalid()),
        Some(payload) => {
            let author = state.services.authors.create(payload).await?;
            Ok(see_other(&author.url()))
        }
    }
}

/// Pre-filled author update form
#[utoipa::path(
    get,
    path = "/catalog/author/{id}/update",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Author form page", body = Page<AuthorFormContext>),
        (status = 404, description = "Author not found")
    )
)]
pub async fn author_update_form(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Page<AuthorFormContext>>> {
    let author = state.services.authors.get(id).await?;
    let iso = |d: Option<NaiveDate>| d.map(|d| d.to_string()).unwrap_or_default();
    Ok(Json(Page::new(
        "author_form",
        "Update Author",
        AuthorFormContext {
            author: Some(AuthorFormValues {
                id: Some(author.id),
                date_of_birth: iso(author.date_of_birth),
                date_of_death: iso(author.date_of_death),
                first_name: author.first_name,
                family_name: author.family_name,
            }),
            errors: vec![],
        },
    )))
}

/// Replace an author by ID
#[utoipa::path(
    post,
    path = "/catalog/author/{id}/update",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 303, description = "Redirect to the author detail page"),
        (status = 404, description = "Author not found"),
        (status = 422, description = "Validation failed, form re-rendered", body = Page<AuthorFormContext>)
    )
)]
pub async fn author_update(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Form(form): Form<AuthorFormData>,
) -> AppResult<Response> {
    let validated = validate_author(Some(id), &form);
    match validated.payload {
        None => Ok(Page::new(
            "author_form",
            "Update Author",
            AuthorFormContext {
                author: Some(validated.values),
                errors: validated.errors,
            },
        )
        .render_invalid()),
        Some(payload) => {
            let author = state.services.authors.replace(id, payload).await?;
            Ok(see_other(&author.url()))
        }
    }
}

/// Author delete confirmation with their dependent books
#[utoipa::path(
    get,
    path = "/catalog/author/{id}/delete",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Delete confirmation page", body = Page<AuthorDeleteContext>),
        (status = 404, description = "Author not found")
    )
)]
pub async fn author_delete_form(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Page<AuthorDeleteContext>>> {
    let (author, author_books) = state.services.authors.detail(id).await?;
    Ok(Json(Page::new(
        "author_delete",
        "Delete Author",
        AuthorDeleteContext {
            author,
            author_books,
        },
    )))
}

/// Delete an author unless books still reference them
#[utoipa::path(
    post,
    path = "/catalog/author/{id}/delete",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 303, description = "Redirect to the author list"),
        (status = 200, description = "Dependent books exist, confirmation re-rendered", body = Page<AuthorDeleteContext>),
        (status = 404, description = "Author not found")
    )
)]
pub async fn author_delete(
    State(state): State<crate::AppState>,
    Path(_id): Path<i32>,
    Form(form): Form<AuthorDeleteFormData>,
) -> AppResult<Response> {
    match state.services.authors.delete(form.authorid).await? {
        AuthorDeletion::Deleted => Ok(see_other("/catalog/authors")),
        AuthorDeletion::HasBooks(author, author_books) => Ok(Page::new(
            "author_delete",
            "Delete Author",
            AuthorDeleteContext {
                author,
                author_books,
            },
        )
        .render()),
    }
}
