//! Book instance (physical copy) endpoints

use axum::{
    extract::{Form, Path, State},
    response::Response,
    Json,
};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{
        book::Book,
        book_instance::{BookInstanceView, CreateBookInstance, InstanceStatus},
    },
    validation::{DateField, FieldError, ReferenceField, TextField},
};

use super::{see_other, Page};

/// Raw copy form submission
#[derive(Debug, Deserialize, ToSchema)]
pub struct BookInstanceFormData {
    #[serde(default)]
    pub book: String,
    #[serde(default)]
    pub imprint: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub due_back: String,
}

/// Raw copy delete confirmation submission
#[derive(Debug, Deserialize, ToSchema)]
pub struct BookInstanceDeleteFormData {
    pub bookinstanceid: i32,
}

/// Submitted values echoed back into a re-rendered form
#[derive(Debug, Serialize, ToSchema)]
pub struct BookInstanceFormValues {
    pub id: Option<i32>,
    pub book_id: Option<i32>,
    pub imprint: String,
    pub status: InstanceStatus,
    pub due_back: String,
}

#[derive(Serialize, ToSchema)]
pub struct BookInstanceListContext {
    pub bookinstance_list: Vec<BookInstanceView>,
}

#[derive(Serialize, ToSchema)]
pub struct BookInstanceDetailContext {
    pub bookinstance: BookInstanceView,
}

#[derive(Serialize, ToSchema)]
pub struct BookInstanceFormContext {
    pub bookinstance: Option<BookInstanceFormValues>,
    pub book_list: Vec<Book>,
    pub errors: Vec<FieldError>,
}

#[derive(Serialize, ToSchema)]
pub struct BookInstanceDeleteContext {
    pub bookinstance: BookInstanceView,
}

struct ValidatedInstance {
    payload: Option<CreateBookInstance>,
    values: BookInstanceFormValues,
    errors: Vec<FieldError>,
}

fn validate_instance(id: Option<i32>, form: &BookInstanceFormData) -> ValidatedInstance {
    let mut errors = Vec::new();
    let book_id =
        ReferenceField::new("book", "Book must be specified").apply(&form.book, &mut errors);
    let imprint = TextField::required("imprint", "Imprint must be specified")
        .apply(&form.imprint, &mut errors);
    // Empty or unrecognized status falls back to the default
    let status = InstanceStatus::from(form.status.trim());
    let due_back = DateField::new("due_back", "Invalid date")
        .apply(&form.due_back, &mut errors)
        .map(|d| d.and_time(NaiveTime::MIN).and_utc());

    let values = BookInstanceFormValues {
        id,
        book_id,
        imprint: imprint.clone(),
        status,
        due_back: form.due_back.trim().to_string(),
    };
    let payload = match (errors.is_empty(), book_id) {
        (true, Some(book_id)) => Some(CreateBookInstance {
            book_id,
            imprint,
            status,
            due_back,
        }),
        _ => None,
    };
    ValidatedInstance {
        payload,
        values,
        errors,
    }
}

/// List all copies, sorted by status
#[utoipa::path(
    get,
    path = "/catalog/bookinstances",
    tag = "bookinstances",
    responses(
        (status = 200, description = "Copy list page", body = Page<BookInstanceListContext>)
    )
)]
pub async fn list_book_instances(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Page<BookInstanceListContext>>> {
    let bookinstance_list = state.services.book_instances.list().await?;
    Ok(Json(Page::new(
        "bookinstance_list",
        "Book Instance List",
        BookInstanceListContext { bookinstance_list },
    )))
}

/// Copy detail with its book resolved
#[utoipa::path(
    get,
    path = "/catalog/bookinstance/{id}",
    tag = "bookinstances",
    params(("id" = i32, Path, description = "Copy ID")),
    responses(
        (status = 200, description = "Copy detail page", body = Page<BookInstanceDetailContext>),
        (status = 404, description = "Copy not found")
    )
)]
pub async fn book_instance_detail(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Page<BookInstanceDetailContext>>> {
    let bookinstance = state.services.book_instances.detail(id).await?;
    let title = match &bookinstance.book {
        Some(book) => format!("Copy: {}", book.title),
        None => "Copy".to_string(),
    };
    Ok(Json(Page::new(
        "bookinstance_detail",
        title,
        BookInstanceDetailContext { bookinstance },
    )))
}

/// Empty copy create form, preloaded with the book titles
#[utoipa::path(
    get,
    path = "/catalog/bookinstance/create",
    tag = "bookinstances",
    responses(
        (status = 200, description = "Copy form page", body = Page<BookInstanceFormContext>)
    )
)]
pub async fn book_instance_create_form(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Page<BookInstanceFormContext>>> {
    let book_list = state.services.book_instances.form_books().await?;
    Ok(Json(Page::new(
        "bookinstance_form",
        "Create BookInstance",
        BookInstanceFormContext {
            bookinstance: None,
            book_list,
            errors: vec![],
        },
    )))
}

/// Create a copy; omitted status defaults to Maintenance and omitted
/// due date to the creation time
#[utoipa::path(
    post,
    path = "/catalog/bookinstance/create",
    tag = "bookinstances",
    responses(
        (status = 303, description = "Redirect to the copy detail page"),
        (status = 422, description = "Validation failed, form re-rendered", body = Page<BookInstanceFormContext>)
    )
)]
pub async fn book_instance_create(
    State(state): State<crate::AppState>,
    Form(form): Form<BookInstanceFormData>,
) -> AppResult<Response> {
    let validated = validate_instance(None, &form);
    match validated.payload {
        None => {
            let book_list = state.services.book_instances.form_books().await?;
            Ok(Page::new(
                "bookinstance_form",
                "Create BookInstance",
                BookInstanceFormContext {
                    bookinstance: Some(validated.values),
                    book_list,
                    errors: validated.errors,
                },
            )
            .render_invalid())
        }
        Some(payload) => {
            let instance = state.services.book_instances.create(payload).await?;
            Ok(see_other(&instance.url()))
        }
    }
}

/// Pre-filled copy update form
#[utoipa::path(
    get,
    path = "/catalog/bookinstance/{id}/update",
    tag = "bookinstances",
    params(("id" = i32, Path, description = "Copy ID")),
    responses(
        (status = 200, description = "Copy form page", body = Page<BookInstanceFormContext>),
        (status = 404, description = "Copy not found")
    )
)]
pub async fn book_instance_update_form(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Page<BookInstanceFormContext>>> {
    let instance = state.services.book_instances.detail(id).await?;
    let book_list = state.services.book_instances.form_books().await?;
    Ok(Json(Page::new(
        "bookinstance_form",
        "Update Book Instance",
        BookInstanceFormContext {
            bookinstance: Some(BookInstanceFormValues {
                id: Some(instance.id),
                book_id: instance.book.as_ref().map(|b| b.id),
                imprint: instance.imprint,
                status: instance.status,
                due_back: instance.due_back_yyyy_mm_dd,
            }),
            book_list,
            errors: vec![],
        },
    )))
}

/// Replace a copy by ID
#[utoipa::path(
    post,
    path = "/catalog/bookinstance/{id}/update",
    tag = "bookinstances",
    params(("id" = i32, Path, description = "Copy ID")),
    responses(
        (status = 303, description = "Redirect to the copy detail page"),
        (status = 404, description = "Copy not found"),
        (status = 422, description = "Validation failed, form re-rendered", body = Page<BookInstanceFormContext>)
    )
)]
pub async fn book_instance_update(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Form(form): Form<BookInstanceFormData>,
) -> AppResult<Response> {
    let validated = validate_instance(Some(id), &form);
    match validated.payload {
        None => {
            let book_list = state.services.book_instances.form_books().await?;
            Ok(Page::new(
                "bookinstance_form",
                "Update Book Instance",
                BookInstanceFormContext {
                    bookinstance: Some(validated.values),
                    book_list,
                    errors: validated.errors,
                },
            )
            .render_invalid())
        }
        Some(payload) => {
            let instance = state.services.book_instances.replace(id, payload).await?;
            Ok(see_other(&instance.url()))
        }
    }
}

/// Copy delete confirmation
#[utoipa::path(
    get,
    path = "/catalog/bookinstance/{id}/delete",
    tag = "bookinstances",
    params(("id" = i32, Path, description = "Copy ID")),
    responses(
        (status = 200, description = "Delete confirmation page", body = Page<BookInstanceDeleteContext>),
        (status = 404, description = "Copy not found")
    )
)]
pub async fn book_instance_delete_form(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Page<BookInstanceDeleteContext>>> {
    let bookinstance = state.services.book_instances.detail(id).await?;
    Ok(Json(Page::new(
        "bookinstance_delete",
        "Delete Book Instance",
        BookInstanceDeleteContext { bookinstance },
    )))
}

/// Delete a copy. Copies have no dependents, so deletion is unconditional.
#[utoipa::path(
    post,
    path = "/catalog/bookinstance/{id}/delete",
    tag = "bookinstances",
    params(("id" = i32, Path, description = "Copy ID")),
    responses(
        (status = 303, description = "Redirect to the copy list"),
        (status = 404, description = "Copy not found")
    )
)]
pub async fn book_instance_delete(
    State(state): State<crate::AppState>,
    Path(_id): Path<i32>,
    Form(form): Form<BookInstanceDeleteFormData>,
) -> AppResult<Response> {
    state
        .services
        .book_instances
        .delete(form.bookinstanceid)
        .await?;
    Ok(see_other("/catalog/bookinstances"))
}
