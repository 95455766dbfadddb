//! Book endpoints and the catalog home page

use axum::{
    extract::{Path, State},
    response::Response,
    Json,
};
use axum_extra::extract::Form;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{
        author::AuthorView,
        book::{BookView, CreateBook},
        book_instance::BookInstanceView,
        genre::GenreView,
    },
    services::books::{BookDeletion, CatalogCounts},
    validation::{FieldError, ReferenceField, TextField},
};

use super::{see_other, Page};

/// Raw book form submission; `genre` arrives as repeated checkbox values
#[derive(Debug, Deserialize, ToSchema)]
pub struct BookFormData {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub isbn: String,
    #[serde(default)]
    pub genre: Vec<String>,
}

/// Raw book delete confirmation submission
#[derive(Debug, Deserialize, ToSchema)]
pub struct BookDeleteFormData {
    pub bookid: i32,
}

/// Submitted values echoed back into a re-rendered form
#[derive(Debug, Serialize, ToSchema)]
pub struct BookFormValues {
    pub id: Option<i32>,
    pub title: String,
    pub author_id: Option<i32>,
    pub summary: String,
    pub isbn: String,
}

/// Genre checkbox option, marked when the candidate book carries it
#[derive(Debug, Serialize, ToSchema)]
pub struct GenreOption {
    pub id: i32,
    pub name: String,
    pub checked: bool,
}

#[derive(Serialize, ToSchema)]
pub struct IndexContext {
    pub data: CatalogCounts,
}

#[derive(Serialize, ToSchema)]
pub struct BookListContext {
    pub book_list: Vec<BookView>,
}

#[derive(Serialize, ToSchema)]
pub struct BookDetailContext {
    pub book: BookView,
    pub book_instances: Vec<BookInstanceView>,
}

#[derive(Serialize, ToSchema)]
pub struct BookFormContext {
    pub book: Option<BookFormValues>,
    pub authors: Vec<AuthorView>,
    pub genres: Vec<GenreOption>,
    pub errors: Vec<FieldError>,
}

#[derive(Serialize, ToSchema)]
pub struct BookDeleteContext {
    pub book: BookView,
    pub book_instances: Vec<BookInstanceView>,
}

struct ValidatedBook {
    payload: Option<CreateBook>,
    values: BookFormValues,
    genre_ids: Vec<i32>,
    errors: Vec<FieldError>,
}

fn validate_book(id: Option<i32>, form: &BookFormData) -> ValidatedBook {
    let mut errors = Vec::new();
    let title = TextField::required("title", "Title must not be empty").apply(&form.title, &mut errors);
    let summary =
        TextField::required("summary", "Summary must not be empty").apply(&form.summary, &mut errors);
    let isbn = TextField::required("isbn", "ISBN must not be empty").apply(&form.isbn, &mut errors);
    let author_id =
        ReferenceField::new("author", "Author must be specified").apply(&form.author, &mut errors);

    // Checkbox values come from the app's own form; entries that fail to
    // parse as ids are dropped rather than reported
    let genre_ids: Vec<i32> = form
        .genre
        .iter()
        .filter_map(|g| g.trim().parse::<i32>().ok())
        .collect();

    let values = BookFormValues {
        id,
        title: title.clone(),
        author_id,
        summary: summary.clone(),
        isbn: isbn.clone(),
    };
    let payload = match (errors.is_empty(), author_id) {
        (true, Some(author_id)) => Some(CreateBook {
            title,
            author_id,
            summary,
            isbn,
            genre_ids: genre_ids.clone(),
        }),
        _ => None,
    };
    ValidatedBook {
        payload,
        values,
        genre_ids,
        errors,
    }
}

fn genre_options(genres: Vec<GenreView>, checked_ids: &[i32]) -> Vec<GenreOption> {
    genres
        .into_iter()
        .map(|g| GenreOption {
            checked: checked_ids.contains(&g.id),
            id: g.id,
            name: g.name,
        })
        .collect()
}

/// Catalog home page with record counts
#[utoipa::path(
    get,
    path = "/catalog",
    tag = "books",
    responses(
        (status = 200, description = "Home page with record counts", body = Page<IndexContext>)
    )
)]
pub async fn index(State(state): State<crate::AppState>) -> AppResult<Json<Page<IndexContext>>> {
    let data = state.services.books.index_counts().await?;
    Ok(Json(Page::new(
        "index",
        "Local Library Home",
        IndexContext { data },
    )))
}

/// List all books with their authors resolved
#[utoipa::path(
    get,
    path = "/catalog/books",
    tag = "books",
    responses(
        (status = 200, description = "Book list page", body = Page<BookListContext>)
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Page<BookListContext>>> {
    let book_list = state.services.books.list().await?;
    Ok(Json(Page::new(
        "book_list",
        "Book List",
        BookListContext { book_list },
    )))
}

/// Book detail with author, genres and copies resolved
#[utoipa::path(
    get,
    path = "/catalog/book/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book detail page", body = Page<BookDetailContext>),
        (status = 404, description = "Book not found")
    )
)]
pub async fn book_detail(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Page<BookDetailContext>>> {
    let (book, book_instances) = state.services.books.detail(id).await?;
    Ok(Json(Page::new(
        "book_detail",
        book.title.clone(),
        BookDetailContext {
            book,
            book_instances,
        },
    )))
}

/// Empty book create form, preloaded with author and genre options
#[utoipa::path(
    get,
    path = "/catalog/book/create",
    tag = "books",
    responses(
        (status = 200, description = "Book form page", body = Page<BookFormContext>)
    )
)]
pub async fn book_create_form(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Page<BookFormContext>>> {
    let (authors, genres) = state.services.books.form_options().await?;
    Ok(Json(Page::new(
        "book_form",
        "Create Book",
        BookFormContext {
            book: None,
            authors,
            genres: genre_options(genres, &[]),
            errors: vec![],
        },
    )))
}

/// Create a book
#[utoipa::path(
    post,
    path = "/catalog/book/create",
    tag = "books",
    responses(
        (status = 303, description = "Redirect to the book detail page"),
        (status = 422, description = "Validation failed, form re-rendered", body = Page<BookFormContext>)
    )
)]
pub async fn book_create(
    State(state): State<crate::AppState>,
    Form(form): Form<BookFormData>,
) -> AppResult<Response> {
    let validated = validate_book(None, &form);
    match validated.payload {
        None => {
            // Reload the reference options so the form can re-render with
            // the submitted genres still checked
            let (authors, genres) = state.services.books.form_options().await?;
            Ok(Page::new(
                "book_form",
                "Create Book",
                BookFormContext {
                    book: Some(validated.values),
                    authors,
                    genres: genre_options(genres, &validated.genre_ids),
                    errors: validated.errors,
                },
            )
            .render_invalid())
        }
        Some(payload) => {
            let book = state.services.books.create(payload).await?;
            Ok(see_other(&book.url()))
        }
    }
}

/// Pre-filled book update form
#[utoipa::path(
    get,
    path = "/catalog/book/{id}/update",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book form page", body = Page<BookFormContext>),
        (status = 404, description = "Book not found")
    )
)]
pub async fn book_update_form(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Page<BookFormContext>>> {
    let (book, authors, genres) = state.services.books.update_view(id).await?;
    let checked_ids: Vec<i32> = book.genres.iter().map(|g| g.id).collect();
    Ok(Json(Page::new(
        "book_form",
        "Update Book",
        BookFormContext {
            book: Some(BookFormValues {
                id: Some(book.id),
                author_id: book.author.as_ref().map(|a| a.id),
                title: book.title,
                summary: book.summary,
                isbn: book.isbn,
            }),
            authors,
            genres: genre_options(genres, &checked_ids),
            errors: vec![],
        },
    )))
}

/// Replace a book by ID
#[utoipa::path(
    post,
    path = "/catalog/book/{id}/update",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 303, description = "Redirect to the book detail page"),
        (status = 404, description = "Book not found"),
        (status = 422, description = "Validation failed, form re-rendered", body = Page<BookFormContext>)
    )
)]
pub async fn book_update(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Form(form): Form<BookFormData>,
) -> AppResult<Response> {
    let validated = validate_book(Some(id), &form);
    match validated.payload {
        None => {
            let (authors, genres) = state.services.books.form_options().await?;
            Ok(Page::new(
                "book_form",
                "Update Book",
                BookFormContext {
                    book: Some(validated.values),
                    authors,
                    genres: genre_options(genres, &validated.genre_ids),
                    errors: validated.errors,
                },
            )
            .render_invalid())
        }
        Some(payload) => {
            let book = state.services.books.replace(id, payload).await?;
            Ok(see_other(&book.url()))
        }
    }
}

/// Book delete confirmation with its dependent copies
#[utoipa::path(
    get,
    path = "/catalog/book/{id}/delete",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Delete confirmation page", body = Page<BookDeleteContext>),
        (status = 404, description = "Book not found")
    )
)]
pub async fn book_delete_form(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Page<BookDeleteContext>>> {
    let (book, book_instances) = state.services.books.detail(id).await?;
    Ok(Json(Page::new(
        "book_delete",
        "Delete Book",
        BookDeleteContext {
            book,
            book_instances,
        },
    )))
}

/// Delete a book unless copies still reference it
#[utoipa::path(
    post,
    path = "/catalog/book/{id}/delete",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 303, description = "Redirect to the book list"),
        (status = 200, description = "Dependent copies exist, confirmation re-rendered", body = Page<BookDeleteContext>),
        (status = 404, description = "Book not found")
    )
)]
pub async fn book_delete(
    State(state): State<crate::AppState>,
    Path(_id): Path<i32>,
    Form(form): Form<BookDeleteFormData>,
) -> AppResult<Response> {
    match state.services.books.delete(form.bookid).await? {
        BookDeletion::Deleted => Ok(see_other("/catalog/books")),
        BookDeletion::HasCopies(book, book_instances) => Ok(Page::new(
            "book_delete",
            "Delete Book",
            BookDeleteContext {
                book,
                book_instances,
            },
        )
        .render()),
    }
}
