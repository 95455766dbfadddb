//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{authors, book_instances, books, genres, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalog API",
        version = "1.0.0",
        description = "Book catalog CRUD backend",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Home
        books::index,
        // Books
        books::list_books,
        books::book_detail,
        books::book_create_form,
        books::book_create,
        books::book_update_form,
        books::book_update,
        books::book_delete_form,
        books::book_delete,
        // Authors
        authors::list_authors,
        authors::author_detail,
        authors::author_create_form,
        authors::author_create,
        authors::author_update_form,
        authors::author_update,
        authors::author_delete_form,
        authors::author_delete,
        // Genres
        genres::list_genres,
        genres::genre_detail,
        genres::genre_create_form,
        genres::genre_create,
        genres::genre_update_form,
        genres::genre_update,
        genres::genre_delete_form,
        genres::genre_delete,
        // Book instances
        book_instances::list_book_instances,
        book_instances::book_instance_detail,
        book_instances::book_instance_create_form,
        book_instances::book_instance_create,
        book_instances::book_instance_update_form,
        book_instances::book_instance_update,
        book_instances::book_instance_delete_form,
        book_instances::book_instance_delete,
    ),
    components(
        schemas(
            // Models
            crate::models::book::Book,
            crate::models::book::BookView,
            crate::models::author::Author,
            crate::models::author::AuthorView,
            crate::models::genre::Genre,
            crate::models::genre::GenreView,
            crate::models::book_instance::BookInstance,
            crate::models::book_instance::BookInstanceView,
            crate::models::book_instance::InstanceStatus,
            // Books
            books::IndexContext,
            books::BookListContext,
            books::BookDetailContext,
            books::BookFormContext,
            books::BookFormValues,
            books::BookDeleteContext,
            books::GenreOption,
            // Authors
            authors::AuthorListContext,
            authors::AuthorDetailContext,
            authors::AuthorFormContext,
            authors::AuthorFormValues,
            authors::AuthorDeleteContext,
            // Genres
            genres::GenreListContext,
            genres::GenreDetailContext,
            genres::GenreFormContext,
            genres::GenreFormValues,
            genres::GenreDeleteContext,
            // Book instances
            book_instances::BookInstanceListContext,
            book_instances::BookInstanceDetailContext,
            book_instances::BookInstanceFormContext,
            book_instances::BookInstanceFormValues,
            book_instances::BookInstanceDeleteContext,
            // Services
            crate::services::books::CatalogCounts,
            // Validation
            crate::validation::FieldError,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "books", description = "Book management"),
        (name = "authors", description = "Author management"),
        (name = "genres", description = "Genre management"),
        (name = "bookinstances", description = "Physical copy management")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
