//! Catalog server - CRUD backend for a small library catalog

use axum::{routing::get, Router};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use catalog_server::{api, config::AppConfig, repository::Repository, services::Services, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("catalog_server={},tower_http=debug", config.logging.level).into()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting catalog server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(repository);

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let catalog = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Home
        .route("/catalog", get(api::books::index))
        // Books
        .route("/catalog/books", get(api::books::list_books))
        .route(
            "/catalog/book/create",
            get(api::books::book_create_form).post(api::books::book_create),
        )
        .route("/catalog/book/:id", get(api::books::book_detail))
        .route(
            "/catalog/book/:id/update",
            get(api::books::book_update_form).post(api::books::book_update),
        )
        .route(
            "/catalog/book/:id/delete",
            get(api::books::book_delete_form).post(api::books::book_delete),
        )
        // Authors
        .route("/catalog/authors", get(api::authors::list_authors))
        .route(
            "/catalog/author/create",
            get(api::authors::author_create_form).post(api::authors::author_create),
        )
        .route("/catalog/author/:id", get(api::authors::author_detail))
        .route(
            "/catalog/author/:id/update",
            get(api::authors::author_update_form).post(api::authors::author_update),
        )
        .route(
            "/catalog/author/:id/delete",
            get(api::authors::author_delete_form).post(api::authors::author_delete),
        )
        // Genres
        .route("/catalog/genres", get(api::genres::list_genres))
        .route(
            "/catalog/genre/create",
            get(api::genres::genre_create_form).post(api::genres::genre_create),
        )
        .route("/catalog/genre/:id", get(api::genres::genre_detail))
        .route(
            "/catalog/genre/:id/update",
            get(api::genres::genre_update_form).post(api::genres::genre_update),
        )
        .route(
            "/catalog/genre/:id/delete",
            get(api::genres::genre_delete_form).post(api::genres::genre_delete),
        )
        // Book instances
        .route(
            "/catalog/bookinstances",
            get(api::book_instances::list_book_instances),
        )
        .route(
            "/catalog/bookinstance/create",
            get(api::book_instances::book_instance_create_form)
                .post(api::book_instances::book_instance_create),
        )
        .route(
            "/catalog/bookinstance/:id",
            get(api::book_instances::book_instance_detail),
        )
        .route(
            "/catalog/bookinstance/:id/update",
            get(api::book_instances::book_instance_update_form)
                .post(api::book_instances::book_instance_update),
        )
        .route(
            "/catalog/bookinstance/:id/delete",
            get(api::book_instances::book_instance_delete_form)
                .post(api::book_instances::book_instance_delete),
        )
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .merge(catalog)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
