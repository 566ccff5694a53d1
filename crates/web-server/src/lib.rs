use axum::{
    Router,
    extract::DefaultBodyLimit,
    response::Redirect,
    routing::{get, post},
};
use configuration::{DatabaseSettings, StorageBackend, settings::Config};
use database::{DbError, DbRepository, InMemoryRepository, StudentStore};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod error;
pub mod handlers;
pub mod views;

use views::Views;

/// The shared application state that all handlers can access.
pub struct AppState {
    pub store: Arc<dyn StudentStore>,
    pub views: Views,
}

impl AppState {
    pub fn new(store: Arc<dyn StudentStore>) -> Result<Self, handlebars::TemplateError> {
        Ok(Self {
            store,
            views: Views::new()?,
        })
    }
}

/// Opens the store selected by `settings.backend`.
///
/// For PostgreSQL this connects the pool and applies the bundled migrations.
pub async fn open_store(settings: &DatabaseSettings) -> Result<Arc<dyn StudentStore>, DbError> {
    match settings.backend {
        StorageBackend::Memory => {
            tracing::warn!("Using the in-memory store; records will be lost on shutdown.");
            Ok(Arc::new(InMemoryRepository::new()))
        }
        StorageBackend::Postgres => {
            let url = settings.url.as_deref().ok_or_else(|| {
                DbError::ConnectionConfigError("DATABASE_URL must be set.".to_string())
            })?;
            let db_pool =
                database::connect(url, settings.max_connections, settings.acquire_timeout()).await?;
            database::run_migrations(&db_pool).await?;
            Ok(Arc::new(DbRepository::new(db_pool)))
        }
    }
}

/// Builds the application router over the given state.
pub fn build_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::to(handlers::LIST_PATH) }))
        .route("/api/health", get(|| async { "OK" }))
        .route("/Student/List", get(handlers::list_students))
        .route(
            "/Student/Create",
            get(handlers::show_create_form).post(handlers::create_student),
        )
        .route("/Student/Edit", post(handlers::update_student))
        .route("/Student/Edit/:id", get(handlers::show_edit_form))
        .route("/Student/Delete", post(handlers::delete_student))
        .route("/Student/Delete/:id", get(handlers::show_delete_confirmation))
        .with_state(app_state)
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(64 * 1024))
}

/// The main function to configure and run the web server.
///
/// Tracing must already be initialized by the caller.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let store = open_store(&config.database).await?;
    let app_state = Arc::new(AppState::new(store)?);
    let app = build_router(app_state);

    let addr = config.server.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Web server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Web server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for the shutdown signal.");
        std::future::pending::<()>().await;
    }
}
