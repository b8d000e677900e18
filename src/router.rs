use crate::handlers::{
    auth::{login, logout},
    health::health_check,
    loans::{loan_page, submit_loan},
    members::{landing, profile},
    pages::{index, login_page, register_page},
    registration::register,
};
use crate::schemas::{ApiDoc, AppState};
use crate::session::session_layer;
use crate::uploads::PUBLIC_PREFIX;
use axum::{extract::DefaultBodyLimit, routing::get, Router};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, services::ServeDir, timeout::TimeoutLayer, trace::TraceLayer,
};
use tower_sessions::{MemoryStore, SessionStore};
use tracing::debug;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware.
///
/// Sessions live in memory and are lost on restart.
pub fn create_router(state: AppState) -> Router {
    create_router_with_store(state, MemoryStore::default())
}

/// Same as [`create_router`] with sessions kept in `store`.
pub fn create_router_with_store<S>(state: AppState, store: S) -> Router
where
    S: SessionStore + Clone,
{
    let settings = state.settings.clone();
    debug!(
        "Serving uploads from {} under {}",
        settings.upload_dir.display(),
        PUBLIC_PREFIX
    );

    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Public views
        .route("/", get(index))
        .route("/login", get(login_page).post(login))
        .route("/daftar", get(register_page).post(register))
        // Member views
        .route("/landing", get(landing))
        .route("/profil", get(profile))
        .route("/logout", get(logout))
        // Loan requests
        .route("/peminjaman", get(loan_page).post(submit_loan))
        // Uploaded photos
        .nest_service(PUBLIC_PREFIX, ServeDir::new(&settings.upload_dir))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(DefaultBodyLimit::max(settings.max_upload_bytes))
        .layer(session_layer(store, &settings))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30))),
        )
        .with_state(state)
}
