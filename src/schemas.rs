use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};

use crate::config::AppSettings;
use crate::handlers::auth::LoginForm;
use crate::handlers::loans::{LoanForm, PeriodQuery};
use crate::handlers::registration::RegistrationRequest;
use crate::views::{LoanContext, MemberProfile, PageView};

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
    pub settings: Arc<AppSettings>,
}

/// API response wrapper
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[aliases(PageResponse = ApiResponse<PageView>)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success status
    pub success: bool,
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::pages::index,
        crate::handlers::pages::login_page,
        crate::handlers::pages::register_page,
        crate::handlers::auth::login,
        crate::handlers::auth::logout,
        crate::handlers::registration::register,
        crate::handlers::members::landing,
        crate::handlers::members::profile,
        crate::handlers::loans::loan_page,
        crate::handlers::loans::submit_loan,
    ),
    components(
        schemas(
            PageResponse,
            PageView,
            MemberProfile,
            LoanContext,
            ErrorResponse,
            HealthResponse,
            LoginForm,
            LoanForm,
            PeriodQuery,
            RegistrationRequest,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "pages", description = "Public views"),
        (name = "auth", description = "Login, logout and registration"),
        (name = "members", description = "Views for logged-in members"),
        (name = "loans", description = "Monthly loan requests"),
    ),
    info(
        title = "Koperasi API",
        description = "Cooperative membership and monthly loan request backend",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
