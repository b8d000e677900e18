use axum::response::Json;
use tracing::instrument;

use crate::schemas::{ApiResponse, PageResponse};
use crate::views::{PageView, VIEW_INDEX, VIEW_LOGIN, VIEW_REGISTER};

/// Landing page for visitors
#[utoipa::path(
    get,
    path = "/",
    tag = "pages",
    responses(
        (status = 200, description = "Index view", body = PageResponse)
    )
)]
#[instrument]
pub async fn index() -> Json<ApiResponse<PageView>> {
    PageView::new(VIEW_INDEX).render()
}

/// Login form
#[utoipa::path(
    get,
    path = "/login",
    tag = "pages",
    responses(
        (status = 200, description = "Login view", body = PageResponse)
    )
)]
#[instrument]
pub async fn login_page() -> Json<ApiResponse<PageView>> {
    PageView::new(VIEW_LOGIN).render()
}

/// Registration form
#[utoipa::path(
    get,
    path = "/daftar",
    tag = "pages",
    responses(
        (status = 200, description = "Registration view", body = PageResponse)
    )
)]
#[instrument]
pub async fn register_page() -> Json<ApiResponse<PageView>> {
    PageView::new(VIEW_REGISTER).render()
}
