use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::{debug, instrument};
use utoipa::IntoParams;

use crate::error::AppError;
use crate::gateway;
use crate::schemas::{AppState, ErrorResponse, PageResponse};
use crate::session;
use crate::views::{PageView, VIEW_LANDING, VIEW_PROFILE};

/// Notice shown on the dashboard after a loan request was stored.
pub const LOAN_SAVED_MESSAGE: &str = "Loan request saved successfully.";

/// Query parameters for the dashboard
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LandingQuery {
    /// Set to `true` after a loan submission
    pub success: Option<String>,
}

/// Dashboard for logged-in members
#[utoipa::path(
    get,
    path = "/landing",
    tag = "members",
    params(LandingQuery),
    responses(
        (status = 200, description = "Landing view", body = PageResponse),
        (status = 303, description = "Not logged in, redirect to /login"),
        (status = 404, description = "Session user no longer exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, session))]
pub async fn landing(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<LandingQuery>,
) -> Result<Response, AppError> {
    let Some(user_id) = session::current_user_id(&session).await? else {
        debug!("No session, redirecting to login");
        return Ok(Redirect::to("/login").into_response());
    };

    let user = gateway::require_user(&state.db, user_id).await?;

    let mut page = PageView::new(VIEW_LANDING).with_user(user);
    if query.success.as_deref() == Some("true") {
        page = page.with_message(LOAN_SAVED_MESSAGE);
    }

    Ok(page.render().into_response())
}

/// Member profile
#[utoipa::path(
    get,
    path = "/profil",
    tag = "members",
    responses(
        (status = 200, description = "Profile view", body = PageResponse),
        (status = 303, description = "Not logged in, redirect to /login"),
        (status = 404, description = "Session user no longer exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip_all)]
pub async fn profile(
    State(state): State<AppState>,
    session: Session,
) -> Result<Response, AppError> {
    let Some(user_id) = session::current_user_id(&session).await? else {
        debug!("No session, redirecting to login");
        return Ok(Redirect::to("/login").into_response());
    };

    let user = gateway::require_user(&state.db, user_id).await?;

    Ok(PageView::new(VIEW_PROFILE).with_user(user).render().into_response())
}
