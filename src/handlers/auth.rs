use axum::{
    extract::State,
    response::Redirect,
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::{debug, info, instrument, trace, warn};
use utoipa::ToSchema;

use crate::error::AppError;
use crate::extract::FormOrJson;
use crate::gateway;
use crate::password;
use crate::schemas::{AppState, ErrorResponse};
use crate::session;

/// Login body, as a form or JSON
#[derive(Deserialize, Serialize, ToSchema)]
pub struct LoginForm {
    #[serde(default)]
    pub nama: String,
    #[serde(default)]
    pub password: String,
}

/// Check credentials and start a session
#[utoipa::path(
    post,
    path = "/login",
    tag = "auth",
    request_body(content = LoginForm, description = "Also accepted as application/json", content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Logged in, redirect to /landing"),
        (status = 401, description = "Name or password is wrong", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    FormOrJson(form): FormOrJson<LoginForm>,
) -> Result<Redirect, AppError> {
    trace!("Entering login function");
    debug!("Login attempt for {}", form.nama);

    let candidates = gateway::find_users_by_name(&state.db, &form.nama).await?;

    let mut matched = None;
    for candidate in candidates {
        if password::verify_password(form.password.clone(), candidate.password.clone()).await? {
            matched = Some(candidate);
            break;
        }
    }

    let Some(user) = matched else {
        warn!("Login failed for '{}'", form.nama);
        return Err(AppError::InvalidCredentials);
    };

    session::establish(&session, user.id).await?;
    info!("User {} logged in", user.id);

    Ok(Redirect::to("/landing"))
}

/// End the session
#[utoipa::path(
    get,
    path = "/logout",
    tag = "auth",
    responses(
        (status = 303, description = "Session destroyed, redirect to /"),
        (status = 500, description = "Session store failure", body = ErrorResponse)
    )
)]
#[instrument(skip_all)]
pub async fn logout(session: Session) -> Result<Redirect, AppError> {
    let user_id = session::current_user_id(&session).await?;
    session::destroy(&session).await?;

    match user_id {
        Some(id) => info!("User {} logged out", id),
        None => debug!("Logout without an active login"),
    }

    Ok(Redirect::to("/"))
}
