//! Login sessions.
//!
//! Handlers only ever see [`tower_sessions::Session`]; which store backs it
//! is decided when the router is built, so the in-memory store can be
//! replaced by a persistent one without touching any handler.

use tower_sessions::{
    cookie::{time::Duration, SameSite},
    Expiry, Session, SessionManagerLayer, SessionStore,
};
use tracing::{debug, trace};

use crate::config::AppSettings;
use crate::error::AppError;

/// Key for storing user ID in session.
pub const SESSION_USER_ID_KEY: &str = "user_id";

/// Build the session middleware over `store`.
pub fn session_layer<S: SessionStore>(store: S, settings: &AppSettings) -> SessionManagerLayer<S> {
    SessionManagerLayer::new(store)
        .with_secure(settings.session_secure)
        .with_http_only(true)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(Duration::minutes(
            settings.session_idle_minutes,
        )))
}

/// The logged-in user's id, if any.
pub async fn current_user_id(session: &Session) -> Result<Option<i32>, AppError> {
    let user_id = session.get::<i32>(SESSION_USER_ID_KEY).await?;
    trace!("Session user: {:?}", user_id);
    Ok(user_id)
}

/// Bind `user_id` to the session. The session id is rotated first so an id
/// handed out before login cannot be reused afterwards.
pub async fn establish(session: &Session, user_id: i32) -> Result<(), AppError> {
    session.cycle_id().await?;
    session.insert(SESSION_USER_ID_KEY, user_id).await?;
    debug!("Session established for user {}", user_id);
    Ok(())
}

/// Drop the session from the store and expire the cookie.
pub async fn destroy(session: &Session) -> Result<(), AppError> {
    session.flush().await?;
    debug!("Session destroyed");
    Ok(())
}
