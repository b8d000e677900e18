use anyhow::{Context, Result};
use quota::QuotaPolicy;
use sea_orm::Database;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

use crate::schemas::AppState;

/// Runtime settings shared by all handlers.
#[derive(Debug, Clone)]
pub struct AppSettings {
    /// Directory uploaded member photos are written to and served from.
    pub upload_dir: PathBuf,
    /// Request body cap, which bounds photo size.
    pub max_upload_bytes: usize,
    pub quota: QuotaPolicy,
    /// Re-check the quota inside the insert transaction on loan submission.
    /// Off by default: the check on the loan page is advisory only.
    pub enforce_quota_on_submit: bool,
    /// Mark the session cookie `Secure`. Needs HTTPS in front of the server.
    pub session_secure: bool,
    pub session_idle_minutes: i64,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from("public/img"),
            max_upload_bytes: 10 * 1024 * 1024,
            quota: QuotaPolicy::default(),
            enforce_quota_on_submit: false,
            session_secure: false,
            session_idle_minutes: 120,
        }
    }
}

/// Connect to the database, prepare the upload directory and build the state
pub async fn initialize_app_state_with_url(
    database_url: &str,
    settings: AppSettings,
) -> Result<AppState> {
    info!("Connecting to database: {}", database_url);
    let db = Database::connect(database_url)
        .await
        .with_context(|| format!("Failed to connect to database '{}'", database_url))?;

    tokio::fs::create_dir_all(&settings.upload_dir)
        .await
        .with_context(|| {
            format!(
                "Failed to create upload directory {}",
                settings.upload_dir.display()
            )
        })?;
    debug!("Upload directory ready at {}", settings.upload_dir.display());

    info!(
        "Loan quota: {} per month ({}), enforced on submit: {}",
        settings.quota.limit, settings.quota.scope, settings.enforce_quota_on_submit
    );

    Ok(AppState {
        db,
        settings: Arc::new(settings),
    })
}
