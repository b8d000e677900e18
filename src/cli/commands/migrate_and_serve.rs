use anyhow::Result;
use tracing::{debug, info, trace};

use super::initdb::{connect, run_migrations};
use super::serve::{build_app, run_server};
use crate::cli::ServeArgs;

pub async fn migrate_and_serve(args: &ServeArgs) -> Result<()> {
    trace!("Entering migrate_and_serve function");
    info!("Applying database migrations and starting server");
    debug!("Database URL: {}", args.database_url);

    let db = connect(&args.database_url).await?;
    run_migrations(&db).await?;
    // The server opens its own pool
    db.close().await?;

    let app = build_app(args).await?;
    run_server(app, &args.bind_address()).await
}
