//! Tool server command.

use std::sync::Arc;

use tracing::info;

use super::{helpers::apply_serve_overrides, types::ServeParams};
use crate::{
    config::Config,
    db::MySqlBackend,
    error::AppResult,
    logging,
    server::Server,
    tools::Toolbox
};

/// Connects once and serves tool calls on stdio until shutdown.
///
/// The connection is opened before the first request is read; failing to
/// open it is the only fatal error once configuration is loaded.
///
/// # Errors
///
/// Returns an error if the connection cannot be opened or stdio fails.
pub async fn run_serve(params: &ServeParams, mut config: Config) -> AppResult<()> {
    apply_serve_overrides(&mut config, params);
    logging::init(&config.logging);

    info!(target_db = %config.database.display_target(), "connecting");
    let backend = Arc::new(MySqlBackend::connect(&config.database).await?);
    info!("connected");

    let server = Server::new(Toolbox::new(backend.clone()));
    let served = server.run_stdio().await;
    drop(server);

    if let Ok(backend) = Arc::try_unwrap(backend) {
        backend.close().await?;
    }
    served
}
