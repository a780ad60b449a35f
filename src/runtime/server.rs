//! Server mode
//!
//! Configures the HTTP server with all routes and waits for either the
//! server to stop or a shutdown signal.

use std::sync::Arc;

use actix_web::{
    App, HttpServer,
    middleware::{Compress, DefaultHeaders},
    web,
};
use anyhow::{Context, Result};
use tracing::warn;

use crate::api::middleware::{RequestIdMiddleware, TimingMiddleware};
use crate::api::services::AppStartTime;
use crate::api::{configure_routes, json_config};
use crate::config::AppConfig;
use crate::runtime::lifetime;
use crate::storage::LinkStore;

/// Run the HTTP server
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server(config: AppConfig) -> Result<()> {
    let app_start_time = AppStartTime::default();

    let startup = lifetime::startup::prepare_server_startup(config).await?;

    let storage = startup.storage.clone();
    let store: Arc<dyn LinkStore> = startup.storage.clone();
    let link_service = startup.link_service.clone();
    let verifier = startup.verifier.clone();
    let config = startup.config.clone();

    let workers = config.server.workers.clamp(1, 32);
    warn!("Using {} workers for the server", workers);

    let app_config = config.clone();
    let server = HttpServer::new(move || {
        let prefix = app_config.prefix.clone();
        App::new()
            .wrap(TimingMiddleware) // 最内层，在 request span 内记录耗时
            .wrap(RequestIdMiddleware)
            .wrap(Compress::default())
            .wrap(DefaultHeaders::new().add(("Cache-Control", "no-cache, no-store, must-revalidate")))
            .app_data(json_config())
            .app_data(web::Data::new(link_service.clone()))
            .app_data(web::Data::new(store.clone()))
            .app_data(web::Data::new(verifier.clone()))
            .app_data(web::Data::new(app_config.clone()))
            .app_data(web::Data::new(app_start_time.clone()))
            .configure(|cfg| configure_routes(cfg, &prefix))
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .client_request_timeout(std::time::Duration::from_millis(5000))
    .workers(workers);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    warn!("Starting server at http://{}", bind_address);
    let server = server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run();

    tokio::select! {
        res = server => {
            res.context("HTTP server error")?;
        }
        _ = lifetime::shutdown::listen_for_shutdown(&storage) => {
            warn!("Graceful shutdown completed");
        }
    }

    Ok(())
}
