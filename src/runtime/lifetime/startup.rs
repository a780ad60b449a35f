use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::errors::Result;
use crate::services::{IdAllocator, LinkService};
use crate::storage::{LinkStore, SeaOrmStorage, StorageFactory};
use crate::utils::password::{SecretVerifier, is_argon2_hash, mask_secret};

pub struct StartupContext {
    pub config: AppConfig,
    pub storage: Arc<SeaOrmStorage>,
    pub link_service: Arc<LinkService>,
    pub verifier: SecretVerifier,
}

/// 准备服务器启动的上下文：存储、共享密钥、业务服务
///
/// 任何一步失败都是致命错误。
pub async fn prepare_server_startup(config: AppConfig) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    info!("URL shortener address prefix: /{}", config.prefix);
    info!("password: {}", mask_secret(&config.password));

    let verifier = SecretVerifier::from_configured(&config.password)?;
    if !is_argon2_hash(&config.password) {
        warn!(
            "Password is stored in plaintext; use `linkshrink hash-password` to generate an Argon2 hash"
        );
    }

    info!("using database {}", config.db);
    let storage = StorageFactory::create(&config).await?;
    info!("Using storage backend: {}", storage.backend_name());

    let live = storage.count().await?;
    info!("{} live links loaded", live);

    let store: Arc<dyn LinkStore> = storage.clone();
    let link_service = Arc::new(LinkService::new(
        store,
        IdAllocator::new(config.allocator.max_attempts),
    ));

    debug!(
        "Pre-startup processing completed in {:?}",
        start_time.elapsed()
    );

    Ok(StartupContext {
        config,
        storage,
        link_service,
        verifier,
    })
}
