//! SeaORM storage backend
//!
//! This module provides database storage using SeaORM,
//! supporting SQLite, MySQL/MariaDB, and PostgreSQL.

mod connection;
mod converters;
mod mutations;
mod query;
mod retry;

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use tracing::warn;

use crate::config::DatabaseConfig;
use crate::errors::{LinkError, Result};
use crate::storage::{Link, LinkStore};

use connection::{connect_generic, connect_sqlite, run_migrations};

/// 从数据库 URL 推断数据库类型
pub fn infer_backend_from_url(database_url: &str) -> Result<String> {
    if database_url.starts_with("sqlite:")
        || database_url.ends_with(".db")
        || database_url.ends_with(".sqlite")
        || database_url == ":memory:"
    {
        Ok("sqlite".to_string())
    } else if database_url.starts_with("mysql://") || database_url.starts_with("mariadb://") {
        Ok("mysql".to_string())
    } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        Ok("postgres".to_string())
    } else {
        Err(LinkError::database_config(format!(
            "无法从 URL 推断数据库类型: {}. 支持的 URL 格式: sqlite://, mysql://, mariadb://, postgres://",
            database_url
        )))
    }
}

/// SeaORM-based storage backend
#[derive(Clone)]
pub struct SeaOrmStorage {
    db: DatabaseConnection,
    backend_name: String,
    /// 重试配置
    retry_config: retry::RetryConfig,
}

impl SeaOrmStorage {
    pub async fn new(
        database_url: &str,
        backend_name: &str,
        config: &DatabaseConfig,
    ) -> Result<Self> {
        if database_url.is_empty() {
            return Err(LinkError::database_config("数据库 URL 未设置"));
        }

        let retry_config = retry::RetryConfig::from(config);

        // 根据不同数据库类型配置连接选项
        let db = if backend_name == "sqlite" {
            connect_sqlite(database_url, config.pool_size).await?
        } else {
            connect_generic(database_url, backend_name, config.pool_size).await?
        };

        let storage = SeaOrmStorage {
            db,
            backend_name: backend_name.to_string(),
            retry_config,
        };

        // 运行迁移
        run_migrations(&storage.db).await?;

        warn!(
            "{} Storage initialized.",
            storage.backend_name.to_uppercase()
        );
        Ok(storage)
    }

    /// 关闭连接池（优雅停机时调用）
    pub async fn close(&self) -> Result<()> {
        self.db
            .clone()
            .close()
            .await
            .map_err(|e| LinkError::database_connection(format!("关闭数据库连接失败: {}", e)))
    }
}

#[async_trait]
impl LinkStore for SeaOrmStorage {
    async fn find_by_target(&self, target: &str) -> Result<Option<Link>> {
        self.get_by_target(target).await
    }

    async fn find_by_id(&self, id: u32) -> Result<Option<Link>> {
        self.get_by_id(id).await
    }

    async fn id_in_use(&self, id: u32) -> Result<bool> {
        self.live_id_exists(id).await
    }

    async fn insert(&self, id: u32, target: &str) -> Result<Link> {
        self.insert_link(id, target).await
    }

    async fn touch(&self, id: u32) -> Result<Link> {
        self.touch_link(id).await
    }

    async fn update_target(&self, id: u32, target: &str) -> Result<Link> {
        self.set_target(id, target).await
    }

    async fn soft_delete(&self, id: u32) -> Result<()> {
        self.mark_deleted(id).await
    }

    async fn count(&self) -> Result<u64> {
        self.count_live().await
    }

    fn backend_name(&self) -> &str {
        &self.backend_name
    }
}
