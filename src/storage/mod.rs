use std::sync::Arc;

use async_trait::async_trait;

use crate::config::AppConfig;
use crate::errors::Result;

pub mod backend;
pub mod models;

pub use backend::SeaOrmStorage;
pub use models::Link;

/// 短链接持久化接口
///
/// 所有查询只返回未被软删除的记录。
#[async_trait]
pub trait LinkStore: Send + Sync {
    /// 按规范化后的目标地址查找
    async fn find_by_target(&self, target: &str) -> Result<Option<Link>>;

    /// 按短标识查找
    async fn find_by_id(&self, id: u32) -> Result<Option<Link>>;

    /// 短标识是否已被未删除的记录占用
    async fn id_in_use(&self, id: u32) -> Result<bool> {
        Ok(self.find_by_id(id).await?.is_some())
    }

    /// Insert a new live record.
    ///
    /// Returns [`LinkError::Conflict`](crate::errors::LinkError::Conflict)
    /// when another live record already holds `id`.
    async fn insert(&self, id: u32, target: &str) -> Result<Link>;

    /// 刷新 `updated_at`
    async fn touch(&self, id: u32) -> Result<Link>;

    /// 原地修改目标地址，短标识不变
    async fn update_target(&self, id: u32, target: &str) -> Result<Link>;

    /// 软删除
    async fn soft_delete(&self, id: u32) -> Result<()>;

    /// 未删除记录总数
    async fn count(&self) -> Result<u64>;

    /// 后端名称，用于健康检查和日志
    fn backend_name(&self) -> &str {
        "unknown"
    }
}

pub struct StorageFactory;

impl StorageFactory {
    pub async fn create(config: &AppConfig) -> Result<Arc<SeaOrmStorage>> {
        let database_url = config.database_url();

        // 从 URL 自动推断数据库类型
        let backend_type = backend::infer_backend_from_url(&database_url)?;

        let storage =
            backend::SeaOrmStorage::new(&database_url, &backend_type, &config.database).await?;
        Ok(Arc::new(storage))
    }
}
