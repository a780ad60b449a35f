//! Query operations for SeaOrmStorage
//!
//! Read-only lookups. Every query filters out soft-deleted rows.

use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};

use super::converters::model_to_link;
use super::{SeaOrmStorage, retry};
use crate::errors::{LinkError, Result};
use crate::storage::Link;

use migration::entities::link;

impl SeaOrmStorage {
    pub(super) async fn get_by_target(&self, target: &str) -> Result<Option<Link>> {
        let db = &self.db;

        let model = retry::with_retry("find_by_target", self.retry_config, || async {
            link::Entity::find()
                .filter(link::Column::Target.eq(target))
                .filter(link::Column::DeletedAt.is_null())
                .order_by_asc(link::Column::RowId)
                .one(db)
                .await
        })
        .await
        .map_err(|e| LinkError::database_operation(format!("按目标地址查询失败: {}", e)))?;

        model.map(model_to_link).transpose()
    }

    pub(super) async fn get_by_id(&self, id: u32) -> Result<Option<Link>> {
        let db = &self.db;

        let model = retry::with_retry(&format!("find_by_id({})", id), self.retry_config, || async {
            find_live(id).one(db).await
        })
        .await
        .map_err(|e| LinkError::database_operation(format!("按短标识查询失败: {}", e)))?;

        model.map(model_to_link).transpose()
    }

    pub(super) async fn live_id_exists(&self, id: u32) -> Result<bool> {
        let db = &self.db;

        let count = retry::with_retry(&format!("id_in_use({})", id), self.retry_config, || async {
            find_live(id).count(db).await
        })
        .await
        .map_err(|e| LinkError::database_operation(format!("查询短标识占用失败: {}", e)))?;

        Ok(count > 0)
    }

    pub(super) async fn count_live(&self) -> Result<u64> {
        let db = &self.db;

        retry::with_retry("count", self.retry_config, || async {
            link::Entity::find()
                .filter(link::Column::DeletedAt.is_null())
                .count(db)
                .await
        })
        .await
        .map_err(|e| LinkError::database_operation(format!("统计链接数量失败: {}", e)))
    }
}

/// 按短标识查找未删除记录
pub(super) fn find_live(id: u32) -> sea_orm::Select<link::Entity> {
    link::Entity::find()
        .filter(link::Column::LinkId.eq(i64::from(id)))
        .filter(link::Column::DeletedAt.is_null())
}
