//! Mutation operations for SeaOrmStorage
//!
//! Records are never physically deleted; removal sets `deleted_at`.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, QueryFilter};
use sea_orm::sea_query::Expr;
use tracing::{debug, info};

use super::converters::{model_to_link, new_active_model};
use super::query::find_live;
use super::{SeaOrmStorage, retry};
use crate::errors::{LinkError, Result};
use crate::storage::Link;

use migration::entities::link;

impl SeaOrmStorage {
    pub(super) async fn insert_link(&self, id: u32, target: &str) -> Result<Link> {
        let db = &self.db;

        let model = retry::with_retry(&format!("insert({})", id), self.retry_config, || async {
            new_active_model(id, target).insert(db).await
        })
        .await
        .map_err(|e| {
            if retry::is_unique_violation(&e) {
                LinkError::conflict(format!("短标识 {} 已被占用", id))
            } else {
                LinkError::database_operation(format!("插入短链接失败: {}", e))
            }
        })?;

        debug!("Link inserted: id={} target={}", id, target);
        model_to_link(model)
    }

    pub(super) async fn touch_link(&self, id: u32) -> Result<Link> {
        let mut active: link::ActiveModel = self.live_model(id).await?.into();
        active.updated_at = Set(Utc::now());
        self.save(id, active).await
    }

    pub(super) async fn set_target(&self, id: u32, target: &str) -> Result<Link> {
        let mut active: link::ActiveModel = self.live_model(id).await?.into();
        active.target = Set(target.to_string());
        active.updated_at = Set(Utc::now());
        self.save(id, active).await
    }

    pub(super) async fn mark_deleted(&self, id: u32) -> Result<()> {
        let db = &self.db;
        let now = Utc::now();

        let result = retry::with_retry(&format!("soft_delete({})", id), self.retry_config, || async {
            link::Entity::update_many()
                .col_expr(link::Column::DeletedAt, Expr::value(now))
                .col_expr(link::Column::UpdatedAt, Expr::value(now))
                .filter(link::Column::LinkId.eq(i64::from(id)))
                .filter(link::Column::DeletedAt.is_null())
                .exec(db)
                .await
        })
        .await
        .map_err(|e| LinkError::database_operation(format!("删除短链接失败: {}", e)))?;

        if result.rows_affected == 0 {
            return Err(LinkError::not_found(format!("短链接不存在: {}", id)));
        }

        info!("Link soft-deleted: {}", id);
        Ok(())
    }

    async fn live_model(&self, id: u32) -> Result<link::Model> {
        let db = &self.db;

        retry::with_retry(&format!("load({})", id), self.retry_config, || async {
            find_live(id).one(db).await
        })
        .await
        .map_err(|e| LinkError::database_operation(format!("查询短链接失败: {}", e)))?
        .ok_or_else(|| LinkError::not_found(format!("短链接不存在: {}", id)))
    }

    async fn save(&self, id: u32, active: link::ActiveModel) -> Result<Link> {
        let db = &self.db;

        let model = retry::with_retry(&format!("update({})", id), self.retry_config, || {
            let active = active.clone();
            async move { active.update(db).await }
        })
        .await
        .map_err(|e| LinkError::database_operation(format!("更新短链接失败: {}", e)))?;

        model_to_link(model)
    }
}
