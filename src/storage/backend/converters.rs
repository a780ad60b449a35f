use crate::errors::{LinkError, Result};
use crate::storage::Link;
use migration::entities::link;

/// 将 Sea-ORM Model 转换为 Link
///
/// `link_id` 超出 u32 范围说明数据被外部改坏了。
pub(super) fn model_to_link(model: link::Model) -> Result<Link> {
    let id = u32::try_from(model.link_id).map_err(|_| {
        LinkError::database_operation(format!(
            "link_id {} (row {}) is out of range",
            model.link_id, model.row_id
        ))
    })?;

    Ok(Link {
        id,
        target: model.target,
        created_at: model.created_at,
        updated_at: model.updated_at,
        deleted_at: model.deleted_at,
    })
}

/// 新记录的 ActiveModel，`row_id` 由数据库生成
pub(super) fn new_active_model(id: u32, target: &str) -> link::ActiveModel {
    use sea_orm::ActiveValue::*;

    let now = chrono::Utc::now();
    link::ActiveModel {
        row_id: NotSet,
        link_id: Set(i64::from(id)),
        target: Set(target.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        deleted_at: Set(None),
    }
}
