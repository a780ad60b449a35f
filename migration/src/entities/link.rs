use sea_orm::entity::prelude::*;

/// `link_id` 是对外的短标识（u32 取值范围），`row_id` 仅作为记录主键。
/// 软删除后同一个 `link_id` 可以被重新分配，因此不能直接作为主键。
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "links")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub row_id: i64,
    pub link_id: i64,
    #[sea_orm(column_type = "Text")]
    pub target: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub deleted_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
