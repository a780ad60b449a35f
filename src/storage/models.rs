use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 一条短链接记录
///
/// `id` 是对外的短标识，经 `utils::id_codec` 编码后出现在路径中。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub id: u32,
    pub target: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Link {
    /// 未被软删除
    pub fn is_live(&self) -> bool {
        self.deleted_at.is_none()
    }

    /// 编码后的短标识
    pub fn code(&self) -> String {
        crate::utils::id_codec::encode(self.id)
    }
}
