use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::DatabaseBackend;

/// ER_DUP_KEYNAME：索引已存在
const MYSQL_DUP_KEYNAME: &str = "1061";
/// ER_CANT_DROP_FIELD_OR_KEY：索引不存在
const MYSQL_CANT_DROP_KEY: &str = "1091";

/// 只忽略指定错误码的 MySQL 错误，其余错误照常返回
fn ignore_mysql_error<T>(result: Result<T, DbErr>, code: &str) -> Result<(), DbErr> {
    match result {
        Ok(_) => Ok(()),
        Err(e) if e.to_string().contains(code) => Ok(()),
        Err(e) => Err(e),
    }
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let conn = manager.get_connection();

        match backend {
            DatabaseBackend::Sqlite | DatabaseBackend::Postgres => {
                // 部分唯一索引：同一个短标识最多只有一条未删除的记录
                conn.execute_unprepared(
                    "CREATE UNIQUE INDEX IF NOT EXISTS idx_links_live_link_id ON links (link_id) WHERE deleted_at IS NULL",
                )
                .await?;
            }
            DatabaseBackend::MySql => {
                // MySQL 不支持部分索引，唯一性只能依赖分配器的探测
            }
            _ => {}
        }

        // 按目标地址查找（创建时复用已有短标识）
        match backend {
            DatabaseBackend::MySql => {
                // TEXT 列建索引需要前缀长度
                let result = conn
                    .execute_unprepared("ALTER TABLE links ADD INDEX idx_links_target (target(255))")
                    .await;
                ignore_mysql_error(result, MYSQL_DUP_KEYNAME)?;
            }
            _ => {
                conn.execute_unprepared(
                    "CREATE INDEX IF NOT EXISTS idx_links_target ON links (target)",
                )
                .await?;
            }
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let conn = manager.get_connection();

        match backend {
            DatabaseBackend::MySql => {
                let result = conn
                    .execute_unprepared("ALTER TABLE links DROP INDEX idx_links_target")
                    .await;
                ignore_mysql_error(result, MYSQL_CANT_DROP_KEY)?;
            }
            _ => {
                conn.execute_unprepared("DROP INDEX IF EXISTS idx_links_target")
                    .await?;
                conn.execute_unprepared("DROP INDEX IF EXISTS idx_links_live_link_id")
                    .await?;
            }
        }

        Ok(())
    }
}
