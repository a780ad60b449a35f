use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{LinkError, Result};
use crate::utils::password::mask_secret;

/// 默认配置文件
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// 环境变量前缀，分隔符 `__`，例如 `LS__SERVER__PORT=9090`
pub const ENV_PREFIX: &str = "LS";

/// Application configuration, loaded once at startup and passed explicitly
/// to every component that needs it.
///
/// The three top-level keys (`prefix`, `db`, `password`) are the classic
/// `config.json` shape; the nested sections are optional and default
/// sensibly.
#[derive(Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// 短链接路径前缀，例如 "s/" → `/s/add`, `/s/{code}`
    #[serde(default)]
    pub prefix: String,
    /// SQLite 文件名，或完整的数据库 URL
    #[serde(default)]
    pub db: String,
    /// 共享密钥（明文或 Argon2 PHC 字符串）
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub allocator: AllocatorConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// 从 JSON 文件和环境变量加载配置
    ///
    /// 优先级：ENV > config.json > 默认值。配置文件不存在视为致命错误。
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        use config::{Config, Environment, File, FileFormat};

        let path = path.as_ref();
        if !path.exists() {
            return Err(LinkError::config(format!(
                "{} not found",
                path.display()
            )));
        }

        let settings = Config::builder()
            .add_source(File::new(&path.to_string_lossy(), FileFormat::Json).required(true))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut config: AppConfig = settings.try_deserialize()?;
        config.prefix = super::validators::normalize_prefix(&config.prefix);
        super::validators::validate(&config)?;

        Ok(config)
    }

    /// Parse a configuration from a JSON string, without environment
    /// overrides.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let mut config: AppConfig = serde_json::from_str(content)?;
        config.prefix = super::validators::normalize_prefix(&config.prefix);
        super::validators::validate(&config)?;
        Ok(config)
    }

    /// 数据库连接 URL
    ///
    /// `db` 可以是文件名（当作 SQLite 文件）、`:memory:` 或完整的 URL。
    pub fn database_url(&self) -> String {
        let db = self.db.trim();
        if db == ":memory:" {
            "sqlite::memory:".to_string()
        } else if db.contains("://") || db.starts_with("sqlite:") {
            db.to_string()
        } else {
            format!("sqlite://{}", db)
        }
    }

    /// 生成的短链接路径，例如 `/s/4zzzzzz`
    pub fn link_path(&self, code: &str) -> String {
        format!("/{}{}", self.prefix, code)
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("prefix", &self.prefix)
            .field("db", &self.db)
            .field("password", &mask_secret(&self.password))
            .field("server", &self.server)
            .field("database", &self.database)
            .field("allocator", &self.allocator)
            .field("logging", &self.logging)
            .finish()
    }
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    #[serde(default = "default_workers")]
    pub workers: usize,
}

/// 数据库连接配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_pool_size")]
    pub pool_size: u32,
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,
    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,
    #[serde(default = "default_retry_max_delay_ms")]
    pub retry_max_delay_ms: u64,
}

/// 短标识分配器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocatorConfig {
    /// 随机探测的最大次数，超过后返回 KeyspaceExhausted
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

// ============================================================
// Default value functions
// ============================================================

fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_workers() -> usize {
    num_cpus::get()
}

fn default_database_pool_size() -> u32 {
    10
}

fn default_retry_count() -> u32 {
    3
}

fn default_retry_base_delay_ms() -> u64 {
    100
}

fn default_retry_max_delay_ms() -> u64 {
    2000
}

fn default_max_attempts() -> u32 {
    64
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    true
}

// ============================================================
// Default implementations
// ============================================================

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            workers: default_workers(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            pool_size: default_database_pool_size(),
            retry_count: default_retry_count(),
            retry_base_delay_ms: default_retry_base_delay_ms(),
            retry_max_delay_ms: default_retry_max_delay_ms(),
        }
    }
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}
