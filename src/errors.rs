use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkError {
    InvalidUrl(String),
    InvalidIdentifier(String),
    Unauthorized(String),
    NotFound(String),
    Conflict(String),
    KeyspaceExhausted(String),
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    Config(String),
    FileOperation(String),
    Serialization(String),
    PasswordHash(String),
}

impl LinkError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            LinkError::InvalidUrl(_) => "E001",
            LinkError::InvalidIdentifier(_) => "E002",
            LinkError::Unauthorized(_) => "E003",
            LinkError::NotFound(_) => "E004",
            LinkError::Conflict(_) => "E005",
            LinkError::KeyspaceExhausted(_) => "E006",
            LinkError::DatabaseConfig(_) => "E007",
            LinkError::DatabaseConnection(_) => "E008",
            LinkError::DatabaseOperation(_) => "E009",
            LinkError::Config(_) => "E010",
            LinkError::FileOperation(_) => "E011",
            LinkError::Serialization(_) => "E012",
            LinkError::PasswordHash(_) => "E013",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            LinkError::InvalidUrl(_) => "Invalid URL",
            LinkError::InvalidIdentifier(_) => "Invalid Identifier",
            LinkError::Unauthorized(_) => "Unauthorized",
            LinkError::NotFound(_) => "Link Not Found",
            LinkError::Conflict(_) => "Link Conflict",
            LinkError::KeyspaceExhausted(_) => "Keyspace Exhausted",
            LinkError::DatabaseConfig(_) => "Database Configuration Error",
            LinkError::DatabaseConnection(_) => "Database Connection Error",
            LinkError::DatabaseOperation(_) => "Database Operation Error",
            LinkError::Config(_) => "Configuration Error",
            LinkError::FileOperation(_) => "File Operation Error",
            LinkError::Serialization(_) => "Serialization Error",
            LinkError::PasswordHash(_) => "Password Hash Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            LinkError::InvalidUrl(msg)
            | LinkError::InvalidIdentifier(msg)
            | LinkError::Unauthorized(msg)
            | LinkError::NotFound(msg)
            | LinkError::Conflict(msg)
            | LinkError::KeyspaceExhausted(msg)
            | LinkError::DatabaseConfig(msg)
            | LinkError::DatabaseConnection(msg)
            | LinkError::DatabaseOperation(msg)
            | LinkError::Config(msg)
            | LinkError::FileOperation(msg)
            | LinkError::Serialization(msg)
            | LinkError::PasswordHash(msg) => msg,
        }
    }

    /// HTTP 状态码映射
    ///
    /// 业务错误（地址非法、短标识非法、记录不存在）统一返回 400，
    /// 与重定向页面的 "400 - Bad Request" 行为一致。
    pub fn http_status(&self) -> StatusCode {
        match self {
            LinkError::InvalidUrl(_)
            | LinkError::InvalidIdentifier(_)
            | LinkError::NotFound(_)
            | LinkError::Conflict(_) => StatusCode::BAD_REQUEST,
            LinkError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            LinkError::KeyspaceExhausted(_) => StatusCode::SERVICE_UNAVAILABLE,
            LinkError::DatabaseConfig(_)
            | LinkError::DatabaseConnection(_)
            | LinkError::DatabaseOperation(_)
            | LinkError::Config(_)
            | LinkError::FileOperation(_)
            | LinkError::Serialization(_)
            | LinkError::PasswordHash(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 是否是调用方可见的业务错误（其余错误只记录日志，不向客户端暴露细节）
    pub fn is_client_error(&self) -> bool {
        self.http_status().is_client_error()
    }

    /// 格式化为彩色输出（用于启动失败时的终端输出）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for LinkError {}

// 便捷的构造函数
impl LinkError {
    pub fn invalid_url<T: Into<String>>(msg: T) -> Self {
        LinkError::InvalidUrl(msg.into())
    }

    pub fn invalid_identifier<T: Into<String>>(msg: T) -> Self {
        LinkError::InvalidIdentifier(msg.into())
    }

    pub fn unauthorized<T: Into<String>>(msg: T) -> Self {
        LinkError::Unauthorized(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        LinkError::NotFound(msg.into())
    }

    pub fn conflict<T: Into<String>>(msg: T) -> Self {
        LinkError::Conflict(msg.into())
    }

    pub fn keyspace_exhausted<T: Into<String>>(msg: T) -> Self {
        LinkError::KeyspaceExhausted(msg.into())
    }

    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        LinkError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        LinkError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        LinkError::DatabaseOperation(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        LinkError::Config(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        LinkError::FileOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        LinkError::Serialization(msg.into())
    }

    pub fn password_hash<T: Into<String>>(msg: T) -> Self {
        LinkError::PasswordHash(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for LinkError {
    fn from(err: sea_orm::DbErr) -> Self {
        LinkError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for LinkError {
    fn from(err: std::io::Error) -> Self {
        LinkError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for LinkError {
    fn from(err: serde_json::Error) -> Self {
        LinkError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for LinkError {
    fn from(err: config::ConfigError) -> Self {
        LinkError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LinkError>;
