//! 配置验证模块
//!
//! 启动时对配置做一次性检查，任何错误都视为致命错误。

use crate::errors::{LinkError, Result};

use super::AppConfig;

const LOG_FORMATS: &[&str] = &["text", "json"];

/// 规范化路径前缀：去掉开头的 `/`，非空时保证以 `/` 结尾
///
/// `"s"`, `"/s"`, `"/s/"` 都会得到 `"s/"`；`""` 和 `"/"` 得到 `""`。
pub fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("{}/", trimmed)
    }
}

/// Validate a loaded configuration.
pub fn validate(config: &AppConfig) -> Result<()> {
    if config.password.is_empty() {
        return Err(LinkError::config("no password specified in config"));
    }

    if config.db.trim().is_empty() {
        return Err(LinkError::config("no database file specified in config"));
    }

    if config.allocator.max_attempts == 0 {
        return Err(LinkError::config(
            "allocator.max_attempts must be greater than 0",
        ));
    }

    if config.server.workers == 0 {
        return Err(LinkError::config("server.workers must be greater than 0"));
    }

    if !LOG_FORMATS.contains(&config.logging.format.as_str()) {
        return Err(LinkError::config(format!(
            "Invalid logging.format '{}'. Valid: {:?}",
            config.logging.format, LOG_FORMATS
        )));
    }

    // 前缀不能与内置路由冲突
    let first_segment = config.prefix.split('/').next().unwrap_or_default();
    if matches!(first_segment, "api" | "resources" | "health") {
        return Err(LinkError::config(format!(
            "prefix '{}' conflicts with reserved routes",
            config.prefix
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> AppConfig {
        AppConfig {
            db: "links.db".to_string(),
            password: "pw".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_normalize_prefix() {
        assert_eq!(normalize_prefix(""), "");
        assert_eq!(normalize_prefix("/"), "");
        assert_eq!(normalize_prefix("s"), "s/");
        assert_eq!(normalize_prefix("/s"), "s/");
        assert_eq!(normalize_prefix("/s/"), "s/");
        assert_eq!(normalize_prefix("go/links/"), "go/links/");
    }

    #[test]
    fn test_valid_config() {
        assert!(validate(&base_config()).is_ok());
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let mut config = base_config();
        config.allocator.max_attempts = 0;
        assert!(matches!(validate(&config), Err(LinkError::Config(_))));
    }

    #[test]
    fn test_unknown_log_format_rejected() {
        let mut config = base_config();
        config.logging.format = "xml".to_string();
        assert!(matches!(validate(&config), Err(LinkError::Config(_))));
    }

    #[test]
    fn test_reserved_prefix_rejected() {
        for prefix in ["api/", "resources/", "health/"] {
            let mut config = base_config();
            config.prefix = prefix.to_string();
            assert!(validate(&config).is_err(), "{} should be rejected", prefix);
        }

        let mut config = base_config();
        config.prefix = "apix/".to_string();
        assert!(validate(&config).is_ok());
    }
}
