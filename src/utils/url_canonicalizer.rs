//! URL 规范化模块
//!
//! Turns whatever the user typed into one canonical absolute URL, so the
//! same destination always maps to the same stored link.

use url::{ParseError, Url};

use crate::errors::{LinkError, Result};

const PARSE_FAILED: &str = "Couldn't parse provided URL";
const MALFORMED: &str = "Malformed URL";

/// 默认协议（用户未提供 scheme 时）
const DEFAULT_SCHEME_PREFIX: &str = "https://";

/// Canonicalize a user-supplied address.
///
/// 1. Parse; when the input has no scheme (`example.com/x`) parse again
///    with `https://` in front.
/// 2. Drop every leading `www.` label.
/// 3. Require a host of at least two non-empty dot-separated labels.
/// 4. Serialize, dropping the lone `/` of an otherwise empty path.
pub fn canonicalize(raw: &str) -> Result<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(LinkError::invalid_url(PARSE_FAILED));
    }

    let mut url = parse_with_default_scheme(raw)?;

    if let Some(stripped) = url.host_str().and_then(strip_www_labels) {
        url.set_host(Some(&stripped))
            .map_err(|_| LinkError::invalid_url(MALFORMED))?;
    }

    let host = url
        .host_str()
        .ok_or_else(|| LinkError::invalid_url(MALFORMED))?;
    if !has_domain_shape(host) {
        return Err(LinkError::invalid_url(MALFORMED));
    }

    Ok(serialize(&url))
}

/// 去掉所有前导 `www.` 标签，`www.www.example.com` → `example.com`
///
/// 结果必须幂等：规范化后的地址不能再以 `www.` 开头。
fn strip_www_labels(host: &str) -> Option<String> {
    let mut rest = host.strip_prefix("www.")?;
    while let Some(next) = rest.strip_prefix("www.") {
        rest = next;
    }
    Some(rest.to_owned())
}

fn parse_with_default_scheme(raw: &str) -> Result<Url> {
    match Url::parse(raw) {
        // `example.com:8080/x` 会被解析成 scheme = "example.com"，没有 host
        Ok(url) if !url.has_host() && url.scheme().contains('.') => reparse_https(raw),
        Ok(url) => Ok(url),
        Err(ParseError::RelativeUrlWithoutBase) => reparse_https(raw),
        Err(_) => Err(LinkError::invalid_url(PARSE_FAILED)),
    }
}

fn reparse_https(raw: &str) -> Result<Url> {
    Url::parse(&format!("{}{}", DEFAULT_SCHEME_PREFIX, raw))
        .map_err(|_| LinkError::invalid_url(PARSE_FAILED))
}

/// 域名 + 顶级域名：至少两段，且每段非空
fn has_domain_shape(host: &str) -> bool {
    let mut labels = 0usize;
    for label in host.split('.') {
        if label.is_empty() {
            return false;
        }
        labels += 1;
    }
    labels >= 2
}

fn serialize(url: &Url) -> String {
    let serialized = url.as_str();
    if url.path() == "/" && url.query().is_none() && url.fragment().is_none() {
        serialized
            .strip_suffix('/')
            .unwrap_or(serialized)
            .to_string()
    } else {
        serialized.to_string()
    }
}
