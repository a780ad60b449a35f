//! HTTP 请求/响应结构

use serde::{Deserialize, Serialize};

/// `add` / `remove` 请求体
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LinkRequest {
    pub address: String,
    pub password: String,
}

/// `update` 请求体
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpdateRequest {
    pub old_address: String,
    pub new_address: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AddressResponse {
    pub address: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpdateResponse {
    pub message: String,
    pub address: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub uptime: u64,
    pub backend: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub response_time_ms: u64,
}
