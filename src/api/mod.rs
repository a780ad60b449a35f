pub mod middleware;
pub mod services;
pub mod types;

use actix_web::{HttpResponse, web};

use crate::errors::LinkError;
use types::MessageResponse;

pub use services::configure_routes;

/// JSON 请求体解析失败统一返回 400 `{"message": ...}`
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(64 * 1024)
        .error_handler(|err, _req| {
            let message = err.to_string();
            let response = HttpResponse::BadRequest().json(MessageResponse { message });
            actix_web::error::InternalError::from_response(err, response).into()
        })
}

/// 将业务错误转换为 JSON 响应
///
/// 服务端错误只记录日志，不把内部细节返回给客户端。
pub fn error_response(err: &LinkError) -> HttpResponse {
    if err.is_client_error() {
        return match err {
            LinkError::Unauthorized(_) => HttpResponse::Unauthorized().json(serde_json::json!({})),
            _ => HttpResponse::build(err.http_status()).json(MessageResponse {
                message: err.message().to_string(),
            }),
        };
    }

    tracing::error!("{} {}", err.code(), err.format_simple());
    let message = match err {
        LinkError::KeyspaceExhausted(_) => "No free identifier available, try again later",
        _ => "Internal Server Error",
    };
    HttpResponse::build(err.http_status()).json(MessageResponse {
        message: message.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use actix_web::http::StatusCode;

    async fn body_json(resp: HttpResponse) -> serde_json::Value {
        let bytes = to_bytes(resp.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[actix_rt::test]
    async fn test_client_error_exposes_message() {
        let resp = error_response(&LinkError::invalid_url("Malformed URL"));
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(resp).await["message"], "Malformed URL");
    }

    #[actix_rt::test]
    async fn test_unauthorized_is_empty_object() {
        let resp = error_response(&LinkError::unauthorized("bad secret"));
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(resp).await, serde_json::json!({}));
    }

    #[actix_rt::test]
    async fn test_server_error_hides_details() {
        let resp = error_response(&LinkError::database_operation("disk I/O error at /var/db"));
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(resp).await;
        assert_eq!(body["message"], "Internal Server Error");
    }
}
