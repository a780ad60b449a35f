use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use tracing::{debug, error, trace};

use super::resources::render_bad_request;
use crate::errors::LinkError;
use crate::services::LinkService;

pub struct RedirectService;

impl RedirectService {
    pub async fn handle_redirect(
        path: web::Path<String>,
        service: web::Data<Arc<LinkService>>,
    ) -> HttpResponse {
        let code = path.into_inner();

        match service.resolve(&code).await {
            Ok(link) => {
                trace!("Redirecting {} -> {}", code, link.target);
                HttpResponse::MovedPermanently()
                    .insert_header(("Location", link.target))
                    .finish()
            }
            Err(LinkError::InvalidIdentifier(msg)) => {
                debug!("Invalid identifier in path: {}", msg);
                Self::bad_request_response()
            }
            Err(LinkError::NotFound(_)) => {
                debug!("Redirect link not found: {}", code);
                Self::bad_request_response()
            }
            Err(e) => {
                error!("Redirect lookup failed for {}: {}", code, e);
                HttpResponse::build(StatusCode::INTERNAL_SERVER_ERROR)
                    .content_type("text/html; charset=utf-8")
                    .body("Internal Server Error")
            }
        }
    }

    /// 访问前缀本身（没有短标识）
    pub async fn handle_prefix_root() -> HttpResponse {
        Self::bad_request_response()
    }

    #[inline]
    fn bad_request_response() -> HttpResponse {
        HttpResponse::build(StatusCode::BAD_REQUEST)
            .content_type("text/html; charset=utf-8")
            .body(render_bad_request())
    }
}
