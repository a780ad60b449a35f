use actix_web::{HttpRequest, HttpResponse};
use rust_embed::Embed;
use tracing::{debug, trace};

/// HTML 页面模板
#[derive(Embed)]
#[folder = "templates/"]
struct Templates;

/// `/resources` 下的静态文件
#[derive(Embed)]
#[folder = "resources/"]
struct Resources;

const BAD_REQUEST_TITLE: &str = "400 - Bad Request";

/// 渲染 400 页面
pub fn render_bad_request() -> String {
    match Templates::get("badrequest.html") {
        Some(content) => String::from_utf8_lossy(&content.data).replace("%TITLE%", BAD_REQUEST_TITLE),
        None => BAD_REQUEST_TITLE.to_string(),
    }
}

pub struct ResourceService;

impl ResourceService {
    pub async fn handle_static(req: HttpRequest) -> HttpResponse {
        let path = req.match_info().query("path");
        trace!("Serving resource: {}", path);

        match Resources::get(path) {
            Some(content) => HttpResponse::Ok()
                .content_type(Self::get_content_type(path))
                .insert_header(("Cache-Control", "public, max-age=86400"))
                .body(content.data.into_owned()),
            None => {
                debug!("Resource not found: {}", path);
                HttpResponse::NotFound().body("File not found")
            }
        }
    }

    /// 根据文件扩展名确定 Content-Type
    fn get_content_type(path: &str) -> &'static str {
        match path.rsplit('.').next() {
            Some("css") => "text/css",
            Some("js") => "application/javascript",
            Some("json") => "application/json",
            Some("html") => "text/html; charset=utf-8",
            Some("png") => "image/png",
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("svg") => "image/svg+xml",
            Some("ico") => "image/x-icon",
            Some("woff2") => "font/woff2",
            _ => "application/octet-stream",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_request_page_has_title() {
        let page = render_bad_request();
        assert!(page.contains("400 - Bad Request"));
        assert!(!page.contains("%TITLE%"));
    }

    #[test]
    fn test_content_type() {
        assert_eq!(ResourceService::get_content_type("style.css"), "text/css");
        assert_eq!(ResourceService::get_content_type("a/b/logo.svg"), "image/svg+xml");
        assert_eq!(
            ResourceService::get_content_type("noext"),
            "application/octet-stream"
        );
    }
}
