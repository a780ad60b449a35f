pub mod health;
pub mod links;
pub mod redirect;
pub mod resources;

use actix_web::web;

pub use health::{AppStartTime, HealthService};
pub use links::LinkApiService;
pub use redirect::RedirectService;
pub use resources::ResourceService;

/// 注册所有路由
///
/// `/health`、`/resources`、`/api` 必须先于带前缀的重定向路由注册，
/// 否则空前缀时 `/{code}` 会先匹配。
pub fn configure_routes(cfg: &mut web::ServiceConfig, prefix: &str) {
    cfg.route("/health", web::get().to(HealthService::health_check))
        .route("/health", web::head().to(HealthService::health_check))
        .route(
            "/resources/{path:.*}",
            web::get().to(ResourceService::handle_static),
        )
        .service(
            web::scope("/api")
                .route("/add", web::post().to(LinkApiService::add_link))
                .route("/remove", web::post().to(LinkApiService::remove_link))
                .route("/update", web::post().to(LinkApiService::update_link)),
        )
        .route(
            &format!("/{}add", prefix),
            web::post().to(LinkApiService::add_link),
        )
        .route(
            &format!("/{}", prefix),
            web::get().to(RedirectService::handle_prefix_root),
        )
        .route(
            &format!("/{}{{code}}", prefix),
            web::get().to(RedirectService::handle_redirect),
        );
}
