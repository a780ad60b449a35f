//! HTTP 接口集成测试
//!
//! 使用 `/s/` 作为前缀，存储为临时 SQLite 文件。

use std::sync::Arc;

use actix_http::Request;
use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use serde_json::{Value, json};
use tempfile::TempDir;

use linkshrink::api::middleware::{RequestIdMiddleware, TimingMiddleware};
use linkshrink::api::services::AppStartTime;
use linkshrink::api::{configure_routes, json_config};
use linkshrink::config::{AppConfig, DatabaseConfig};
use linkshrink::services::{IdAllocator, LinkService};
use linkshrink::storage::{LinkStore, SeaOrmStorage};
use linkshrink::utils::password::SecretVerifier;

const SECRET: &str = "correct horse";

struct TestEnv {
    _dir: TempDir,
    config: AppConfig,
    store: Arc<dyn LinkStore>,
    service: Arc<LinkService>,
    verifier: SecretVerifier,
}

async fn test_env() -> TestEnv {
    let dir = TempDir::new().expect("创建临时目录失败");
    let db_path = dir.path().join("links.db");

    let config = AppConfig::from_json_str(
        &json!({
            "prefix": "/s",
            "db": db_path.display().to_string(),
            "password": SECRET,
        })
        .to_string(),
    )
    .expect("配置解析失败");

    let storage = SeaOrmStorage::new(&config.database_url(), "sqlite", &DatabaseConfig::default())
        .await
        .expect("创建存储失败");
    let store: Arc<dyn LinkStore> = Arc::new(storage);
    let service = Arc::new(LinkService::new(store.clone(), IdAllocator::new(64)));
    let verifier = SecretVerifier::from_configured(SECRET).unwrap();

    TestEnv {
        _dir: dir,
        config,
        store,
        service,
        verifier,
    }
}

/// 与 `runtime::server` 相同的路由和中间件
macro_rules! init_app {
    ($env:expr) => {{
        let env = &$env;
        let prefix = env.config.prefix.clone();
        test::init_service(
            App::new()
                .wrap(TimingMiddleware)
                .wrap(RequestIdMiddleware)
                .app_data(json_config())
                .app_data(web::Data::new(env.service.clone()))
                .app_data(web::Data::new(env.store.clone()))
                .app_data(web::Data::new(env.verifier.clone()))
                .app_data(web::Data::new(env.config.clone()))
                .app_data(web::Data::new(AppStartTime::default()))
                .configure(|cfg| configure_routes(cfg, &prefix)),
        )
        .await
    }};
}

fn post_json(uri: &str, body: Value) -> Request {
    TestRequest::post().uri(uri).set_json(body).to_request()
}

#[actix_rt::test]
async fn test_add_returns_prefixed_address() {
    let env = test_env().await;
    let app = init_app!(env);

    let resp = test::call_service(
        &app,
        post_json("/s/add", json!({"address": "www.example.com", "password": SECRET})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let address = body["address"].as_str().unwrap().to_string();
    assert!(address.starts_with("/s/"));

    // 同一目标返回同一地址，/api/add 与 /s/add 等价
    let resp = test::call_service(
        &app,
        post_json(
            "/api/add",
            json!({"address": "https://example.com", "password": SECRET}),
        ),
    )
    .await;
    let again: Value = test::read_body_json(resp).await;
    assert_eq!(again["address"], address);
}

#[actix_rt::test]
async fn test_redirect_follows_created_link() {
    let env = test_env().await;
    let app = init_app!(env);

    let resp = test::call_service(
        &app,
        post_json("/s/add", json!({"address": "example.com/x", "password": SECRET})),
    )
    .await;
    let body: Value = test::read_body_json(resp).await;
    let address = body["address"].as_str().unwrap().to_string();

    let resp = test::call_service(&app, TestRequest::get().uri(&address).to_request()).await;
    assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(
        resp.headers().get("Location").unwrap(),
        "https://example.com/x"
    );
}

#[actix_rt::test]
async fn test_wrong_secret_is_unauthorized_regardless_of_payload() {
    let env = test_env().await;
    let app = init_app!(env);

    for (uri, body) in [
        ("/s/add", json!({"address": "example.com", "password": "nope"})),
        ("/s/add", json!({"address": "a..b", "password": "nope"})),
        ("/api/remove", json!({"address": "a..b", "password": ""})),
        (
            "/api/update",
            json!({"old_address": "x", "new_address": "y", "password": "nope"}),
        ),
    ] {
        let resp = test::call_service(&app, post_json(uri, body)).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{}", uri);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({}));
    }

    assert_eq!(env.store.count().await.unwrap(), 0);
}

#[actix_rt::test]
async fn test_unparsable_body_is_rejected_before_secret_check() {
    let env = test_env().await;
    let app = init_app!(env);

    // 请求体无法反序列化时，提取器先于密钥校验返回 400
    for (uri, body) in [
        ("/s/add", json!({"password": "nope"})),
        ("/api/remove", json!({"address": 42, "password": "nope"})),
        ("/api/update", json!({"old_address": "x", "password": "nope"})),
    ] {
        let resp = test::call_service(&app, post_json(uri, body)).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", uri);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["message"].is_string());
    }

    assert_eq!(env.store.count().await.unwrap(), 0);
}

#[actix_rt::test]
async fn test_invalid_url_is_bad_request() {
    let env = test_env().await;
    let app = init_app!(env);

    let resp = test::call_service(
        &app,
        post_json("/s/add", json!({"address": "a..b", "password": SECRET})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Malformed URL");
}

#[actix_rt::test]
async fn test_malformed_json_is_bad_request() {
    let env = test_env().await;
    let app = init_app!(env);

    let resp = test::call_service(&app, post_json("/s/add", json!({"address": "example.com"})))
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["message"].is_string());

    let req = TestRequest::post()
        .uri("/s/add")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_remove_then_redirect_fails() {
    let env = test_env().await;
    let app = init_app!(env);

    let resp = test::call_service(
        &app,
        post_json("/s/add", json!({"address": "example.com", "password": SECRET})),
    )
    .await;
    let body: Value = test::read_body_json(resp).await;
    let address = body["address"].as_str().unwrap().to_string();

    let resp = test::call_service(
        &app,
        post_json(
            "/api/remove",
            json!({"address": "www.example.com", "password": SECRET}),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["message"].is_string());

    let resp = test::call_service(&app, TestRequest::get().uri(&address).to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(html.contains("400 - Bad Request"));

    // 再删除一次：不存在
    let resp = test::call_service(
        &app,
        post_json(
            "/api/remove",
            json!({"address": "example.com", "password": SECRET}),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_update_keeps_address() {
    let env = test_env().await;
    let app = init_app!(env);

    let resp = test::call_service(
        &app,
        post_json("/s/add", json!({"address": "example.com/old", "password": SECRET})),
    )
    .await;
    let created: Value = test::read_body_json(resp).await;

    let resp = test::call_service(
        &app,
        post_json(
            "/api/update",
            json!({
                "old_address": "example.com/old",
                "new_address": "example.com/new",
                "password": SECRET
            }),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Value = test::read_body_json(resp).await;
    assert_eq!(updated["address"], created["address"]);
    assert!(updated["message"].is_string());

    let address = created["address"].as_str().unwrap();
    let resp = test::call_service(&app, TestRequest::get().uri(address).to_request()).await;
    assert_eq!(
        resp.headers().get("Location").unwrap(),
        "https://example.com/new"
    );

    // 用新地址再次添加，返回的仍是原地址，且不会新增记录
    let resp = test::call_service(
        &app,
        post_json(
            "/s/add",
            json!({"address": "www.example.com/new", "password": SECRET}),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let recreated: Value = test::read_body_json(resp).await;
    assert_eq!(recreated["address"], created["address"]);
    assert_eq!(env.store.count().await.unwrap(), 1);
}

#[actix_rt::test]
async fn test_bad_paths_render_bad_request_page() {
    let env = test_env().await;
    let app = init_app!(env);

    for uri in ["/s/", "/s/0oil", "/s/ABC", "/s/zzzzzzzz", "/s/abc"] {
        let resp = test::call_service(&app, TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", uri);
        let content_type = resp.headers().get("Content-Type").unwrap().to_str().unwrap();
        assert!(content_type.starts_with("text/html"));
    }
}

#[actix_rt::test]
async fn test_every_response_has_request_id() {
    let env = test_env().await;
    let app = init_app!(env);

    let resp = test::call_service(&app, TestRequest::get().uri("/s/").to_request()).await;
    assert!(resp.headers().contains_key("x-request-id"));

    let resp = test::call_service(&app, TestRequest::get().uri("/health").to_request()).await;
    assert!(resp.headers().contains_key("x-request-id"));
}

#[actix_rt::test]
async fn test_health_reports_count() {
    let env = test_env().await;
    let app = init_app!(env);

    env.service.create("example.com").await.unwrap();

    let resp = test::call_service(&app, TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["links_count"], 1);
    assert_eq!(body["backend"], "sqlite");
}

#[actix_rt::test]
async fn test_static_resources() {
    let env = test_env().await;
    let app = init_app!(env);

    let resp = test::call_service(
        &app,
        TestRequest::get().uri("/resources/style.css").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get("Content-Type").unwrap(), "text/css");

    let resp = test::call_service(
        &app,
        TestRequest::get().uri("/resources/missing.js").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
