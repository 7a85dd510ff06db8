use actix_identity::IdentityMiddleware;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::{App, http::StatusCode, test, web};

use leasedesk::models::config::ServerConfig;
use leasedesk::repository::DieselRepository;
use leasedesk::routes::api::api_v1_orders;

mod common;

fn test_config() -> ServerConfig {
    ServerConfig {
        domain: "localhost".to_string(),
        address: "127.0.0.1".to_string(),
        port: 8080,
        database_url: ":memory:".to_string(),
        templates_dir: "templates/**/*.html".to_string(),
        secret: "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef".to_string(),
        auth_service_url: "https://auth.localhost".to_string(),
    }
}

#[actix_web::test]
async fn api_orders_requires_authentication() {
    let test_db = common::TestDb::new("test_api_auth.db");
    let repo = DieselRepository::new(test_db.pool().clone());
    let config = test_config();
    let secret_key = Key::from(config.secret.as_bytes());

    let app = test::init_service(
        App::new()
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key)
                    .cookie_secure(false)
                    .build(),
            )
            .app_data(web::Data::new(repo))
            .app_data(web::Data::new(config))
            .service(web::scope("/api").service(api_v1_orders)),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/v1/orders").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
