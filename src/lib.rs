#[cfg(feature = "server")]
use actix_cors::Cors;
#[cfg(feature = "server")]
use actix_files::Files;
#[cfg(feature = "server")]
use actix_identity::IdentityMiddleware;
#[cfg(feature = "server")]
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
#[cfg(feature = "server")]
use actix_web::cookie::Key;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, middleware as actix_middleware, web};
#[cfg(feature = "server")]
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
#[cfg(feature = "server")]
use tera::Tera;

#[cfg(feature = "server")]
use crate::db::establish_connection_pool;
#[cfg(feature = "server")]
use crate::middleware::RedirectUnauthorized;
#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::repository::DieselRepository;
#[cfg(feature = "server")]
use crate::routes::api::api_v1_orders;
#[cfg(feature = "server")]
use crate::routes::calculator::{
    add_equipment, edit_equipment, move_equipment, remove_equipment, submit_offer,
    update_calculator,
};
#[cfg(feature = "server")]
use crate::routes::leasers::{add_leaser, show_leasers, upload_coefficients};
#[cfg(feature = "server")]
use crate::routes::main::{add_client, logout, not_assigned, show_index};
#[cfg(feature = "server")]
use crate::routes::offers::{accept_offer, show_offers};
#[cfg(feature = "server")]
use crate::routes::orders::{
    assign_item_supplier, save_unit, set_item_status, set_unit_status, show_orders, split_item,
};
#[cfg(feature = "server")]
use crate::routes::suppliers::{add_supplier, save_supplier, show_suppliers};

pub mod db;
pub mod domain;
#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod middleware;
pub mod models;
#[cfg(feature = "server")]
pub mod pagination;
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
pub mod schema;
#[cfg(feature = "server")]
pub mod services;

pub const SERVICE_ACCESS_ROLE: &str = "leasing";
pub const SERVICE_ADMIN_ROLE: &str = "leasing_admin";

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    // Establish Diesel connection pool for the SQLite database.
    let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
        std::io::Error::other(format!("Failed to establish database connection: {e}"))
    })?;

    let repo = DieselRepository::new(pool);

    // Keys and stores for identity, sessions, and flash messages.
    let secret_key = Key::from(server_config.secret.as_bytes());

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

    let bind_address = (server_config.address.clone(), server_config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(message_framework.clone())
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .cookie_domain(Some(format!(".{}", server_config.domain)))
                    .build(),
            )
            .wrap(actix_middleware::Compress::default())
            .wrap(actix_middleware::Logger::default())
            .service(Files::new("/assets", "./assets"))
            .service(not_assigned)
            .service(web::scope("/api").service(api_v1_orders))
            .service(
                web::scope("")
                    .wrap(RedirectUnauthorized)
                    .service(show_index)
                    .service(update_calculator)
                    .service(add_equipment)
                    .service(remove_equipment)
                    .service(edit_equipment)
                    .service(move_equipment)
                    .service(submit_offer)
                    .service(add_client)
                    .service(show_offers)
                    .service(accept_offer)
                    .service(show_orders)
                    .service(set_item_status)
                    .service(split_item)
                    .service(assign_item_supplier)
                    .service(set_unit_status)
                    .service(save_unit)
                    .service(show_leasers)
                    .service(add_leaser)
                    .service(upload_coefficients)
                    .service(show_suppliers)
                    .service(add_supplier)
                    .service(save_supplier)
                    .service(logout),
            )
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
