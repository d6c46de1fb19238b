use actix_cors::Cors;
use actix_files::Files;
use actix_identity::IdentityMiddleware;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::middleware::{Compress, Logger};
use actix_web::{App, HttpServer, web};
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
use tera::Tera;

use crate::db::establish_connection_pool;
use crate::middleware::RedirectUnauthorized;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::announcements::{
    add_announcement, delete_announcement, show_announcements, toggle_announcement,
};
use crate::routes::api::{
    api_announcements, api_delete, api_jobs, api_patch, api_products, api_trainings, api_users,
};
use crate::routes::catalog::{internship_board, job_board, product_catalog, training_catalog};
use crate::routes::jobs::{add_job, delete_job, show_jobs, toggle_job};
use crate::routes::main::{index, logout, not_assigned};
use crate::routes::products::{add_product, delete_product, show_products, toggle_product};
use crate::routes::trainings::{add_training, delete_training, show_trainings, toggle_training};
use crate::routes::users::{add_user, delete_user, show_users, toggle_user};

pub mod auth;
pub mod db;
pub mod domain;
pub mod dto;
pub mod forms;
pub mod listview;
pub mod middleware;
pub mod models;
pub mod pagination;
pub mod repository;
pub mod routes;
pub mod schema;
pub mod services;

pub const SERVICE_ACCESS_ROLE: &str = "nexus";
pub const SERVICE_ADMIN_ROLE: &str = "nexus_admin";
pub const SERVICE_MANAGER_ROLE: &str = "nexus_manager";

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
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
            .wrap(Compress::default())
            .wrap(Logger::default())
            .service(Files::new("/assets", "./assets"))
            .service(index)
            .service(training_catalog)
            .service(job_board)
            .service(internship_board)
            .service(product_catalog)
            .service(
                web::scope("/api")
                    .service(api_trainings)
                    .service(api_jobs)
                    .service(api_products)
                    .service(api_users)
                    .service(api_announcements)
                    .service(api_delete)
                    .service(api_patch),
            )
            .service(
                web::scope("")
                    .wrap(RedirectUnauthorized)
                    .service(not_assigned)
                    .service(show_users)
                    .service(add_user)
                    .service(toggle_user)
                    .service(delete_user)
                    .service(show_trainings)
                    .service(add_training)
                    .service(toggle_training)
                    .service(delete_training)
                    .service(show_jobs)
                    .service(add_job)
                    .service(toggle_job)
                    .service(delete_job)
                    .service(show_products)
                    .service(add_product)
                    .service(toggle_product)
                    .service(delete_product)
                    .service(show_announcements)
                    .service(add_announcement)
                    .service(toggle_announcement)
                    .service(delete_announcement)
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
