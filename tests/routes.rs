use actix_identity::{Identity, IdentityMiddleware};
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::http::{StatusCode, header};
use actix_web::{App, HttpMessage, HttpRequest, HttpResponse, test, web};
use serde_json::Value;

use arsa_nexus::auth::AuthenticatedUser;
use arsa_nexus::domain::training::NewTraining;
use arsa_nexus::models::config::ServerConfig;
use arsa_nexus::repository::{DieselRepository, TrainingWriter};
use arsa_nexus::routes::api::{api_delete, api_trainings, api_users};

mod common;

fn server_config() -> ServerConfig {
    ServerConfig {
        domain: "localhost".to_string(),
        address: "127.0.0.1".to_string(),
        port: 8080,
        database_url: ":memory:".to_string(),
        templates_dir: "templates/**/*.html".to_string(),
        secret: "0123456789012345678901234567890123456789012345678901234567890123".to_string(),
        auth_service_url: "http://localhost:8081".to_string(),
    }
}

/// Test-only login endpoint: issues a token for an admin session so the
/// identity cookie can be replayed against gated routes.
async fn login(req: HttpRequest, config: web::Data<ServerConfig>) -> HttpResponse {
    let user = AuthenticatedUser {
        sub: "1".to_string(),
        email: "admin@example.com".to_string(),
        name: "Admin".to_string(),
        roles: vec!["nexus".to_string(), "nexus_admin".to_string()],
        exp: (chrono::Utc::now().timestamp() + 3600) as usize,
    };
    let token = user.to_jwt(&config.secret).expect("failed to sign token");
    Identity::login(&req.extensions(), token).expect("failed to log in");
    HttpResponse::Ok().finish()
}

fn session_cookies(resp: &actix_web::dev::ServiceResponse) -> String {
    resp.headers()
        .get_all(header::SET_COOKIE)
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| value.split(';').next())
        .collect::<Vec<_>>()
        .join("; ")
}

#[actix_web::test]
async fn trainings_endpoint_returns_the_list_envelope() {
    let db = common::TestDb::new("test_routes_trainings.db");
    let repo = DieselRepository::new(db.pool().clone());
    repo.create_training(&NewTraining::new(
        "Rust Basics".to_string(),
        "Ownership and borrowing".to_string(),
        "Programming".to_string(),
        "Beginner".to_string(),
        49.0,
        false,
    ))
    .unwrap();

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(repo))
            .service(web::scope("/api").service(api_trainings)),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/v1/trainings?limit=10")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["success"], Value::Bool(true));
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["pagination"]["page"], 1);
    assert_eq!(body["data"]["pagination"]["totalPages"], 1);
    assert_eq!(body["data"]["pagination"]["total"], 1);
}

#[actix_web::test]
async fn users_endpoint_requires_a_session() {
    let db = common::TestDb::new("test_routes_users_unauth.db");
    let repo = DieselRepository::new(db.pool().clone());
    let config = server_config();

    let app = test::init_service(
        App::new()
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
                    .cookie_secure(false)
                    .build(),
            )
            .app_data(web::Data::new(repo))
            .app_data(web::Data::new(config))
            .service(web::scope("/api").service(api_users)),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/v1/users").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn admin_session_can_list_and_delete() {
    let db = common::TestDb::new("test_routes_admin.db");
    let repo = DieselRepository::new(db.pool().clone());
    let created = repo
        .create_training(&NewTraining::new(
            "Rust Basics".to_string(),
            "Ownership and borrowing".to_string(),
            "Programming".to_string(),
            "Beginner".to_string(),
            49.0,
            false,
        ))
        .unwrap();
    let config = server_config();

    let app = test::init_service(
        App::new()
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
                    .cookie_secure(false)
                    .build(),
            )
            .app_data(web::Data::new(repo))
            .app_data(web::Data::new(config))
            .route("/login", web::post().to(login))
            .service(web::scope("/api").service(api_users).service(api_delete)),
    )
    .await;

    let req = test::TestRequest::post().uri("/login").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let cookies = session_cookies(&resp);
    assert!(!cookies.is_empty());

    let req = test::TestRequest::get()
        .uri("/api/v1/users")
        .insert_header((header::COOKIE, cookies.clone()))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["success"], Value::Bool(true));

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/trainings/{}", created.id))
        .insert_header((header::COOKIE, cookies))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["success"], Value::Bool(true));
    assert_eq!(body["message"], "Deleted");
}
