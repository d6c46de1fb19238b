use actix_identity::{Identity, IdentityMiddleware};
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::http::{StatusCode, header};
use actix_web::{App, HttpMessage, HttpRequest, HttpResponse, test, web};
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
use tera::Tera;

use arsa_nexus::auth::AuthenticatedUser;
use arsa_nexus::domain::user::NewUser;
use arsa_nexus::middleware::RedirectUnauthorized;
use arsa_nexus::models::config::ServerConfig;
use arsa_nexus::repository::{DieselRepository, UserWriter};
use arsa_nexus::routes::users::show_users;

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
        // A `Set-Cookie` with an empty value is a deletion; a browser would
        // drop the cookie rather than send it back.
        .filter(|pair| !matches!(pair.split_once('='), Some((_, ""))))
        .collect::<Vec<_>>()
        .join("; ")
}

/// The admin users page mounted the way `run` mounts it: behind the flash,
/// identity, and session middleware, inside a scope wrapped in
/// [`RedirectUnauthorized`].
macro_rules! admin_app {
    ($repo:expr, $config:expr) => {{
        let repo = $repo;
        let config = $config;
        let secret_key = Key::from(config.secret.as_bytes());
        let message_store = CookieMessageStore::builder(secret_key.clone()).build();
        let tera = Tera::new(&config.templates_dir).expect("failed to parse templates");

        test::init_service(
            App::new()
                .wrap(FlashMessagesFramework::builder(message_store).build())
                .wrap(IdentityMiddleware::default())
                .wrap(
                    SessionMiddleware::builder(CookieSessionStore::default(), secret_key)
                        .cookie_secure(false)
                        .build(),
                )
                .app_data(web::Data::new(repo))
                .app_data(web::Data::new(config))
                .app_data(web::Data::new(tera))
                .route("/login", web::post().to(login))
                .service(web::scope("").wrap(RedirectUnauthorized).service(show_users)),
        )
        .await
    }};
}

#[actix_web::test]
async fn browser_without_session_is_redirected_to_signin() {
    let db = common::TestDb::new("test_middleware_redirect.db");
    let repo = DieselRepository::new(db.pool().clone());

    let app = admin_app!(repo, server_config());

    let req = test::TestRequest::get().uri("/admin/users").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        "/auth/signin"
    );
}

#[actix_web::test]
async fn admin_session_passes_through_to_the_page() {
    let db = common::TestDb::new("test_middleware_pass.db");
    let repo = DieselRepository::new(db.pool().clone());
    repo.create_user(&NewUser::new(
        "Grace Hopper".to_string(),
        "grace@example.com".to_string(),
        "admin".to_string(),
    ))
    .unwrap();

    let app = admin_app!(repo, server_config());

    let req = test::TestRequest::post().uri("/login").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let cookies = session_cookies(&resp);
    assert!(!cookies.is_empty());

    let req = test::TestRequest::get()
        .uri("/admin/users")
        .insert_header((header::COOKIE, cookies))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("grace@example.com"));
}
