//! JSON API under `/api/v1`. Serves the envelope the collection view
//! controller consumes; browsers never see these routes.

use actix_web::{HttpResponse, Responder, delete, get, patch, web};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::auth::AuthenticatedUser;
use crate::domain::announcement::UpdateAnnouncement;
use crate::domain::job::UpdateJob;
use crate::domain::product::UpdateProduct;
use crate::domain::training::UpdateTraining;
use crate::domain::user::UpdateUser;
use crate::dto::api::{ApiEnvelope, ApiError};
use crate::repository::DieselRepository;
use crate::services::api::{self as api_service, ApiListParams};
use crate::services::{
    ServiceError, announcements as announcements_service, jobs as jobs_service,
    products as products_service, trainings as trainings_service, users as users_service,
};

fn error_response(err: ServiceError) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => {
            HttpResponse::Unauthorized().json(ApiError::new("Unauthorized"))
        }
        ServiceError::NotFound => HttpResponse::NotFound().json(ApiError::new("Not found")),
        ServiceError::Form(message) => HttpResponse::BadRequest().json(ApiError::new(message)),
        ServiceError::Repository(err) => {
            log::error!("Repository failure: {err}");
            HttpResponse::InternalServerError().json(ApiError::new("Internal error"))
        }
    }
}

fn parse_updates<T: DeserializeOwned>(body: Value) -> Result<T, ServiceError> {
    serde_json::from_value(body).map_err(|_| ServiceError::Form("Invalid update payload".into()))
}

#[get("/v1/trainings")]
pub async fn api_trainings(
    params: web::Query<ApiListParams>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match api_service::list_trainings(repo.get_ref(), &params) {
        Ok(page) => HttpResponse::Ok().json(ApiEnvelope::ok(page)),
        Err(err) => error_response(err),
    }
}

#[get("/v1/jobs")]
pub async fn api_jobs(
    params: web::Query<ApiListParams>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match api_service::list_jobs(repo.get_ref(), &params) {
        Ok(page) => HttpResponse::Ok().json(ApiEnvelope::ok(page)),
        Err(err) => error_response(err),
    }
}

#[get("/v1/products")]
pub async fn api_products(
    params: web::Query<ApiListParams>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match api_service::list_products(repo.get_ref(), &params) {
        Ok(page) => HttpResponse::Ok().json(ApiEnvelope::ok(page)),
        Err(err) => error_response(err),
    }
}

#[get("/v1/users")]
pub async fn api_users(
    params: web::Query<ApiListParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match api_service::list_users(repo.get_ref(), &user, &params) {
        Ok(page) => HttpResponse::Ok().json(ApiEnvelope::ok(page)),
        Err(err) => error_response(err),
    }
}

#[get("/v1/announcements")]
pub async fn api_announcements(
    params: web::Query<ApiListParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match api_service::list_announcements(repo.get_ref(), &user, &params) {
        Ok(page) => HttpResponse::Ok().json(ApiEnvelope::ok(page)),
        Err(err) => error_response(err),
    }
}

#[delete("/v1/{collection}/{id}")]
pub async fn api_delete(
    path: web::Path<(String, i32)>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let (collection, id) = path.into_inner();
    let result = match collection.as_str() {
        "trainings" => trainings_service::delete_training(repo.get_ref(), &user, id),
        "jobs" => jobs_service::delete_job(repo.get_ref(), &user, id),
        "products" => products_service::delete_product(repo.get_ref(), &user, id),
        "users" => users_service::delete_user(repo.get_ref(), &user, id),
        "announcements" => announcements_service::delete_announcement(repo.get_ref(), &user, id),
        _ => return HttpResponse::NotFound().json(ApiError::new("Unknown collection")),
    };

    match result {
        Ok(()) => HttpResponse::Ok()
            .json(serde_json::json!({ "success": true, "message": "Deleted" })),
        Err(err) => error_response(err),
    }
}

#[patch("/v1/{collection}/{id}")]
pub async fn api_patch(
    path: web::Path<(String, i32)>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    body: web::Json<Value>,
) -> impl Responder {
    let (collection, id) = path.into_inner();
    let mut body = body.into_inner();

    match collection.as_str() {
        "trainings" => {
            match parse_updates::<UpdateTraining>(body)
                .and_then(|updates| trainings_service::patch_training(repo.get_ref(), &user, id, updates))
            {
                Ok(record) => HttpResponse::Ok().json(ApiEnvelope::ok(record)),
                Err(err) => error_response(err),
            }
        }
        "jobs" => {
            // The controller toggles every collection with `{"active": bool}`;
            // postings store the flag as a status.
            if let Some(object) = body.as_object_mut()
                && let Some(active) = object.get("active").and_then(Value::as_bool)
                && !object.contains_key("status")
            {
                let status = if active { "active" } else { "closed" };
                object.insert("status".to_string(), Value::String(status.to_string()));
            }
            match parse_updates::<UpdateJob>(body)
                .and_then(|updates| jobs_service::patch_job(repo.get_ref(), &user, id, updates))
            {
                Ok(record) => HttpResponse::Ok().json(ApiEnvelope::ok(record)),
                Err(err) => error_response(err),
            }
        }
        "products" => {
            match parse_updates::<UpdateProduct>(body)
                .and_then(|updates| products_service::patch_product(repo.get_ref(), &user, id, updates))
            {
                Ok(record) => HttpResponse::Ok().json(ApiEnvelope::ok(record)),
                Err(err) => error_response(err),
            }
        }
        "users" => {
            match parse_updates::<UpdateUser>(body)
                .and_then(|updates| users_service::patch_user(repo.get_ref(), &user, id, updates))
            {
                Ok(record) => HttpResponse::Ok().json(ApiEnvelope::ok(record)),
                Err(err) => error_response(err),
            }
        }
        "announcements" => {
            match parse_updates::<UpdateAnnouncement>(body).and_then(|updates| {
                announcements_service::patch_announcement(repo.get_ref(), &user, id, updates)
            }) {
                Ok(record) => HttpResponse::Ok().json(ApiEnvelope::ok(record)),
                Err(err) => error_response(err),
            }
        }
        _ => HttpResponse::NotFound().json(ApiError::new("Unknown collection")),
    }
}
