//! Public catalog pages. One repository fetch per request; filtering and
//! sorting happen in memory so the filter widgets never hit the database
//! again.

use actix_web::{Responder, get, web};
use serde::Deserialize;
use tera::{Context, Tera};

use crate::domain::job::JobKind;
use crate::repository::DieselRepository;
use crate::routes::render_template;
use crate::services::catalog::{self as catalog_service, CatalogQuery};

#[derive(Deserialize)]
pub struct CatalogQueryParams {
    q: Option<String>,
    category: Option<String>,
    location_type: Option<String>,
    level: Option<String>,
    sort: Option<String>,
}

impl From<CatalogQueryParams> for CatalogQuery {
    fn from(params: CatalogQueryParams) -> Self {
        CatalogQuery {
            search: params.q,
            category: params.category,
            location_type: params.location_type,
            level: params.level,
            sort: params.sort,
        }
    }
}

fn catalog_context(params: &CatalogQuery, current_page: &str) -> Context {
    let mut context = Context::new();
    context.insert("current_page", current_page);
    context.insert("search_query", &params.search);
    context.insert("category", &params.category);
    context.insert("location_type", &params.location_type);
    context.insert("level", &params.level);
    context.insert("sort", &params.sort);
    context
}

#[get("/training")]
pub async fn training_catalog(
    params: web::Query<CatalogQueryParams>,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let params: CatalogQuery = params.into_inner().into();
    match catalog_service::load_trainings(repo.get_ref(), &params) {
        Ok(trainings) => {
            let mut context = catalog_context(&params, "training");
            context.insert("trainings", &trainings);
            render_template(&tera, "catalog/trainings.html", &context)
        }
        Err(err) => {
            log::error!("Failed to load trainings: {err}");
            actix_web::HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/jobs")]
pub async fn job_board(
    params: web::Query<CatalogQueryParams>,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let params: CatalogQuery = params.into_inner().into();
    match catalog_service::load_jobs(repo.get_ref(), JobKind::Job, &params) {
        Ok(jobs) => {
            let mut context = catalog_context(&params, "jobs");
            context.insert("jobs", &jobs);
            render_template(&tera, "catalog/jobs.html", &context)
        }
        Err(err) => {
            log::error!("Failed to load jobs: {err}");
            actix_web::HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/internships")]
pub async fn internship_board(
    params: web::Query<CatalogQueryParams>,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let params: CatalogQuery = params.into_inner().into();
    match catalog_service::load_jobs(repo.get_ref(), JobKind::Internship, &params) {
        Ok(jobs) => {
            let mut context = catalog_context(&params, "internships");
            context.insert("jobs", &jobs);
            render_template(&tera, "catalog/jobs.html", &context)
        }
        Err(err) => {
            log::error!("Failed to load internships: {err}");
            actix_web::HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/products")]
pub async fn product_catalog(
    params: web::Query<CatalogQueryParams>,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let params: CatalogQuery = params.into_inner().into();
    match catalog_service::load_products(repo.get_ref(), &params) {
        Ok(products) => {
            let mut context = catalog_context(&params, "products");
            context.insert("products", &products);
            render_template(&tera, "catalog/products.html", &context)
        }
        Err(err) => {
            log::error!("Failed to load products: {err}");
            actix_web::HttpResponse::InternalServerError().finish()
        }
    }
}
