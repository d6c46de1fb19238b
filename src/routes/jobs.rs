use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use tera::Tera;

use crate::auth::AuthenticatedUser;
use crate::domain::job::{JobKind, JobStatus};
use crate::forms::jobs::AddJobForm;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{ToggleForm, base_context, redirect, render_template};
use crate::services::jobs as jobs_service;
use crate::services::{ListParams, ServiceError};

#[derive(Deserialize)]
pub struct JobListQueryParams {
    q: Option<String>,
    page: Option<usize>,
    kind: Option<String>,
    status: Option<String>,
}

#[get("/admin/jobs")]
pub async fn show_jobs(
    params: web::Query<JobListQueryParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let params = params.into_inner();
    let list_params = ListParams::new(params.q, params.page);
    let kind = params.kind.as_deref().map(JobKind::from);
    let status = params.status.as_deref().map(JobStatus::from);

    match jobs_service::list_jobs(repo.get_ref(), &user, list_params, kind, status) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "jobs",
                &server_config.auth_service_url,
            );
            context.insert("jobs", &data.jobs);
            context.insert("search_query", &data.search);
            context.insert("kind", &params.kind);
            context.insert("status", &params.status);

            render_template(&tera, "admin/jobs.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(err) => {
            log::error!("Failed to list jobs: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/admin/jobs/add")]
pub async fn add_job(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddJobForm>,
) -> impl Responder {
    match jobs_service::add_job(repo.get_ref(), &user, form) {
        Ok(()) => {
            FlashMessage::success("Posting added.").send();
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            return redirect("/na");
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
        }
        Err(err) => {
            log::error!("Failed to add job: {err}");
            FlashMessage::error("Failed to add the posting.").send();
        }
    }
    redirect("/admin/jobs")
}

#[post("/admin/jobs/{job_id}/toggle")]
pub async fn toggle_job(
    job_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<ToggleForm>,
) -> impl Responder {
    match jobs_service::set_job_active(repo.get_ref(), &user, job_id.into_inner(), form.active) {
        Ok(_) => {
            FlashMessage::success("Posting updated.").send();
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            return redirect("/na");
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Posting not found.").send();
        }
        Err(err) => {
            log::error!("Failed to update job: {err}");
            FlashMessage::error("Failed to update the posting.").send();
        }
    }
    redirect("/admin/jobs")
}

#[post("/admin/jobs/{job_id}/delete")]
pub async fn delete_job(
    job_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match jobs_service::delete_job(repo.get_ref(), &user, job_id.into_inner()) {
        Ok(()) => {
            FlashMessage::success("Posting deleted.").send();
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            return redirect("/na");
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Posting not found.").send();
        }
        Err(err) => {
            log::error!("Failed to delete job: {err}");
            FlashMessage::error("Failed to delete the posting.").send();
        }
    }
    redirect("/admin/jobs")
}
