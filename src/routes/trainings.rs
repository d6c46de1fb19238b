use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::auth::AuthenticatedUser;
use crate::forms::trainings::AddTrainingForm;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{ListQueryParams, ToggleForm, base_context, redirect, render_template};
use crate::services::trainings as trainings_service;
use crate::services::{ListParams, ServiceError};

#[get("/admin/trainings")]
pub async fn show_trainings(
    params: web::Query<ListQueryParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let params = params.into_inner();
    let list_params = ListParams::new(params.q, params.page);

    match trainings_service::list_trainings(repo.get_ref(), &user, list_params) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "trainings",
                &server_config.auth_service_url,
            );
            context.insert("trainings", &data.trainings);
            context.insert("search_query", &data.search);

            render_template(&tera, "admin/trainings.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(err) => {
            log::error!("Failed to list trainings: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/admin/trainings/add")]
pub async fn add_training(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddTrainingForm>,
) -> impl Responder {
    match trainings_service::add_training(repo.get_ref(), &user, form) {
        Ok(()) => {
            FlashMessage::success("Training program added.").send();
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            return redirect("/na");
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
        }
        Err(err) => {
            log::error!("Failed to add training: {err}");
            FlashMessage::error("Failed to add the training program.").send();
        }
    }
    redirect("/admin/trainings")
}

#[post("/admin/trainings/{training_id}/toggle")]
pub async fn toggle_training(
    training_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<ToggleForm>,
) -> impl Responder {
    match trainings_service::set_training_active(
        repo.get_ref(),
        &user,
        training_id.into_inner(),
        form.active,
    ) {
        Ok(_) => {
            FlashMessage::success("Training program updated.").send();
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            return redirect("/na");
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Training program not found.").send();
        }
        Err(err) => {
            log::error!("Failed to update training: {err}");
            FlashMessage::error("Failed to update the training program.").send();
        }
    }
    redirect("/admin/trainings")
}

#[post("/admin/trainings/{training_id}/delete")]
pub async fn delete_training(
    training_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match trainings_service::delete_training(repo.get_ref(), &user, training_id.into_inner()) {
        Ok(()) => {
            FlashMessage::success("Training program deleted.").send();
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            return redirect("/na");
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Training program not found.").send();
        }
        Err(err) => {
            log::error!("Failed to delete training: {err}");
            FlashMessage::error("Failed to delete the training program.").send();
        }
    }
    redirect("/admin/trainings")
}
