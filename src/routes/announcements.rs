use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::auth::AuthenticatedUser;
use crate::forms::announcements::AddAnnouncementForm;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{ListQueryParams, ToggleForm, base_context, redirect, render_template};
use crate::services::announcements as announcements_service;
use crate::services::{ListParams, ServiceError};

#[get("/admin/announcements")]
pub async fn show_announcements(
    params: web::Query<ListQueryParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let params = params.into_inner();
    let list_params = ListParams::new(params.q, params.page);

    match announcements_service::list_announcements(repo.get_ref(), &user, list_params) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "announcements",
                &server_config.auth_service_url,
            );
            context.insert("announcements", &data.announcements);
            context.insert("search_query", &data.search);

            render_template(&tera, "admin/announcements.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(err) => {
            log::error!("Failed to list announcements: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/admin/announcements/add")]
pub async fn add_announcement(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddAnnouncementForm>,
) -> impl Responder {
    match announcements_service::add_announcement(repo.get_ref(), &user, form) {
        Ok(()) => {
            FlashMessage::success("Announcement published.").send();
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            return redirect("/na");
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
        }
        Err(err) => {
            log::error!("Failed to add announcement: {err}");
            FlashMessage::error("Failed to publish the announcement.").send();
        }
    }
    redirect("/admin/announcements")
}

#[post("/admin/announcements/{announcement_id}/toggle")]
pub async fn toggle_announcement(
    announcement_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<ToggleForm>,
) -> impl Responder {
    match announcements_service::set_announcement_active(
        repo.get_ref(),
        &user,
        announcement_id.into_inner(),
        form.active,
    ) {
        Ok(_) => {
            FlashMessage::success("Announcement updated.").send();
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            return redirect("/na");
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Announcement not found.").send();
        }
        Err(err) => {
            log::error!("Failed to update announcement: {err}");
            FlashMessage::error("Failed to update the announcement.").send();
        }
    }
    redirect("/admin/announcements")
}

#[post("/admin/announcements/{announcement_id}/delete")]
pub async fn delete_announcement(
    announcement_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match announcements_service::delete_announcement(
        repo.get_ref(),
        &user,
        announcement_id.into_inner(),
    ) {
        Ok(()) => {
            FlashMessage::success("Announcement deleted.").send();
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            return redirect("/na");
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Announcement not found.").send();
        }
        Err(err) => {
            log::error!("Failed to delete announcement: {err}");
            FlashMessage::error("Failed to delete the announcement.").send();
        }
    }
    redirect("/admin/announcements")
}
