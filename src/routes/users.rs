use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::auth::AuthenticatedUser;
use crate::forms::users::AddUserForm;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{ListQueryParams, ToggleForm, base_context, redirect, render_template};
use crate::services::users as users_service;
use crate::services::{ListParams, ServiceError};

#[get("/admin/users")]
pub async fn show_users(
    params: web::Query<ListQueryParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let params = params.into_inner();
    let list_params = ListParams::new(params.q, params.page);

    match users_service::list_users(repo.get_ref(), &user, list_params) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "users",
                &server_config.auth_service_url,
            );
            context.insert("users", &data.users);
            context.insert("search_query", &data.search);

            render_template(&tera, "admin/users.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(err) => {
            log::error!("Failed to list users: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/admin/users/add")]
pub async fn add_user(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddUserForm>,
) -> impl Responder {
    match users_service::add_user(repo.get_ref(), &user, form) {
        Ok(()) => {
            FlashMessage::success("User added.").send();
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            return redirect("/na");
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
        }
        Err(err) => {
            log::error!("Failed to add user: {err}");
            FlashMessage::error("Failed to add the user.").send();
        }
    }
    redirect("/admin/users")
}

#[post("/admin/users/{user_id}/toggle")]
pub async fn toggle_user(
    user_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<ToggleForm>,
) -> impl Responder {
    match users_service::set_user_active(repo.get_ref(), &user, user_id.into_inner(), form.active)
    {
        Ok(_) => {
            FlashMessage::success("User updated.").send();
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            return redirect("/na");
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("User not found.").send();
        }
        Err(err) => {
            log::error!("Failed to update user: {err}");
            FlashMessage::error("Failed to update the user.").send();
        }
    }
    redirect("/admin/users")
}

#[post("/admin/users/{user_id}/delete")]
pub async fn delete_user(
    user_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match users_service::delete_user(repo.get_ref(), &user, user_id.into_inner()) {
        Ok(()) => {
            FlashMessage::success("User deleted.").send();
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            return redirect("/na");
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("User not found.").send();
        }
        Err(err) => {
            log::error!("Failed to delete user: {err}");
            FlashMessage::error("Failed to delete the user.").send();
        }
    }
    redirect("/admin/users")
}
