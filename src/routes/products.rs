use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::auth::AuthenticatedUser;
use crate::forms::products::AddProductForm;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{ListQueryParams, ToggleForm, base_context, redirect, render_template};
use crate::services::products as products_service;
use crate::services::{ListParams, ServiceError};

#[get("/admin/products")]
pub async fn show_products(
    params: web::Query<ListQueryParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let params = params.into_inner();
    let list_params = ListParams::new(params.q, params.page);

    match products_service::list_products(repo.get_ref(), &user, list_params) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "products",
                &server_config.auth_service_url,
            );
            context.insert("products", &data.products);
            context.insert("search_query", &data.search);

            render_template(&tera, "admin/products.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(err) => {
            log::error!("Failed to list products: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/admin/products/add")]
pub async fn add_product(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddProductForm>,
) -> impl Responder {
    match products_service::add_product(repo.get_ref(), &user, form) {
        Ok(()) => {
            FlashMessage::success("Product added.").send();
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            return redirect("/na");
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
        }
        Err(err) => {
            log::error!("Failed to add product: {err}");
            FlashMessage::error("Failed to add the product.").send();
        }
    }
    redirect("/admin/products")
}

#[post("/admin/products/{product_id}/toggle")]
pub async fn toggle_product(
    product_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<ToggleForm>,
) -> impl Responder {
    match products_service::set_product_active(
        repo.get_ref(),
        &user,
        product_id.into_inner(),
        form.active,
    ) {
        Ok(_) => {
            FlashMessage::success("Product updated.").send();
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            return redirect("/na");
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Product not found.").send();
        }
        Err(err) => {
            log::error!("Failed to update product: {err}");
            FlashMessage::error("Failed to update the product.").send();
        }
    }
    redirect("/admin/products")
}

#[post("/admin/products/{product_id}/delete")]
pub async fn delete_product(
    product_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match products_service::delete_product(repo.get_ref(), &user, product_id.into_inner()) {
        Ok(()) => {
            FlashMessage::success("Product deleted.").send();
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            return redirect("/na");
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Product not found.").send();
        }
        Err(err) => {
            log::error!("Failed to delete product: {err}");
            FlashMessage::error("Failed to delete the product.").send();
        }
    }
    redirect("/admin/products")
}
