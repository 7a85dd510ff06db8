use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;
use validator::Validate;

use crate::forms::suppliers::{AddSupplierForm, SaveSupplierForm};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::{ServiceError, suppliers as suppliers_service};

#[get("/suppliers")]
pub async fn show_suppliers(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match suppliers_service::list_suppliers(repo.get_ref(), &user) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "suppliers",
                &server_config.auth_service_url,
            );
            context.insert("suppliers", &data.suppliers);

            render_template(&tera, "suppliers/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(err) => {
            log::error!("Failed to list suppliers: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/suppliers/add")]
pub async fn add_supplier(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddSupplierForm>,
) -> impl Responder {
    if let Err(e) = form.validate() {
        log::error!("Failed to validate form: {e}");
        FlashMessage::error("Supplier name is required").send();
        return redirect("/suppliers");
    }

    match suppliers_service::add_supplier(
        repo.get_ref(),
        &user,
        form.name.clone(),
        form.supplier_type(),
        form.email(),
    ) {
        Ok(supplier) => {
            FlashMessage::success(format!("Supplier {} added.", supplier.name)).send();
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            return redirect("/na");
        }
        Err(ServiceError::Validation(message)) => {
            FlashMessage::error(message).send();
        }
        Err(err) => {
            log::error!("Failed to add supplier: {err}");
            FlashMessage::error("Failed to add the supplier").send();
        }
    }

    redirect("/suppliers")
}

#[post("/suppliers/save")]
pub async fn save_supplier(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<SaveSupplierForm>,
) -> impl Responder {
    if let Err(e) = form.validate() {
        log::error!("Failed to validate form: {e}");
        FlashMessage::error("Supplier name is required").send();
        return redirect("/suppliers");
    }

    match suppliers_service::save_supplier(
        repo.get_ref(),
        &user,
        form.id,
        form.name.clone(),
        form.supplier_type(),
        form.email(),
    ) {
        Ok(supplier) => {
            FlashMessage::success(format!("Supplier {} updated.", supplier.name)).send();
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            return redirect("/na");
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Supplier not found.").send();
        }
        Err(ServiceError::Validation(message)) => {
            FlashMessage::error(message).send();
        }
        Err(err) => {
            log::error!("Failed to update supplier: {err}");
            FlashMessage::error("Failed to update the supplier").send();
        }
    }

    redirect("/suppliers")
}
