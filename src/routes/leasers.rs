use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;
use validator::Validate;

use crate::forms::leasers::{AddLeaserForm, UploadCoefficientsForm};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::{ServiceError, leasers as leasers_service};

#[get("/leasers")]
pub async fn show_leasers(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match leasers_service::list_leasers(repo.get_ref(), &user) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "leasers",
                &server_config.auth_service_url,
            );
            context.insert("leasers", &data.leasers);

            render_template(&tera, "leasers/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(err) => {
            log::error!("Failed to list leasers: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/leasers/add")]
pub async fn add_leaser(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddLeaserForm>,
) -> impl Responder {
    if let Err(e) = form.validate() {
        log::error!("Failed to validate form: {e}");
        FlashMessage::error("Leaser name is required").send();
        return redirect("/leasers");
    }

    match leasers_service::add_leaser(repo.get_ref(), &user, form.name) {
        Ok(leaser) => {
            FlashMessage::success(format!("Leaser {} added.", leaser.name)).send();
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            return redirect("/na");
        }
        Err(ServiceError::Validation(message)) => {
            FlashMessage::error(message).send();
        }
        Err(err) => {
            log::error!("Failed to add leaser: {err}");
            FlashMessage::error("Failed to add the leaser").send();
        }
    }

    redirect("/leasers")
}

/// Replaces the leaser's coefficient table with the uploaded CSV.
#[post("/leasers/{leaser_id}/coefficients")]
pub async fn upload_coefficients(
    leaser_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    MultipartForm(form): MultipartForm<UploadCoefficientsForm>,
) -> impl Responder {
    let file = match form.open() {
        Ok(file) => file,
        Err(e) => {
            log::error!("Failed to open uploaded coefficients: {e}");
            FlashMessage::error("Could not read the uploaded file").send();
            return redirect("/leasers");
        }
    };

    match leasers_service::upload_coefficients(repo.get_ref(), &user, leaser_id.into_inner(), file)
    {
        Ok(count) => {
            FlashMessage::success(format!("Imported {count} coefficient rows.")).send();
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            return redirect("/na");
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Leaser not found.").send();
        }
        Err(ServiceError::Validation(message)) => {
            FlashMessage::error(message).send();
        }
        Err(err) => {
            log::error!("Failed to import coefficients: {err}");
            FlashMessage::error("Failed to import the coefficient table").send();
        }
    }

    redirect("/leasers")
}
