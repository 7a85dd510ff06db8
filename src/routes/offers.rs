use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use tera::Tera;

use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::{ServiceError, offers as offers_service};

#[derive(Deserialize)]
struct OffersQueryParams {
    page: Option<usize>,
}

#[get("/offers")]
pub async fn show_offers(
    params: web::Query<OffersQueryParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let page = params.page.unwrap_or(1);

    match offers_service::list_offers(repo.get_ref(), &user, page) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "offers",
                &server_config.auth_service_url,
            );
            context.insert("offers", &data.offers);

            render_template(&tera, "offers/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(err) => {
            log::error!("Failed to list offers: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/offers/{offer_id}/accept")]
pub async fn accept_offer(
    offer_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match offers_service::accept_offer(repo.get_ref(), &user, offer_id.into_inner()) {
        Ok(offer) => {
            FlashMessage::success(format!(
                "Offer #{} accepted; equipment queued for ordering.",
                offer.id
            ))
            .send();
            redirect("/orders")
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Offer not found.").send();
            redirect("/offers")
        }
        Err(ServiceError::Validation(message)) => {
            FlashMessage::warning(message).send();
            redirect("/offers")
        }
        Err(err) => {
            log::error!("Failed to accept offer: {err}");
            FlashMessage::error("Failed to accept the offer").send();
            redirect("/offers")
        }
    }
}
