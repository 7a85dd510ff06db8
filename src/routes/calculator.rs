//! Actions posted from the calculator page: input updates, equipment list
//! mutations, and offer submission. The session value object lives in the
//! cookie session and is re-stored after every mutation.

use actix_session::Session;
use actix_web::{HttpResponse, Responder, post, web};
use actix_web_flash_messages::FlashMessage;
use validator::Validate;

use crate::domain::calculator::CalculatorSession;
use crate::forms::calculator::{
    AddEquipmentForm, CalculatorForm, EquipmentActionForm, MoveEquipmentForm,
};
use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::redirect;
use crate::services::{ServiceError, calculator as calculator_service};

const CALCULATOR_SESSION_KEY: &str = "calculator";

/// The current session's calculator state; a missing or unreadable cookie
/// yields a fresh calculator.
pub fn load_calculator(session: &Session) -> CalculatorSession {
    session
        .get::<CalculatorSession>(CALCULATOR_SESSION_KEY)
        .ok()
        .flatten()
        .unwrap_or_default()
}

fn store_calculator(
    session: &Session,
    calculator: &CalculatorSession,
) -> Result<(), HttpResponse> {
    session
        .insert(CALCULATOR_SESSION_KEY, calculator)
        .map_err(|e| {
            log::error!("Failed to store calculator session: {e}");
            HttpResponse::InternalServerError().finish()
        })
}

#[post("/calculator/update")]
pub async fn update_calculator(
    _user: AuthenticatedUser,
    session: Session,
    web::Form(form): web::Form<CalculatorForm>,
) -> impl Responder {
    let mut calculator = load_calculator(&session);
    form.apply_to(&mut calculator);

    if let Err(response) = store_calculator(&session, &calculator) {
        return response;
    }

    redirect("/")
}

#[post("/calculator/equipment/add")]
pub async fn add_equipment(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    session: Session,
    web::Form(form): web::Form<AddEquipmentForm>,
) -> impl Responder {
    let mut calculator = load_calculator(&session);

    if let Err(e) = form.validate() {
        log::error!("Failed to validate form: {e}");
        FlashMessage::error("Equipment type is required").send();
        return redirect("/");
    }

    form.apply_to(&mut calculator);

    match calculator_service::add_equipment_to_session(repo.get_ref(), &user, &mut calculator) {
        Ok(()) => {}
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            return redirect("/na");
        }
        Err(ServiceError::Validation(message)) => {
            FlashMessage::error(message).send();
        }
        Err(err) => {
            log::error!("Failed to add equipment: {err}");
            FlashMessage::error("Failed to add the equipment line").send();
        }
    }

    // Persist the draft (on validation errors) or the appended list.
    if let Err(response) = store_calculator(&session, &calculator) {
        return response;
    }

    redirect("/")
}

#[post("/calculator/equipment/remove")]
pub async fn remove_equipment(
    _user: AuthenticatedUser,
    session: Session,
    web::Form(form): web::Form<EquipmentActionForm>,
) -> impl Responder {
    let mut calculator = load_calculator(&session);
    calculator_service::remove_equipment(&mut calculator, form.id);

    if let Err(response) = store_calculator(&session, &calculator) {
        return response;
    }

    redirect("/")
}

#[post("/calculator/equipment/edit")]
pub async fn edit_equipment(
    _user: AuthenticatedUser,
    session: Session,
    web::Form(form): web::Form<EquipmentActionForm>,
) -> impl Responder {
    let mut calculator = load_calculator(&session);
    calculator_service::edit_equipment(&mut calculator, form.id);

    if let Err(response) = store_calculator(&session, &calculator) {
        return response;
    }

    redirect("/")
}

#[post("/calculator/equipment/move")]
pub async fn move_equipment(
    _user: AuthenticatedUser,
    session: Session,
    web::Form(form): web::Form<MoveEquipmentForm>,
) -> impl Responder {
    let mut calculator = load_calculator(&session);
    calculator_service::move_equipment(&mut calculator, form.id, form.new_index);

    if let Err(response) = store_calculator(&session, &calculator) {
        return response;
    }

    redirect("/")
}

#[post("/calculator/submit")]
pub async fn submit_offer(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    session: Session,
) -> impl Responder {
    let mut calculator = load_calculator(&session);

    match calculator_service::submit_offer(repo.get_ref(), &user, &mut calculator) {
        Ok(offer) => {
            if let Err(response) = store_calculator(&session, &calculator) {
                return response;
            }
            FlashMessage::success(format!("Offer #{} submitted.", offer.id)).send();
            redirect("/offers")
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::Validation(message)) => {
            FlashMessage::error(message).send();
            redirect("/")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Selected leaser or client no longer exists.").send();
            redirect("/")
        }
        Err(err) => {
            log::error!("Failed to submit offer: {err}");
            FlashMessage::error("Failed to submit the offer").send();
            redirect("/")
        }
    }
}
