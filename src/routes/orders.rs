use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use tera::Tera;

use crate::forms::orders::{AssignSupplierForm, SaveUnitForm, SetStatusForm};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::orders::OrdersQuery;
use crate::services::{ServiceError, orders as orders_service};

#[derive(Deserialize)]
struct OrdersQueryParams {
    status: Option<String>,
    q: Option<String>,
    page: Option<usize>,
}

#[get("/orders")]
pub async fn show_orders(
    params: web::Query<OrdersQueryParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let params = params.into_inner();
    let status_filter = params
        .status
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let query = OrdersQuery {
        status: status_filter.map(Into::into),
        search: params.q.clone(),
        page: params.page,
    };

    match orders_service::list_orders(repo.get_ref(), &user, query) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "orders",
                &server_config.auth_service_url,
            );
            context.insert("orders", &data.orders);
            context.insert("totals", &data.totals);
            context.insert("suppliers", &data.suppliers);
            if let Some(status) = status_filter {
                context.insert("status_filter", status);
            }
            if let Some(q) = params.q.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
                context.insert("search_query", q);
            }

            render_template(&tera, "orders/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(err) => {
            log::error!("Failed to list orders: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/orders/{item_id}/status")]
pub async fn set_item_status(
    item_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<SetStatusForm>,
) -> impl Responder {
    match orders_service::set_item_status(
        repo.get_ref(),
        &user,
        item_id.into_inner(),
        form.status(),
    ) {
        Ok(item) => {
            FlashMessage::success(format!("{} marked {}.", item.title, item.order_status)).send();
        }
        Err(err) => flash_order_error(err),
    }

    redirect("/orders")
}

#[post("/orders/{item_id}/split")]
pub async fn split_item(
    item_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match orders_service::split_into_units(repo.get_ref(), &user, item_id.into_inner()) {
        Ok(count) => {
            FlashMessage::success(format!("Split into {count} units.")).send();
        }
        Err(err) => flash_order_error(err),
    }

    redirect("/orders")
}

#[post("/orders/{item_id}/supplier")]
pub async fn assign_item_supplier(
    item_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AssignSupplierForm>,
) -> impl Responder {
    match orders_service::assign_item_supplier(
        repo.get_ref(),
        &user,
        item_id.into_inner(),
        form.supplier_id(),
        form.supplier_price(),
    ) {
        Ok(_) => {
            FlashMessage::success("Supplier saved.").send();
        }
        Err(err) => flash_order_error(err),
    }

    redirect("/orders")
}

#[post("/orders/units/{unit_id}/status")]
pub async fn set_unit_status(
    unit_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<SetStatusForm>,
) -> impl Responder {
    match orders_service::set_unit_status(
        repo.get_ref(),
        &user,
        unit_id.into_inner(),
        form.status(),
    ) {
        Ok(unit) => {
            FlashMessage::success(format!(
                "Unit {} marked {}.",
                unit.unit_index, unit.order_status
            ))
            .send();
        }
        Err(err) => flash_order_error(err),
    }

    redirect("/orders")
}

#[post("/orders/units/{unit_id}/save")]
pub async fn save_unit(
    unit_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<SaveUnitForm>,
) -> impl Responder {
    match orders_service::save_unit(repo.get_ref(), &user, unit_id.into_inner(), (&form).into()) {
        Ok(_) => {
            FlashMessage::success("Unit saved.").send();
        }
        Err(err) => flash_order_error(err),
    }

    redirect("/orders")
}

/// Flash mapping shared by every orders action.
fn flash_order_error(err: ServiceError) {
    match err {
        ServiceError::Unauthorized => {
            FlashMessage::error("Insufficient permissions.").send();
        }
        ServiceError::NotFound => {
            FlashMessage::error("Order item not found.").send();
        }
        ServiceError::AlreadySplit => {
            FlashMessage::warning("Item is already split into units.").send();
        }
        ServiceError::Validation(message) => {
            FlashMessage::error(message).send();
        }
        err @ ServiceError::InvalidTransition { .. } => {
            FlashMessage::error(err.to_string()).send();
        }
        err => {
            log::error!("Order action failed: {err}");
            FlashMessage::error("The change could not be saved").send();
        }
    }
}
