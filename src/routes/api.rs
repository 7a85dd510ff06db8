use actix_web::{HttpResponse, Responder, get, web};
use serde::Deserialize;
use serde_json::json;

use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::services::api::{OrdersQuery, list_orders};
use crate::services::ServiceError;

#[derive(Deserialize)]
struct ApiV1OrdersQueryParams {
    status: Option<String>,
    query: Option<String>,
    page: Option<usize>,
}

/// Hub-scoped order item search for integration consumers.
#[get("/v1/orders")]
pub async fn api_v1_orders(
    params: web::Query<ApiV1OrdersQueryParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let params = params.into_inner();
    let query = OrdersQuery {
        status: params.status,
        search: params.query,
        page: params.page,
    };

    match list_orders(repo.get_ref(), &user, query) {
        Ok(response) => HttpResponse::Ok().json(json!({
            "total": response.total,
            "items": response.items,
        })),
        Err(ServiceError::Unauthorized) => HttpResponse::Unauthorized().finish(),
        Err(e) => {
            log::error!("Failed to list orders: {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
