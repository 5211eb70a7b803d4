//! Ticket routes

use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};

use crate::authz::{authorize, Caller, Operation, Resource};
use crate::error::{ApiError, ApiResult};
use crate::models::{PurchaseTicketRequest, Ticket};
use crate::state::AppState;
use crate::validation::validate_purchase;

/// POST /api/tickets
///
/// The caller buys a seat for themselves; the ticket owner is taken
/// from the token, never from the body.
pub async fn purchase(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    payload: Result<Json<PurchaseTicketRequest>, JsonRejection>,
) -> ApiResult<Json<Ticket>> {
    authorize(Resource::Ticket, Operation::Create, &caller, None)?;
    let Json(req) = payload?;
    let purchase = validate_purchase(&req).map_err(ApiError::invalid_data)?;

    let ticket = state
        .ticket_repository
        .purchase(caller.id, &purchase)
        .await?;

    Ok(Json(ticket))
}
