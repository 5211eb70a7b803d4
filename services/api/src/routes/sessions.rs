//! Session routes, including direct seat administration

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};
use uuid::Uuid;

use crate::authz::{authorize, Caller, Operation, Resource};
use crate::controller::{self, DeleteMessage, RecordList, UpdatedRecord};
use crate::error::{ApiError, ApiResult};
use crate::models::{
    CreateSessionRequest, Session, SessionSeat, SessionWithSeats, UpdateSeatRequest,
    UpdateSessionRequest,
};
use crate::state::AppState;
use crate::validation::{validate_new_session, validate_seat_update, validate_session_update};

/// GET /api/sessions (with seat grids attached)
pub async fn index(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
) -> ApiResult<Json<RecordList<SessionWithSeats>>> {
    authorize(Resource::Session, Operation::List, &caller, None)?;
    controller::list(&state.session_repository).await
}

/// GET /api/sessions/:id
pub async fn get_one(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Session>> {
    authorize(Resource::Session, Operation::Get, &caller, None)?;
    controller::get_by_id(&state.session_repository, id).await
}

/// POST /api/sessions (generates the seat grid with the session)
pub async fn store(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    payload: Result<Json<CreateSessionRequest>, JsonRejection>,
) -> ApiResult<Json<Session>> {
    authorize(Resource::Session, Operation::Create, &caller, None)?;
    let Json(req) = payload?;
    let new_session = validate_new_session(&req).map_err(ApiError::invalid_data)?;
    controller::create(&state.session_repository, new_session).await
}

/// PUT /api/sessions/:id
pub async fn update(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<Uuid>,
    payload: Result<Json<UpdateSessionRequest>, JsonRejection>,
) -> ApiResult<Json<UpdatedRecord<Session>>> {
    authorize(Resource::Session, Operation::Update, &caller, None)?;
    let Json(req) = payload?;
    let changes = validate_session_update(&req).map_err(ApiError::invalid_data)?;
    controller::update(&state.session_repository, id, changes).await
}

/// DELETE /api/sessions/:id (blocked while tickets reference the session)
pub async fn remove(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<DeleteMessage>> {
    authorize(Resource::Session, Operation::Delete, &caller, None)?;
    controller::remove(&state.session_repository, id).await
}

/// PUT /api/sessions/:id/seat/:seat_id (administrative seat update)
pub async fn update_seat(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path((session_id, seat_id)): Path<(Uuid, Uuid)>,
    payload: Result<Json<UpdateSeatRequest>, JsonRejection>,
) -> ApiResult<Json<UpdatedRecord<SessionSeat>>> {
    authorize(Resource::SessionSeat, Operation::Update, &caller, None)?;
    let Json(req) = payload?;
    let changes = validate_seat_update(&req).map_err(ApiError::invalid_data)?;

    let record = state
        .session_repository
        .update_seat(session_id, seat_id, changes)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::NotFound("sessionSeat not found".to_string()))?;

    Ok(Json(UpdatedRecord { record }))
}
