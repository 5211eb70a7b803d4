//! User routes: accounts and login

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};
use uuid::Uuid;

use crate::authz::{authorize, Caller, Operation, Resource};
use crate::controller::{self, DeleteMessage, RecordList, UpdatedRecord};
use crate::error::{ApiError, ApiResult};
use crate::models::{CreateUserRequest, LoginRequest, TokenResponse, UpdateUserRequest, User};
use crate::state::AppState;
use crate::validation::{validate_login, validate_new_user, validate_user_update};

/// GET /api/users
pub async fn index(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
) -> ApiResult<Json<RecordList<User>>> {
    authorize(Resource::User, Operation::List, &caller, None)?;
    controller::list(&state.user_repository).await
}

/// GET /api/users/:id
pub async fn get_one(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<User>> {
    authorize(Resource::User, Operation::Get, &caller, Some(id))?;
    controller::get_by_id(&state.user_repository, id).await
}

/// POST /api/users (public sign-up)
pub async fn store(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> ApiResult<Json<User>> {
    let Json(req) = payload?;
    let new_user = validate_new_user(&req).map_err(ApiError::invalid_data)?;
    controller::create(&state.user_repository, new_user).await
}

/// PUT /api/users/:id
pub async fn update(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<Uuid>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> ApiResult<Json<UpdatedRecord<User>>> {
    authorize(Resource::User, Operation::Update, &caller, Some(id))?;
    let Json(req) = payload?;
    let changes = validate_user_update(&req).map_err(ApiError::invalid_data)?;
    controller::update(&state.user_repository, id, changes).await
}

/// DELETE /api/users/:id
pub async fn remove(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<DeleteMessage>> {
    authorize(Resource::User, Operation::Delete, &caller, Some(id))?;
    controller::remove(&state.user_repository, id).await
}

/// POST /api/login (public)
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<TokenResponse>> {
    let Json(req) = payload?;
    let (email, password) = validate_login(&req).map_err(ApiError::invalid_data)?;

    let user = state
        .user_repository
        .find_by_email(&email)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let verified = state
        .user_repository
        .verify_password(&user, &password)
        .map_err(|err| {
            tracing::error!("password verification failed: {err}");
            ApiError::Internal
        })?;

    if !verified {
        return Err(ApiError::Unauthorized("Password is incorrect".to_string()));
    }

    let token = state.jwt_service.generate_token(&user).map_err(|err| {
        tracing::error!("token generation failed: {err}");
        ApiError::Internal
    })?;

    Ok(Json(TokenResponse { token }))
}
