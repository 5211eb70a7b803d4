//! Movie routes

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};
use uuid::Uuid;

use crate::authz::{authorize, Caller, Operation, Resource};
use crate::controller::{self, DeleteMessage, RecordList, UpdatedRecord};
use crate::error::{ApiError, ApiResult};
use crate::models::{
    CreateMovieRequest, Movie, MovieWithSessions, UpdateMovieRequest,
};
use crate::state::AppState;
use crate::validation::{validate_movie_update, validate_new_movie};

/// GET /api/movies (with sessions and their tickets attached)
pub async fn index(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
) -> ApiResult<Json<RecordList<MovieWithSessions>>> {
    authorize(Resource::Movie, Operation::List, &caller, None)?;
    controller::list(&state.movie_repository).await
}

/// GET /api/movies/:id
pub async fn get_one(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Movie>> {
    authorize(Resource::Movie, Operation::Get, &caller, None)?;
    controller::get_by_id(&state.movie_repository, id).await
}

/// POST /api/movies
pub async fn store(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    payload: Result<Json<CreateMovieRequest>, JsonRejection>,
) -> ApiResult<Json<Movie>> {
    authorize(Resource::Movie, Operation::Create, &caller, None)?;
    let Json(req) = payload?;
    let new_movie = validate_new_movie(&req).map_err(ApiError::invalid_data)?;
    controller::create(&state.movie_repository, new_movie).await
}

/// PUT /api/movies/:id
pub async fn update(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<Uuid>,
    payload: Result<Json<UpdateMovieRequest>, JsonRejection>,
) -> ApiResult<Json<UpdatedRecord<Movie>>> {
    authorize(Resource::Movie, Operation::Update, &caller, None)?;
    let Json(req) = payload?;
    let changes = validate_movie_update(&req).map_err(ApiError::invalid_data)?;
    controller::update(&state.movie_repository, id, changes).await
}

/// DELETE /api/movies/:id (blocked while sessions reference the movie)
pub async fn remove(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<DeleteMessage>> {
    authorize(Resource::Movie, Operation::Delete, &caller, None)?;
    controller::remove(&state.movie_repository, id).await
}
