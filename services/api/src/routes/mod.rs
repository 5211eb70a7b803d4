//! Router assembly
//!
//! Public routes (sign-up, login, root) and Bearer-protected routes
//! are built as separate routers; the protected one carries the
//! authentication middleware as a route layer, which realizes the
//! allow-list.

pub mod movies;
pub mod sessions;
pub mod tickets;
pub mod users;

use axum::{
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::json;

use crate::middleware::auth_middleware;
use crate::state::AppState;

/// Create the router for the cinema booking service
pub fn create_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/api/users", get(users::index))
        .route(
            "/api/users/:id",
            get(users::get_one).put(users::update).delete(users::remove),
        )
        .route("/api/movies", get(movies::index).post(movies::store))
        .route(
            "/api/movies/:id",
            get(movies::get_one)
                .put(movies::update)
                .delete(movies::remove),
        )
        .route("/api/sessions", get(sessions::index).post(sessions::store))
        .route(
            "/api/sessions/:id",
            get(sessions::get_one)
                .put(sessions::update)
                .delete(sessions::remove),
        )
        .route("/api/sessions/:id/seat/:seat_id", put(sessions::update_seat))
        .route("/api/tickets", post(tickets::purchase))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/", get(welcome))
        .route("/api/login", post(users::login))
        .route("/api/users", post(users::store))
        .merge(protected)
        .with_state(state)
}

/// Root route, open to everyone
pub async fn welcome() -> impl IntoResponse {
    Json(json!({ "message": "Welcome to the Cinema API" }))
}
