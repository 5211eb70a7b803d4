//! Request authentication middleware
//!
//! Every route outside the public allow-list (sign-up, login, root)
//! must present `Authorization: Bearer <token>`. On success the
//! decoded caller identity is attached to the request extensions for
//! the downstream authorization checks.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::authz::Caller;
use crate::error::ApiError;
use crate::state::AppState;

/// Extract and verify the bearer token from the Authorization header
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Authorization not found".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::Unauthorized("Invalid Token".to_string()))?;

    let claims = state.jwt_service.verify_token(token).map_err(|e| {
        warn!("token verification failed: {e}");
        ApiError::Unauthorized("Invalid Token".to_string())
    })?;

    req.extensions_mut().insert(Caller {
        id: claims.sub,
        role: claims.role,
    });

    Ok(next.run(req).await)
}
