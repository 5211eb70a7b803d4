//! Application state shared across handlers

use sqlx::PgPool;

use crate::jwt::JwtService;
use crate::repositories::{
    MovieRepository, SessionRepository, TicketRepository, UserRepository,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_service: JwtService,
    pub user_repository: UserRepository,
    pub movie_repository: MovieRepository,
    pub session_repository: SessionRepository,
    pub ticket_repository: TicketRepository,
}
