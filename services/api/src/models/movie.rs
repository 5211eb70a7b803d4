//! Movie model and related payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::session::Session;
use super::ticket::Ticket;

/// Age classification of a movie
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "classification", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Classification {
    GeneralAudience,
    ParentGuidanceSuggested,
    Restricted,
}

impl Classification {
    pub const VARIANTS: &'static [&'static str] = &[
        "GENERAL_AUDIENCE",
        "PARENT_GUIDANCE_SUGGESTED",
        "RESTRICTED",
    ];

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "GENERAL_AUDIENCE" => Some(Classification::GeneralAudience),
            "PARENT_GUIDANCE_SUGGESTED" => Some(Classification::ParentGuidanceSuggested),
            "RESTRICTED" => Some(Classification::Restricted),
            _ => None,
        }
    }
}

/// Movie entity
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub duration: i32,
    pub classification: Classification,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Movie list row: the index eagerly attaches the movie's sessions
/// and, for each session, its sold tickets.
#[derive(Debug, Clone, Serialize)]
pub struct MovieWithSessions {
    #[serde(flatten)]
    pub movie: Movie,
    pub sessions: Vec<SessionWithTickets>,
}

/// Session with its tickets, as embedded in the movie index
#[derive(Debug, Clone, Serialize)]
pub struct SessionWithTickets {
    #[serde(flatten)]
    pub session: Session,
    pub tickets: Vec<Ticket>,
}

/// Movie creation payload as it arrives on the wire
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMovieRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub duration: Option<i64>,
    pub classification: Option<String>,
}

/// Validated movie creation payload
#[derive(Debug, Clone)]
pub struct NewMovie {
    pub name: String,
    pub description: String,
    pub duration: i32,
    pub classification: Classification,
}

/// Movie update payload as it arrives on the wire
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMovieRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub duration: Option<i64>,
    pub classification: Option<String>,
}

/// Validated partial update; only supplied fields change
#[derive(Debug, Clone, Default)]
pub struct MovieChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub duration: Option<i32>,
    pub classification: Option<Classification>,
}
