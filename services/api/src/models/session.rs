//! Session and seat models and related payloads

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Room type a session is screened in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "session_room", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionRoom {
    Common,
    Dlux,
    Imax,
    Xd,
}

impl SessionRoom {
    pub const VARIANTS: &'static [&'static str] = &["COMMON", "DLUX", "IMAX", "XD"];

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "COMMON" => Some(SessionRoom::Common),
            "DLUX" => Some(SessionRoom::Dlux),
            "IMAX" => Some(SessionRoom::Imax),
            "XD" => Some(SessionRoom::Xd),
            _ => None,
        }
    }
}

/// Seat availability state
///
/// Purchases only ever flip AVAILABLE to OCCUPIED; any other
/// transition happens through the administrative seat update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "seat_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeatStatus {
    Available,
    Occupied,
    Blocked,
}

impl SeatStatus {
    pub const VARIANTS: &'static [&'static str] = &["AVAILABLE", "OCCUPIED", "BLOCKED"];

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "AVAILABLE" => Some(SeatStatus::Available),
            "OCCUPIED" => Some(SeatStatus::Occupied),
            "BLOCKED" => Some(SeatStatus::Blocked),
            _ => None,
        }
    }
}

/// Seat kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "seat_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeatType {
    Standard,
    Vip,
}

impl SeatType {
    pub const VARIANTS: &'static [&'static str] = &["STANDARD", "VIP"];

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "STANDARD" => Some(SeatType::Standard),
            "VIP" => Some(SeatType::Vip),
            _ => None,
        }
    }
}

/// Session entity
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: Uuid,
    pub movie_id: Uuid,
    #[serde(with = "super::datetime_format")]
    pub session_date: NaiveDateTime,
    pub room: SessionRoom,
    pub price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Seat belonging to a session, named "{line}{column}" (e.g. "B2")
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SessionSeat {
    pub id: Uuid,
    pub session_id: Uuid,
    pub line: String,
    #[sqlx(rename = "seat_column")]
    pub column: i32,
    pub name: String,
    #[serde(rename = "type")]
    pub seat_type: SeatType,
    pub status: SeatStatus,
}

/// Session list row: the index eagerly attaches the seat grid
#[derive(Debug, Clone, Serialize)]
pub struct SessionWithSeats {
    #[serde(flatten)]
    pub session: Session,
    pub seats: Vec<SessionSeat>,
}

/// Session creation payload as it arrives on the wire
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    pub session_date: Option<String>,
    pub room: Option<String>,
    pub movie_id: Option<String>,
    pub price: Option<f64>,
}

/// Validated session creation payload
#[derive(Debug, Clone)]
pub struct NewSession {
    pub session_date: NaiveDateTime,
    pub room: SessionRoom,
    pub movie_id: Uuid,
    pub price: f64,
}

/// Session update payload as it arrives on the wire
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSessionRequest {
    pub session_date: Option<String>,
    pub room: Option<String>,
    pub movie_id: Option<String>,
    pub price: Option<f64>,
}

/// Validated partial update; only supplied fields change
#[derive(Debug, Clone, Default)]
pub struct SessionChanges {
    pub session_date: Option<NaiveDateTime>,
    pub room: Option<SessionRoom>,
    pub movie_id: Option<Uuid>,
    pub price: Option<f64>,
}

/// Administrative seat update payload as it arrives on the wire
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSeatRequest {
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub seat_type: Option<String>,
}

/// Validated administrative seat update; bypasses availability checks
#[derive(Debug, Clone, Default)]
pub struct SeatChanges {
    pub status: Option<SeatStatus>,
    pub seat_type: Option<SeatType>,
}
