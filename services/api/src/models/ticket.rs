//! Ticket model and purchase payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Pricing tier of a ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "ticket_category", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketCategory {
    Fullprice,
    Halfprice,
    Vip,
}

impl TicketCategory {
    pub const VARIANTS: &'static [&'static str] = &["FULLPRICE", "HALFPRICE", "VIP"];

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "FULLPRICE" => Some(TicketCategory::Fullprice),
            "HALFPRICE" => Some(TicketCategory::Halfprice),
            "VIP" => Some(TicketCategory::Vip),
            _ => None,
        }
    }
}

/// Ticket entity
///
/// Payment is out of scope; `payment_status` is stubbed true at
/// purchase time.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: Uuid,
    pub user_id: Uuid,
    pub session_id: Uuid,
    pub session_seat_id: Uuid,
    pub category: TicketCategory,
    pub payment_status: bool,
    pub created_at: DateTime<Utc>,
}

/// Purchase payload as it arrives on the wire
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseTicketRequest {
    pub category: Option<String>,
    pub session_seat_id: Option<String>,
    pub session_id: Option<String>,
}

/// Validated purchase payload
#[derive(Debug, Clone)]
pub struct PurchaseTicket {
    pub category: TicketCategory,
    pub session_seat_id: Uuid,
    pub session_id: Uuid,
}
