//! Ticket repository: the seat booking engine
//!
//! A purchase is one transaction: the seat flip and the ticket insert
//! commit together or not at all. The flip is a conditional update
//! guarded by `status = 'AVAILABLE'`, so of any number of concurrent
//! purchases of the same seat at most one can succeed.

use common::error::StoreError;
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::controller::verify_model;
use crate::error::ApiError;
use crate::models::{PurchaseTicket, SessionSeat, Ticket};

/// Business failures of the booking engine
#[derive(Error, Debug)]
pub enum BookingError {
    /// The seat exists but is OCCUPIED or BLOCKED
    #[error("This seat is unavailable")]
    SeatUnavailable,

    /// The session and/or seat reference does not exist
    #[error("One or both passed Ids (Session and SessionSeat) are incorrect")]
    InvalidReferences,

    /// Any other failure during ticket creation
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<BookingError> for ApiError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::SeatUnavailable => {
                ApiError::BadRequest("This seat is unavailable".to_string())
            }
            BookingError::InvalidReferences => ApiError::BadRequest(
                "One or both passed Ids (Session and SessionSeat) are incorrect".to_string(),
            ),
            BookingError::Store(StoreError::Query(err)) => {
                tracing::error!("ticket creation failed: {err}");
                ApiError::BadRequest("Unexpected Error".to_string())
            }
            BookingError::Store(err) => err.into(),
        }
    }
}

/// Ticket repository
#[derive(Clone)]
pub struct TicketRepository {
    pool: PgPool,
}

impl TicketRepository {
    /// Create a new ticket repository
    pub fn new(pool: PgPool) -> Self {
        verify_model("ticket");
        Self { pool }
    }

    /// Purchase a seat for the calling user
    ///
    /// Payment is stubbed: the ticket is created with
    /// `payment_status = true`.
    pub async fn purchase(
        &self,
        user_id: Uuid,
        purchase: &PurchaseTicket,
    ) -> Result<Ticket, BookingError> {
        let mut tx = self.pool.begin().await.map_err(StoreError::from)?;

        let flipped = sqlx::query(
            "UPDATE session_seats SET status = 'OCCUPIED' WHERE id = $1 AND status = 'AVAILABLE'",
        )
        .bind(purchase.session_seat_id)
        .execute(&mut *tx)
        .await
        .map_err(StoreError::from)?;

        if flipped.rows_affected() == 0 {
            let seat =
                sqlx::query_as::<_, SessionSeat>("SELECT * FROM session_seats WHERE id = $1")
                    .bind(purchase.session_seat_id)
                    .fetch_optional(&mut *tx)
                    .await
                    .map_err(StoreError::from)?;

            if seat.is_some() {
                return Err(BookingError::SeatUnavailable);
            }
            // Seat id unknown: fall through and let the ticket's
            // foreign key surface the failure.
        }

        let ticket = sqlx::query_as::<_, Ticket>(
            r#"
            INSERT INTO tickets (user_id, session_id, session_seat_id, category, payment_status)
            VALUES ($1, $2, $3, $4, TRUE)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(purchase.session_id)
        .bind(purchase.session_seat_id)
        .bind(purchase.category)
        .fetch_one(&mut *tx)
        .await
        .map_err(|err| match StoreError::from(err) {
            StoreError::ForeignKeyViolation { .. } => BookingError::InvalidReferences,
            other => BookingError::Store(other),
        })?;

        tx.commit().await.map_err(StoreError::from)?;

        Ok(ticket)
    }
}
