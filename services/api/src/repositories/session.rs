//! Session repository for record store operations
//!
//! Session creation generates the seat grid inside the same
//! transaction as the session insert: either both persist or neither
//! does.

use common::error::{StoreError, StoreResult};
use sqlx::{PgPool, Postgres, QueryBuilder};
use std::collections::HashMap;
use uuid::Uuid;

use crate::config::SeatGridConfig;
use crate::controller::{verify_model, ResourceStore};
use crate::models::{
    NewSession, SeatChanges, Session, SessionChanges, SessionSeat, SessionWithSeats,
};
use crate::seats::seat_grid;

/// Session repository
#[derive(Clone)]
pub struct SessionRepository {
    pool: PgPool,
    grid: SeatGridConfig,
}

impl SessionRepository {
    /// Create a new session repository
    pub fn new(pool: PgPool, grid: SeatGridConfig) -> Self {
        verify_model("session");
        verify_model("sessionSeat");
        Self { pool, grid }
    }

    /// Apply a direct administrative update to one seat, bypassing
    /// the availability state machine.
    pub async fn update_seat(
        &self,
        session_id: Uuid,
        seat_id: Uuid,
        changes: SeatChanges,
    ) -> StoreResult<Option<SessionSeat>> {
        let seat = sqlx::query_as::<_, SessionSeat>(
            r#"
            UPDATE session_seats SET
                status = COALESCE($3, status),
                seat_type = COALESCE($4, seat_type)
            WHERE id = $1 AND session_id = $2
            RETURNING *
            "#,
        )
        .bind(seat_id)
        .bind(session_id)
        .bind(changes.status)
        .bind(changes.seat_type)
        .fetch_optional(&self.pool)
        .await?;

        Ok(seat)
    }
}

impl ResourceStore for SessionRepository {
    const NAME: &'static str = "session";

    type Entity = Session;
    // The index eagerly attaches the seat grid.
    type ListEntity = SessionWithSeats;
    type Create = NewSession;
    type Update = SessionChanges;

    async fn list(&self) -> StoreResult<Vec<SessionWithSeats>> {
        let sessions =
            sqlx::query_as::<_, Session>("SELECT * FROM sessions ORDER BY session_date")
                .fetch_all(&self.pool)
                .await?;

        let seats = sqlx::query_as::<_, SessionSeat>(
            "SELECT * FROM session_seats ORDER BY line, seat_column",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut seats_by_session: HashMap<Uuid, Vec<SessionSeat>> = HashMap::new();
        for seat in seats {
            seats_by_session
                .entry(seat.session_id)
                .or_default()
                .push(seat);
        }

        let records = sessions
            .into_iter()
            .map(|session| {
                let seats = seats_by_session.remove(&session.id).unwrap_or_default();
                SessionWithSeats { session, seats }
            })
            .collect();

        Ok(records)
    }

    async fn find(&self, id: Uuid) -> StoreResult<Option<Session>> {
        let session = sqlx::query_as::<_, Session>("SELECT * FROM sessions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(session)
    }

    async fn insert(&self, new_session: NewSession) -> StoreResult<Session> {
        let mut tx = self.pool.begin().await?;

        let session = sqlx::query_as::<_, Session>(
            r#"
            INSERT INTO sessions (movie_id, session_date, room, price)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(new_session.movie_id)
        .bind(new_session.session_date)
        .bind(new_session.room)
        .bind(new_session.price)
        .fetch_one(&mut *tx)
        .await?;

        let seats = seat_grid(&self.grid);
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("INSERT INTO session_seats (session_id, line, seat_column, name) ");
        builder.push_values(seats.iter(), |mut row, seat| {
            row.push_bind(session.id)
                .push_bind(seat.line.to_string())
                .push_bind(seat.column)
                .push_bind(&seat.name);
        });
        builder.build().execute(&mut *tx).await?;

        tx.commit().await?;

        Ok(session)
    }

    async fn update(&self, id: Uuid, changes: SessionChanges) -> StoreResult<Session> {
        let session = sqlx::query_as::<_, Session>(
            r#"
            UPDATE sessions SET
                movie_id = COALESCE($2, movie_id),
                session_date = COALESCE($3, session_date),
                room = COALESCE($4, room),
                price = COALESCE($5, price),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.movie_id)
        .bind(changes.session_date)
        .bind(changes.room)
        .bind(changes.price)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)?;

        Ok(session)
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        // Seats cascade with the session; sold tickets hold a RESTRICT
        // reference and block the deletion.
        let result = sqlx::query("DELETE FROM sessions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
