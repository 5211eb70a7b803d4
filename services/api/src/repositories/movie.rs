//! Movie repository for record store operations

use common::error::{StoreError, StoreResult};
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

use crate::controller::{verify_model, ResourceStore};
use crate::models::movie::SessionWithTickets;
use crate::models::{Movie, MovieChanges, MovieWithSessions, NewMovie, Session, Ticket};

/// Movie repository
#[derive(Clone)]
pub struct MovieRepository {
    pool: PgPool,
}

impl MovieRepository {
    /// Create a new movie repository
    pub fn new(pool: PgPool) -> Self {
        verify_model("movie");
        Self { pool }
    }
}

impl ResourceStore for MovieRepository {
    const NAME: &'static str = "movie";

    type Entity = Movie;
    // The index eagerly attaches sessions and their tickets.
    type ListEntity = MovieWithSessions;
    type Create = NewMovie;
    type Update = MovieChanges;

    async fn list(&self) -> StoreResult<Vec<MovieWithSessions>> {
        let movies = sqlx::query_as::<_, Movie>("SELECT * FROM movies ORDER BY created_at")
            .fetch_all(&self.pool)
            .await?;

        let sessions =
            sqlx::query_as::<_, Session>("SELECT * FROM sessions ORDER BY session_date")
                .fetch_all(&self.pool)
                .await?;

        let tickets = sqlx::query_as::<_, Ticket>("SELECT * FROM tickets ORDER BY created_at")
            .fetch_all(&self.pool)
            .await?;

        let mut tickets_by_session: HashMap<Uuid, Vec<Ticket>> = HashMap::new();
        for ticket in tickets {
            tickets_by_session
                .entry(ticket.session_id)
                .or_default()
                .push(ticket);
        }

        let mut sessions_by_movie: HashMap<Uuid, Vec<SessionWithTickets>> = HashMap::new();
        for session in sessions {
            let tickets = tickets_by_session.remove(&session.id).unwrap_or_default();
            sessions_by_movie
                .entry(session.movie_id)
                .or_default()
                .push(SessionWithTickets { session, tickets });
        }

        let records = movies
            .into_iter()
            .map(|movie| {
                let sessions = sessions_by_movie.remove(&movie.id).unwrap_or_default();
                MovieWithSessions { movie, sessions }
            })
            .collect();

        Ok(records)
    }

    async fn find(&self, id: Uuid) -> StoreResult<Option<Movie>> {
        let movie = sqlx::query_as::<_, Movie>("SELECT * FROM movies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(movie)
    }

    async fn insert(&self, new_movie: NewMovie) -> StoreResult<Movie> {
        let movie = sqlx::query_as::<_, Movie>(
            r#"
            INSERT INTO movies (name, description, duration, classification)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&new_movie.name)
        .bind(&new_movie.description)
        .bind(new_movie.duration)
        .bind(new_movie.classification)
        .fetch_one(&self.pool)
        .await?;

        Ok(movie)
    }

    async fn update(&self, id: Uuid, changes: MovieChanges) -> StoreResult<Movie> {
        let movie = sqlx::query_as::<_, Movie>(
            r#"
            UPDATE movies SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                duration = COALESCE($4, duration),
                classification = COALESCE($5, classification),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.name)
        .bind(changes.description)
        .bind(changes.duration)
        .bind(changes.classification)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)?;

        Ok(movie)
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
