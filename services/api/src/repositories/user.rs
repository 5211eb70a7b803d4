//! User repository for record store operations

use anyhow::Result;
use argon2::{password_hash::SaltString, Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use common::error::{StoreError, StoreResult};
use sqlx::PgPool;
use uuid::Uuid;

use crate::controller::{verify_model, ResourceStore};
use crate::models::{NewUser, User, UserChanges};

/// User repository
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        verify_model("user");
        Self { pool }
    }

    /// Hash a plaintext password with argon2
    fn hash_password(password: &str) -> StoreResult<String> {
        let salt = SaltString::generate(&mut rand::thread_rng());
        let argon2 = Argon2::default();
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| StoreError::Internal(format!("Failed to hash password: {e}")))?
            .to_string();

        Ok(hash)
    }

    /// Find a user by email
    pub async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    /// Verify a supplied password against the stored hash
    pub fn verify_password(&self, user: &User, password: &str) -> Result<bool> {
        let parsed_hash = PasswordHash::new(&user.password_hash)
            .map_err(|e| anyhow::anyhow!("Failed to parse password hash: {}", e))?;

        let argon2 = Argon2::default();
        Ok(argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

impl ResourceStore for UserRepository {
    const NAME: &'static str = "user";

    type Entity = User;
    type ListEntity = User;
    type Create = NewUser;
    type Update = UserChanges;

    async fn list(&self) -> StoreResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at")
            .fetch_all(&self.pool)
            .await?;

        Ok(users)
    }

    async fn find(&self, id: Uuid) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn insert(&self, new_user: NewUser) -> StoreResult<User> {
        let password_hash = Self::hash_password(&new_user.password)?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, birth_date, email, password_hash, role, reviewer)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&new_user.name)
        .bind(new_user.birth_date)
        .bind(&new_user.email)
        .bind(&password_hash)
        .bind(new_user.role)
        .bind(new_user.reviewer)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    async fn update(&self, id: Uuid, changes: UserChanges) -> StoreResult<User> {
        let password_hash = match changes.password.as_deref() {
            Some(password) => Some(Self::hash_password(password)?),
            None => None,
        };

        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET
                name = COALESCE($2, name),
                birth_date = COALESCE($3, birth_date),
                email = COALESCE($4, email),
                password_hash = COALESCE($5, password_hash),
                role = COALESCE($6, role),
                reviewer = COALESCE($7, reviewer),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.name)
        .bind(changes.birth_date)
        .bind(changes.email)
        .bind(password_hash)
        .bind(changes.role)
        .bind(changes.reviewer)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)?;

        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_round_trip() {
        let hash = UserRepository::hash_password("12345678").expect("failed to hash");
        assert_ne!(hash, "12345678");

        let parsed = PasswordHash::new(&hash).expect("invalid hash format");
        assert!(Argon2::default()
            .verify_password(b"12345678", &parsed)
            .is_ok());
        assert!(Argon2::default()
            .verify_password(b"wrong-password", &parsed)
            .is_err());
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = UserRepository::hash_password("12345678").unwrap();
        let second = UserRepository::hash_password("12345678").unwrap();
        assert_ne!(first, second);
    }
}
