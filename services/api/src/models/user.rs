//! User model and related payloads

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// User role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "user_role", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub const VARIANTS: &'static [&'static str] = &["USER", "ADMIN"];

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "USER" => Some(Role::User),
            "ADMIN" => Some(Role::Admin),
            _ => None,
        }
    }
}

/// User entity
///
/// The password hash is never serialized into responses.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    #[serde(with = "super::date_format")]
    pub birth_date: NaiveDate,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub reviewer: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Sign-up payload as it arrives on the wire, before validation
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub name: Option<String>,
    pub birth_date: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
    pub reviewer: Option<bool>,
}

/// Validated user creation payload; the password is still plaintext
/// here and is hashed by the repository on insert.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub birth_date: NaiveDate,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub reviewer: bool,
}

/// User update payload as it arrives on the wire
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub birth_date: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
    pub reviewer: Option<bool>,
}

/// Validated partial update; only supplied fields change
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
    pub reviewer: Option<bool>,
}

/// Login payload
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Login response carrying the signed token
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}
