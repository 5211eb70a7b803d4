//! Store error taxonomy for the persistence gateway
//!
//! Driver errors are classified here, in one place, so that the rest
//! of the application never has to inspect SQLSTATE codes itself.

use sqlx::Error as SqlxError;
use thiserror::Error;

/// SQLSTATE code for a unique constraint violation
const UNIQUE_VIOLATION: &str = "23505";
/// SQLSTATE code for a foreign key constraint violation
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Custom error type for record store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Error occurred during database connection
    #[error("Store connection error: {0}")]
    Connection(#[source] SqlxError),

    /// The requested record does not exist
    #[error("Record not found")]
    NotFound,

    /// A unique constraint was violated
    #[error("Unique constraint failed on the field(s): {fields}")]
    UniqueViolation {
        /// Offending field name(s), in wire (camelCase) form
        fields: String,
    },

    /// A foreign key constraint blocked the operation
    #[error("Foreign key constraint violated: {constraint}")]
    ForeignKeyViolation {
        /// Name of the violated constraint
        constraint: String,
    },

    /// Any other query failure
    #[error("Store query error: {0}")]
    Query(#[source] SqlxError),

    /// Failure inside a store operation that did not come from the
    /// driver (e.g. hashing a password before insert)
    #[error("Store internal error: {0}")]
    Internal(String),
}

/// Type alias for Result with StoreError
pub type StoreResult<T> = Result<T, StoreError>;

impl From<SqlxError> for StoreError {
    fn from(err: SqlxError) -> Self {
        if matches!(err, SqlxError::RowNotFound) {
            return StoreError::NotFound;
        }

        let classified = if let SqlxError::Database(db) = &err {
            match db.code().as_deref() {
                Some(UNIQUE_VIOLATION) => Some(StoreError::UniqueViolation {
                    fields: unique_fields(db.table(), db.constraint()),
                }),
                Some(FOREIGN_KEY_VIOLATION) => Some(StoreError::ForeignKeyViolation {
                    constraint: db.constraint().unwrap_or("unknown").to_string(),
                }),
                _ => None,
            }
        } else {
            None
        };

        classified.unwrap_or(StoreError::Query(err))
    }
}

/// Derive the offending field name(s) from a unique constraint name.
///
/// Postgres names unique constraints `<table>_<column>_key` by
/// default, so `users_email_key` becomes `email`. The result is
/// converted to camelCase to match the wire format.
pub fn unique_fields(table: Option<&str>, constraint: Option<&str>) -> String {
    let Some(constraint) = constraint else {
        return "unknown".to_string();
    };

    let mut name = constraint;
    if let Some(table) = table {
        if let Some(rest) = name.strip_prefix(table) {
            name = rest.strip_prefix('_').unwrap_or(rest);
        }
    }
    name = name.strip_suffix("_key").unwrap_or(name);

    snake_to_camel(name)
}

fn snake_to_camel(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for c in name.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}
