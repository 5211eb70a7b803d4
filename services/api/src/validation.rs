//! Input validation
//!
//! Per-resource validators parse the loose wire payloads into typed
//! values. Every field violation is collected before returning, so a
//! failed request reports all of its problems at once.

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::OnceLock;
use uuid::Uuid;

use crate::models::movie::{CreateMovieRequest, UpdateMovieRequest};
use crate::models::session::{CreateSessionRequest, UpdateSeatRequest, UpdateSessionRequest};
use crate::models::ticket::PurchaseTicketRequest;
use crate::models::user::{CreateUserRequest, LoginRequest, UpdateUserRequest};
use crate::models::{
    Classification, MovieChanges, NewMovie, NewSession, NewUser, PurchaseTicket, Role, SeatChanges,
    SeatStatus, SeatType, SessionChanges, SessionRoom, TicketCategory, UserChanges,
};

const DATE_FORMAT: &str = "%d/%m/%Y";
const DATETIME_FORMAT: &str = "%d/%m/%Y %H:%M";

fn email_regex() -> &'static Regex {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9-]+(\.[a-zA-Z0-9-]+)*\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    })
}

/// A required field: present and non-empty, or an error is recorded
fn required<'a>(field: &str, value: Option<&'a str>, errors: &mut Vec<String>) -> Option<&'a str> {
    match value {
        Some(v) if !v.trim().is_empty() => Some(v),
        _ => {
            errors.push(format!("{field} is required"));
            None
        }
    }
}

fn check_email(email: &str, errors: &mut Vec<String>) -> bool {
    if email_regex().is_match(email) {
        true
    } else {
        errors.push("email must be a valid email".to_string());
        false
    }
}

fn check_password(password: &str, errors: &mut Vec<String>) -> bool {
    if (8..=30).contains(&password.chars().count()) {
        true
    } else {
        errors.push("password must have between 8 and 30 characters".to_string());
        false
    }
}

fn parse_date(field: &str, value: &str, errors: &mut Vec<String>) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(value, DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            errors.push(format!("{field} must be a valid DD/MM/YYYY date"));
            None
        }
    }
}

fn parse_datetime(field: &str, value: &str, errors: &mut Vec<String>) -> Option<NaiveDateTime> {
    match NaiveDateTime::parse_from_str(value, DATETIME_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            errors.push(format!("{field} must be a valid DD/MM/YYYY HH:mm date"));
            None
        }
    }
}

fn parse_uuid(field: &str, value: &str, errors: &mut Vec<String>) -> Option<Uuid> {
    match Uuid::parse_str(value) {
        Ok(id) => Some(id),
        Err(_) => {
            errors.push(format!("{field} must be a valid UUID"));
            None
        }
    }
}

fn parse_variant<T>(
    field: &str,
    value: &str,
    parse: fn(&str) -> Option<T>,
    variants: &[&str],
    errors: &mut Vec<String>,
) -> Option<T> {
    match parse(value) {
        Some(v) => Some(v),
        None => {
            errors.push(format!("{field} must be one of: {}", variants.join(", ")));
            None
        }
    }
}

fn finish<T>(parsed: Option<T>, errors: Vec<String>) -> Result<T, Vec<String>> {
    match parsed {
        Some(value) if errors.is_empty() => Ok(value),
        _ => Err(errors),
    }
}

/// Validate a sign-up payload
pub fn validate_new_user(req: &CreateUserRequest) -> Result<NewUser, Vec<String>> {
    let mut errors = Vec::new();

    let name = required("name", req.name.as_deref(), &mut errors);
    let email = required("email", req.email.as_deref(), &mut errors)
        .filter(|e| check_email(e, &mut errors));
    let password = required("password", req.password.as_deref(), &mut errors)
        .filter(|p| check_password(p, &mut errors));
    let birth_date = required("birthDate", req.birth_date.as_deref(), &mut errors)
        .and_then(|v| parse_date("birthDate", v, &mut errors));
    let role = match req.role.as_deref() {
        Some(value) => parse_variant("role", value, Role::parse, Role::VARIANTS, &mut errors),
        None => Some(Role::User),
    };

    let parsed = match (name, email, password, birth_date, role) {
        (Some(name), Some(email), Some(password), Some(birth_date), Some(role)) => Some(NewUser {
            name: name.to_string(),
            birth_date,
            email: email.to_string(),
            password: password.to_string(),
            role,
            reviewer: req.reviewer.unwrap_or(false),
        }),
        _ => None,
    };

    finish(parsed, errors)
}

/// Validate a user update payload; all fields optional
pub fn validate_user_update(req: &UpdateUserRequest) -> Result<UserChanges, Vec<String>> {
    let mut errors = Vec::new();

    let email = req
        .email
        .as_deref()
        .filter(|e| check_email(e, &mut errors))
        .map(str::to_string);
    let password = req
        .password
        .as_deref()
        .filter(|p| check_password(p, &mut errors))
        .map(str::to_string);
    let birth_date = req
        .birth_date
        .as_deref()
        .and_then(|v| parse_date("birthDate", v, &mut errors));
    let role = req
        .role
        .as_deref()
        .and_then(|v| parse_variant("role", v, Role::parse, Role::VARIANTS, &mut errors));

    let changes = UserChanges {
        name: req.name.clone(),
        birth_date,
        email,
        password,
        role,
        reviewer: req.reviewer,
    };

    if errors.is_empty() {
        Ok(changes)
    } else {
        Err(errors)
    }
}

/// Validate a login payload
pub fn validate_login(req: &LoginRequest) -> Result<(String, String), Vec<String>> {
    let mut errors = Vec::new();

    let email = required("email", req.email.as_deref(), &mut errors)
        .filter(|e| check_email(e, &mut errors));
    let password = required("password", req.password.as_deref(), &mut errors)
        .filter(|p| check_password(p, &mut errors));

    let parsed = match (email, password) {
        (Some(email), Some(password)) => Some((email.to_string(), password.to_string())),
        _ => None,
    };

    finish(parsed, errors)
}

fn check_max_len(field: &str, value: &str, max: usize, errors: &mut Vec<String>) -> bool {
    if value.chars().count() <= max {
        true
    } else {
        errors.push(format!("{field} must have at most {max} characters"));
        false
    }
}

fn check_duration(duration: i64, errors: &mut Vec<String>) -> Option<i32> {
    if duration <= 0 {
        errors.push("duration must be a positive number".to_string());
        None
    } else if duration > 500 {
        errors.push("duration must be less than or equal to 500".to_string());
        None
    } else {
        Some(duration as i32)
    }
}

/// Validate a movie creation payload
pub fn validate_new_movie(req: &CreateMovieRequest) -> Result<NewMovie, Vec<String>> {
    let mut errors = Vec::new();

    let name = required("name", req.name.as_deref(), &mut errors)
        .filter(|n| check_max_len("name", n, 50, &mut errors));
    let description = required("description", req.description.as_deref(), &mut errors)
        .filter(|d| check_max_len("description", d, 5000, &mut errors));
    let duration = match req.duration {
        Some(value) => check_duration(value, &mut errors),
        None => {
            errors.push("duration is required".to_string());
            None
        }
    };
    let classification = required("classification", req.classification.as_deref(), &mut errors)
        .and_then(|v| {
            parse_variant(
                "classification",
                v,
                Classification::parse,
                Classification::VARIANTS,
                &mut errors,
            )
        });

    let parsed = match (name, description, duration, classification) {
        (Some(name), Some(description), Some(duration), Some(classification)) => Some(NewMovie {
            name: name.to_string(),
            description: description.to_string(),
            duration,
            classification,
        }),
        _ => None,
    };

    finish(parsed, errors)
}

/// Validate a movie update payload; all fields optional
pub fn validate_movie_update(req: &UpdateMovieRequest) -> Result<MovieChanges, Vec<String>> {
    let mut errors = Vec::new();

    let name = req
        .name
        .as_deref()
        .filter(|n| check_max_len("name", n, 50, &mut errors))
        .map(str::to_string);
    let description = req
        .description
        .as_deref()
        .filter(|d| check_max_len("description", d, 5000, &mut errors))
        .map(str::to_string);
    let duration = req.duration.and_then(|d| check_duration(d, &mut errors));
    let classification = req.classification.as_deref().and_then(|v| {
        parse_variant(
            "classification",
            v,
            Classification::parse,
            Classification::VARIANTS,
            &mut errors,
        )
    });

    let changes = MovieChanges {
        name,
        description,
        duration,
        classification,
    };

    if errors.is_empty() {
        Ok(changes)
    } else {
        Err(errors)
    }
}

fn check_price(price: f64, errors: &mut Vec<String>) -> Option<f64> {
    if price > 0.0 && price.is_finite() {
        Some(price)
    } else {
        errors.push("price must be a positive number".to_string());
        None
    }
}

/// Validate a session creation payload
pub fn validate_new_session(req: &CreateSessionRequest) -> Result<NewSession, Vec<String>> {
    let mut errors = Vec::new();

    let session_date = required("sessionDate", req.session_date.as_deref(), &mut errors)
        .and_then(|v| parse_datetime("sessionDate", v, &mut errors));
    let room = required("room", req.room.as_deref(), &mut errors).and_then(|v| {
        parse_variant("room", v, SessionRoom::parse, SessionRoom::VARIANTS, &mut errors)
    });
    let movie_id = required("movieId", req.movie_id.as_deref(), &mut errors)
        .and_then(|v| parse_uuid("movieId", v, &mut errors));
    let price = match req.price {
        Some(value) => check_price(value, &mut errors),
        None => {
            errors.push("price is required".to_string());
            None
        }
    };

    let parsed = match (session_date, room, movie_id, price) {
        (Some(session_date), Some(room), Some(movie_id), Some(price)) => Some(NewSession {
            session_date,
            room,
            movie_id,
            price,
        }),
        _ => None,
    };

    finish(parsed, errors)
}

/// Validate a session update payload; all fields optional
pub fn validate_session_update(req: &UpdateSessionRequest) -> Result<SessionChanges, Vec<String>> {
    let mut errors = Vec::new();

    let session_date = req
        .session_date
        .as_deref()
        .and_then(|v| parse_datetime("sessionDate", v, &mut errors));
    let room = req.room.as_deref().and_then(|v| {
        parse_variant("room", v, SessionRoom::parse, SessionRoom::VARIANTS, &mut errors)
    });
    let movie_id = req
        .movie_id
        .as_deref()
        .and_then(|v| parse_uuid("movieId", v, &mut errors));
    let price = req.price.and_then(|p| check_price(p, &mut errors));

    let changes = SessionChanges {
        session_date,
        room,
        movie_id,
        price,
    };

    if errors.is_empty() {
        Ok(changes)
    } else {
        Err(errors)
    }
}

/// Validate a ticket purchase payload
pub fn validate_purchase(req: &PurchaseTicketRequest) -> Result<PurchaseTicket, Vec<String>> {
    let mut errors = Vec::new();

    let category = required("category", req.category.as_deref(), &mut errors).and_then(|v| {
        parse_variant(
            "category",
            v,
            TicketCategory::parse,
            TicketCategory::VARIANTS,
            &mut errors,
        )
    });
    let session_seat_id = required("sessionSeatId", req.session_seat_id.as_deref(), &mut errors)
        .and_then(|v| parse_uuid("sessionSeatId", v, &mut errors));
    let session_id = required("sessionId", req.session_id.as_deref(), &mut errors)
        .and_then(|v| parse_uuid("sessionId", v, &mut errors));

    let parsed = match (category, session_seat_id, session_id) {
        (Some(category), Some(session_seat_id), Some(session_id)) => Some(PurchaseTicket {
            category,
            session_seat_id,
            session_id,
        }),
        _ => None,
    };

    finish(parsed, errors)
}

/// Validate an administrative seat update payload
pub fn validate_seat_update(req: &UpdateSeatRequest) -> Result<SeatChanges, Vec<String>> {
    let mut errors = Vec::new();

    if req.status.is_none() && req.seat_type.is_none() {
        errors.push("at least one of status or type must be informed".to_string());
    }

    let status = req.status.as_deref().and_then(|v| {
        parse_variant("status", v, SeatStatus::parse, SeatStatus::VARIANTS, &mut errors)
    });
    let seat_type = req.seat_type.as_deref().and_then(|v| {
        parse_variant("type", v, SeatType::parse, SeatType::VARIANTS, &mut errors)
    });

    if errors.is_empty() {
        Ok(SeatChanges { status, seat_type })
    } else {
        Err(errors)
    }
}
