//! End-to-end booking flows against a live PostgreSQL instance
//!
//! Run with `cargo test -- --ignored` and `DATABASE_URL` pointing at a
//! disposable database. Each test truncates all tables first, so they
//! are serialized.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use serial_test::serial;
use sqlx::PgPool;
use tower::ServiceExt;

use api::config::SeatGridConfig;
use api::jwt::{JwtConfig, JwtService};
use api::repositories::{
    MovieRepository, SessionRepository, TicketRepository, UserRepository,
};
use api::routes::create_router;
use api::state::AppState;
use common::database::{init_pool, DatabaseConfig};

async fn db_app() -> (Router, PgPool) {
    let config = DatabaseConfig::from_env().expect("failed to read database config");
    let pool = init_pool(&config).await.expect("failed to connect");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("failed to run migrations");

    sqlx::query("TRUNCATE tickets, session_seats, sessions, movies, users CASCADE")
        .execute(&pool)
        .await
        .expect("failed to truncate tables");

    let jwt_service = JwtService::new(&JwtConfig {
        secret: "booking-flow-secret".to_string(),
        token_expiry: 3600,
    });

    let state = AppState {
        db_pool: pool.clone(),
        jwt_service,
        user_repository: UserRepository::new(pool.clone()),
        movie_repository: MovieRepository::new(pool.clone()),
        session_repository: SessionRepository::new(pool.clone(), SeatGridConfig {
            rows: 2,
            columns: 2,
        }),
        ticket_repository: TicketRepository::new(pool.clone()),
    };

    (create_router(state), pool)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("failed to build request");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("request failed");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("invalid JSON body")
    };

    (status, body)
}

/// Sign up a user and return their login token
async fn sign_up_and_login(app: &Router, email: &str, role: &str) -> String {
    let (status, _) = send(
        app,
        Method::POST,
        "/api/users",
        None,
        Some(json!({
            "name": "Flow Tester",
            "birthDate": "16/01/1990",
            "email": email,
            "password": "12345678",
            "role": role
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        app,
        Method::POST,
        "/api/login",
        None,
        Some(json!({ "email": email, "password": "12345678" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    body["token"]
        .as_str()
        .expect("expected token in login response")
        .to_string()
}

async fn create_movie(app: &Router, admin_token: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/movies",
        Some(admin_token),
        Some(json!({
            "name": "Blade Runner",
            "description": "Replicants in the rain",
            "duration": 117,
            "classification": "RESTRICTED"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["id"].as_str().expect("expected movie id").to_string()
}

async fn create_session(app: &Router, admin_token: &str, movie_id: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/sessions",
        Some(admin_token),
        Some(json!({
            "sessionDate": "09/03/2026 18:30",
            "room": "IMAX",
            "movieId": movie_id,
            "price": 25.0
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["id"].as_str().expect("expected session id").to_string()
}

/// Return the seats of a session from the session index
async fn session_seats(app: &Router, token: &str, session_id: &str) -> Vec<Value> {
    let (status, body) = send(app, Method::GET, "/api/sessions", Some(token), None).await;
    assert_eq!(status, StatusCode::OK);

    body["records"]
        .as_array()
        .expect("expected records array")
        .iter()
        .find(|record| record["id"] == session_id)
        .expect("expected created session in index")["seats"]
        .as_array()
        .expect("expected seats array")
        .clone()
}

#[tokio::test]
#[ignore]
#[serial]
async fn sign_up_login_and_wrong_password() {
    let (app, _pool) = db_app().await;

    let token = sign_up_and_login(&app, "flow@example.com", "USER").await;
    assert!(!token.is_empty());

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/login",
        None,
        Some(json!({ "email": "flow@example.com", "password": "wrong-password" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Password is incorrect");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/login",
        None,
        Some(json!({ "email": "nobody@example.com", "password": "12345678" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found");
}

#[tokio::test]
#[ignore]
#[serial]
async fn duplicate_email_reports_unique_violation() {
    let (app, _pool) = db_app().await;

    sign_up_and_login(&app, "dup@example.com", "USER").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/users",
        None,
        Some(json!({
            "name": "Second",
            "birthDate": "16/01/1990",
            "email": "dup@example.com",
            "password": "12345678"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Unique constraint failed on the field(s): email"
    );
}

#[tokio::test]
#[ignore]
#[serial]
async fn movie_delete_is_blocked_by_sessions() {
    let (app, _pool) = db_app().await;

    let admin = sign_up_and_login(&app, "admin@example.com", "ADMIN").await;
    let movie_id = create_movie(&app, &admin).await;
    create_session(&app, &admin, &movie_id).await;

    let (status, body) = send(
        &app,
        Method::DELETE,
        &format!("/api/movies/{movie_id}"),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "movie id is being referenced in another model");
}

#[tokio::test]
#[ignore]
#[serial]
async fn purchase_flow_and_seat_reuse() {
    let (app, _pool) = db_app().await;

    let admin = sign_up_and_login(&app, "admin@example.com", "ADMIN").await;
    let buyer = sign_up_and_login(&app, "buyer@example.com", "USER").await;

    let movie_id = create_movie(&app, &admin).await;
    let session_id = create_session(&app, &admin, &movie_id).await;

    let seats = session_seats(&app, &buyer, &session_id).await;
    assert_eq!(seats.len(), 4);
    assert_eq!(seats[0]["name"], "A1");
    assert_eq!(seats[0]["status"], "AVAILABLE");
    let seat_id = seats[0]["id"].as_str().expect("expected seat id");

    let purchase = json!({
        "category": "FULLPRICE",
        "sessionId": session_id,
        "sessionSeatId": seat_id
    });

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/tickets",
        Some(&buyer),
        Some(purchase.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["category"], "FULLPRICE");
    assert_eq!(body["paymentStatus"], true);

    // The same seat cannot be sold twice.
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/tickets",
        Some(&buyer),
        Some(purchase),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "This seat is unavailable");

    let seats = session_seats(&app, &buyer, &session_id).await;
    assert_eq!(seats[0]["status"], "OCCUPIED");
}

#[tokio::test]
#[ignore]
#[serial]
async fn purchase_with_unknown_ids_is_rejected() {
    let (app, _pool) = db_app().await;

    let buyer = sign_up_and_login(&app, "buyer@example.com", "USER").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/tickets",
        Some(&buyer),
        Some(json!({
            "category": "HALFPRICE",
            "sessionId": uuid::Uuid::new_v4().to_string(),
            "sessionSeatId": uuid::Uuid::new_v4().to_string()
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "One or both passed Ids (Session and SessionSeat) are incorrect"
    );
}

#[tokio::test]
#[ignore]
#[serial]
async fn concurrent_purchases_sell_the_seat_once() {
    let (app, _pool) = db_app().await;

    let admin = sign_up_and_login(&app, "admin@example.com", "ADMIN").await;
    let first = sign_up_and_login(&app, "first@example.com", "USER").await;
    let second = sign_up_and_login(&app, "second@example.com", "USER").await;

    let movie_id = create_movie(&app, &admin).await;
    let session_id = create_session(&app, &admin, &movie_id).await;

    let seats = session_seats(&app, &first, &session_id).await;
    let seat_id = seats[0]["id"].as_str().expect("expected seat id");

    let purchase = json!({
        "category": "VIP",
        "sessionId": session_id,
        "sessionSeatId": seat_id
    });

    let (left, right) = tokio::join!(
        send(&app, Method::POST, "/api/tickets", Some(&first), Some(purchase.clone())),
        send(&app, Method::POST, "/api/tickets", Some(&second), Some(purchase)),
    );

    let successes = [left.0, right.0]
        .iter()
        .filter(|status| **status == StatusCode::OK)
        .count();
    assert_eq!(successes, 1, "exactly one purchase may win the seat");

    let loser = if left.0 == StatusCode::OK { right } else { left };
    assert_eq!(loser.0, StatusCode::BAD_REQUEST);
    assert_eq!(loser.1["message"], "This seat is unavailable");
}

#[tokio::test]
#[ignore]
#[serial]
async fn blocked_seat_cannot_be_purchased() {
    let (app, _pool) = db_app().await;

    let admin = sign_up_and_login(&app, "admin@example.com", "ADMIN").await;
    let buyer = sign_up_and_login(&app, "buyer@example.com", "USER").await;

    let movie_id = create_movie(&app, &admin).await;
    let session_id = create_session(&app, &admin, &movie_id).await;

    let seats = session_seats(&app, &admin, &session_id).await;
    let seat_id = seats[0]["id"].as_str().expect("expected seat id");

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/sessions/{session_id}/seat/{seat_id}"),
        Some(&admin),
        Some(json!({ "status": "BLOCKED" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["record"]["status"], "BLOCKED");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/tickets",
        Some(&buyer),
        Some(json!({
            "category": "FULLPRICE",
            "sessionId": session_id,
            "sessionSeatId": seat_id
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "This seat is unavailable");
}

#[tokio::test]
#[ignore]
#[serial]
async fn session_delete_is_blocked_by_tickets_but_removes_seats() {
    let (app, pool) = db_app().await;

    let admin = sign_up_and_login(&app, "admin@example.com", "ADMIN").await;
    let buyer = sign_up_and_login(&app, "buyer@example.com", "USER").await;

    let movie_id = create_movie(&app, &admin).await;
    let session_id = create_session(&app, &admin, &movie_id).await;

    let seats = session_seats(&app, &buyer, &session_id).await;
    let seat_id = seats[0]["id"].as_str().expect("expected seat id");

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/tickets",
        Some(&buyer),
        Some(json!({
            "category": "FULLPRICE",
            "sessionId": session_id,
            "sessionSeatId": seat_id
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // A sold ticket holds the session in place.
    let (status, body) = send(
        &app,
        Method::DELETE,
        &format!("/api/sessions/{session_id}"),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "session id is being referenced in another model"
    );

    // Without tickets the session goes, and its seats cascade with it.
    sqlx::query("DELETE FROM tickets")
        .execute(&pool)
        .await
        .expect("failed to clear tickets");

    let (status, body) = send(
        &app,
        Method::DELETE,
        &format!("/api/sessions/{session_id}"),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "session was deleted successfully");

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM session_seats")
        .fetch_one(&pool)
        .await
        .expect("failed to count seats");
    assert_eq!(remaining, 0);
}
