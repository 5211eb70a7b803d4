//! Cinema booking API
//!
//! REST backend for a cinema: user accounts with signed-token login,
//! the movie catalog, screening sessions with generated seat grids,
//! and seat-safe ticket purchase.

pub mod authz;
pub mod config;
pub mod controller;
pub mod error;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod seats;
pub mod state;
pub mod validation;
