//! Common library for the cinema booking backend
//!
//! This crate provides the persistence gateway shared across the
//! workspace: PostgreSQL pool construction and the store error
//! taxonomy that classifies driver failures into application-level
//! categories (unique violation, foreign-key violation, not found).

pub mod database;
pub mod error;
