//! Application configuration
//!
//! One explicit struct assembled from the environment at process
//! start and passed by reference into the components that need it.

use anyhow::Result;
use common::database::DatabaseConfig;
use std::env;

use crate::jwt::JwtConfig;

/// Dimensions of the seat grid generated for every new session
#[derive(Debug, Clone)]
pub struct SeatGridConfig {
    /// Number of rows, labelled alphabetically from 'A' (max 26)
    pub rows: u8,
    /// Number of columns, labelled numerically from 1
    pub columns: u8,
}

impl SeatGridConfig {
    /// Create a new SeatGridConfig from environment variables
    ///
    /// # Environment Variables
    /// - `SEAT_GRID_ROWS`: rows per session (default: 8)
    /// - `SEAT_GRID_COLUMNS`: columns per session (default: 10)
    pub fn from_env() -> Result<Self> {
        let rows = env::var("SEAT_GRID_ROWS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(8);

        let columns = env::var("SEAT_GRID_COLUMNS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10);

        if rows == 0 || rows > 26 {
            anyhow::bail!("SEAT_GRID_ROWS must be between 1 and 26, got {rows}");
        }
        if columns == 0 {
            anyhow::bail!("SEAT_GRID_COLUMNS must be at least 1");
        }

        Ok(Self { rows, columns })
    }
}

/// Application configuration, constructed once in `main`
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port the HTTP server binds to
    pub port: u16,
    /// Record store settings
    pub database: DatabaseConfig,
    /// Token signing settings
    pub jwt: JwtConfig,
    /// Seat grid dimensions for session creation
    pub seat_grid: SeatGridConfig,
}

impl AppConfig {
    /// Create a new AppConfig from environment variables
    pub fn from_env() -> Result<Self> {
        let port = env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        Ok(Self {
            port,
            database: DatabaseConfig::from_env()?,
            jwt: JwtConfig::from_env()?,
            seat_grid: SeatGridConfig::from_env()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seat_grid_defaults() {
        let grid = SeatGridConfig::from_env().expect("failed to build seat grid config");
        assert!(grid.rows >= 1 && grid.rows <= 26);
        assert!(grid.columns >= 1);
    }
}
