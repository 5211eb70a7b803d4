//! Seat grid synthesis
//!
//! Every new session owns a fixed grid of seats: rows labelled
//! alphabetically from 'A', columns numbered from 1, each seat named
//! "{row}{column}". All generated seats start STANDARD and AVAILABLE.

use crate::config::SeatGridConfig;

/// A seat position produced by grid synthesis, before it is persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSeat {
    pub line: char,
    pub column: i32,
    pub name: String,
}

/// Synthesize the seat grid for one session
pub fn seat_grid(grid: &SeatGridConfig) -> Vec<GridSeat> {
    let mut seats = Vec::with_capacity(grid.rows as usize * grid.columns as usize);

    for row in 0..grid.rows {
        // Row count is validated against 26 at configuration time.
        let line = (b'A' + row) as char;
        for column in 1..=i32::from(grid.columns) {
            seats.push(GridSeat {
                line,
                column,
                name: format!("{line}{column}"),
            });
        }
    }

    seats
}
