//! Domain entities and request payloads

pub mod movie;
pub mod session;
pub mod ticket;
pub mod user;

pub use movie::{
    Classification, CreateMovieRequest, Movie, MovieChanges, MovieWithSessions, NewMovie,
    UpdateMovieRequest,
};
pub use session::{
    CreateSessionRequest, NewSession, SeatChanges, SeatStatus, SeatType, Session, SessionChanges,
    SessionRoom, SessionSeat, SessionWithSeats, UpdateSeatRequest, UpdateSessionRequest,
};
pub use ticket::{PurchaseTicket, PurchaseTicketRequest, Ticket, TicketCategory};
pub use user::{
    CreateUserRequest, LoginRequest, NewUser, Role, TokenResponse, UpdateUserRequest, User,
    UserChanges,
};

/// Wire format for dates: `DD/MM/YYYY`
///
/// Serialize-only: inbound dates arrive as raw strings on the request
/// payloads and are parsed by the validation layer.
pub mod date_format {
    use chrono::NaiveDate;
    use serde::Serializer;

    pub const FORMAT: &str = "%d/%m/%Y";

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }
}

/// Wire format for timestamps: `DD/MM/YYYY HH:mm`, serialize-only
pub mod datetime_format {
    use chrono::NaiveDateTime;
    use serde::Serializer;

    pub const FORMAT: &str = "%d/%m/%Y %H:%M";

    pub fn serialize<S: Serializer>(
        date: &NaiveDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use serde::Serialize;

    #[derive(Serialize)]
    struct Dated {
        #[serde(with = "super::date_format")]
        date: NaiveDate,
        #[serde(with = "super::datetime_format")]
        timestamp: NaiveDateTime,
    }

    #[test]
    fn test_wire_date_formats() {
        let date = NaiveDate::from_ymd_opt(1990, 1, 16).unwrap();
        let value = Dated {
            date,
            timestamp: date.and_hms_opt(18, 30, 0).unwrap(),
        };

        let json = serde_json::to_value(&value).expect("failed to serialize");
        assert_eq!(json["date"], "16/01/1990");
        assert_eq!(json["timestamp"], "16/01/1990 18:30");
    }
}
