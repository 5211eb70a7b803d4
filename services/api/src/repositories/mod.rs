//! Repositories: per-resource record access over the store

pub mod movie;
pub mod session;
pub mod ticket;
pub mod user;

pub use movie::MovieRepository;
pub use session::SessionRepository;
pub use ticket::TicketRepository;
pub use user::UserRepository;
