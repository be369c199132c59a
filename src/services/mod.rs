//! Services wrapping the backend API
//!
//! - [`ChatService`]: stateless single-message chat
//! - [`MemoryChatService`]: the active session id plus the session list and
//!   message history resources derived from it
//! - [`FlightReservationService`]: reservations list and concierge chat
//!
//! Services are constructed explicitly with an `Arc<dyn ChatApi>` and shared
//! with the view-models that need them.

pub mod chat;
pub mod flight_reservation;
pub mod memory_chat;

pub use chat::ChatService;
pub use flight_reservation::{FlightReservationService, CONCIERGE_APOLOGY, CONCIERGE_GREETING};
pub use memory_chat::MemoryChatService;
