//! View-models driving the chat screens
//!
//! Each view-model owns its input state and delegates I/O to a service. The
//! terminal front end in `commands` renders them, but nothing here depends
//! on how they are displayed.

pub mod chat_list;
pub mod chat_panel;
pub mod concierge_chat;
pub mod reservation_list;
pub mod scroll;
pub mod simple_chat;

pub use chat_list::{ChatList, ChatListEvent};
pub use chat_panel::{ChatPanel, PanelState, SendOutcome};
pub use concierge_chat::ConciergeChat;
pub use reservation_list::ReservationList;
pub use scroll::{AutoScroll, ScrollTarget};
pub use simple_chat::SimpleChat;

/// Assistant notice appended when a chat request fails
pub const CHAT_APOLOGY: &str = "Sorry, I am unable to process your request at the moment.";
