//! Concierge chat panel

use crate::models::{ConciergeMessage, FlightReservation};
use crate::reactive::Signal;
use crate::services::FlightReservationService;
use crate::validation::{self, sanitize_input};
use crate::views::{AutoScroll, ScrollTarget};
use chrono::{DateTime, TimeZone};
use std::fmt::Display;
use std::sync::Arc;

/// Input handling for the concierge; the conversation itself lives in
/// [`FlightReservationService`]
#[derive(Debug, Clone)]
pub struct ConciergeChat {
    service: FlightReservationService,
    current_message: Signal<String>,
    max_length: usize,
}

impl ConciergeChat {
    pub fn new(service: FlightReservationService, max_length: usize) -> Self {
        Self {
            service,
            current_message: Signal::new(String::new()),
            max_length,
        }
    }

    pub fn attach_scroll_target(&self, target: Arc<dyn ScrollTarget>) {
        let auto = AutoScroll::new(target);
        self.service.messages().on_change(move |_| auto.schedule());
    }

    pub fn service(&self) -> &FlightReservationService {
        &self.service
    }

    pub fn messages(&self) -> Vec<ConciergeMessage> {
        self.service.messages().get()
    }

    /// Reservation the conversation is about, if one is selected
    pub fn selected_reservation(&self) -> Option<FlightReservation> {
        self.service.selected_reservation()
    }

    pub fn current_message(&self) -> String {
        self.current_message.get()
    }

    pub fn set_current_message(&self, message: impl Into<String>) {
        self.current_message.set(message.into());
    }

    pub fn validation_error(&self) -> Option<String> {
        self.current_message
            .with(|input| validation::validation_error(input, self.max_length))
    }

    /// Concierge sends are not serialized, so only the input rules apply
    pub fn can_send(&self) -> bool {
        self.current_message
            .with(|input| validation::can_send(input, self.max_length, false))
    }

    /// Send the current message; returns `false` if nothing was sent
    ///
    /// Failures are already reflected in the conversation by the service.
    pub async fn send_message(&self) -> bool {
        if !self.can_send() {
            return false;
        }
        let message = sanitize_input(&self.current_message.get());
        self.current_message.set(String::new());
        if message.is_empty() {
            return false;
        }

        if let Err(e) = self.service.send_concierge_message(&message).await {
            tracing::debug!("Concierge request failed: {:#}", e);
        }
        true
    }
}

/// Render a message time as `hh:mm AM/PM`
///
/// # Examples
///
/// ```
/// use chatfront::views::concierge_chat::format_timestamp;
/// use chrono::{TimeZone, Utc};
///
/// let t = Utc.with_ymd_and_hms(2025, 9, 10, 14, 5, 0).unwrap();
/// assert_eq!(format_timestamp(&t), "02:05 PM");
/// ```
pub fn format_timestamp<Tz>(timestamp: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    timestamp.format("%I:%M %p").to_string()
}
