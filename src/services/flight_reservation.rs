//! Flight reservations and concierge chat

use crate::api::ChatApi;
use crate::error::Result;
use crate::models::{
    CancellationRequest, CancellationResponse, ChatType, ConciergeMessage, ConciergeResponse,
    FlightReservation,
};
use crate::reactive::{Resource, ResourceErrorHandler, RetryOutcome, RetryPolicy, Signal};
use futures::FutureExt;
use std::sync::Arc;

/// First message shown in the concierge conversation
pub const CONCIERGE_GREETING: &str =
    "Hello! I'm your SpringFly Concierge. How can I assist you with your booking today?";

/// Assistant notice appended when the concierge cannot be reached
pub const CONCIERGE_APOLOGY: &str =
    "I apologize, but I'm having trouble connecting right now. Please try again in a moment.";

/// Reservations list, selection, and the concierge conversation
#[derive(Debug, Clone)]
pub struct FlightReservationService {
    api: Arc<dyn ChatApi>,
    selected_reservation: Signal<Option<FlightReservation>>,
    reservations: Resource<(), Vec<FlightReservation>>,
    messages: Signal<Vec<ConciergeMessage>>,
}

impl FlightReservationService {
    /// Create the service and start loading reservations
    ///
    /// Must be called within a Tokio runtime.
    pub fn new(api: Arc<dyn ChatApi>, retry: RetryPolicy) -> Self {
        let selected_reservation: Signal<Option<FlightReservation>> = Signal::new(None);
        selected_reservation.on_change(|selected| {
            if let Some(reservation) = selected {
                tracing::info!(number = %reservation.number, "Selected reservation");
            }
        });

        let list_api = Arc::clone(&api);
        let reservations = Resource::eager("reservations", move || {
            let api = Arc::clone(&list_api);
            async move { api.list_reservations().await }.boxed()
        })
        .with_error_handler(ResourceErrorHandler::new("reservations", retry))
        .start();

        let messages = Signal::new(vec![ConciergeMessage::new(
            CONCIERGE_GREETING,
            ChatType::Assistant,
        )]);

        Self {
            api,
            selected_reservation,
            reservations,
            messages,
        }
    }

    pub fn reservations(&self) -> &Resource<(), Vec<FlightReservation>> {
        &self.reservations
    }

    pub fn reservations_error_handler(&self) -> Option<&ResourceErrorHandler> {
        self.reservations.error_handler()
    }

    pub fn selected_reservation(&self) -> Option<FlightReservation> {
        self.selected_reservation.get()
    }

    pub fn selected_reservation_signal(&self) -> &Signal<Option<FlightReservation>> {
        &self.selected_reservation
    }

    pub fn select_reservation(&self, reservation: FlightReservation) {
        self.selected_reservation.set(Some(reservation));
    }

    /// Concierge conversation, oldest first
    pub fn messages(&self) -> &Signal<Vec<ConciergeMessage>> {
        &self.messages
    }

    /// Append the user message, ask the concierge, and append the outcome
    ///
    /// On failure the apology notice is appended and the error is still
    /// returned so callers can react to it.
    pub async fn send_concierge_message(&self, message: &str) -> Result<ConciergeResponse> {
        self.messages.update(|m| m.push(ConciergeMessage::new(message, ChatType::User)));

        match self.api.send_concierge_message(message).await {
            Ok(response) => {
                self.handle_concierge_response(&response);
                Ok(response)
            }
            Err(e) => {
                self.handle_concierge_error(&e);
                Err(e)
            }
        }
    }

    /// Append an assistant reply
    pub fn handle_concierge_response(&self, response: &ConciergeResponse) {
        if response.requires_action == Some(true) {
            tracing::info!(actions = ?response.actions, "Concierge requires action");
        }
        self.messages.update(|m| {
            m.push(ConciergeMessage::new(
                response.content.clone(),
                ChatType::Assistant,
            ))
        });
    }

    /// Append the apology notice for a failed request
    pub fn handle_concierge_error(&self, error: &anyhow::Error) {
        tracing::error!("Error sending concierge message: {:#}", error);
        self.messages.update(|m| {
            m.push(ConciergeMessage::new(
                CONCIERGE_APOLOGY,
                ChatType::Assistant,
            ))
        });
    }

    pub async fn cancel_reservation(
        &self,
        request: &CancellationRequest,
    ) -> Result<CancellationResponse> {
        tracing::info!(number = %request.reservation_number, "Cancelling reservation");
        self.api.cancel_reservation(request).await
    }

    pub fn refresh_reservations(&self) {
        self.reservations.reload();
    }

    /// Retry a failed reservations load with backoff
    pub fn retry_load_reservations(&self) -> RetryOutcome {
        self.reservations.retry().unwrap_or(RetryOutcome::Exhausted)
    }
}
