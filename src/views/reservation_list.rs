//! Reservations table view-model

use crate::models::{FlightReservation, ReservationStatus};
use crate::reactive::{ResourceStatus, RetryOutcome};
use crate::services::FlightReservationService;

/// Column order of the reservations table
pub const DISPLAYED_COLUMNS: [&str; 9] = [
    "number", "name", "date", "status", "from", "to", "seat", "class", "actions",
];

#[derive(Debug, Clone)]
pub struct ReservationList {
    service: FlightReservationService,
}

impl ReservationList {
    pub fn new(service: FlightReservationService) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &FlightReservationService {
        &self.service
    }

    pub fn status(&self) -> ResourceStatus<Vec<FlightReservation>> {
        self.service.reservations().status()
    }

    pub fn reservations(&self) -> Vec<FlightReservation> {
        self.service.reservations().value().unwrap_or_default()
    }

    pub fn is_loading(&self) -> bool {
        self.service.reservations().is_loading()
    }

    pub fn selected(&self) -> Option<FlightReservation> {
        self.service.selected_reservation()
    }

    pub fn is_selected(&self, number: &str) -> bool {
        self.selected().is_some_and(|r| r.number == number)
    }

    pub fn select(&self, reservation: FlightReservation) {
        self.service.select_reservation(reservation);
    }

    /// Select a loaded reservation by its booking number
    ///
    /// Returns `false` if no loaded row has that number.
    pub fn select_by_number(&self, number: &str) -> bool {
        match self.reservations().into_iter().find(|r| r.number == number) {
            Some(reservation) => {
                self.select(reservation);
                true
            }
            None => false,
        }
    }

    pub fn refresh(&self) {
        self.service.refresh_reservations();
    }

    pub fn retry(&self) -> RetryOutcome {
        self.service.retry_load_reservations()
    }

    pub fn error_message(&self) -> Option<String> {
        self.service
            .reservations_error_handler()
            .and_then(|handler| handler.status_message())
    }
}

/// Style class for a status chip
pub fn status_class(status: ReservationStatus) -> &'static str {
    match status {
        ReservationStatus::Confirmed => "status-confirmed",
        ReservationStatus::Pending => "status-pending",
        ReservationStatus::Cancelled => "status-cancelled",
    }
}
