//! Reservation management commands
//!
//! One-shot `reservations list` and `reservations cancel`, plus the table
//! renderer shared with the concierge loop.

use crate::commands::build_api;
use crate::config::Config;
use crate::error::{ChatfrontError, Result};
use crate::models::{CancellationRequest, FlightReservation, ReservationStatus};
use crate::services::FlightReservationService;
use crate::views::reservation_list::{status_class, ReservationList, DISPLAYED_COLUMNS};
use colored::Colorize;
use prettytable::{Cell, Row, Table};

/// Build the reservations table
///
/// The `actions` column becomes a marker for the selected row.
pub fn reservations_table(reservations: &[FlightReservation], selected: Option<&str>) -> Table {
    let mut table = Table::new();
    table.set_titles(Row::new(
        DISPLAYED_COLUMNS
            .iter()
            .map(|column| match *column {
                "actions" => Cell::new(""),
                other => Cell::new(&other.to_uppercase()),
            })
            .collect(),
    ));

    for reservation in reservations {
        let marker = if selected == Some(reservation.number.as_str()) {
            "*"
        } else {
            ""
        };
        table.add_row(Row::new(vec![
            Cell::new(&reservation.number),
            Cell::new(&reservation.name),
            Cell::new(&reservation.date),
            Cell::new(&colored_status(reservation.status)),
            Cell::new(&reservation.from),
            Cell::new(&reservation.to),
            Cell::new(&reservation.seat),
            Cell::new(&reservation.flight_class),
            Cell::new(marker),
        ]));
    }
    table
}

/// Status text colored after its style class
fn colored_status(status: ReservationStatus) -> String {
    let text = status.to_string();
    match status_class(status) {
        "status-confirmed" => text.green().to_string(),
        "status-pending" => text.yellow().to_string(),
        "status-cancelled" => text.red().to_string(),
        _ => text,
    }
}

/// Print the current reservations, or why they are missing
pub fn print_reservations(list: &ReservationList) {
    if let Some(message) = list.error_message() {
        eprintln!("{}", message.red());
        println!("Type '/retry' to try again.");
        return;
    }
    let reservations = list.reservations();
    if reservations.is_empty() {
        println!("No reservations found.");
        return;
    }
    let selected = list.selected().map(|r| r.number);
    println!();
    reservations_table(&reservations, selected.as_deref()).printstd();
    println!();
}

/// `reservations list`
pub async fn list_reservations(config: &Config, json: bool) -> Result<()> {
    let api = build_api(config)?;
    let service = FlightReservationService::new(api, config.retry.policy());
    let list = ReservationList::new(service);

    if let Some(error) = list.service().reservations().settled().await.error() {
        return Err(ChatfrontError::Transport(format!(
            "Failed to load reservations: {}",
            error
        ))
        .into());
    }

    let reservations = list.reservations();
    if json {
        println!("{}", serde_json::to_string_pretty(&reservations)?);
    } else {
        print_reservations(&list);
    }
    Ok(())
}

/// `reservations cancel`
///
/// A successful cancellation is followed by a refreshed listing.
pub async fn cancel_reservation(config: &Config, request: CancellationRequest) -> Result<()> {
    let api = build_api(config)?;
    let service = FlightReservationService::new(api, config.retry.policy());
    let list = ReservationList::new(service.clone());

    let response = service.cancel_reservation(&request).await?;
    if !response.success {
        eprintln!("{}", response.message.red());
        return Err(ChatfrontError::Validation(format!(
            "Reservation {} was not cancelled",
            request.reservation_number
        ))
        .into());
    }

    println!("{}", response.message.green());
    if let Some(fee) = response.cancellation_fee {
        println!("Cancellation fee: {:.2}", fee);
    }

    list.refresh();
    list.service().reservations().settled().await;
    print_reservations(&list);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use crate::api::fake::sample_reservation;

    #[test]
    fn test_table_has_one_row_per_reservation() {
        let rows = vec![
            sample_reservation("101", ReservationStatus::Confirmed),
            sample_reservation("102", ReservationStatus::Cancelled),
        ];
        let table = reservations_table(&rows, Some("102"));
        assert_eq!(table.len(), 2);

        let rendered = table.to_string();
        assert!(rendered.contains("NUMBER"));
        assert!(rendered.contains("CLASS"));
        assert!(rendered.contains("LAX"));
        assert!(rendered.contains('*'));
    }

    #[test]
    #[serial]
    fn test_colored_status_keeps_text() {
        colored::control::set_override(false);
        assert_eq!(colored_status(ReservationStatus::Pending), "PENDING");
        colored::control::unset_override();
    }
}
