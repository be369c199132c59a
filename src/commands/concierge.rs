//! Concierge loop
//!
//! The reservations table and the concierge conversation share one
//! [`FlightReservationService`], so a reservation picked with `/select`
//! is what the conversation is about.

use crate::commands::reservations::print_reservations;
use crate::commands::special_commands::{
    parse_special_command, print_concierge_help, SpecialCommand,
};
use crate::commands::transcript::Transcript;
use crate::commands::{build_api, print_banner, print_error, read_line, wait_for_retry};
use crate::config::Config;
use crate::error::Result;
use crate::models::{ChatType, ConciergeMessage};
use crate::reactive::RetryOutcome;
use crate::services::FlightReservationService;
use crate::views::concierge_chat::format_timestamp;
use crate::views::{ConciergeChat, ReservationList};
use chrono::Local;
use colored::Colorize;
use rustyline::DefaultEditor;
use std::sync::Arc;

/// Render one concierge message with its local time
pub fn render_concierge_message(message: &ConciergeMessage) -> String {
    let time = format_timestamp(&message.timestamp.with_timezone(&Local));
    let label = match message.message_type {
        ChatType::User => "You:".green().bold(),
        ChatType::Assistant => "Concierge:".cyan().bold(),
    };
    format!("{} {} {}", format!("[{}]", time).dimmed(), label, message.content)
}

/// Start the concierge loop, optionally selecting `reservation` first
pub async fn run_concierge(config: Config, reservation: Option<String>) -> Result<()> {
    tracing::info!("Starting concierge chat");

    let api = build_api(&config)?;
    let service = FlightReservationService::new(api, config.retry.policy());
    let list = ReservationList::new(service.clone());
    let chat = ConciergeChat::new(service.clone(), config.chat.max_message_length);

    let transcript = Arc::new(Transcript::new({
        let chat = chat.clone();
        move || chat.messages().iter().map(render_concierge_message).collect()
    }));
    chat.attach_scroll_target(transcript.clone());

    print_banner("Concierge");
    service.reservations().settled().await;
    if let Some(number) = reservation {
        select(&list, &number);
    }
    print_reservations(&list);
    transcript.flush();

    let mut rl = DefaultEditor::new()?;
    while let Some(line) = read_line(&mut rl, &prompt_for(&chat)) {
        if line.trim().is_empty() {
            continue;
        }
        match parse_special_command(&line) {
            Ok(SpecialCommand::Exit) => break,
            Ok(SpecialCommand::Help) => print_concierge_help(),
            Ok(SpecialCommand::List) => {
                service.reservations().settled().await;
                print_reservations(&list);
            }
            Ok(SpecialCommand::Select(number)) => {
                service.reservations().settled().await;
                select(&list, &number);
            }
            Ok(SpecialCommand::History) => {
                transcript.reset();
                transcript.flush();
            }
            Ok(SpecialCommand::Retry) => match list.retry() {
                RetryOutcome::Scheduled(delay) => {
                    wait_for_retry(service.reservations(), delay).await;
                    print_reservations(&list);
                }
                RetryOutcome::Exhausted => {
                    print_error("No retries left; restart to try again.");
                }
            },
            Ok(SpecialCommand::New) => {
                print_error("The concierge keeps a single conversation");
            }
            Ok(SpecialCommand::None) => {
                chat.set_current_message(line);
                if let Some(error) = chat.validation_error() {
                    print_error(error);
                    continue;
                }
                chat.send_message().await;
                transcript.flush();
            }
            Err(e) => print_error(e),
        }
    }

    println!("Goodbye!");
    Ok(())
}

fn select(list: &ReservationList, number: &str) {
    if list.select_by_number(number) {
        println!("Selected reservation {}", number.yellow());
    } else {
        print_error(format!("No reservation with number {}", number));
    }
}

fn prompt_for(chat: &ConciergeChat) -> String {
    match chat.selected_reservation() {
        Some(reservation) => format!("[{}] > ", reservation.number.yellow()),
        None => "> ".to_string(),
    }
}
