/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint:

- `chat`: Stateless interactive chat
- `memory`: Interactive chat with server-side conversation memory
- `concierge`: Concierge chat next to the reservations table
- `reservations`: One-shot reservation listing and cancellation

Handlers stay thin: state and request handling live in the view-models and
services; this layer only reads lines, dispatches, and prints.
*/

use crate::api::{ChatApi, HttpChatApi};
use crate::config::Config;
use crate::error::Result;
use crate::reactive::Resource;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;

// Special commands parser for the interactive loops
pub mod special_commands;

// Terminal transcript used as the scroll target
pub mod transcript;

// Memory chat loop
pub mod memory;

// Concierge loop
pub mod concierge;

// Reservation listing and cancellation
pub mod reservations;

/// Build the HTTP client shared by a command's services
pub fn build_api(config: &Config) -> Result<Arc<dyn ChatApi>> {
    Ok(Arc::new(HttpChatApi::new(&config.api)?))
}

/// Read one line; `None` ends the loop (Ctrl-C, Ctrl-D, or a terminal error)
pub(crate) fn read_line(rl: &mut DefaultEditor, prompt: &str) -> Option<String> {
    match rl.readline(prompt) {
        Ok(line) => {
            if !line.trim().is_empty() {
                if let Err(e) = rl.add_history_entry(line.as_str()) {
                    tracing::debug!("Failed to record history entry: {}", e);
                }
            }
            Some(line)
        }
        Err(ReadlineError::Interrupted) => {
            println!("CTRL-C");
            None
        }
        Err(ReadlineError::Eof) => {
            println!("CTRL-D");
            None
        }
        Err(err) => {
            tracing::error!("Readline error: {:?}", err);
            None
        }
    }
}

/// Wait for a scheduled retry of `resource` to run and settle
///
/// Gives up waiting (but leaves the retry scheduled) if nothing happens
/// shortly after `delay`.
pub(crate) async fn wait_for_retry<K, T>(resource: &Resource<K, T>, delay: Duration)
where
    K: Clone + PartialEq + Debug + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    println!("Retrying in {:.1}s...", delay.as_secs_f64());
    let mut rx = resource.subscribe();
    rx.borrow_and_update();
    let grace = delay + Duration::from_secs(1);
    if tokio::time::timeout(grace, rx.changed()).await.is_err() {
        tracing::warn!(resource = %resource.name(), "Retry did not start in time");
        return;
    }
    resource.settled().await;
}

/// Print an error in the loops' style
pub(crate) fn print_error(message: impl std::fmt::Display) {
    eprintln!("{}", format!("Error: {}", message).red());
}

// Simple chat command handler
pub mod chat {
    //! Stateless chat loop.
    //!
    //! Every line is sent to `POST /api/chat` and answered independently.

    use super::*;
    use crate::commands::special_commands::{parse_special_command, print_chat_help, SpecialCommand};
    use crate::commands::transcript::Transcript;
    use crate::services::ChatService;
    use crate::views::SimpleChat;

    /// Start the stateless chat loop
    pub async fn run_chat(config: Config) -> Result<()> {
        tracing::info!("Starting simple chat");

        let api = build_api(&config)?;
        let chat = SimpleChat::new(ChatService::new(api), config.chat.max_message_length);

        let transcript = Arc::new(Transcript::new({
            let chat = chat.clone();
            move || {
                chat.messages()
                    .iter()
                    .map(|m| {
                        if m.is_bot {
                            format!("{} {}", "Bot:".cyan().bold(), m.message)
                        } else {
                            format!("{} {}", "You:".green().bold(), m.message)
                        }
                    })
                    .collect()
            }
        }));
        chat.attach_scroll_target(transcript.clone());

        let mut rl = DefaultEditor::new()?;
        print_banner("Chat");
        transcript.flush();

        while let Some(line) = read_line(&mut rl, "> ") {
            if line.trim().is_empty() {
                continue;
            }
            match parse_special_command(&line) {
                Ok(SpecialCommand::Exit) => break,
                Ok(SpecialCommand::Help) => print_chat_help(),
                Ok(SpecialCommand::None) => {
                    chat.set_user_input(line);
                    if let Some(error) = chat.validation_error() {
                        print_error(error);
                        continue;
                    }
                    chat.send_message().await;
                    transcript.flush();
                }
                Ok(other) => print_error(format!("{:?} is not available in simple chat", other)),
                Err(e) => print_error(e),
            }
        }

        println!("Goodbye!");
        Ok(())
    }
}

/// Welcome banner shared by the interactive loops
pub(crate) fn print_banner(title: &str) {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║ {:<60} ║", format!("Chatfront {} - Welcome!", title));
    println!("╚══════════════════════════════════════════════════════════════╝\n");
    println!("Type '/help' for available commands, 'exit' to quit\n");
}
