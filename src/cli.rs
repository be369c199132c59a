//! Command-line interface definition for Chatfront
//!
//! This module defines the CLI structure using clap's derive API,
//! providing the simple chat, memory chat, concierge, and reservation
//! commands.

use clap::{Parser, Subcommand};

/// Chatfront - terminal client for the chat and flight reservation backend
///
/// Talk to the stateless chat endpoint, hold multi-turn conversations with
/// server-side memory, or manage flight reservations with the concierge.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatfront")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Override the backend base URL from config
    #[arg(long)]
    pub base_url: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Chatfront
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Stateless chat: every message is answered on its own
    Chat,

    /// Conversation chat with server-side memory
    Memory {
        /// Open an existing conversation instead of starting a new one
        #[arg(long)]
        chat_id: Option<String>,
    },

    /// Chat with the flight reservation concierge
    Concierge {
        /// Reservation number to discuss
        #[arg(short, long)]
        reservation: Option<String>,
    },

    /// Manage flight reservations
    Reservations {
        /// Reservation subcommand
        #[command(subcommand)]
        command: ReservationCommand,
    },
}

/// Reservation management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ReservationCommand {
    /// List reservations
    List {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Cancel a reservation
    Cancel {
        /// Reservation number
        number: String,

        /// First name on the booking
        #[arg(long)]
        first_name: String,

        /// Last name on the booking
        #[arg(long)]
        last_name: String,

        /// Reason for cancelling
        #[arg(long)]
        reason: Option<String>,
    },
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            verbose: false,
            base_url: None,
            json_logs: false,
            command: Commands::Chat,
        }
    }
}
