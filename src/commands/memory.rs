//! Memory chat loop
//!
//! Drives [`ChatPanel`] and [`ChatList`] from the terminal. The first
//! message without a selected conversation starts one on the server.

use crate::commands::special_commands::{parse_special_command, print_memory_help, SpecialCommand};
use crate::commands::transcript::Transcript;
use crate::commands::{build_api, print_banner, print_error, read_line, wait_for_retry};
use crate::config::Config;
use crate::error::Result;
use crate::models::{ChatMessage, ChatType};
use crate::reactive::RetryOutcome;
use crate::services::MemoryChatService;
use crate::views::{ChatList, ChatPanel, SendOutcome};
use colored::Colorize;
use prettytable::{row, Table};
use rustyline::DefaultEditor;
use std::sync::Arc;

/// Render one message as a transcript line
pub fn render_message(message: &ChatMessage) -> String {
    match message.chat_type {
        ChatType::User => format!("{} {}", "You:".green().bold(), message.content),
        ChatType::Assistant => format!("{} {}", "Assistant:".cyan().bold(), message.content),
    }
}

/// Conversation table; the selected row is marked with `*`
pub fn chats_table(list: &ChatList) -> Table {
    let mut table = Table::new();
    table.set_titles(row!["", "ID", "Description"]);
    for chat in list.chats() {
        let marker = if list.is_selected(&chat.id) { "*" } else { "" };
        table.add_row(row![marker, chat.id, chat.description]);
    }
    table
}

fn print_chats(list: &ChatList) {
    if let Some(message) = list.error_message() {
        print_error(message);
        println!("Type '/retry' to try again.");
        return;
    }
    if list.chats().is_empty() {
        println!("No conversations yet. Type a message to start one.");
        return;
    }
    println!();
    chats_table(list).printstd();
    println!();
}

fn prompt_for(service: &MemoryChatService) -> String {
    match service.selected_chat_id() {
        Some(id) => format!("[{}] > ", id.yellow()),
        None => format!("[{}] > ", "new".dimmed()),
    }
}

/// Start the memory chat loop, optionally opening `chat_id` first
pub async fn run_memory_chat(config: Config, chat_id: Option<String>) -> Result<()> {
    tracing::info!("Starting memory chat");

    let api = build_api(&config)?;
    let service = MemoryChatService::new(api, config.retry.policy());
    let panel = ChatPanel::new(service.clone(), config.chat.max_message_length);
    let list = ChatList::new(service.clone());

    let transcript = Arc::new(Transcript::new({
        let panel = panel.clone();
        move || panel.messages().iter().map(render_message).collect()
    }));
    panel.attach_scroll_target(transcript.clone());

    print_banner("Memory Chat");
    service.chats().settled().await;
    print_chats(&list);

    if let Some(id) = chat_id {
        open_chat(&list, &transcript, &id).await;
    }

    let mut rl = DefaultEditor::new()?;
    while let Some(line) = read_line(&mut rl, &prompt_for(&service)) {
        if line.trim().is_empty() {
            continue;
        }
        match parse_special_command(&line) {
            Ok(SpecialCommand::Exit) => break,
            Ok(SpecialCommand::Help) => print_memory_help(),
            Ok(SpecialCommand::List) => {
                service.chats().settled().await;
                print_chats(&list);
            }
            Ok(SpecialCommand::Select(id)) => open_chat(&list, &transcript, &id).await,
            Ok(SpecialCommand::New) => {
                list.create_new_chat();
                transcript.reset();
                println!("Your next message starts a new conversation.");
            }
            Ok(SpecialCommand::History) => {
                service.chat_messages().settled().await;
                transcript.reset();
                transcript.flush();
            }
            Ok(SpecialCommand::Retry) => match list.retry() {
                RetryOutcome::Scheduled(delay) => {
                    wait_for_retry(service.chats(), delay).await;
                    print_chats(&list);
                }
                RetryOutcome::Exhausted => {
                    print_error("No retries left; restart to try again.");
                }
            },
            Ok(SpecialCommand::None) => send(&panel, &transcript, line).await,
            Err(e) => print_error(e),
        }
    }

    println!("Goodbye!");
    Ok(())
}

async fn open_chat(list: &ChatList, transcript: &Transcript, id: &str) {
    list.select_chat(id);
    let status = list.service().chat_messages().settled().await;
    if let Some(error) = status.error() {
        print_error(format!("Failed to load conversation {}: {}", id, error));
        return;
    }
    transcript.reset();
    transcript.flush();
}

async fn send(panel: &ChatPanel, transcript: &Transcript, line: String) {
    panel.set_user_input(line);
    if let Some(error) = panel.validation_error() {
        print_error(error);
        return;
    }

    match panel.send_message().await {
        SendOutcome::Started { chat_id } => {
            // Wait for the server copy of the new conversation
            panel.service().chat_messages().settled().await;
            tracing::debug!(chat_id = %chat_id, "Conversation opened");
        }
        SendOutcome::Rejected => {
            print_error("Nothing to send");
        }
        SendOutcome::Replied | SendOutcome::Failed => {}
    }
    transcript.flush();
}
