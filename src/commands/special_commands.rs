//! Special commands parser for the interactive loops
//!
//! Lines starting with `/` are commands rather than messages. Commands are
//! case-insensitive; their arguments (chat ids, reservation numbers) are
//! kept as typed. Not every loop supports every command: the caller decides
//! what a command means in its context.

use thiserror::Error;

/// Errors that can occur when parsing special commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Unknown command: {0}\n\nType '/help' to see available commands")]
    UnknownCommand(String),

    /// Command requires an argument but none was provided
    #[error("Command {command} requires an argument\n\nUsage: {usage}")]
    MissingArgument { command: String, usage: String },

    /// Command takes no argument but one was given
    #[error("Command {command} takes no argument, got: {arg}")]
    UnexpectedArgument { command: String, arg: String },
}

/// Commands understood by the interactive loops
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialCommand {
    /// Show the list (conversations or reservations)
    List,

    /// Select a conversation or reservation by id
    Select(String),

    /// Leave the current conversation; the next message starts a new one
    New,

    /// Print the whole conversation again
    History,

    /// Retry a failed list load
    Retry,

    /// Display help information
    Help,

    /// Exit the interactive session
    Exit,

    /// Not a special command; send the input as a message
    None,
}

/// Parse a line of user input
///
/// # Errors
///
/// Returns [`CommandError`] when the line starts with `/` but is not a
/// valid command.
///
/// # Examples
///
/// ```
/// use chatfront::commands::special_commands::{parse_special_command, SpecialCommand};
///
/// assert_eq!(parse_special_command("/select abc").unwrap(), SpecialCommand::Select("abc".to_string()));
/// assert_eq!(parse_special_command("hello").unwrap(), SpecialCommand::None);
/// ```
pub fn parse_special_command(input: &str) -> Result<SpecialCommand, CommandError> {
    let trimmed = input.trim();
    let lower = trimmed.to_lowercase();

    if !trimmed.starts_with('/') {
        return Ok(match lower.as_str() {
            "exit" | "quit" => SpecialCommand::Exit,
            _ => SpecialCommand::None,
        });
    }

    let (name, arg) = match trimmed.split_once(char::is_whitespace) {
        Some((name, rest)) => (name.to_lowercase(), rest.trim()),
        None => (lower.clone(), ""),
    };

    let no_arg = |command: SpecialCommand| {
        if arg.is_empty() {
            Ok(command)
        } else {
            Err(CommandError::UnexpectedArgument {
                command: name.clone(),
                arg: arg.to_string(),
            })
        }
    };

    match name.as_str() {
        "/list" | "/ls" => no_arg(SpecialCommand::List),
        "/select" | "/open" => {
            if arg.is_empty() {
                Err(CommandError::MissingArgument {
                    command: name.clone(),
                    usage: format!("{} <id>", name),
                })
            } else {
                Ok(SpecialCommand::Select(arg.to_string()))
            }
        }
        "/new" => no_arg(SpecialCommand::New),
        "/history" => no_arg(SpecialCommand::History),
        "/retry" => no_arg(SpecialCommand::Retry),
        "/help" | "/?" => no_arg(SpecialCommand::Help),
        "/quit" | "/exit" => no_arg(SpecialCommand::Exit),
        _ => Err(CommandError::UnknownCommand(trimmed.to_string())),
    }
}

/// Print help for the memory chat loop
pub fn print_memory_help() {
    println!(
        r#"
Memory Chat Commands
====================

  /list           - Show your conversations
  /select <id>    - Open a conversation and show its history
  /new            - Start a new conversation with your next message
  /history        - Print the current conversation again
  /retry          - Retry loading the conversation list
  /help           - Show this help
  /quit           - Leave (also: exit, quit, Ctrl-D)

Anything else is sent as a message (at most the configured maximum length).
"#
    );
}

/// Print help for the concierge loop
pub fn print_concierge_help() {
    println!(
        r#"
Concierge Commands
==================

  /list               - Show your reservations
  /select <number>    - Pick the reservation to talk about
  /history            - Print the conversation again
  /retry              - Retry loading reservations
  /help               - Show this help
  /quit               - Leave (also: exit, quit, Ctrl-D)
"#
    );
}

/// Print help for the simple chat loop
pub fn print_chat_help() {
    println!(
        r#"
Chat Commands
=============

  /help   - Show this help
  /quit   - Leave (also: exit, quit, Ctrl-D)

Every message is answered on its own; nothing is remembered between them.
"#
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_not_a_command() {
        assert_eq!(parse_special_command("hello there").unwrap(), SpecialCommand::None);
        assert_eq!(parse_special_command("  ").unwrap(), SpecialCommand::None);
    }

    #[test]
    fn test_exit_aliases() {
        for input in ["exit", "QUIT", "/quit", "/exit"] {
            assert_eq!(parse_special_command(input).unwrap(), SpecialCommand::Exit);
        }
    }

    #[test]
    fn test_list_and_aliases() {
        assert_eq!(parse_special_command("/list").unwrap(), SpecialCommand::List);
        assert_eq!(parse_special_command("/LS").unwrap(), SpecialCommand::List);
    }

    #[test]
    fn test_select_keeps_argument_case() {
        assert_eq!(
            parse_special_command("/Select  AbC-12 ").unwrap(),
            SpecialCommand::Select("AbC-12".to_string())
        );
        assert_eq!(
            parse_special_command("/open x").unwrap(),
            SpecialCommand::Select("x".to_string())
        );
    }

    #[test]
    fn test_select_requires_argument() {
        assert!(matches!(
            parse_special_command("/select"),
            Err(CommandError::MissingArgument { .. })
        ));
    }

    #[test]
    fn test_argument_rejected_for_plain_commands() {
        assert_eq!(
            parse_special_command("/new chat"),
            Err(CommandError::UnexpectedArgument {
                command: "/new".to_string(),
                arg: "chat".to_string()
            })
        );
    }

    #[test]
    fn test_other_commands() {
        assert_eq!(parse_special_command("/new").unwrap(), SpecialCommand::New);
        assert_eq!(parse_special_command("/history").unwrap(), SpecialCommand::History);
        assert_eq!(parse_special_command("/retry").unwrap(), SpecialCommand::Retry);
        assert_eq!(parse_special_command("/?").unwrap(), SpecialCommand::Help);
    }

    #[test]
    fn test_unknown_command() {
        let err = parse_special_command("/delete abc").unwrap_err();
        assert_eq!(err, CommandError::UnknownCommand("/delete abc".to_string()));
        assert!(err.to_string().contains("/help"));
    }
}
