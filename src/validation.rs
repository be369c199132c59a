//! Chat input validation and sanitization
//!
//! Every panel applies the same rules before a message leaves the client:
//! trimmed input must be non-empty and at most the configured maximum
//! length, and markup is stripped so it can never be rendered inside a chat
//! bubble.

use regex::Regex;
use std::sync::OnceLock;

/// Default longest accepted message (characters, after trimming)
pub const MAX_MESSAGE_LENGTH: usize = 2000;

fn script_tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?is)<script\b.*?</script>").expect("script tag pattern is valid")
    })
}

fn html_tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]+>").expect("html tag pattern is valid"))
}

/// Strip script blocks and all other HTML tags, then trim
///
/// # Examples
///
/// ```
/// use chatfront::validation::sanitize_input;
///
/// assert_eq!(sanitize_input("Hello <script>alert(1)</script> world"), "Hello  world");
/// assert_eq!(sanitize_input("<div><span>test</span></div>"), "test");
/// ```
pub fn sanitize_input(input: &str) -> String {
    let without_scripts = script_tag_regex().replace_all(input, "");
    let without_tags = html_tag_regex().replace_all(&without_scripts, "");
    without_tags.trim().to_string()
}

/// Length used by every rule: characters of the trimmed input
pub fn input_length(input: &str) -> usize {
    input.trim().chars().count()
}

/// Inline validation text; `None` for valid or empty input
///
/// # Examples
///
/// ```
/// use chatfront::validation::validation_error;
///
/// assert_eq!(validation_error("   ", 2000), None);
/// let long = "a".repeat(2001);
/// assert_eq!(
///     validation_error(&long, 2000).as_deref(),
///     Some("Message is too long (2001/2000 characters)")
/// );
/// ```
pub fn validation_error(input: &str, max_length: usize) -> Option<String> {
    let length = input_length(input);
    if length > max_length {
        Some(format!(
            "Message is too long ({}/{} characters)",
            length, max_length
        ))
    } else {
        None
    }
}

/// Whether a message may be sent right now
pub fn can_send(input: &str, max_length: usize, busy: bool) -> bool {
    let length = input_length(input);
    length > 0 && length <= max_length && !busy
}
