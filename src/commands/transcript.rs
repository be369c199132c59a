//! Terminal rendering of a message list
//!
//! The terminal cannot scroll back and re-render, so "scroll to bottom"
//! means printing whatever lines the user has not seen yet.

use crate::error::Result;
use crate::views::ScrollTarget;
use std::sync::Mutex;

type LineSource = Box<dyn Fn() -> Vec<String> + Send + Sync>;

/// Prints the unseen tail of a rendered message list
pub struct Transcript {
    source: LineSource,
    printed: Mutex<Vec<String>>,
}

impl Transcript {
    /// `source` renders the current list, one line per message
    pub fn new<F>(source: F) -> Self
    where
        F: Fn() -> Vec<String> + Send + Sync + 'static,
    {
        Self {
            source: Box::new(source),
            printed: Mutex::new(Vec::new()),
        }
    }

    /// Lines to print now, and remember them as shown
    ///
    /// An empty list (loading, or nothing selected) is treated as
    /// transient and leaves the record alone. A list that no longer extends
    /// what was shown (another conversation) is returned in full.
    pub fn take_unseen(&self) -> Vec<String> {
        let current = (self.source)();
        if current.is_empty() {
            return Vec::new();
        }
        let mut printed = self.printed.lock().unwrap_or_else(|p| p.into_inner());
        let unseen = if current.starts_with(printed.as_slice()) {
            current[printed.len()..].to_vec()
        } else {
            current.clone()
        };
        *printed = current;
        unseen
    }

    /// Forget what was shown; the next flush prints everything
    pub fn reset(&self) {
        self.printed
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clear();
    }

    pub fn flush(&self) {
        for line in self.take_unseen() {
            println!("{}", line);
        }
    }
}

impl ScrollTarget for Transcript {
    fn scroll_to_bottom(&self) -> Result<()> {
        self.flush();
        Ok(())
    }
}
