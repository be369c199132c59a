//! Auto-scroll effect for message lists

use crate::error::Result;
use std::fmt;
use std::sync::Arc;

/// Something that can show the newest end of a message list
pub trait ScrollTarget: Send + Sync {
    /// Bring the last message into view
    ///
    /// # Errors
    ///
    /// Implementations may fail, e.g. when the view is not attached yet.
    /// Failures are logged by [`AutoScroll`] and never propagated.
    fn scroll_to_bottom(&self) -> Result<()>;
}

/// Schedules a scroll on the next scheduler tick after each list mutation
#[derive(Clone)]
pub struct AutoScroll {
    target: Arc<dyn ScrollTarget>,
}

impl fmt::Debug for AutoScroll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AutoScroll").finish_non_exhaustive()
    }
}

impl AutoScroll {
    pub fn new(target: Arc<dyn ScrollTarget>) -> Self {
        Self { target }
    }

    /// Queue a scroll; runs inline when no runtime is available
    pub fn schedule(&self) {
        let target = Arc::clone(&self.target);
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    tokio::task::yield_now().await;
                    scroll(target.as_ref());
                });
            }
            Err(_) => scroll(target.as_ref()),
        }
    }
}

fn scroll(target: &dyn ScrollTarget) {
    if let Err(e) = target.scroll_to_bottom() {
        tracing::error!("Failed to scroll chat history: {:#}", e);
    }
}
