//! Reactive state primitives
//!
//! - [`Signal`]: mutable cell with subscriber notification and change hooks
//! - [`Resource`]: keyed remote data, refetched when its key changes
//! - [`ResourceErrorHandler`]: bounded retry with backoff for resource loads
//!
//! All types are cheap to clone; clones share state.

pub mod error_handler;
pub mod resource;
pub mod signal;

pub use error_handler::{
    ResourceErrorHandler, RetryOutcome, RetryPolicy, RetryState, MAX_RETRY_DELAY,
};
pub use resource::{Loader, Resource, ResourceStatus};
pub use signal::{ChangeHook, Signal};
