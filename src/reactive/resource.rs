//! Keyed, reactively refetched remote data
//!
//! A [`Resource`] caches the result of an async loader for one key at a
//! time. Changing the key (directly with [`Resource::track`] or through a
//! bound [`Signal`]) starts a new load; [`Resource::reload`] refetches the
//! current key. Every load carries a generation number: a newer load or a
//! local write aborts the older task, and any completion that arrives for a
//! superseded generation is dropped.

use crate::error::Result;
use crate::reactive::{ResourceErrorHandler, RetryOutcome, Signal};
use futures::future::BoxFuture;
use std::fmt;
use std::sync::{Arc, Mutex, OnceLock};
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Async fetch function for a key
pub type Loader<K, T> = Arc<dyn Fn(K) -> BoxFuture<'static, Result<T>> + Send + Sync>;

/// Load status of a resource
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceStatus<T> {
    /// No key; nothing is fetched
    Idle,
    Loading,
    /// Value returned by the loader
    Resolved(T),
    /// Value written locally by [`Resource::update`]
    Local(T),
    Error(String),
}

impl<T> ResourceStatus<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            ResourceStatus::Resolved(v) | ResourceStatus::Local(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ResourceStatus::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ResourceStatus::Error(e) => Some(e),
            _ => None,
        }
    }
}

/// Reactive cache entry over a remote source
pub struct Resource<K, T> {
    inner: Arc<ResourceInner<K, T>>,
}

struct ResourceInner<K, T> {
    name: String,
    loader: Loader<K, T>,
    status: Signal<ResourceStatus<T>>,
    state: Mutex<LoadState<K>>,
    error_handler: OnceLock<ResourceErrorHandler>,
}

struct LoadState<K> {
    key: Option<K>,
    generation: u64,
    task: Option<JoinHandle<()>>,
}

impl<K, T> Clone for Resource<K, T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K: fmt::Debug, T: fmt::Debug + Clone + Send + Sync + 'static> fmt::Debug for Resource<K, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("name", &self.inner.name)
            .field("status", &self.inner.status.get())
            .finish()
    }
}

impl<K, T> Resource<K, T>
where
    K: Clone + PartialEq + fmt::Debug + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    /// Create an idle resource; nothing is fetched until a key is tracked
    pub fn keyed<F>(name: impl Into<String>, loader: F) -> Self
    where
        F: Fn(K) -> BoxFuture<'static, Result<T>> + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(ResourceInner {
                name: name.into(),
                loader: Arc::new(loader),
                status: Signal::new(ResourceStatus::Idle),
                state: Mutex::new(LoadState {
                    key: None,
                    generation: 0,
                    task: None,
                }),
                error_handler: OnceLock::new(),
            }),
        }
    }

    /// Attach a retry handler; load failures are recorded, successes reset it
    pub fn with_error_handler(self, handler: ResourceErrorHandler) -> Self {
        if self.inner.error_handler.set(handler).is_err() {
            tracing::warn!(resource = %self.inner.name, "Error handler already attached");
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn error_handler(&self) -> Option<&ResourceErrorHandler> {
        self.inner.error_handler.get()
    }

    pub fn status(&self) -> ResourceStatus<T> {
        self.inner.status.get()
    }

    pub fn value(&self) -> Option<T> {
        self.inner.status.with(|s| s.value().cloned())
    }

    pub fn is_loading(&self) -> bool {
        self.inner.status.with(|s| s.is_loading())
    }

    pub fn error(&self) -> Option<String> {
        self.inner.status.with(|s| s.error().map(str::to_string))
    }

    pub fn key(&self) -> Option<K> {
        self.lock_state().key.clone()
    }

    /// Async receiver for status changes
    pub fn subscribe(&self) -> watch::Receiver<ResourceStatus<T>> {
        self.inner.status.subscribe()
    }

    /// Register a synchronous hook on status changes
    pub fn on_change<F>(&self, hook: F)
    where
        F: Fn(&ResourceStatus<T>) + Send + Sync + 'static,
    {
        self.inner.status.on_change(hook);
    }

    /// Follow `key` automatically: every change of the signal is tracked
    pub fn bind(&self, key: &Signal<Option<K>>) {
        self.track(key.get());
        let this = self.clone();
        key.on_change(move |k| this.track(k.clone()));
    }

    /// Point the resource at `key`
    ///
    /// A new key starts a fetch and supersedes any in-flight load. `None`
    /// cancels and goes idle without calling the loader. Re-tracking the
    /// current key is a no-op.
    pub fn track(&self, key: Option<K>) {
        let mut state = self.lock_state();
        if state.key == key {
            return;
        }
        state.key = key.clone();
        match key {
            Some(k) => {
                drop(state);
                self.start_load(k);
            }
            None => {
                state.generation += 1;
                if let Some(task) = state.task.take() {
                    task.abort();
                }
                drop(state);
                tracing::debug!(resource = %self.inner.name, "Resource inactive");
                self.inner.status.set(ResourceStatus::Idle);
            }
        }
    }

    /// Refetch the current key; returns `false` when there is none
    pub fn reload(&self) -> bool {
        let key = self.lock_state().key.clone();
        match key {
            Some(k) => {
                self.start_load(k);
                true
            }
            None => false,
        }
    }

    /// Write a local value, superseding any in-flight load
    pub fn update(&self, f: impl FnOnce(Option<T>) -> T) {
        {
            let mut state = self.lock_state();
            state.generation += 1;
            if let Some(task) = state.task.take() {
                task.abort();
            }
        }
        let current = self.value();
        self.inner.status.set(ResourceStatus::Local(f(current)));
    }

    /// Wait until the resource is not loading and return that status
    pub async fn settled(&self) -> ResourceStatus<T> {
        let mut rx = self.subscribe();
        loop {
            {
                let status = rx.borrow_and_update();
                if !status.is_loading() {
                    return status.clone();
                }
            }
            if rx.changed().await.is_err() {
                return self.status();
            }
        }
    }

    /// Ask the attached error handler to schedule a reload
    ///
    /// Returns `None` when no handler is attached.
    pub fn retry(&self) -> Option<RetryOutcome> {
        let handler = self.inner.error_handler.get()?;
        let this = self.clone();
        Some(handler.retry(move || {
            this.reload();
        }))
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, LoadState<K>> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn start_load(&self, key: K) {
        let generation = {
            let mut state = self.lock_state();
            state.generation += 1;
            if let Some(task) = state.task.take() {
                tracing::debug!(resource = %self.inner.name, "Aborting superseded load");
                task.abort();
            }
            state.generation
        };

        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                tracing::error!(resource = %self.inner.name, "Cannot start load: {}", e);
                self.finish(generation, Err(anyhow::anyhow!("no async runtime: {}", e)));
                return;
            }
        };

        tracing::debug!(resource = %self.inner.name, ?key, generation, "Loading resource");
        self.inner.status.set(ResourceStatus::Loading);

        let future = (self.inner.loader)(key);
        let this = self.clone();
        let handle = runtime.spawn(async move {
            let result = future.await;
            this.finish(generation, result);
        });

        let mut state = self.lock_state();
        if state.generation == generation {
            state.task = Some(handle);
        }
    }

    fn finish(&self, generation: u64, result: Result<T>) {
        {
            let mut state = self.lock_state();
            if state.generation != generation {
                tracing::debug!(
                    resource = %self.inner.name,
                    generation,
                    current = state.generation,
                    "Discarding stale load result"
                );
                return;
            }
            state.task = None;
        }

        match result {
            Ok(value) => {
                self.inner.status.set(ResourceStatus::Resolved(value));
                if let Some(handler) = self.inner.error_handler.get() {
                    handler.reset();
                }
            }
            Err(e) => {
                let message = format!("{:#}", e);
                tracing::error!(resource = %self.inner.name, "Failed to load: {}", message);
                self.inner.status.set(ResourceStatus::Error(message.clone()));
                if let Some(handler) = self.inner.error_handler.get() {
                    handler.handle_error(message);
                }
            }
        }
    }
}

impl<T> Resource<(), T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create a key-less resource that fetches immediately
    pub fn eager<F>(name: impl Into<String>, loader: F) -> Self
    where
        F: Fn() -> BoxFuture<'static, Result<T>> + Send + Sync + 'static,
    {
        Self::keyed(name, move |()| loader())
    }

    /// Begin the initial fetch of an eager resource
    pub fn start(self) -> Self {
        self.track(Some(()));
        self
    }
}
