//! Mutable reactive cell with push-based change hooks
//!
//! A [`Signal`] wraps a `tokio::sync::watch` channel so async observers can
//! `subscribe()` and await changes, while synchronous hooks registered with
//! [`Signal::on_change`] run immediately after every mutation. Derived
//! resources use the synchronous hooks for dependency tracking, which keeps
//! the "set, then refetch" ordering deterministic.

use std::fmt;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

/// Hook invoked with the new value after each mutation
pub type ChangeHook<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Shared, cloneable reactive cell
///
/// Cloning a `Signal` yields another handle to the same cell.
///
/// # Examples
///
/// ```
/// use chatfront::reactive::Signal;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// let selected: Signal<Option<String>> = Signal::new(None);
/// let seen = Arc::new(AtomicUsize::new(0));
/// let counter = seen.clone();
/// selected.on_change(move |_| {
///     counter.fetch_add(1, Ordering::SeqCst);
/// });
///
/// selected.set(Some("abc".to_string()));
/// assert_eq!(selected.get().as_deref(), Some("abc"));
/// assert_eq!(seen.load(Ordering::SeqCst), 1);
/// ```
pub struct Signal<T> {
    inner: Arc<SignalInner<T>>,
}

struct SignalInner<T> {
    tx: watch::Sender<T>,
    hooks: Mutex<Vec<ChangeHook<T>>>,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Signal").field(&*self.inner.tx.borrow()).finish()
    }
}

impl<T: Default + Clone + Send + Sync + 'static> Default for Signal<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + Send + Sync + 'static> Signal<T> {
    /// Create a signal holding `value`
    pub fn new(value: T) -> Self {
        let (tx, _rx) = watch::channel(value);
        Self {
            inner: Arc::new(SignalInner {
                tx,
                hooks: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Current value (cloned)
    pub fn get(&self) -> T {
        self.inner.tx.borrow().clone()
    }

    /// Read the current value without cloning it
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.tx.borrow())
    }

    /// Replace the value and notify observers
    pub fn set(&self, value: T) {
        self.inner.tx.send_replace(value);
        self.notify();
    }

    /// Mutate the value in place and notify observers
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        self.inner.tx.send_modify(f);
        self.notify();
    }

    /// Mutate the value under the write lock; observers are notified only
    /// when `f` returns `true`
    ///
    /// Check-and-set transitions go through here so concurrent callers
    /// cannot both observe the old value.
    pub fn update_if(&self, f: impl FnOnce(&mut T) -> bool) -> bool {
        let modified = self.inner.tx.send_if_modified(f);
        if modified {
            self.notify();
        }
        modified
    }

    /// Async receiver that observes every subsequent change
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.inner.tx.subscribe()
    }

    /// Register a hook that runs synchronously after each mutation
    pub fn on_change<F>(&self, hook: F)
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.inner
            .hooks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(Arc::new(hook));
    }

    fn notify(&self) {
        // Hooks may touch this signal again, so run them without the lock held.
        let hooks: Vec<ChangeHook<T>> = self
            .inner
            .hooks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone();
        if hooks.is_empty() {
            return;
        }
        let value = self.get();
        for hook in hooks {
            hook(&value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_signal_get_and_set() {
        let signal = Signal::new(1);
        assert_eq!(signal.get(), 1);
        signal.set(2);
        assert_eq!(signal.get(), 2);
    }

    #[test]
    fn test_signal_update_in_place() {
        let signal = Signal::new(vec![1, 2]);
        signal.update(|v| v.push(3));
        assert_eq!(signal.get(), vec![1, 2, 3]);
        assert_eq!(signal.with(|v| v.len()), 3);
    }

    #[test]
    fn test_clone_shares_state() {
        let a = Signal::new(String::from("x"));
        let b = a.clone();
        b.set("y".to_string());
        assert_eq!(a.get(), "y");
    }

    #[test]
    fn test_hooks_run_after_every_mutation() {
        let signal = Signal::new(0);
        let calls = Arc::new(AtomicUsize::new(0));
        let last = Arc::new(AtomicUsize::new(0));
        let (c, l) = (calls.clone(), last.clone());
        signal.on_change(move |v| {
            c.fetch_add(1, Ordering::SeqCst);
            l.store(*v, Ordering::SeqCst);
        });

        signal.set(5);
        signal.update(|v| *v += 1);

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(last.load(Ordering::SeqCst), 6);
    }

    #[test]
    fn test_update_if_notifies_only_on_change() {
        let signal = Signal::new(0);
        let calls = Arc::new(AtomicUsize::new(0));
        let c = calls.clone();
        signal.on_change(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });

        assert!(!signal.update_if(|_| false));
        assert!(signal.update_if(|v| {
            *v = 4;
            true
        }));

        assert_eq!(signal.get(), 4);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_hook_may_read_signal() {
        let signal = Signal::new(0);
        let observed = Arc::new(AtomicUsize::new(0));
        let (s, o) = (signal.clone(), observed.clone());
        signal.on_change(move |_| o.store(s.get(), Ordering::SeqCst));
        signal.set(9);
        assert_eq!(observed.load(Ordering::SeqCst), 9);
    }

    #[tokio::test]
    async fn test_subscribe_sees_changes() {
        let signal = Signal::new(false);
        let mut rx = signal.subscribe();
        signal.set(true);
        rx.changed().await.unwrap();
        assert!(*rx.borrow());
    }
}
