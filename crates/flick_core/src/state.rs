//! Observable state cells
//!
//! [`State<T>`] is a shared, cloneable handle to a single value. Every clone
//! observes the same value, and subscribers are notified after each write.
//! Widgets accept a `State` when the caller wants to own a piece of widget
//! state ("lifted state") and read it back from outside.
//!
//! ```rust
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//! use flick_core::State;
//!
//! let page = State::new(0usize);
//! let seen = Arc::new(AtomicUsize::new(0));
//!
//! let seen_in_cb = Arc::clone(&seen);
//! let sub = page.subscribe(move |p| seen_in_cb.store(*p, Ordering::SeqCst));
//!
//! page.set(3);
//! assert_eq!(seen.load(Ordering::SeqCst), 3);
//!
//! page.unsubscribe(sub);
//! page.set(4);
//! assert_eq!(seen.load(Ordering::SeqCst), 3);
//! ```

use slotmap::{new_key_type, SlotMap};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

new_key_type! {
    /// Handle to a registered state subscriber
    pub struct SubscriptionId;
}

type Subscriber<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct StateInner<T> {
    value: T,
    /// Bumped on every write, including writes of an equal value
    version: u64,
    subscribers: SlotMap<SubscriptionId, Subscriber<T>>,
}

/// A shared, observable value
pub struct State<T> {
    inner: Arc<Mutex<StateInner<T>>>,
}

impl<T> Clone for State<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone + Send + 'static> State<T> {
    /// Create a new state cell holding `value`
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(Mutex::new(StateInner {
                value,
                version: 0,
                subscribers: SlotMap::with_key(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, StateInner<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Get the current value
    pub fn get(&self) -> T {
        self.lock().value.clone()
    }

    /// Set a new value and notify subscribers
    pub fn set(&self, value: T) {
        let (snapshot, subscribers) = {
            let mut inner = self.lock();
            inner.value = value;
            inner.version += 1;
            (inner.value.clone(), Self::collect(&inner))
        };
        Self::notify(&subscribers, &snapshot);
    }

    /// Update the value using a function and notify subscribers
    ///
    /// Returns the new value.
    pub fn update(&self, f: impl FnOnce(T) -> T) -> T {
        let (snapshot, subscribers) = {
            let mut inner = self.lock();
            let next = f(inner.value.clone());
            inner.value = next;
            inner.version += 1;
            (inner.value.clone(), Self::collect(&inner))
        };
        Self::notify(&subscribers, &snapshot);
        snapshot
    }

    /// Number of writes since creation
    pub fn version(&self) -> u64 {
        self.lock().version
    }

    /// Register a callback invoked with the new value after every write
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.lock().subscribers.insert(Arc::new(callback))
    }

    /// Remove a subscriber. Unknown ids are ignored.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.lock().subscribers.remove(id);
    }

    /// Number of live subscribers
    pub fn subscriber_count(&self) -> usize {
        self.lock().subscribers.len()
    }

    /// Whether both handles point at the same cell
    pub fn ptr_eq(&self, other: &State<T>) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    fn collect(inner: &StateInner<T>) -> Vec<Subscriber<T>> {
        inner.subscribers.values().cloned().collect()
    }

    // Subscribers run without the lock held so they may read or write the cell.
    fn notify(subscribers: &[Subscriber<T>], value: &T) {
        for callback in subscribers {
            callback(value);
        }
    }
}

impl<T: Clone + Send + Default + 'static> Default for State<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for State<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("State")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .finish()
    }
}
