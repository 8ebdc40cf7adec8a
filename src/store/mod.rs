//! Process-wide application state container.
//!
//! The store is constructed once and handed to every consumer by clone.
//! All mutation goes through [`Store::dispatch`]; readers get owned
//! snapshots and never see a half-applied action.

mod state;

pub use state::AppState;

use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};

use crate::action::Action;

/// Callback invoked with the new snapshot after every dispatch.
pub type Listener = Arc<dyn Fn(&AppState) + Send + Sync>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(u64, Listener)>,
}

struct StoreInner {
    /// Serialises dispatches end to end (reduce + notify).
    dispatch_lock: Mutex<()>,
    state: RwLock<AppState>,
    listeners: Mutex<Listeners>,
}

/// Cloneable handle to the shared state container.
#[derive(Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

impl Store {
    pub fn new(initial: AppState) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                dispatch_lock: Mutex::new(()),
                state: RwLock::new(initial),
                listeners: Mutex::new(Listeners::default()),
            }),
        }
    }

    /// Get a snapshot of the current state.
    pub fn state(&self) -> AppState {
        self.inner.state.read().clone()
    }

    /// Read part of the current state without cloning the whole tree.
    pub fn select<T>(&self, selector: impl FnOnce(&AppState) -> T) -> T {
        selector(&self.inner.state.read())
    }

    /// Apply `action` to every slice, then notify each subscriber once.
    ///
    /// Synchronous: when this returns, reducers have run and every
    /// listener registered at the time of the call has been invoked.
    /// Listeners must not call `dispatch` themselves.
    pub fn dispatch(&self, action: Action) {
        let _serial = self.inner.dispatch_lock.lock();

        let snapshot = {
            let mut state = self.inner.state.write();
            let next = std::mem::take(&mut *state).reduce(&action);
            *state = next;
            state.clone()
        };

        tracing::debug!(action = action.kind(), "Action dispatched");

        // Clone out so listeners can drop their own subscription.
        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .lock()
            .entries
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();

        for listener in listeners {
            listener(&snapshot);
        }
    }

    /// Register `listener`. It stays registered until the returned
    /// [`Subscription`] is dropped or unsubscribed.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&AppState) + Send + Sync + 'static,
    {
        let mut listeners = self.inner.listeners.lock();
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.entries.push((id, Arc::new(listener)));

        Subscription {
            store: Arc::downgrade(&self.inner),
            id,
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.listeners.lock().entries.len()
    }
}

/// Handle returned by [`Store::subscribe`]. Unsubscribes on drop.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    store: Weak<StoreInner>,
    id: u64,
}

impl Subscription {
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.store.upgrade() {
            inner.listeners.lock().entries.retain(|(id, _)| *id != self.id);
        }
    }
}
