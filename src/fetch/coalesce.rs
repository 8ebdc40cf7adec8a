//! Request coalescing: concurrent callers with the same key share one call.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::OnceCell;

/// Map of in-flight calls keyed by target.
///
/// The first caller for a key runs the call; callers arriving while it is in
/// flight await the same result. The entry is dropped once the call
/// completes, so the next caller starts a fresh request.
pub struct Coalescer<K, V> {
    inflight: Mutex<HashMap<K, Arc<OnceCell<V>>>>,
}

impl<K, V> Default for Coalescer<K, V> {
    fn default() -> Self {
        Self {
            inflight: Mutex::new(HashMap::new()),
        }
    }
}

impl<K, V> Coalescer<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn run<F, Fut>(&self, key: K, call: F) -> V
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = V>,
    {
        let cell = self
            .inflight
            .lock()
            .entry(key.clone())
            .or_insert_with(|| Arc::new(OnceCell::new()))
            .clone();
        let entry = Entry {
            inflight: &self.inflight,
            key,
            cell,
        };

        // If the caller running `call` is cancelled, the next waiter takes over.
        let value = entry.cell.get_or_init(call).await.clone();
        value
    }

    /// Number of keys with a call currently in flight.
    pub fn in_flight(&self) -> usize {
        self.inflight.lock().len()
    }
}

/// One caller's hold on an in-flight cell.
///
/// Dropped on completion and on cancellation alike. The map entry goes away
/// once the cell is settled, or when the last waiter gives up on it.
struct Entry<'a, K: Eq + Hash, V> {
    inflight: &'a Mutex<HashMap<K, Arc<OnceCell<V>>>>,
    key: K,
    cell: Arc<OnceCell<V>>,
}

impl<K: Eq + Hash, V> Drop for Entry<'_, K, V> {
    fn drop(&mut self) {
        let mut inflight = self.inflight.lock();
        let ours = inflight
            .get(&self.key)
            .is_some_and(|c| Arc::ptr_eq(c, &self.cell));
        // Strong count 2 is the map plus this caller.
        if ours && (self.cell.initialized() || Arc::strong_count(&self.cell) == 2) {
            inflight.remove(&self.key);
        }
    }
}
