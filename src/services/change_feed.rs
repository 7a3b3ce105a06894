//! Change-notification feed for Markstash.
//!
//! In-process stand-in for a hosted backend's real-time channel:
//! subscriptions are keyed by table name with an event-kind wildcard, events
//! carry no row payload, and delivery is at-least-once. Receivers must
//! re-query the table for actual data.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

use crate::types::change::ChangeEvent;

type ChangeCallback = Arc<dyn Fn(&ChangeEvent) + Send + Sync>;

struct Registration {
    table: String,
    callback: ChangeCallback,
}

/// Shared subscriber registry. Handles keep only a weak reference so an
/// outliving handle never extends the feed's lifetime.
struct FeedInner {
    subscribers: Mutex<HashMap<u64, Registration>>,
    next_id: AtomicU64,
}

impl FeedInner {
    fn unsubscribe(&self, id: u64) {
        self.subscribers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&id);
    }
}

/// Registry of change subscribers, keyed by an opaque subscription id.
#[derive(Clone)]
pub struct ChangeFeed {
    inner: Arc<FeedInner>,
}

impl ChangeFeed {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(FeedInner {
                subscribers: Mutex::new(HashMap::new()),
                next_id: AtomicU64::new(1),
            }),
        }
    }

    /// Registers a callback for every event on the given table, any event kind.
    ///
    /// The returned handle must be released when the owning view unmounts;
    /// dropping the handle releases it as a backstop.
    pub fn subscribe(
        &self,
        table: &str,
        callback: impl Fn(&ChangeEvent) + Send + Sync + 'static,
    ) -> SubscriptionHandle {
        let id = self.inner.next_id.fetch_add(1, Ordering::SeqCst);
        self.inner
            .subscribers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(
                id,
                Registration {
                    table: table.to_string(),
                    callback: Arc::new(callback),
                },
            );
        SubscriptionHandle {
            feed: Arc::downgrade(&self.inner),
            id,
            released: AtomicBool::new(false),
        }
    }

    /// Delivers an event to every subscriber registered for its table.
    ///
    /// Callbacks run outside the registry lock, so a callback may subscribe
    /// or release without deadlocking.
    pub fn publish(&self, event: &ChangeEvent) {
        let callbacks: Vec<ChangeCallback> = {
            let subscribers = self
                .inner
                .subscribers
                .lock()
                .unwrap_or_else(|e| e.into_inner());
            subscribers
                .values()
                .filter(|r| r.table == event.table)
                .map(|r| Arc::clone(&r.callback))
                .collect()
        };
        for callback in callbacks {
            callback(event);
        }
    }

    /// Number of live subscriptions across all tables.
    pub fn subscriber_count(&self) -> usize {
        self.inner
            .subscribers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to a live change subscription.
///
/// `release` is idempotent: the registration is removed exactly once no
/// matter how many times it is called, and drop releases as a backstop.
pub struct SubscriptionHandle {
    feed: Weak<FeedInner>,
    id: u64,
    released: AtomicBool,
}

impl SubscriptionHandle {
    /// Removes the registration from the feed. Safe to call more than once.
    pub fn release(&self) {
        if !self.released.swap(true, Ordering::SeqCst) {
            if let Some(feed) = self.feed.upgrade() {
                feed.unsubscribe(self.id);
            }
        }
    }

    /// Whether this handle has already been released.
    pub fn is_released(&self) -> bool {
        self.released.load(Ordering::SeqCst)
    }
}

impl Drop for SubscriptionHandle {
    fn drop(&mut self) {
        self.release();
    }
}
