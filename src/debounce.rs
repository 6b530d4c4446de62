//! Keyed, cancellable timers for coalescing bursts of input.
//!
//! There is no background thread: the owner's event loop calls
//! [`Debouncer::poll`] with the current time and receives whatever fell due.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

/// Identifies one scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug)]
struct Pending<T> {
    handle: TimerHandle,
    deadline: Instant,
    payload: T,
}

#[derive(Debug)]
pub struct Debouncer<K, T> {
    delay: Duration,
    next_handle: u64,
    pending: HashMap<K, Pending<T>>,
}

impl<K: Eq + Hash + Clone, T> Debouncer<K, T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            next_handle: 0,
            pending: HashMap::new(),
        }
    }

    /// Schedules `payload` to fire `delay` after `now`, replacing any timer
    /// still pending under the same key.
    pub fn schedule(&mut self, key: K, payload: T, now: Instant) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;

        self.pending.insert(key, Pending {
            handle,
            deadline: now + self.delay,
            payload,
        });
        handle
    }

    /// Cancels a pending timer. Returns false if it already fired or was replaced.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let key = self
            .pending
            .iter()
            .find(|(_, pending)| pending.handle == handle)
            .map(|(key, _)| key.clone());

        match key {
            Some(key) => self.pending.remove(&key).is_some(),
            None => false,
        }
    }

    /// Drops whatever is pending under `key`
    pub fn cancel_key(&mut self, key: &K) -> Option<T> {
        self.pending.remove(key).map(|pending| pending.payload)
    }

    pub fn is_pending(&self, key: &K) -> bool {
        self.pending.contains_key(key)
    }

    /// Removes and returns every timer whose deadline is at or before `now`,
    /// earliest first.
    pub fn poll(&mut self, now: Instant) -> Vec<(K, T)> {
        let due: Vec<K> = self
            .pending
            .iter()
            .filter(|(_, pending)| pending.deadline <= now)
            .map(|(key, _)| key.clone())
            .collect();

        let mut fired: Vec<(Instant, TimerHandle, K, T)> = due
            .into_iter()
            .filter_map(|key| {
                self.pending
                    .remove(&key)
                    .map(|pending| (pending.deadline, pending.handle, key, pending.payload))
            })
            .collect();
        fired.sort_by_key(|(deadline, handle, _, _)| (*deadline, handle.0));

        fired
            .into_iter()
            .map(|(_, _, key, payload)| (key, payload))
            .collect()
    }

    /// Time until the earliest pending deadline
    pub fn next_deadline(&self, now: Instant) -> Option<Duration> {
        self.pending
            .values()
            .map(|pending| pending.deadline.saturating_duration_since(now))
            .min()
    }
}
