//! Keyed timer table for cooperative, single-threaded scheduling.
//!
//! Every asynchronous step of the dropdown (debounces, hover intent, animation
//! and settle delays, next-frame retries) is an entry in a [`Scheduler`]. Each
//! key holds at most one pending deadline: scheduling a key again replaces the
//! previous deadline, so a stale timer can never fire after its owner moved on.
//!
//! The scheduler never reads the clock itself. Callers pass `now` in, which
//! keeps the engine deterministic under test.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::Duration;

use web_time::Instant;

#[derive(Debug, Clone, Copy)]
struct Entry {
    deadline: Instant,
    /// Insertion order, breaks ties between equal deadlines
    seq: u64,
}

/// A table of pending timers indexed by key.
#[derive(Debug, Clone)]
pub struct Scheduler<K> {
    entries: HashMap<K, Entry>,
    next_seq: u64,
}

impl<K> Default for Scheduler<K> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            next_seq: 0,
        }
    }
}

impl<K: Copy + Eq + Hash + std::fmt::Debug> Scheduler<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `key` to fire `delay` after `now`, replacing any pending entry.
    pub fn schedule(&mut self, key: K, now: Instant, delay: Duration) {
        let seq = self.next_seq;
        self.next_seq += 1;
        if self
            .entries
            .insert(
                key,
                Entry {
                    deadline: now + delay,
                    seq,
                },
            )
            .is_some()
        {
            log::trace!("Scheduler: rescheduled {:?} (+{}ms)", key, delay.as_millis());
        }
    }

    /// Cancel a pending timer. Returns true if one was pending.
    pub fn cancel(&mut self, key: K) -> bool {
        self.entries.remove(&key).is_some()
    }

    /// Cancel every key in `keys`.
    pub fn cancel_all_of(&mut self, keys: &[K]) {
        for key in keys {
            self.entries.remove(key);
        }
    }

    /// Cancel everything.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_pending(&self, key: K) -> bool {
        self.entries.contains_key(&key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Deadline of a pending key.
    pub fn deadline(&self, key: K) -> Option<Instant> {
        self.entries.get(&key).map(|e| e.deadline)
    }

    /// Earliest pending deadline, for hosts that sleep until the next timer.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.values().map(|e| e.deadline).min()
    }

    /// Remove and return every key whose deadline is at or before `now`,
    /// ordered by deadline and then by scheduling order.
    pub fn take_due(&mut self, now: Instant) -> Vec<K> {
        let mut due: Vec<(K, Entry)> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.deadline <= now)
            .map(|(key, entry)| (*key, *entry))
            .collect();
        due.sort_by(|a, b| a.1.deadline.cmp(&b.1.deadline).then(a.1.seq.cmp(&b.1.seq)));
        for (key, _) in &due {
            self.entries.remove(key);
        }
        due.into_iter().map(|(key, _)| key).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Key {
        A,
        B,
        C,
    }

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_fires_only_when_due() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        s.schedule(Key::A, t0, ms(100));
        assert!(s.take_due(t0 + ms(99)).is_empty());
        assert_eq!(s.take_due(t0 + ms(100)), vec![Key::A]);
        assert!(s.is_empty());
    }

    #[test]
    fn test_reschedule_replaces_previous_deadline() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        s.schedule(Key::A, t0, ms(100));
        s.schedule(Key::A, t0 + ms(80), ms(100));
        assert!(s.take_due(t0 + ms(150)).is_empty());
        assert_eq!(s.take_due(t0 + ms(180)), vec![Key::A]);
    }

    #[test]
    fn test_cancel() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        s.schedule(Key::A, t0, ms(10));
        s.schedule(Key::B, t0, ms(10));
        assert!(s.cancel(Key::A));
        assert!(!s.cancel(Key::A));
        s.cancel_all_of(&[Key::B, Key::C]);
        assert!(s.take_due(t0 + ms(50)).is_empty());
    }

    #[test]
    fn test_due_order_is_deadline_then_insertion() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        s.schedule(Key::C, t0, ms(20));
        s.schedule(Key::B, t0, ms(10));
        s.schedule(Key::A, t0, ms(10));
        assert_eq!(s.next_deadline(), Some(t0 + ms(10)));
        assert_eq!(s.take_due(t0 + ms(30)), vec![Key::B, Key::A, Key::C]);
    }
}
