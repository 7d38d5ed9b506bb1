//! Virtual-time one-shot timers.
//!
//! `TimerQueue` keeps its own clock. Nothing fires on its own: the owner
//! advances the clock and pops due timers one at a time, so a timer payload
//! is always handled on the caller's thread with exclusive access to the
//! game. Ties fire in scheduling order.

use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use std::time::Duration;

/// Cancellable reference to a scheduled timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

/// Something that can run a payload after a delay.
pub trait Scheduler<T> {
    /// Schedule `payload` to fire `delay` after the current time.
    fn schedule(&mut self, delay: Duration, payload: T) -> TimerHandle;

    /// Cancel a pending timer. Returns false if it already fired or was
    /// cancelled.
    fn cancel(&mut self, handle: TimerHandle) -> bool;
}

/// Timers ordered by deadline over a manually advanced clock.
#[derive(Clone, Debug)]
pub struct TimerQueue<T> {
    now: Duration,
    next_id: u64,
    queue: BTreeMap<(Duration, TimerHandle), T>,
    deadlines: FxHashMap<TimerHandle, Duration>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            queue: BTreeMap::new(),
            deadlines: FxHashMap::default(),
        }
    }
}

impl<T> TimerQueue<T> {
    /// Empty queue at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of pending timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// True if nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// True if `handle` is still pending.
    #[must_use]
    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.deadlines.contains_key(&handle)
    }

    /// Deadline of the earliest pending timer.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.queue.keys().next().map(|(deadline, _)| *deadline)
    }

    /// Pop the earliest timer due at or before `until`, moving the clock to
    /// its deadline.
    pub fn pop_due(&mut self, until: Duration) -> Option<(TimerHandle, T)> {
        let (&(deadline, handle), _) = self.queue.iter().next()?;
        if deadline > until {
            return None;
        }
        let payload = self.queue.remove(&(deadline, handle))?;
        self.deadlines.remove(&handle);
        self.now = self.now.max(deadline);
        Some((handle, payload))
    }

    /// Move the clock forward without firing anything.
    pub fn advance_to(&mut self, time: Duration) {
        self.now = self.now.max(time);
    }

    /// Drop every pending timer.
    pub fn clear(&mut self) {
        self.queue.clear();
        self.deadlines.clear();
    }
}

impl<T> Scheduler<T> for TimerQueue<T> {
    fn schedule(&mut self, delay: Duration, payload: T) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;

        let deadline = self.now + delay;
        self.queue.insert((deadline, handle), payload);
        self.deadlines.insert(handle, deadline);
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        match self.deadlines.remove(&handle) {
            Some(deadline) => self.queue.remove(&(deadline, handle)).is_some(),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    #[test]
    fn test_fires_in_deadline_order() {
        let mut timers = TimerQueue::new();
        timers.schedule(secs(5), "late");
        timers.schedule(secs(1), "early");
        timers.schedule(secs(1), "early-second");

        assert_eq!(timers.next_deadline(), Some(secs(1)));
        assert_eq!(timers.pop_due(secs(10)).map(|(_, p)| p), Some("early"));
        assert_eq!(timers.pop_due(secs(10)).map(|(_, p)| p), Some("early-second"));
        assert_eq!(timers.now(), secs(1));
        assert_eq!(timers.pop_due(secs(10)).map(|(_, p)| p), Some("late"));
        assert_eq!(timers.now(), secs(5));
        assert!(timers.is_empty());
    }

    #[test]
    fn test_not_due_yet() {
        let mut timers = TimerQueue::new();
        timers.schedule(secs(3), ());
        assert!(timers.pop_due(secs(2)).is_none());
        assert_eq!(timers.len(), 1);
        assert!(timers.pop_due(secs(3)).is_some());
    }

    #[test]
    fn test_cancel() {
        let mut timers = TimerQueue::new();
        let a = timers.schedule(secs(1), 'a');
        let b = timers.schedule(secs(2), 'b');

        assert!(timers.cancel(a));
        assert!(!timers.cancel(a));
        assert!(!timers.is_pending(a));
        assert!(timers.is_pending(b));

        assert_eq!(timers.pop_due(secs(5)), Some((b, 'b')));
        assert!(!timers.cancel(b));
    }

    #[test]
    fn test_delays_are_relative_to_now() {
        let mut timers = TimerQueue::new();
        timers.advance_to(secs(10));
        timers.schedule(secs(3), ());
        assert_eq!(timers.next_deadline(), Some(secs(13)));

        timers.advance_to(secs(4));
        assert_eq!(timers.now(), secs(10));
    }

    #[test]
    fn test_clear() {
        let mut timers = TimerQueue::new();
        let h = timers.schedule(secs(1), ());
        timers.clear();
        assert!(timers.is_empty());
        assert!(!timers.is_pending(h));
    }
}
