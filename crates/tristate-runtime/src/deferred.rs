#![forbid(unsafe_code)]

//! Deferred work for single-threaded controls.
//!
//! A [`DeferredQueue`] holds two kinds of one-shot tasks:
//!
//! - **microtasks**: run after the current synchronous handler, in FIFO order,
//!   before the next external input is processed;
//! - **timers**: run once a virtual clock has advanced past their due time.
//!
//! The queue never runs anything itself. The owner pops tasks and applies
//! them, which lets a task mutate the owner (and schedule more work on this
//! same queue) without shared ownership.
//!
//! # Invariants
//!
//! 1. Microtasks pop in the order they were deferred.
//! 2. Timers pop in due-time order; ties pop in scheduling order.
//! 3. The clock never moves backwards.
//! 4. Tasks cannot be cancelled once scheduled.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use tristate_runtime::DeferredQueue;
//!
//! let mut queue = DeferredQueue::new();
//! queue.defer_after(Duration::from_millis(1000), "expire");
//! queue.defer("soon");
//!
//! assert_eq!(queue.pop_microtask(), Some("soon"));
//!
//! let deadline = queue.deadline_after(Duration::from_millis(999));
//! assert_eq!(queue.pop_due(deadline), None);
//! queue.advance_clock_to(deadline);
//!
//! let deadline = queue.deadline_after(Duration::from_millis(1));
//! assert_eq!(queue.pop_due(deadline), Some("expire"));
//! assert!(queue.is_idle());
//! ```

use std::collections::{BTreeMap, VecDeque};
use std::time::Duration;

/// Identifies a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// Number of tasks waiting in each queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pending {
    pub microtasks: usize,
    pub timers: usize,
}

impl Pending {
    #[must_use]
    pub const fn total(&self) -> usize {
        self.microtasks + self.timers
    }
}

/// Microtask FIFO plus a timer queue on a virtual clock.
#[derive(Debug, Clone)]
pub struct DeferredQueue<T> {
    now: Duration,
    next_seq: u64,
    microtasks: VecDeque<T>,
    timers: BTreeMap<(Duration, u64), T>,
}

impl<T> DeferredQueue<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            microtasks: VecDeque::new(),
            timers: BTreeMap::new(),
        }
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Queue a microtask.
    pub fn defer(&mut self, task: T) {
        self.microtasks.push_back(task);
        tristate_core::trace!(pending = self.microtasks.len(), "microtask deferred");
    }

    /// Queue a timer that becomes due `delay` after the current time.
    pub fn defer_after(&mut self, delay: Duration, task: T) -> TimerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        let due = self.now.saturating_add(delay);
        self.timers.insert((due, seq), task);
        tristate_core::trace!(?due, seq, "timer scheduled");
        TimerId(seq)
    }

    /// Pop the oldest microtask.
    pub fn pop_microtask(&mut self) -> Option<T> {
        self.microtasks.pop_front()
    }

    /// The absolute time `delta` from now.
    #[must_use]
    pub fn deadline_after(&self, delta: Duration) -> Duration {
        self.now.saturating_add(delta)
    }

    /// Pop the earliest timer due at or before `deadline`.
    ///
    /// The clock moves forward to that timer's due time, so a task that
    /// schedules another timer measures its delay from the right instant.
    pub fn pop_due(&mut self, deadline: Duration) -> Option<T> {
        let (&(due, seq), _) = self.timers.first_key_value()?;
        if due > deadline {
            return None;
        }
        let task = self.timers.remove(&(due, seq))?;
        self.now = self.now.max(due);
        tristate_core::trace!(?due, seq, "timer fired");
        Some(task)
    }

    /// Move the clock to `deadline` (no-op if it is in the past).
    pub fn advance_clock_to(&mut self, deadline: Duration) {
        self.now = self.now.max(deadline);
    }

    /// Due time of the next timer, if any.
    #[must_use]
    pub fn next_due(&self) -> Option<Duration> {
        self.timers.keys().next().map(|&(due, _)| due)
    }

    /// Due time of the last timer, if any.
    #[must_use]
    pub fn last_due(&self) -> Option<Duration> {
        self.timers.keys().next_back().map(|&(due, _)| due)
    }

    #[must_use]
    pub fn pending(&self) -> Pending {
        Pending {
            microtasks: self.microtasks.len(),
            timers: self.timers.len(),
        }
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.microtasks.is_empty() && self.timers.is_empty()
    }
}

impl<T> Default for DeferredQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
