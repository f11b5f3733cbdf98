//! Virtual-clock scheduler
//!
//! Time only moves when `advance` is called. Tasks due at the same instant
//! run in the order they were scheduled.

use crate::scheduler::{ScheduledTask, Scheduler, Task};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::{Arc, Weak};
use std::time::Duration;

/// Queue key: due time, then scheduling order
type Key = (Duration, u64);

#[derive(Default)]
struct ManualState {
    /// Virtual time since creation
    now: Duration,
    /// Monotonic scheduling counter
    next_seq: u64,
    /// Tasks not yet run
    queue: BTreeMap<Key, Task>,
}

/// Deterministic scheduler driven by explicit time steps
#[derive(Clone, Default)]
pub struct ManualScheduler {
    state: Arc<Mutex<ManualState>>,
}

impl ManualScheduler {
    /// Create a scheduler at virtual time zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.state.lock().now
    }

    /// Number of tasks still waiting
    pub fn pending(&self) -> usize {
        self.state.lock().queue.len()
    }

    /// Time until the earliest waiting task, if any
    pub fn next_due(&self) -> Option<Duration> {
        let state = self.state.lock();
        state
            .queue
            .keys()
            .next()
            .map(|(due, _)| due.saturating_sub(state.now))
    }

    /// Move the clock forward, running every task that falls due
    ///
    /// Tasks run one at a time with the scheduler unlocked, so a task may
    /// schedule or cancel further tasks. Returns how many tasks ran.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.state.lock().now + by;
        let mut ran = 0;

        loop {
            let task = {
                let mut state = self.state.lock();
                let due = match state.queue.keys().next() {
                    Some(&key) if key.0 <= target => key,
                    _ => break,
                };
                state.now = due.0;
                state.queue.remove(&due)
            };

            if let Some(task) = task {
                task();
                ran += 1;
            }
        }

        self.state.lock().now = target;
        ran
    }

    /// Advance to an absolute virtual time (no-op if already past it)
    pub fn advance_to(&self, at: Duration) -> usize {
        let now = self.now();
        self.advance(at.saturating_sub(now))
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> Box<dyn ScheduledTask> {
        let mut state = self.state.lock();
        let key = (state.now + delay, state.next_seq);
        state.next_seq += 1;
        state.queue.insert(key, task);

        Box::new(ManualTask {
            key,
            state: Arc::downgrade(&self.state),
        })
    }
}

struct ManualTask {
    key: Key,
    state: Weak<Mutex<ManualState>>,
}

impl ScheduledTask for ManualTask {
    fn cancel(&self) -> bool {
        match self.state.upgrade() {
            Some(state) => state.lock().queue.remove(&self.key).is_some(),
            None => false,
        }
    }
}
