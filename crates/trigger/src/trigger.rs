//! Idle/ceiling coalescing trigger
//!
//! Turns a bursty stream of activations into a bounded stream of callback
//! invocations. A burst ends when either:
//! - no activation arrives for `short_interval` (idle deadline), or
//! - `long_interval` has passed since the burst's first activation (ceiling)
//!
//! The two deadlines are independent one-shot tasks that cancel each other
//! on fire. Each armed deadline carries a generation number, and an expiring
//! task only fires if its generation is still the armed one.

use crate::error::TriggerError;
use crate::scheduler::{ScheduledTask, Scheduler, TokioScheduler};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;
use tracing::{debug, trace};

/// Default idle gap before an automatic search
pub const DEFAULT_SHORT_INTERVAL: Duration = Duration::from_millis(750);

/// Default ceiling: search at least this often while typing
pub const DEFAULT_LONG_INTERVAL: Duration = Duration::from_millis(2000);

/// Trigger timing configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerConfig {
    /// Idle gap after the last activation
    pub short_interval: Duration,
    /// Ceiling measured from the first activation of a burst
    pub long_interval: Duration,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            short_interval: DEFAULT_SHORT_INTERVAL,
            long_interval: DEFAULT_LONG_INTERVAL,
        }
    }
}

impl TriggerConfig {
    /// Build a validated configuration
    pub fn new(short_interval: Duration, long_interval: Duration) -> crate::Result<Self> {
        let config = Self {
            short_interval,
            long_interval,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject zero intervals
    ///
    /// `short_interval >= long_interval` is accepted: the ceiling is never
    /// pushed back, so it fires `long_interval` after the first activation.
    /// With equal intervals the ceiling is scheduled before the idle
    /// deadline and wins on schedulers that run same-instant tasks in
    /// scheduling order, as `ManualScheduler` does.
    pub fn validate(&self) -> crate::Result<()> {
        if self.short_interval.is_zero() || self.long_interval.is_zero() {
            return Err(TriggerError::InvalidConfiguration {
                short: self.short_interval,
                long: self.long_interval,
            });
        }
        Ok(())
    }
}

/// Observable trigger state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerState {
    /// No deadlines armed
    Idle,
    /// Burst in progress: idle and ceiling deadlines armed
    Pending,
}

/// Which deadline ended a burst
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireReason {
    /// No activation for `short_interval`
    Idle,
    /// `long_interval` reached since the burst began
    Ceiling,
}

/// Counter snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TriggerStats {
    pub activations: u64,
    pub fires: u64,
    pub idle_fires: u64,
    pub ceiling_fires: u64,
    /// Cancels that withdrew a pending burst
    pub cancels: u64,
}

#[derive(Default)]
struct Counters {
    activations: AtomicU64,
    idle_fires: AtomicU64,
    ceiling_fires: AtomicU64,
    cancels: AtomicU64,
}

/// An armed deadline
struct Slot {
    generation: u64,
    task: Box<dyn ScheduledTask>,
}

#[derive(Default)]
struct Deadlines {
    idle: Option<Slot>,
    ceiling: Option<Slot>,
    next_generation: u64,
    last_fire: Option<FireReason>,
}

impl Deadlines {
    fn slot(&self, reason: FireReason) -> Option<&Slot> {
        match reason {
            FireReason::Idle => self.idle.as_ref(),
            FireReason::Ceiling => self.ceiling.as_ref(),
        }
    }

    fn generation(&mut self) -> u64 {
        let generation = self.next_generation;
        self.next_generation += 1;
        generation
    }

    /// Withdraw both deadlines, returning whether anything was armed
    fn clear(&mut self) -> bool {
        let idle = self.idle.take();
        let ceiling = self.ceiling.take();
        let armed = idle.is_some() || ceiling.is_some();

        for slot in idle.into_iter().chain(ceiling) {
            slot.task.cancel();
        }
        armed
    }
}

struct Shared {
    config: TriggerConfig,
    scheduler: Arc<dyn Scheduler>,
    callback: Box<dyn Fn() + Send + Sync>,
    deadlines: Mutex<Deadlines>,
    counters: Counters,
}

impl Shared {
    /// Run by a deadline task when it elapses
    fn expire(weak: &Weak<Shared>, reason: FireReason, generation: u64) {
        // Trigger already dropped
        let Some(shared) = weak.upgrade() else {
            return;
        };

        {
            let mut deadlines = shared.deadlines.lock();

            if deadlines.slot(reason).map(|slot| slot.generation) != Some(generation) {
                trace!(?reason, generation, "stale deadline ignored");
                return;
            }

            // Own task is running; only the other one needs withdrawing
            let (own, other) = match reason {
                FireReason::Idle => (deadlines.idle.take(), deadlines.ceiling.take()),
                FireReason::Ceiling => (deadlines.ceiling.take(), deadlines.idle.take()),
            };
            drop(own);
            if let Some(other) = other {
                other.task.cancel();
            }
            deadlines.last_fire = Some(reason);
        }

        match reason {
            FireReason::Idle => shared.counters.idle_fires.fetch_add(1, Ordering::Relaxed),
            FireReason::Ceiling => shared.counters.ceiling_fires.fetch_add(1, Ordering::Relaxed),
        };
        debug!(?reason, "trigger fired");

        (shared.callback)();
    }

    fn arm(self: &Arc<Self>, reason: FireReason, generation: u64) -> Slot {
        let delay = match reason {
            FireReason::Idle => self.config.short_interval,
            FireReason::Ceiling => self.config.long_interval,
        };
        let weak = Arc::downgrade(self);
        let task = self.scheduler.schedule(
            delay,
            Box::new(move || Shared::expire(&weak, reason, generation)),
        );
        Slot { generation, task }
    }
}

/// Debounce trigger with an idle deadline and a burst ceiling
///
/// Owned by its consumer. Scheduled deadline tasks only hold a weak
/// reference, and dropping the trigger withdraws both deadlines.
pub struct CoalescingTrigger {
    shared: Arc<Shared>,
}

impl CoalescingTrigger {
    /// Create a trigger on the given scheduler
    pub fn new<F>(
        config: TriggerConfig,
        scheduler: Arc<dyn Scheduler>,
        callback: F,
    ) -> crate::Result<Self>
    where
        F: Fn() + Send + Sync + 'static,
    {
        config.validate()?;

        Ok(Self {
            shared: Arc::new(Shared {
                config,
                scheduler,
                callback: Box::new(callback),
                deadlines: Mutex::new(Deadlines::default()),
                counters: Counters::default(),
            }),
        })
    }

    /// Create a trigger on the current tokio runtime
    pub fn with_tokio<F>(config: TriggerConfig, callback: F) -> crate::Result<Self>
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self::new(config, Arc::new(TokioScheduler::current()), callback)
    }

    /// Signal one occurrence of the triggering event
    ///
    /// Reschedules the idle deadline. Arms the ceiling deadline only when no
    /// burst is in progress. Never invokes the callback directly.
    pub fn activate(&self) {
        self.shared.counters.activations.fetch_add(1, Ordering::Relaxed);

        let mut deadlines = self.shared.deadlines.lock();

        if let Some(previous) = deadlines.idle.take() {
            previous.task.cancel();
        }

        // Ceiling goes first so it is ahead of an idle deadline due at the
        // same instant
        if deadlines.ceiling.is_none() {
            let generation = deadlines.generation();
            deadlines.ceiling = Some(self.shared.arm(FireReason::Ceiling, generation));
            debug!("burst started");
        } else {
            trace!("idle deadline rescheduled");
        }

        let generation = deadlines.generation();
        deadlines.idle = Some(self.shared.arm(FireReason::Idle, generation));
    }

    /// Withdraw both deadlines without firing
    ///
    /// Idempotent: canceling an idle trigger does nothing.
    pub fn cancel(&self) {
        if self.shared.deadlines.lock().clear() {
            self.shared.counters.cancels.fetch_add(1, Ordering::Relaxed);
            debug!("burst canceled");
        }
    }

    /// Current state
    pub fn state(&self) -> TriggerState {
        if self.shared.deadlines.lock().ceiling.is_some() {
            TriggerState::Pending
        } else {
            TriggerState::Idle
        }
    }

    /// Whether a burst is waiting to fire
    pub fn is_pending(&self) -> bool {
        self.state() == TriggerState::Pending
    }

    /// The deadline that ended the most recent burst
    pub fn last_fire(&self) -> Option<FireReason> {
        self.shared.deadlines.lock().last_fire
    }

    pub fn config(&self) -> TriggerConfig {
        self.shared.config
    }

    /// Counter snapshot
    pub fn stats(&self) -> TriggerStats {
        let counters = &self.shared.counters;
        let idle_fires = counters.idle_fires.load(Ordering::Relaxed);
        let ceiling_fires = counters.ceiling_fires.load(Ordering::Relaxed);

        TriggerStats {
            activations: counters.activations.load(Ordering::Relaxed),
            fires: idle_fires + ceiling_fires,
            idle_fires,
            ceiling_fires,
            cancels: counters.cancels.load(Ordering::Relaxed),
        }
    }
}

impl Drop for CoalescingTrigger {
    fn drop(&mut self) {
        self.shared.deadlines.lock().clear();
    }
}

impl std::fmt::Debug for CoalescingTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoalescingTrigger")
            .field("config", &self.shared.config)
            .field("state", &self.state())
            .finish()
    }
}
