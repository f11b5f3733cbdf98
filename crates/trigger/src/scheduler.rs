//! One-shot task scheduling
//!
//! The trigger never sleeps itself. It hands each deadline to a `Scheduler`
//! and keeps the returned handle so the deadline can be withdrawn.

use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Task body run when a deadline elapses
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Handle to a scheduled one-shot task
pub trait ScheduledTask: Send {
    /// Withdraw the task
    ///
    /// Returns `false` if the task already finished. A `true` result does not
    /// rule out a body that had just started, so callers must tolerate a late
    /// run.
    fn cancel(&self) -> bool;
}

/// Facility able to run a task once after a delay
pub trait Scheduler: Send + Sync {
    /// Schedule `task` to run once, `delay` from now
    fn schedule(&self, delay: Duration, task: Task) -> Box<dyn ScheduledTask>;
}

/// Scheduler backed by tokio timers
///
/// Each deadline becomes a spawned task sleeping until an instant computed
/// at schedule time, so a late first poll never shifts the deadline.
#[derive(Clone, Debug)]
pub struct TokioScheduler {
    handle: Handle,
}

impl TokioScheduler {
    /// Bind to an existing runtime
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Bind to the runtime of the calling context
    ///
    /// Panics outside a tokio runtime, like `tokio::spawn`.
    pub fn current() -> Self {
        Self::new(Handle::current())
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> Box<dyn ScheduledTask> {
        let deadline = Instant::now() + delay;
        let join = self.handle.spawn(async move {
            tokio::time::sleep_until(deadline).await;
            task();
        });
        Box::new(TokioTask { join })
    }
}

/// Spawned timer task
struct TokioTask {
    join: JoinHandle<()>,
}

impl ScheduledTask for TokioTask {
    fn cancel(&self) -> bool {
        let finished = self.join.is_finished();
        self.join.abort();
        !finished
    }
}
