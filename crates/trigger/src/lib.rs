//! Keystroke coalescing for Marquee
//!
//! This crate provides the search-debounce engine:
//! - `CoalescingTrigger` with an idle deadline and a burst ceiling
//! - A `Scheduler` seam for cancelable one-shot tasks
//! - `TokioScheduler` for real time, `ManualScheduler` for a virtual clock

pub mod error;
pub mod manual;
pub mod scheduler;
pub mod trigger;

// Re-exports
pub use error::TriggerError;
pub use manual::ManualScheduler;
pub use scheduler::{ScheduledTask, Scheduler, TokioScheduler};
pub use trigger::{CoalescingTrigger, FireReason, TriggerConfig, TriggerState, TriggerStats};

/// Result type for trigger operations
pub type Result<T> = std::result::Result<T, TriggerError>;
