//! Trigger error types

use std::time::Duration;
use thiserror::Error;

/// Errors raised while configuring a trigger
///
/// A running trigger has no failure modes. Disposal happens by dropping the
/// trigger, so there is no use-after-dispose condition to report.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TriggerError {
    /// One of the intervals is zero
    #[error("invalid trigger configuration: intervals must be positive (short = {short:?}, long = {long:?})")]
    InvalidConfiguration { short: Duration, long: Duration },
}
