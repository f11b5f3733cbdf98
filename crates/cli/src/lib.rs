//! Marquee CLI library
//!
//! Shared by the `mq` binary and its tests.

pub mod logging;
pub mod render;
pub mod session;
pub mod system_config;
pub mod util;
