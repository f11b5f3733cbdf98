//! CLI command implementations

pub mod config;
pub mod fav;
pub mod search;
pub mod show;
pub mod watch;
