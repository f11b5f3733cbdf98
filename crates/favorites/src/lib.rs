//! Favorite-flag storage for Marquee
//!
//! Events are marked by their id key. A set flag is stored as a present
//! key; unmarking removes the key entirely.

pub mod memory;
pub mod store;

// Re-exports
pub use memory::MemoryFavorites;
pub use store::{FavoriteStore, SledFavorites};

use thiserror::Error;

/// Errors from the favorite store
#[derive(Debug, Error)]
pub enum FavoritesError {
    #[error("favorite storage error: {0}")]
    Storage(#[from] sled::Error),

    #[error("failed to prepare favorites directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt favorite key: {0}")]
    CorruptKey(#[from] std::string::FromUtf8Error),
}

/// Result type for favorite operations
pub type Result<T> = std::result::Result<T, FavoritesError>;
