//! In-memory favorite store

use crate::store::FavoriteStore;
use crate::Result;
use parking_lot::RwLock;
use std::collections::BTreeSet;

/// Favorites that live only as long as the process
#[derive(Debug, Default)]
pub struct MemoryFavorites {
    keys: RwLock<BTreeSet<String>>,
}

impl MemoryFavorites {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FavoriteStore for MemoryFavorites {
    fn set(&self, key: &str) -> Result<()> {
        self.keys.write().insert(key.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.keys.write().remove(key);
        Ok(())
    }

    fn is_favorite(&self, key: &str) -> Result<bool> {
        Ok(self.keys.read().contains(key))
    }

    fn list(&self) -> Result<Vec<String>> {
        Ok(self.keys.read().iter().cloned().collect())
    }
}
