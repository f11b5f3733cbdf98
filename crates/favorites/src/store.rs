//! Persistent favorite store using sled

use crate::Result;
use sled::{Db, Tree};
use std::path::Path;
use tracing::debug;

/// Stored value for a marked event
const MARKED: &[u8] = &[1];

/// Key-value store of favorite flags
pub trait FavoriteStore: Send + Sync {
    /// Mark an event
    fn set(&self, key: &str) -> Result<()>;

    /// Unmark an event (no-op if not marked)
    fn remove(&self, key: &str) -> Result<()>;

    fn is_favorite(&self, key: &str) -> Result<bool>;

    /// All marked keys, sorted
    fn list(&self) -> Result<Vec<String>>;

    /// Make pending writes durable
    fn flush(&self) -> Result<()> {
        Ok(())
    }

    /// Flip the flag and return the new state
    fn toggle(&self, key: &str) -> Result<bool> {
        if self.is_favorite(key)? {
            self.remove(key)?;
            Ok(false)
        } else {
            self.set(key)?;
            Ok(true)
        }
    }
}

/// Favorites kept in a sled database
pub struct SledFavorites {
    /// Kept open for flushes
    db: Db,
    /// `favorites` tree: key -> [1]
    tree: Tree,
}

impl SledFavorites {
    /// Open or create the store in `path`
    pub fn open(path: &Path) -> Result<Self> {
        std::fs::create_dir_all(path)?;
        let db = sled::open(path.join("favorites.db"))?;
        let tree = db.open_tree("favorites")?;

        debug!(path = %path.display(), count = tree.len(), "favorites opened");
        Ok(Self { db, tree })
    }

    /// Number of marked events
    pub fn count(&self) -> usize {
        self.tree.len()
    }
}

impl FavoriteStore for SledFavorites {
    fn set(&self, key: &str) -> Result<()> {
        self.tree.insert(key.as_bytes(), MARKED)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.tree.remove(key.as_bytes())?;
        Ok(())
    }

    fn is_favorite(&self, key: &str) -> Result<bool> {
        Ok(self.tree.contains_key(key.as_bytes())?)
    }

    fn list(&self) -> Result<Vec<String>> {
        let mut keys = Vec::with_capacity(self.tree.len());
        for item in self.tree.iter() {
            let (key, _) = item?;
            keys.push(String::from_utf8(key.to_vec())?);
        }
        Ok(keys)
    }

    fn flush(&self) -> Result<()> {
        self.db.flush()?;
        Ok(())
    }
}
