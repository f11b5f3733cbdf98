//! Shared utilities for CLI commands

use crate::system_config::SystemConfig;
use anyhow::{Context, Result};
use catalog::{EventSource, FixtureEventSource, HttpEventSource, SearchQuery};
use favorites::{FavoriteStore, MemoryFavorites, SledFavorites};
use std::path::Path;
use std::sync::Arc;

/// Event source for this run: a fixture file if given, the HTTP API otherwise
pub fn open_source(config: &SystemConfig, fixture: Option<&Path>) -> Result<Arc<dyn EventSource>> {
    match fixture {
        Some(path) => {
            tracing::debug!(path = %path.display(), "using fixture event source");
            let source = FixtureEventSource::from_file(path)
                .with_context(|| format!("Failed to load fixture {}", path.display()))?;
            Ok(Arc::new(source))
        }
        None => {
            let source = HttpEventSource::new(config.source_config())
                .context("Failed to create HTTP client")?;
            Ok(Arc::new(source))
        }
    }
}

/// Favorite store for this run
///
/// `ephemeral` keeps flags in memory only.
pub fn open_favorites(config: &SystemConfig, ephemeral: bool) -> Result<Arc<dyn FavoriteStore>> {
    if ephemeral {
        return Ok(Arc::new(MemoryFavorites::new()));
    }

    let dir = config.favorites_dir()?;
    let store = SledFavorites::open(&dir)
        .with_context(|| format!("Failed to open favorites at {}", dir.display()))?;
    Ok(Arc::new(store))
}

/// Join positional words into one query
pub fn query_from_words(words: &[String]) -> Result<SearchQuery> {
    let query = SearchQuery::new(words.join(" "));
    if query.is_empty() {
        anyhow::bail!("Search text must not be empty");
    }
    Ok(query)
}
