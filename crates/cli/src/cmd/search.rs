//! One-shot search

use anyhow::{Context, Result};
use cli_lib::render;
use cli_lib::system_config::SystemConfig;
use cli_lib::util;
use std::path::Path;

pub async fn run(config: &SystemConfig, words: &[String], fixture: Option<&Path>, ephemeral: bool) -> Result<()> {
    let query = util::query_from_words(words)?;
    let source = util::open_source(config, fixture)?;
    let favorites = util::open_favorites(config, ephemeral)?;

    let results = source
        .search(&query)
        .await
        .with_context(|| format!("Search for '{}' failed", query.text()))?;

    render::print_results(query.text(), &results, favorites.as_ref());
    Ok(())
}
