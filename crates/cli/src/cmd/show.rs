//! Detail view of one search result

use anyhow::{Context, Result};
use catalog::EventDetail;
use cli_lib::render;
use cli_lib::system_config::SystemConfig;
use cli_lib::util;
use std::path::Path;

pub async fn run(
    config: &SystemConfig,
    words: &[String],
    row: usize,
    fixture: Option<&Path>,
    ephemeral: bool,
) -> Result<()> {
    let query = util::query_from_words(words)?;
    let source = util::open_source(config, fixture)?;
    let favorites = util::open_favorites(config, ephemeral)?;

    let results = source
        .search(&query)
        .await
        .with_context(|| format!("Search for '{}' failed", query.text()))?;

    let event = row
        .checked_sub(1)
        .and_then(|index| results.get(index))
        .with_context(|| format!("No row {} ({} results for '{}')", row, results.len(), query.text()))?;

    let favorite = render::is_favorite(favorites.as_ref(), event);
    let detail = EventDetail::from_event(event, favorite).context("Event has no id")?;

    render::print_detail(&detail);
    Ok(())
}
