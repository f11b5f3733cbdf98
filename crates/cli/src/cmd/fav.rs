//! Favorite flag management
//!
//! With `--ephemeral` the commands act on an empty in-memory store and
//! nothing is written.

use anyhow::Result;
use cli_lib::system_config::SystemConfig;
use cli_lib::util;
use owo_colors::OwoColorize;

pub async fn run_add(config: &SystemConfig, id: &str, ephemeral: bool) -> Result<()> {
    let store = util::open_favorites(config, ephemeral)?;
    store.set(id)?;
    store.flush()?;
    println!("{} Marked {}", "✓".green(), id.cyan());
    Ok(())
}

pub async fn run_remove(config: &SystemConfig, id: &str, ephemeral: bool) -> Result<()> {
    let store = util::open_favorites(config, ephemeral)?;
    store.remove(id)?;
    store.flush()?;
    println!("{} Unmarked {}", "✓".green(), id.cyan());
    Ok(())
}

pub async fn run_toggle(config: &SystemConfig, id: &str, ephemeral: bool) -> Result<()> {
    let store = util::open_favorites(config, ephemeral)?;
    let marked = store.toggle(id)?;
    store.flush()?;

    let verb = if marked { "Marked" } else { "Unmarked" };
    println!("{} {} {}", "✓".green(), verb, id.cyan());
    Ok(())
}

pub async fn run_list(config: &SystemConfig, ephemeral: bool) -> Result<()> {
    let store = util::open_favorites(config, ephemeral)?;
    let keys = store.list()?;

    if keys.is_empty() {
        println!("{}", "No favorites yet".dimmed());
        return Ok(());
    }
    for key in keys {
        println!("{}", key);
    }
    Ok(())
}
