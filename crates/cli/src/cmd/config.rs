//! `mq config`: inspect and edit `config.toml`

use anyhow::{Context, Result};
use cli_lib::system_config::{self, SystemConfig, KEYS};
use owo_colors::OwoColorize;

pub async fn run_list(config: &SystemConfig) -> Result<()> {
    match system_config::config_file_path() {
        Some(path) if path.exists() => println!("{} {}", "#".dimmed(), path.display().dimmed()),
        Some(path) => println!("{} {} {}", "#".dimmed(), path.display().dimmed(), "(not created, showing defaults)".dimmed()),
        None => println!("{}", "# no config location, showing defaults".dimmed()),
    }

    let mut current_section = None;
    for key in KEYS {
        let (section, name) = key.split_once('.').unwrap_or(("", key));
        if current_section != Some(section) {
            println!("\n{}", format!("[{}]", section).yellow());
            current_section = Some(section);
        }

        match config.get_value(key)? {
            value if value.is_empty() => println!("{} = {}", name.cyan(), "(unset)".dimmed()),
            value => println!("{} = {}", name.cyan(), value),
        }
    }

    println!(
        "\n{}",
        "Delays: short 1-60000 ms, long 1-600000 ms. Timeout: 1-300 s.".dimmed()
    );
    Ok(())
}

pub async fn run_get(config: &SystemConfig, key: &str) -> Result<()> {
    println!("{}", config.get_value(key)?);
    Ok(())
}

/// Apply one change and write the whole file back
pub async fn run_set(config: &SystemConfig, key: &str, value: &str) -> Result<()> {
    let mut updated = config.clone();
    updated.set_value(key, value)?;
    updated
        .validate()
        .with_context(|| format!("Refusing to save {} = {}", key, value))?;

    system_config::save(&updated)?;
    println!("{} {} = {}", "✓".green(), key.cyan(), updated.get_value(key)?);
    for warning in updated.warnings() {
        println!("{} {}", "!".yellow(), warning);
    }
    Ok(())
}

pub async fn run_path(create: bool) -> Result<()> {
    let path = system_config::config_file_path()
        .context("No config location (set MARQUEE_CONFIG)")?;

    if !path.exists() && create {
        system_config::init_if_missing()?;
        println!("{} Wrote defaults to {}", "✓".green(), path.display());
        return Ok(());
    }

    println!("{}", path.display());
    if !path.exists() {
        println!("{}", "(missing; pass --create to write defaults)".yellow());
    }
    Ok(())
}

pub async fn run_example() -> Result<()> {
    print!("{}", system_config::example_config());
    Ok(())
}
