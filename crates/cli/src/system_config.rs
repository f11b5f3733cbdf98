//! User configuration (`config.toml`)
//!
//! Located at `$MARQUEE_CONFIG` if set, otherwise
//! `<config_dir>/marquee/config.toml`. A missing file means defaults.

use anyhow::{Context, Result};
use catalog::SourceConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use trigger::TriggerConfig;

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "MARQUEE_CONFIG";

/// Environment variable overriding `api.client_id`
pub const CLIENT_ID_ENV: &str = "MARQUEE_CLIENT_ID";

/// Every key accepted by `get_value`/`set_value`
pub const KEYS: &[&str] = &[
    "search.short_delay_ms",
    "search.long_delay_ms",
    "api.base_url",
    "api.client_id",
    "api.timeout_secs",
    "favorites.path",
    "log.level",
    "log.dir",
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    pub search: SearchSection,
    pub api: ApiSection,
    pub favorites: FavoritesSection,
    pub log: LogSection,
}

/// Search-as-you-type timing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSection {
    /// Search after a typing pause of this length
    pub short_delay_ms: u64,
    /// Search at least this often while typing
    pub long_delay_ms: u64,
}

impl Default for SearchSection {
    fn default() -> Self {
        Self {
            short_delay_ms: 750,
            long_delay_ms: 2000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSection {
    pub base_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            base_url: "https://api.seatgeek.com/2/events".to_string(),
            client_id: None,
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FavoritesSection {
    /// Store directory (default: `<data_dir>/marquee/favorites`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSection {
    pub level: String,
    /// Log directory for `watch` (default: `<data_dir>/marquee/logs`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: None,
        }
    }
}

impl SystemConfig {
    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        let search = &self.search;
        if !(1..=60_000).contains(&search.short_delay_ms) {
            anyhow::bail!(
                "search.short_delay_ms must be between 1 and 60000 (got {})",
                search.short_delay_ms
            );
        }
        if !(1..=600_000).contains(&search.long_delay_ms) {
            anyhow::bail!(
                "search.long_delay_ms must be between 1 and 600000 (got {})",
                search.long_delay_ms
            );
        }

        if self.api.base_url.trim().is_empty() {
            anyhow::bail!("api.base_url must not be empty");
        }
        if !(1..=300).contains(&self.api.timeout_secs) {
            anyhow::bail!(
                "api.timeout_secs must be between 1 and 300 (got {})",
                self.api.timeout_secs
            );
        }

        self.log
            .level
            .parse::<tracing::Level>()
            .map_err(|_| anyhow::anyhow!("log.level must be one of trace, debug, info, warn, error"))?;

        Ok(())
    }

    /// Accepted but suspicious settings
    ///
    /// Loading happens before logging is set up, so callers report these
    /// once a subscriber is installed.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.search.short_delay_ms >= self.search.long_delay_ms {
            warnings.push(format!(
                "search.short_delay_ms ({}) is not below search.long_delay_ms ({}); searches will run on the long delay",
                self.search.short_delay_ms, self.search.long_delay_ms
            ));
        }
        warnings
    }

    /// Trigger timing for search-as-you-type
    pub fn trigger_config(&self) -> Result<TriggerConfig> {
        TriggerConfig::new(
            Duration::from_millis(self.search.short_delay_ms),
            Duration::from_millis(self.search.long_delay_ms),
        )
        .context("Invalid search delays")
    }

    /// HTTP source settings, with the client id environment override applied
    pub fn source_config(&self) -> SourceConfig {
        let client_id = std::env::var(CLIENT_ID_ENV)
            .ok()
            .filter(|id| !id.is_empty())
            .or_else(|| self.api.client_id.clone());

        SourceConfig {
            base_url: self.api.base_url.clone(),
            client_id,
            timeout: Duration::from_secs(self.api.timeout_secs),
        }
    }

    pub fn favorites_dir(&self) -> Result<PathBuf> {
        match &self.favorites.path {
            Some(path) => Ok(path.clone()),
            None => Ok(data_dir()?.join("favorites")),
        }
    }

    pub fn log_dir(&self) -> Result<PathBuf> {
        match &self.log.dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(data_dir()?.join("logs")),
        }
    }

    /// Read a value by dotted key
    pub fn get_value(&self, key: &str) -> Result<String> {
        let value = match key {
            "search.short_delay_ms" => self.search.short_delay_ms.to_string(),
            "search.long_delay_ms" => self.search.long_delay_ms.to_string(),
            "api.base_url" => self.api.base_url.clone(),
            "api.client_id" => self.api.client_id.clone().unwrap_or_default(),
            "api.timeout_secs" => self.api.timeout_secs.to_string(),
            "favorites.path" => display_path(&self.favorites.path),
            "log.level" => self.log.level.clone(),
            "log.dir" => display_path(&self.log.dir),
            _ => anyhow::bail!(
                "Unknown config key: {}. Use 'mq config --list' to see available keys.",
                key
            ),
        };
        Ok(value)
    }

    /// Set a value by dotted key
    ///
    /// An empty value clears optional keys. Does not validate; call
    /// `validate` before saving.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "search.short_delay_ms" => {
                self.search.short_delay_ms = value
                    .parse()
                    .context("Invalid value: must be a positive integer")?;
            }
            "search.long_delay_ms" => {
                self.search.long_delay_ms = value
                    .parse()
                    .context("Invalid value: must be a positive integer")?;
            }
            "api.base_url" => self.api.base_url = value.to_string(),
            "api.client_id" => self.api.client_id = non_empty(value),
            "api.timeout_secs" => {
                self.api.timeout_secs = value
                    .parse()
                    .context("Invalid value: must be a positive integer")?;
            }
            "favorites.path" => self.favorites.path = non_empty(value).map(PathBuf::from),
            "log.level" => self.log.level = value.to_lowercase(),
            "log.dir" => self.log.dir = non_empty(value).map(PathBuf::from),
            _ => anyhow::bail!(
                "Unknown config key: {}. Use 'mq config --list' to see available keys.",
                key
            ),
        }
        Ok(())
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn display_path(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_default()
}

/// Per-user data directory
fn data_dir() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|dir| dir.join("marquee"))
        .context("Could not determine data directory")
}

/// Location of the config file
pub fn config_file_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join("marquee").join("config.toml"))
}

/// Load the config, falling back to defaults when no file exists
pub fn load() -> Result<SystemConfig> {
    match config_file_path() {
        Some(path) => load_from(&path),
        None => Ok(SystemConfig::default()),
    }
}

pub fn load_from(path: &Path) -> Result<SystemConfig> {
    if !path.exists() {
        return Ok(SystemConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: SystemConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;

    config
        .validate()
        .with_context(|| format!("Invalid configuration in {}", path.display()))?;
    Ok(config)
}

pub fn save(config: &SystemConfig) -> Result<()> {
    let path = config_file_path().context("Could not determine config file path")?;
    save_to(config, &path)
}

pub fn save_to(config: &SystemConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    let content = toml::to_string_pretty(config).context("Failed to serialize config")?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write config file {}", path.display()))?;
    Ok(())
}

/// Write a default config file if none exists
pub fn init_if_missing() -> Result<PathBuf> {
    let path = config_file_path().context("Could not determine config file path")?;
    if !path.exists() {
        save_to(&SystemConfig::default(), &path)?;
    }
    Ok(path)
}

/// Annotated example configuration
pub fn example_config() -> String {
    r#"# Marquee configuration

[search]
# Search after a typing pause of this many milliseconds (1-60000)
short_delay_ms = 750
# Search at least this often while typing (1-600000)
long_delay_ms = 2000

[api]
base_url = "https://api.seatgeek.com/2/events"
# client_id = "your-client-id"   # or set MARQUEE_CLIENT_ID
timeout_secs = 10

[favorites]
# path = "/home/me/.local/share/marquee/favorites"

[log]
# trace, debug, info, warn, error
level = "info"
# dir = "/home/me/.local/share/marquee/logs"
"#
    .to_string()
}
