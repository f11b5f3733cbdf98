//! Isolated config, favorites and fixture data for CLI runs

use super::cli::MqCommand;
use anyhow::Result;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Saved API response used by every workflow
pub const EVENTS_JSON: &str = r#"{
  "events": [
    {
      "type": "mlb",
      "id": 4238961,
      "datetime_local": "2018-08-04T19:05:00",
      "title": "Texas Rangers at Seattle Mariners",
      "venue": { "display_location": "Seattle, WA" },
      "performers": [
        { "image": "https://img.example/rangers.jpg", "home_team": null },
        { "image": "https://img.example/mariners.jpg", "home_team": true }
      ]
    },
    {
      "type": "minor_league_baseball",
      "id": 4238990,
      "datetime_local": "2018-08-05",
      "title": "Tacoma Rainiers vs Sacramento River Cats",
      "venue": { "display_location": "Tacoma, WA" },
      "performers": [ { "image": "https://img.example/rainiers.jpg", "home_team": true } ]
    },
    {
      "type": "concert",
      "id": 4500012,
      "datetime_local": "2018-09-01T20:00:00",
      "title": "The Decemberists",
      "venue": { "display_location": "Portland, OR" },
      "performers": [ { "image": "https://img.example/decemberists.jpg" } ]
    }
  ]
}"#;

/// Temporary home with its own config file
pub struct TestHome {
    dir: TempDir,
}

impl TestHome {
    pub fn new() -> Result<Self> {
        let dir = TempDir::new()?;
        let root = dir.path();

        std::fs::write(root.join("events.json"), EVENTS_JSON)?;
        std::fs::write(
            root.join("config.toml"),
            format!(
                "[search]\nshort_delay_ms = 100\nlong_delay_ms = 400\n\n\
                 [favorites]\npath = \"{}\"\n\n\
                 [log]\nlevel = \"warn\"\ndir = \"{}\"\n",
                toml_path(&root.join("favorites")),
                toml_path(&root.join("logs")),
            ),
        )?;

        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn config_path(&self) -> PathBuf {
        self.path().join("config.toml")
    }

    pub fn fixture_path(&self) -> PathBuf {
        self.path().join("events.json")
    }

    /// `mq` command bound to this home's config
    pub fn command(&self) -> MqCommand {
        let mut cmd = MqCommand::new(self.path());
        cmd.env("MARQUEE_CONFIG", &self.config_path().display().to_string());
        cmd
    }
}

/// Path as a TOML basic-string body
fn toml_path(path: &Path) -> String {
    path.display().to_string().replace('\\', "\\\\")
}
