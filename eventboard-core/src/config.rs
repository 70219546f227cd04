//! Eventboard configuration.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono_tz::Tz;
use ::config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{EventboardError, EventboardResult};

static DEFAULT_EVENTS_FILE: &str = "~/eventboard/events.json";

fn default_events_file() -> PathBuf {
    PathBuf::from(DEFAULT_EVENTS_FILE)
}

fn is_default_events_file(p: &PathBuf) -> bool {
    *p == default_events_file()
}

/// Configuration at ~/.config/eventboard/config.toml
///
/// Every key can be overridden with an `EVENTBOARD_` environment variable,
/// e.g. `EVENTBOARD_TIMEZONE=America/Sao_Paulo`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EventboardConfig {
    #[serde(default = "default_events_file", skip_serializing_if = "is_default_events_file")]
    pub events_file: PathBuf,

    /// IANA timezone name used to decide calendar days
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

impl Default for EventboardConfig {
    fn default() -> Self {
        EventboardConfig {
            events_file: default_events_file(),
            timezone: None,
        }
    }
}

impl EventboardConfig {
    pub fn config_path() -> EventboardResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| EventboardError::Config("Could not determine config directory".into()))?
            .join("eventboard");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, writing a commented default file
    /// first if there is none.
    pub fn load() -> EventboardResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> EventboardResult<Self> {
        let config: EventboardConfig = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("EVENTBOARD"))
            .build()
            .map_err(|e| EventboardError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| EventboardError::Config(e.to_string()))?;

        // Fail early on a typo rather than at first use
        config.tz()?;

        Ok(config)
    }

    /// Events file with `~` expanded.
    pub fn events_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.events_file.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    /// Configured timezone, if any.
    pub fn tz(&self) -> EventboardResult<Option<Tz>> {
        self.timezone.as_deref().map(parse_tz).transpose()
    }

    /// Save the current config to ~/.config/eventboard/config.toml
    pub fn save(&self) -> EventboardResult<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> EventboardResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| EventboardError::Config(e.to_string()))?;

        write_config_file(path, &content)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> EventboardResult<()> {
        write_config_file(path, &default_config_contents())
    }
}

fn default_config_contents() -> String {
    format!(
        "\
# eventboard configuration

# JSON feed of events (array, or an object with \"items\"):
# events_file = \"{DEFAULT_EVENTS_FILE}\"

# Timezone used to decide what counts as today (defaults to the system zone):
# timezone = \"America/Sao_Paulo\"
"
    )
}

/// Write a config file, creating its directory if needed.
fn write_config_file(path: &Path, contents: &str) -> EventboardResult<()> {
    let write = || -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)
    };

    write().map_err(|e| {
        EventboardError::Config(format!("Could not write {}: {e}", path.display()))
    })
}

/// Parse an IANA timezone name.
pub fn parse_tz(name: &str) -> EventboardResult<Tz> {
    Tz::from_str(name.trim()).map_err(|_| EventboardError::UnknownTimezone(name.to_string()))
}
