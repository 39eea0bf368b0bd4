use crate::domain::{PaneVisibility, ViewMode};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Settings read from `config.toml` in the data directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// View used when meta.json has no saved preference
    #[serde(default)]
    pub default_view: ViewMode,
    #[serde(default)]
    pub default_pane_visibility: PaneVisibility,
    /// Block length for items dragged without an estimate
    #[serde(default = "default_drag_minutes")]
    pub default_drag_minutes: u32,
    /// Redraw interval for the running timer
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    /// Used when `LIFEOS_LOG` is not set
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_drag_minutes() -> u32 {
    60
}

fn default_tick_ms() -> u64 {
    1000
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_view: ViewMode::default(),
            default_pane_visibility: PaneVisibility::default(),
            default_drag_minutes: default_drag_minutes(),
            tick_ms: default_tick_ms(),
            log_filter: default_log_filter(),
        }
    }
}

impl Settings {
    /// Load settings. Returns defaults if the file doesn't exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Self = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(settings)
    }

    pub fn tick_duration(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }

    pub fn drag_minutes(&self) -> u32 {
        self.default_drag_minutes.max(crate::domain::MIN_BLOCK_MINUTES)
    }
}
