use std::{fs, path::Path, time::Duration};

use log::*;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub hotkey: String,
    pub clipboard: ClipboardSettings,
    pub launcher: LauncherSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hotkey: "ctrl+alt+space".into(),
            clipboard: ClipboardSettings::default(),
            launcher: LauncherSettings::default(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ClipboardSettings {
    pub poll_interval_ms: u64,
    pub max_items: usize,
    /// Entries not copied again within this many days are pruned. Unset keeps everything.
    pub retention_days: Option<u64>,
}

impl Default for ClipboardSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: 500,
            max_items: 100,
            retention_days: None,
        }
    }
}

impl ClipboardSettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(50))
    }
    pub fn retention(&self) -> Option<Duration> {
        self.retention_days
            .map(|days| Duration::from_secs(days * 60 * 60 * 24))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LauncherSettings {
    pub include_applications: bool,
    pub max_results: usize,
}

impl Default for LauncherSettings {
    fn default() -> Self {
        Self {
            include_applications: true,
            max_results: 50,
        }
    }
}

impl Config {
    pub fn parse(source: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Reads the config file, falling back to defaults when it is missing or broken.
    pub fn load(path: &Path) -> Self {
        let Ok(source) = fs::read_to_string(path) else {
            debug!("No config at {:?}, using defaults", path);
            return Self::default();
        };
        match Self::parse(&source) {
            Ok(config) => config,
            Err(err) => {
                error!("Failed to parse config {:?}: {}", path, err);
                Self::default()
            }
        }
    }
}
