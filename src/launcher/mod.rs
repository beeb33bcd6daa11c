use anyhow::anyhow;
use jiff::{tz::TimeZone, Timestamp};
use log::*;
use serde::{Deserialize, Serialize};

use crate::{
    clipboard::{MonitorHandle, SharedHistory},
    config::LauncherSettings,
    platform::{self, AppData},
};

mod item;
mod search;

pub use item::{Icon, SearchItem};
pub use search::fuzzy_match;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Activated {
    Copied { text: String },
    Launched { name: String },
}

/// Searches applications and clipboard history, and runs the selected item.
pub struct Launcher {
    apps: Vec<AppData>,
    history: SharedHistory,
    monitor: MonitorHandle,
    settings: LauncherSettings,
}

impl Launcher {
    pub fn new(
        apps: Vec<AppData>,
        history: SharedHistory,
        monitor: MonitorHandle,
        settings: LauncherSettings,
    ) -> Self {
        let apps = if settings.include_applications {
            apps
        } else {
            Vec::new()
        };
        info!("Launcher indexed {} applications", apps.len());
        Self {
            apps,
            history,
            monitor,
            settings,
        }
    }

    fn history_items(&self) -> Vec<SearchItem> {
        let now = Timestamp::now();
        let tz = TimeZone::system();
        self.history.read(|history| {
            history
                .entries()
                .iter()
                .map(|entry| SearchItem::from_entry(entry, now, &tz))
                .collect()
        })
    }

    /// Clipboard history first, newest on top, then applications.
    pub fn search(&self, query: &str, limit: Option<usize>) -> Vec<SearchItem> {
        let mut items = self.history_items();
        items.extend(self.apps.iter().map(SearchItem::from_app));
        let mut items = fuzzy_match(query, items);
        items.truncate(limit.unwrap_or(self.settings.max_results));
        items
    }

    pub fn history(&self, query: Option<&str>) -> Vec<SearchItem> {
        fuzzy_match(query.unwrap_or_default(), self.history_items())
    }

    /// Clipboard items are put back on the pasteboard, applications are opened.
    pub fn activate(&self, id: &str) -> anyhow::Result<Activated> {
        if let Some(id) = id.strip_prefix("clipboard:") {
            let id: u64 = id.parse()?;
            let text = self
                .history
                .read(|history| history.get(id).map(|entry| entry.text.clone()))
                .ok_or(anyhow!("Clipboard entry not found"))?;
            self.monitor.write_text(&text)?;
            return Ok(Activated::Copied { text });
        }
        if let Some(id) = id.strip_prefix("app:") {
            let app = self
                .apps
                .iter()
                .find(|app| app.id == id)
                .ok_or(anyhow!("Application not found"))?;
            platform::launch(app)?;
            info!("Launched {}", app.name);
            return Ok(Activated::Launched {
                name: app.name.clone(),
            });
        }
        Err(anyhow!("Unknown item: {}", id))
    }
}
