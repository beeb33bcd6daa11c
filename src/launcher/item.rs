use jiff::{tz::TimeZone, Timestamp};
use serde::{Deserialize, Serialize};

use crate::{clipboard::ClipboardEntry, platform::AppData};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Icon {
    AppWindow,
    Settings,
    Clipboard,
    Link,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ItemSource {
    Application { path: String },
    Clipboard { id: u64 },
}

/// One row of the launcher list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchItem {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub icon: Icon,
    pub source: ItemSource,
    #[serde(skip)]
    pub keywords: Vec<String>,
    #[serde(skip)]
    pub weight: Option<u16>,
}

impl SearchItem {
    pub fn from_app(app: &AppData) -> Self {
        let mut keywords = vec![app.name.clone()];
        keywords.extend(app.keywords.iter().cloned());
        Self {
            id: format!("app:{}", app.id),
            title: app.name.clone(),
            subtitle: app.tag.clone(),
            icon: if app.tag == "Application" {
                Icon::AppWindow
            } else {
                Icon::Settings
            },
            source: ItemSource::Application {
                path: app.path.to_string_lossy().to_string(),
            },
            keywords,
            weight: Some(2),
        }
    }

    pub fn from_entry(entry: &ClipboardEntry, now: Timestamp, tz: &TimeZone) -> Self {
        Self {
            id: format!("clipboard:{}", entry.id),
            title: entry.text.clone(),
            subtitle: entry.subtitle(now, tz),
            icon: entry.icon(),
            source: ItemSource::Clipboard { id: entry.id },
            keywords: vec![entry.text.clone()],
            weight: None,
        }
    }
}
