use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

use jiff::{tz::TimeZone, Timestamp};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{date::format_date, launcher::Icon};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    Text,
    Link,
}

impl EntryKind {
    fn classify(text: &str) -> Self {
        match Url::parse(text.trim()) {
            Ok(url) if !url.cannot_be_a_base() && url.scheme().starts_with("http") => {
                EntryKind::Link
            }
            _ => EntryKind::Text,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClipboardEntry {
    pub id: u64,
    pub text: String,
    pub kind: EntryKind,
    pub copied_first: Timestamp,
    pub copied_last: Timestamp,
    pub copy_count: u32,
}

pub fn hash_text(text: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    text.hash(&mut hasher);
    hasher.finish()
}

impl ClipboardEntry {
    pub fn new(text: impl Into<String>, now: Timestamp) -> Self {
        let text = text.into();
        Self {
            id: hash_text(&text),
            kind: EntryKind::classify(&text),
            text,
            copied_first: now,
            copied_last: now,
            copy_count: 1,
        }
    }

    pub fn touch(&mut self, now: Timestamp) {
        self.copied_last = now;
        self.copy_count = self.copy_count.saturating_add(1);
    }

    pub fn subtitle(&self, now: Timestamp, tz: &TimeZone) -> String {
        format!("Copied {}", format_date(self.copied_last, now, tz))
    }

    pub fn icon(&self) -> Icon {
        match self.kind {
            EntryKind::Text => Icon::Clipboard,
            EntryKind::Link => Icon::Link,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> Timestamp {
        s.parse().unwrap()
    }

    #[test]
    fn classifies_links() {
        let now = ts("2024-03-10T12:00:00Z");
        assert_eq!(
            ClipboardEntry::new("https://example.com/a?b=c", now).kind,
            EntryKind::Link
        );
        assert_eq!(
            ClipboardEntry::new("  http://localhost:8080\n", now).kind,
            EntryKind::Link
        );
        assert_eq!(ClipboardEntry::new("mailto:a@b.c", now).kind, EntryKind::Text);
        assert_eq!(ClipboardEntry::new("ftp://host/file", now).kind, EntryKind::Text);
        assert_eq!(ClipboardEntry::new("hello world", now).kind, EntryKind::Text);
    }

    #[test]
    fn same_text_same_id() {
        let a = ClipboardEntry::new("abc", ts("2024-03-10T12:00:00Z"));
        let b = ClipboardEntry::new("abc", ts("2024-05-01T12:00:00Z"));
        assert_eq!(a.id, b.id);
        assert_ne!(a.id, ClipboardEntry::new("abd", a.copied_first).id);
    }

    #[test]
    fn touch_keeps_first_copy() {
        let first = ts("2024-03-10T12:00:00Z");
        let later = ts("2024-03-10T12:05:00Z");
        let mut entry = ClipboardEntry::new("abc", first);
        entry.touch(later);
        assert_eq!(entry.copied_first, first);
        assert_eq!(entry.copied_last, later);
        assert_eq!(entry.copy_count, 2);
        assert_eq!(entry.subtitle(later, &TimeZone::UTC), "Copied Today, 12:05");
    }

    #[test]
    fn icon_follows_kind() {
        let now = ts("2024-03-10T12:00:00Z");
        assert_eq!(ClipboardEntry::new("text", now).icon(), Icon::Clipboard);
        assert_eq!(ClipboardEntry::new("https://a.b", now).icon(), Icon::Link);
    }
}
