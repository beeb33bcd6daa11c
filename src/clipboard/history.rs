use std::time::Duration;

use jiff::Timestamp;

use super::entry::ClipboardEntry;

pub const DEFAULT_MAX_ITEMS: usize = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Recorded {
    New,
    Moved { from: usize },
}

/// Clipboard entries, most recently copied first. Texts are unique.
#[derive(Clone, Debug)]
pub struct ClipboardHistory {
    entries: Vec<ClipboardEntry>,
    max_items: usize,
}

impl Default for ClipboardHistory {
    fn default() -> Self {
        Self::new(Vec::new(), DEFAULT_MAX_ITEMS)
    }
}

impl ClipboardHistory {
    pub fn new(mut entries: Vec<ClipboardEntry>, max_items: usize) -> Self {
        let max_items = max_items.max(1);
        // Stored lists may come from an older version with a larger limit or duplicates.
        let mut seen = std::collections::HashSet::new();
        entries.retain(|entry| seen.insert(entry.text.clone()));
        entries.truncate(max_items);
        Self { entries, max_items }
    }

    pub fn record(&mut self, text: &str, now: Timestamp) -> Recorded {
        if let Some(index) = self.entries.iter().position(|entry| entry.text == text) {
            let mut entry = self.entries.remove(index);
            entry.touch(now);
            self.entries.insert(0, entry);
            return Recorded::Moved { from: index };
        }
        self.entries.insert(0, ClipboardEntry::new(text, now));
        if self.entries.len() > self.max_items {
            self.entries.pop();
        }
        Recorded::New
    }

    pub fn delete(&mut self, index: usize) -> Option<ClipboardEntry> {
        if index >= self.entries.len() {
            return None;
        }
        Some(self.entries.remove(index))
    }

    pub fn remove(&mut self, id: u64) -> Option<ClipboardEntry> {
        let index = self.entries.iter().position(|entry| entry.id == id)?;
        self.delete(index)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Drops entries last copied before `now - max_age`. Returns how many were removed.
    pub fn prune(&mut self, max_age: Duration, now: Timestamp) -> usize {
        let before = self.entries.len();
        let max_age = i64::try_from(max_age.as_secs()).unwrap_or(i64::MAX);
        self.entries.retain(|entry| {
            now.as_second().saturating_sub(entry.copied_last.as_second()) <= max_age
        });
        before - self.entries.len()
    }

    pub fn get(&self, id: u64) -> Option<&ClipboardEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn entries(&self) -> &[ClipboardEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
