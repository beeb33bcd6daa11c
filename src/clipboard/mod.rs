//! Clipboard history: pasteboard polling, dedup/reorder, size bound and persistence.

use std::sync::Arc;

use parking_lot::Mutex;

mod entry;
mod history;
mod monitor;
mod pasteboard;
mod store;

pub use entry::ClipboardEntry;
pub use history::ClipboardHistory;
pub use monitor::{ClipboardMonitor, ClipboardWatcher, MonitorHandle};
pub use pasteboard::SystemPasteboard;
pub use store::HistoryStore;

#[cfg(test)]
pub(crate) use pasteboard::fake as pasteboard_for_tests;

/// History shared between the monitor thread and the control socket.
/// Every mutation is written to disk before the lock is released. A mutation
/// whose save fails is dropped, and one that changes nothing is not saved.
#[derive(Clone)]
pub struct SharedHistory {
    inner: Arc<Mutex<ClipboardHistory>>,
    store: HistoryStore,
}

impl SharedHistory {
    pub fn load(store: HistoryStore, max_items: usize) -> Self {
        let history = ClipboardHistory::new(store.load(), max_items);
        log::info!(
            "Loaded {} clipboard entries from {:?}",
            history.len(),
            store.path()
        );
        Self {
            inner: Arc::new(Mutex::new(history)),
            store,
        }
    }

    pub fn read<R>(&self, f: impl FnOnce(&ClipboardHistory) -> R) -> R {
        f(&self.inner.lock())
    }

    pub fn update<R>(&self, f: impl FnOnce(&mut ClipboardHistory) -> R) -> anyhow::Result<R> {
        let mut history = self.inner.lock();
        let mut updated = history.clone();
        let result = f(&mut updated);
        if updated.entries() != history.entries() {
            self.store.save(updated.entries())?;
            *history = updated;
        }
        Ok(result)
    }
}
