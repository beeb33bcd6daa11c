use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::{Duration, Instant},
};

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use jiff::Timestamp;
use log::*;

use super::{history::Recorded, pasteboard::Pasteboard, SharedHistory};

const PRUNE_EVERY: Duration = Duration::from_secs(3600);

/// Pauses recording, e.g. while the user copies secrets.
#[derive(Clone)]
pub struct ClipboardWatcher {
    enabled: Arc<AtomicBool>,
}

impl Default for ClipboardWatcher {
    fn default() -> Self {
        Self {
            enabled: Arc::new(AtomicBool::new(true)),
        }
    }
}

impl ClipboardWatcher {
    pub fn enable(&self) {
        self.enabled.store(true, Ordering::Relaxed);
    }
    pub fn disable(&self) {
        self.enabled.store(false, Ordering::Relaxed);
    }
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }
}

pub enum MonitorCommand {
    Write {
        text: String,
        reply: Sender<anyhow::Result<()>>,
    },
    Stop,
}

/// Handle for talking to the monitor thread, which owns the pasteboard.
#[derive(Clone)]
pub struct MonitorHandle {
    sender: Sender<MonitorCommand>,
}

impl MonitorHandle {
    pub fn channel() -> (Self, Receiver<MonitorCommand>) {
        let (sender, receiver) = crossbeam_channel::unbounded();
        (Self { sender }, receiver)
    }

    pub fn write_text(&self, text: impl ToString) -> anyhow::Result<()> {
        let (reply, response) = bounded(1);
        self.sender
            .send(MonitorCommand::Write {
                text: text.to_string(),
                reply,
            })
            .map_err(|_| anyhow::anyhow!("Clipboard monitor is not running"))?;
        response
            .recv_timeout(Duration::from_secs(2))
            .map_err(|_| anyhow::anyhow!("Clipboard monitor did not respond"))?
    }

    pub fn stop(&self) {
        let _ = self.sender.send(MonitorCommand::Stop);
    }
}

pub struct ClipboardMonitor<P: Pasteboard> {
    pasteboard: P,
    last_change_count: u64,
    history: SharedHistory,
    watcher: ClipboardWatcher,
    retention: Option<Duration>,
    prune_every: Duration,
}

impl<P: Pasteboard> ClipboardMonitor<P> {
    pub fn new(mut pasteboard: P, history: SharedHistory, watcher: ClipboardWatcher) -> Self {
        // Whatever is on the pasteboard at start-up is not new.
        let last_change_count = pasteboard.change_count();
        Self {
            pasteboard,
            last_change_count,
            history,
            watcher,
            retention: None,
            prune_every: PRUNE_EVERY,
        }
    }

    pub fn retention(mut self, retention: Option<Duration>) -> Self {
        self.retention = retention;
        self
    }

    /// Checks the pasteboard once. Returns what happened to the history, if anything.
    pub fn poll(&mut self) -> anyhow::Result<Option<Recorded>> {
        self.poll_at(Timestamp::now())
    }

    pub fn poll_at(&mut self, now: Timestamp) -> anyhow::Result<Option<Recorded>> {
        let count = self.pasteboard.change_count();
        if count <= self.last_change_count {
            return Ok(None);
        }
        self.last_change_count = count;

        if !self.watcher.is_enabled() {
            debug!("Clipboard watcher disabled, skipping change {}", count);
            return Ok(None);
        }
        let Some(text) = self.pasteboard.read_text() else {
            return Ok(None);
        };
        let recorded = self.history.update(|history| history.record(&text, now))?;
        debug!("Recorded clipboard change {}: {:?}", count, recorded);
        Ok(Some(recorded))
    }

    pub fn prune_at(&mut self, now: Timestamp) -> anyhow::Result<usize> {
        let Some(max_age) = self.retention else {
            return Ok(0);
        };
        if self.history.read(|history| history.is_empty()) {
            return Ok(0);
        }
        let removed = self.history.update(|history| history.prune(max_age, now))?;
        if removed > 0 {
            info!("Pruned {} stale clipboard entries", removed);
        }
        Ok(removed)
    }

    /// Polls every `interval` until stopped, serving pasteboard writes in between.
    pub fn run(mut self, interval: Duration, commands: Receiver<MonitorCommand>) {
        info!("Clipboard monitor started, polling every {:?}", interval);
        if let Err(err) = self.prune_at(Timestamp::now()) {
            error!("Failed to prune clipboard history: {:?}", err);
        }
        let mut last_prune = Instant::now();
        loop {
            match commands.recv_timeout(interval) {
                Ok(MonitorCommand::Write { text, reply }) => {
                    let _ = reply.send(self.pasteboard.write_text(&text));
                }
                Ok(MonitorCommand::Stop) | Err(RecvTimeoutError::Disconnected) => break,
                Err(RecvTimeoutError::Timeout) => {
                    if let Err(err) = self.poll() {
                        error!("Failed to record clipboard change: {:?}", err);
                    }
                    if last_prune.elapsed() >= self.prune_every {
                        last_prune = Instant::now();
                        if let Err(err) = self.prune_at(Timestamp::now()) {
                            error!("Failed to prune clipboard history: {:?}", err);
                        }
                    }
                }
            }
        }
        info!("Clipboard monitor stopped");
    }

    #[cfg(test)]
    fn prune_every(mut self, every: Duration) -> Self {
        self.prune_every = every;
        self
    }

    #[cfg(test)]
    fn pasteboard(&mut self) -> &mut P {
        &mut self.pasteboard
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::clipboard::{pasteboard::fake::FakePasteboard, HistoryStore};

    fn at(secs: i64) -> Timestamp {
        Timestamp::from_second(1_700_000_000 + secs).unwrap()
    }

    fn setup(dir: &tempfile::TempDir, pasteboard: FakePasteboard) -> ClipboardMonitor<FakePasteboard> {
        let store = HistoryStore::new(dir.path().join("history.json"));
        let history = SharedHistory::load(store, 100);
        ClipboardMonitor::new(pasteboard, history, ClipboardWatcher::default())
    }

    fn texts(monitor: &ClipboardMonitor<FakePasteboard>) -> Vec<String> {
        monitor
            .history
            .read(|h| h.entries().iter().map(|e| e.text.clone()).collect())
    }

    #[test]
    fn ignores_contents_present_at_start() {
        let dir = tempfile::tempdir().unwrap();
        let mut pasteboard = FakePasteboard::default();
        pasteboard.copy("already there");
        let mut monitor = setup(&dir, pasteboard);
        assert_eq!(monitor.poll_at(at(0)).unwrap(), None);
        assert!(texts(&monitor).is_empty());
    }

    #[test]
    fn records_and_persists_changes() {
        let dir = tempfile::tempdir().unwrap();
        let mut monitor = setup(&dir, FakePasteboard::default());

        monitor.pasteboard().copy("first");
        assert_eq!(monitor.poll_at(at(0)).unwrap(), Some(Recorded::New));
        // Unchanged counter, nothing to do.
        assert_eq!(monitor.poll_at(at(1)).unwrap(), None);

        monitor.pasteboard().copy("second");
        monitor.poll_at(at(2)).unwrap();
        monitor.pasteboard().copy("first");
        assert_eq!(
            monitor.poll_at(at(3)).unwrap(),
            Some(Recorded::Moved { from: 1 })
        );
        assert_eq!(texts(&monitor), ["first", "second"]);

        let stored = HistoryStore::new(dir.path().join("history.json")).load();
        let stored: Vec<_> = stored.into_iter().map(|e| e.text).collect();
        assert_eq!(stored, ["first", "second"]);
    }

    #[test]
    fn non_text_changes_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let mut monitor = setup(&dir, FakePasteboard::default());
        monitor.pasteboard().copy_non_text();
        assert_eq!(monitor.poll_at(at(0)).unwrap(), None);
        assert_eq!(monitor.last_change_count, 1);
        assert!(!dir.path().join("history.json").exists());
    }

    #[test]
    fn paused_watcher_skips_changes_for_good() {
        let dir = tempfile::tempdir().unwrap();
        let mut monitor = setup(&dir, FakePasteboard::default());
        monitor.watcher.disable();
        monitor.pasteboard().copy("secret");
        assert_eq!(monitor.poll_at(at(0)).unwrap(), None);

        monitor.watcher.enable();
        assert_eq!(monitor.poll_at(at(1)).unwrap(), None);
        assert!(texts(&monitor).is_empty());
    }

    #[test]
    fn prune_only_with_retention() {
        let dir = tempfile::tempdir().unwrap();
        let mut monitor = setup(&dir, FakePasteboard::default());
        monitor.pasteboard().copy("old");
        monitor.poll_at(at(0)).unwrap();
        assert_eq!(monitor.prune_at(at(10_000)).unwrap(), 0);

        let mut monitor = monitor.retention(Some(Duration::from_secs(60)));
        assert_eq!(monitor.prune_at(at(10_000)).unwrap(), 1);
        assert!(texts(&monitor).is_empty());
    }

    #[test]
    fn run_serves_writes_and_records_them() {
        let dir = tempfile::tempdir().unwrap();
        let monitor = setup(&dir, FakePasteboard::default());
        let history = monitor.history.clone();
        let (handle, commands) = MonitorHandle::channel();
        let thread = thread::spawn(move || monitor.run(Duration::from_millis(10), commands));

        handle.write_text("from launcher").unwrap();
        let deadline = Instant::now() + Duration::from_secs(2);
        while history.read(|h| h.is_empty()) && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(10));
        }
        handle.stop();
        thread.join().unwrap();

        assert_eq!(
            history.read(|h| h.entries()[0].text.clone()),
            "from launcher"
        );
        assert!(handle.write_text("too late").is_err());
    }

    #[test]
    fn run_prunes_on_its_timer() {
        let dir = tempfile::tempdir().unwrap();
        let monitor = setup(&dir, FakePasteboard::default())
            .retention(Some(Duration::from_secs(60)))
            .prune_every(Duration::from_millis(20));
        let history = monitor.history.clone();
        let (handle, commands) = MonitorHandle::channel();
        let thread = thread::spawn(move || monitor.run(Duration::from_millis(10), commands));

        // Added after the start-up prune, so only the timer can remove it.
        thread::sleep(Duration::from_millis(50));
        history.update(|h| h.record("stale", at(0))).unwrap();
        let deadline = Instant::now() + Duration::from_secs(2);
        while !history.read(|h| h.is_empty()) && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(10));
        }
        handle.stop();
        thread.join().unwrap();

        assert!(history.read(|h| h.is_empty()));
        assert!(HistoryStore::new(dir.path().join("history.json"))
            .load()
            .is_empty());
    }
}
