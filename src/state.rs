use std::{sync::Arc, time::Instant};

use parking_lot::Mutex;

use crate::{
    clipboard::{ClipboardWatcher, SharedHistory},
    ipc::{Request, Response},
    launcher::Launcher,
    window::Window,
};

/// Everything the daemon serves requests from.
pub struct State {
    pub window: Arc<Mutex<Window>>,
    pub launcher: Launcher,
    pub history: SharedHistory,
    pub watcher: ClipboardWatcher,
}

impl State {
    pub fn new(launcher: Launcher, history: SharedHistory, watcher: ClipboardWatcher) -> Self {
        Self {
            window: Arc::new(Mutex::new(Window::default())),
            launcher,
            history,
            watcher,
        }
    }

    /// May block on the clipboard monitor, so call it off the async executor.
    pub fn handle(&self, request: Request) -> Response {
        match self.try_handle(request) {
            Ok(response) => response,
            Err(err) => {
                log::error!("Request failed: {:?}", err);
                Response::Error {
                    message: err.to_string(),
                }
            }
        }
    }

    fn try_handle(&self, request: Request) -> anyhow::Result<Response> {
        let now = Instant::now();
        let response = match request {
            Request::Toggle => {
                let mut window = self.window.lock();
                window.toggle(now);
                Response::Window(window.status(now))
            }
            Request::Show => {
                let mut window = self.window.lock();
                window.open(now);
                Response::Window(window.status(now))
            }
            Request::Hide => {
                let mut window = self.window.lock();
                window.close(now);
                Response::Window(window.status(now))
            }
            Request::Status => Response::Status {
                window: self.window.lock().status(now),
                entries: self.history.read(|history| history.len()),
                recording: self.watcher.is_enabled(),
            },
            Request::Quit => Response::Done,
            Request::Search { query, limit } => {
                let query = {
                    let mut window = self.window.lock();
                    match query {
                        Some(query) => {
                            window.set_query(&query);
                            query
                        }
                        None => window.query(now).to_string(),
                    }
                };
                Response::Items(self.launcher.search(&query, limit))
            }
            Request::History { query } => {
                Response::Items(self.launcher.history(query.as_deref()))
            }
            Request::Activate { id } => {
                let activated = self.launcher.activate(&id)?;
                self.window.lock().close(now);
                Response::Activated(activated)
            }
            Request::Delete { index } => {
                let entry = self
                    .history
                    .update(|history| history.delete(index))?
                    .ok_or_else(|| anyhow::anyhow!("No clipboard entry at index {}", index))?;
                Response::Deleted { text: entry.text }
            }
            Request::Forget { id } => {
                let id: u64 = id.strip_prefix("clipboard:").unwrap_or(&id).parse()?;
                let entry = self
                    .history
                    .update(|history| history.remove(id))?
                    .ok_or_else(|| anyhow::anyhow!("Clipboard entry not found"))?;
                Response::Deleted { text: entry.text }
            }
            Request::Clear => {
                self.history.update(|history| history.clear())?;
                Response::Done
            }
            Request::Pause => {
                self.watcher.disable();
                Response::Done
            }
            Request::Resume => {
                self.watcher.enable();
                Response::Done
            }
        };
        Ok(response)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::{
        clipboard::{HistoryStore, MonitorHandle},
        config::LauncherSettings,
        window::WindowStatus,
    };

    pub(crate) fn state(dir: &tempfile::TempDir) -> State {
        let history = SharedHistory::load(HistoryStore::new(dir.path().join("h.json")), 100);
        let (monitor, _) = MonitorHandle::channel();
        let launcher = Launcher::new(
            vec![],
            history.clone(),
            monitor,
            LauncherSettings::default(),
        );
        State::new(launcher, history, ClipboardWatcher::default())
    }

    fn texts(state: &State) -> Vec<String> {
        state
            .history
            .read(|h| h.entries().iter().map(|e| e.text.clone()).collect())
    }

    #[test]
    fn window_requests_report_status() {
        let dir = tempfile::tempdir().unwrap();
        let state = state(&dir);
        let closed = WindowStatus {
            open: false,
            query: String::new(),
        };
        let open = WindowStatus {
            open: true,
            query: String::new(),
        };
        assert_eq!(state.handle(Request::Toggle), Response::Window(open.clone()));
        assert_eq!(state.handle(Request::Show), Response::Window(open));
        assert_eq!(state.handle(Request::Hide), Response::Window(closed));
    }

    #[test]
    fn search_remembers_the_query() {
        let dir = tempfile::tempdir().unwrap();
        let state = state(&dir);
        state
            .history
            .update(|h| {
                h.record("alpha", Timestamp::now());
                h.record("beta", Timestamp::now());
            })
            .unwrap();
        let Response::Items(items) = state.handle(Request::Search {
            query: Some("alp".into()),
            limit: None,
        }) else {
            panic!("expected items");
        };
        assert_eq!(items.len(), 1);
        let Response::Items(again) = state.handle(Request::Search {
            query: None,
            limit: None,
        }) else {
            panic!("expected items");
        };
        assert_eq!(again.len(), 1);
        assert_eq!(again[0].title, items[0].title);
    }

    #[test]
    fn delete_and_clear_persist() {
        let dir = tempfile::tempdir().unwrap();
        let state = state(&dir);
        state
            .history
            .update(|h| {
                h.record("a", Timestamp::now());
                h.record("b", Timestamp::now());
            })
            .unwrap();

        assert_eq!(
            state.handle(Request::Delete { index: 0 }),
            Response::Deleted { text: "b".into() }
        );
        assert_eq!(
            state.handle(Request::Delete { index: 1 }),
            Response::Error {
                message: "No clipboard entry at index 1".into()
            }
        );
        assert_eq!(texts(&state), ["a"]);
        assert_eq!(
            HistoryStore::new(dir.path().join("h.json")).load().len(),
            1
        );

        let id = format!("clipboard:{}", state.history.read(|h| h.entries()[0].id));
        assert_eq!(
            state.handle(Request::Forget { id: id.clone() }),
            Response::Deleted { text: "a".into() }
        );
        assert!(matches!(
            state.handle(Request::Forget { id }),
            Response::Error { .. }
        ));

        assert_eq!(state.handle(Request::Clear), Response::Done);
        assert!(texts(&state).is_empty());
        assert!(HistoryStore::new(dir.path().join("h.json")).load().is_empty());
    }

    #[test]
    fn pause_and_resume_show_in_status() {
        let dir = tempfile::tempdir().unwrap();
        let state = state(&dir);
        state.handle(Request::Pause);
        assert!(matches!(
            state.handle(Request::Status),
            Response::Status {
                recording: false,
                entries: 0,
                ..
            }
        ));
        state.handle(Request::Resume);
        assert!(state.watcher.is_enabled());
    }

    #[test]
    fn failed_activation_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let state = state(&dir);
        assert!(matches!(
            state.handle(Request::Activate { id: "app:missing".into() }),
            Response::Error { .. }
        ));
    }
}
