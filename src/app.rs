use std::{sync::Arc, thread};

use async_std::task;
use log::*;

use crate::{
    clipboard::{
        ClipboardMonitor, ClipboardWatcher, HistoryStore, MonitorHandle, SharedHistory,
        SystemPasteboard,
    },
    config::Config,
    hotkey::{self, HotkeyManager},
    ipc::server::{setup_socket, start_server},
    launcher::Launcher,
    paths::paths,
    platform,
    state::State,
};

pub fn run_app() -> anyhow::Result<()> {
    let config = Config::load(&paths().config_file());
    // Registered on the main thread, which is where macOS delivers hotkey events.
    let hotkey = match HotkeyManager::init(&config.hotkey) {
        Ok(manager) => Some(manager),
        Err(err) => {
            error!("Failed to register global hotkey: {:?}", err);
            None
        }
    };
    let hotkey_id = hotkey.as_ref().map(HotkeyManager::id);
    platform::run_event_loop(move || task::block_on(run_daemon(config, hotkey_id)))
}

async fn run_daemon(config: Config, hotkey_id: Option<u32>) -> anyhow::Result<()> {
    let socket = paths().socket();
    let listener = setup_socket(&socket).await?;

    let history = SharedHistory::load(
        HistoryStore::new(paths().history()),
        config.clipboard.max_items,
    );
    let watcher = ClipboardWatcher::default();
    let (monitor, commands) = MonitorHandle::channel();
    let monitor_thread = {
        let history = history.clone();
        let watcher = watcher.clone();
        let interval = config.clipboard.poll_interval();
        let retention = config.clipboard.retention();
        // The pasteboard is created on and never leaves this thread.
        thread::spawn(move || match SystemPasteboard::new() {
            Ok(pasteboard) => ClipboardMonitor::new(pasteboard, history, watcher)
                .retention(retention)
                .run(interval, commands),
            Err(err) => error!("Failed to open the pasteboard: {:?}", err),
        })
    };

    let apps = task::spawn_blocking(platform::get_applications).await;
    let launcher = Launcher::new(apps, history.clone(), monitor.clone(), config.launcher);
    let state = Arc::new(State::new(launcher, history, watcher));

    if let Some(id) = hotkey_id {
        task::spawn(hotkey::listen(id, state.window.clone()));
    }

    let result = start_server(listener, state).await;

    monitor.stop();
    let _ = monitor_thread.join();
    if let Err(err) = std::fs::remove_file(&socket) {
        warn!("Failed to remove socket {:?}: {}", socket, err);
    }
    info!("Bye");
    result
}
