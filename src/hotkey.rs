use std::{
    str::FromStr,
    sync::Arc,
    time::{Duration, Instant},
};

use async_std::task::sleep;
use global_hotkey::{
    hotkey::{Code, HotKey, Modifiers},
    GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState,
};
use log::*;
use parking_lot::Mutex;

use crate::window::Window;

pub fn fallback_hotkey() -> HotKey {
    let mut mods = Modifiers::empty();
    mods.set(Modifiers::CONTROL, true);
    mods.set(Modifiers::ALT, true);
    HotKey::new(Some(mods), Code::Space)
}

/// Parses strings like `ctrl+alt+space` or `cmd+shift+KeyV`.
pub fn parse_hotkey(value: &str) -> anyhow::Result<HotKey> {
    HotKey::from_str(value.trim())
        .map_err(|err| anyhow::anyhow!("Invalid hotkey {:?}: {}", value, err))
}

pub struct HotkeyManager {
    // Dropping the manager unregisters the hotkey.
    _manager: GlobalHotKeyManager,
    hotkey: HotKey,
}

impl HotkeyManager {
    pub fn init(value: &str) -> anyhow::Result<Self> {
        let manager = GlobalHotKeyManager::new()?;
        let hotkey = parse_hotkey(value).unwrap_or_else(|err| {
            error!("{}, using the default", err);
            fallback_hotkey()
        });
        manager.register(hotkey)?;
        info!("Registered hotkey {:?}", value);
        Ok(Self {
            _manager: manager,
            hotkey,
        })
    }

    pub fn id(&self) -> u32 {
        self.hotkey.id()
    }
}

/// Toggles the window when the hotkey with `id` is released.
/// Returns whether the window is open afterwards, or `None` if the event was ignored.
fn handle_event(event: &GlobalHotKeyEvent, id: u32, window: &Mutex<Window>) -> Option<bool> {
    if event.id != id || event.state != HotKeyState::Released {
        return None;
    }
    Some(window.lock().toggle(Instant::now()))
}

/// Toggles the launcher every time the hotkey with `id` is released.
pub async fn listen(id: u32, window: Arc<Mutex<Window>>) {
    let receiver = GlobalHotKeyEvent::receiver().clone();
    debug!("Hotkey listener started");
    loop {
        while let Ok(event) = receiver.try_recv() {
            if let Some(open) = handle_event(&event, id, &window) {
                debug!("Hotkey pressed, launcher open: {}", open);
            }
        }
        sleep(Duration::from_millis(50)).await;
    }
}
