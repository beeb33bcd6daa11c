/*
 *
 *  This source file is part of the QuickLauncher open source project
 *
 *  Copyright (c) 2024 QuickLauncher project contributors
 *  Licensed under MIT License
 *
 */

use arboard::Clipboard;

#[cfg(not(target_os = "macos"))]
use super::entry::hash_text;

/// Access to the system pasteboard.
///
/// `change_count` must grow every time the pasteboard contents are replaced.
pub trait Pasteboard {
    fn change_count(&mut self) -> u64;
    fn read_text(&mut self) -> Option<String>;
    fn write_text(&mut self, text: &str) -> anyhow::Result<()>;
}

pub struct SystemPasteboard {
    clipboard: Clipboard,
    #[cfg(not(target_os = "macos"))]
    last_hash: Option<u64>,
    #[cfg(not(target_os = "macos"))]
    count: u64,
}

impl SystemPasteboard {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            clipboard: Clipboard::new()?,
            #[cfg(not(target_os = "macos"))]
            last_hash: None,
            #[cfg(not(target_os = "macos"))]
            count: 0,
        })
    }
}

impl Pasteboard for SystemPasteboard {
    #[cfg(target_os = "macos")]
    fn change_count(&mut self) -> u64 {
        use cocoa::{appkit::NSPasteboard, base::nil};
        let count = unsafe { NSPasteboard::generalPasteboard(nil).changeCount() };
        count.max(0) as u64
    }

    // No native counter here, so every distinct text counts as a change.
    #[cfg(not(target_os = "macos"))]
    fn change_count(&mut self) -> u64 {
        let hash = self.clipboard.get_text().ok().map(|text| hash_text(&text));
        if hash.is_some() && hash != self.last_hash {
            self.last_hash = hash;
            self.count += 1;
        }
        self.count
    }

    fn read_text(&mut self) -> Option<String> {
        self.clipboard.get_text().ok()
    }

    fn write_text(&mut self, text: &str) -> anyhow::Result<()> {
        self.clipboard.set_text(text.to_string())?;
        Ok(())
    }
}
