/*
 *
 *  This source file is part of the QuickLauncher open source project
 *
 *  Copyright (c) 2024 QuickLauncher project contributors
 *  Licensed under MIT License
 *
 */

use std::{
    path::{Path, PathBuf},
    process::Command,
    thread,
};

use cocoa::{
    appkit::{NSApplication, NSApplicationActivationPolicy},
    base::nil,
};
use log::*;

use super::AppData;

pub fn get_application_folders() -> Vec<PathBuf> {
    let mut dirs = vec![
        PathBuf::from("/Applications"),
        PathBuf::from("/System/Applications"),
        PathBuf::from("/System/Applications/Utilities"),
        PathBuf::from("/System/Library/CoreServices/Applications"),
    ];
    dirs.push(PathBuf::from("/Users").join(whoami::username()).join("Applications"));
    dirs
}

pub fn get_application_files() -> Vec<PathBuf> {
    let mut files = Vec::new();
    for dir in get_application_folders() {
        let Ok(entries) = dir.read_dir() else {
            continue;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if matches!(
                path.extension().and_then(|ext| ext.to_str()),
                Some("app") | Some("appex")
            ) {
                files.push(path);
            }
        }
    }
    files
}

pub fn get_application_data(path: &Path) -> Option<AppData> {
    let extension = path.extension()?.to_str()?;
    let tag = match extension {
        "appex" => "System Setting",
        "app" => "Application",
        _ => return None,
    };
    let name = path.file_stem()?.to_string_lossy().to_string();
    Some(AppData {
        id: path.file_name()?.to_string_lossy().to_string(),
        name,
        path: path.to_path_buf(),
        keywords: vec![],
        tag: tag.to_string(),
    })
}

pub fn launch(app: &AppData) -> anyhow::Result<()> {
    Command::new("open").arg(&app.path).spawn()?;
    Ok(())
}

/// Runs the daemon off the main thread while the main thread drives AppKit,
/// which the global hotkey handler depends on. Never returns.
pub fn run_event_loop(
    daemon: impl FnOnce() -> anyhow::Result<()> + Send + 'static,
) -> anyhow::Result<()> {
    thread::spawn(move || {
        let code = match daemon() {
            Ok(()) => 0,
            Err(err) => {
                error!("{:?}", err);
                1
            }
        };
        std::process::exit(code);
    });
    unsafe {
        let app = NSApplication::sharedApplication(nil);
        // Menu-bar utility: no Dock icon, no main menu.
        app.setActivationPolicy_(
            NSApplicationActivationPolicy::NSApplicationActivationPolicyAccessory,
        );
        app.run();
    }
    Ok(())
}
