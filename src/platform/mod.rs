/*
 *
 *  This source file is part of the QuickLauncher open source project
 *
 *  Copyright (c) 2024 QuickLauncher project contributors
 *  Licensed under MIT License
 *
 */

use std::path::{Path, PathBuf};

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "linux")]
pub use linux::*;
#[cfg(target_os = "macos")]
mod mac;
#[cfg(target_os = "macos")]
pub use mac::*;

#[derive(Clone, Debug, PartialEq)]
pub struct AppData {
    pub id: String,
    pub name: String,
    pub path: PathBuf,
    pub keywords: Vec<String>,
    pub tag: String,
}

/// Every launchable application found on this machine, sorted by name and unique by id.
pub fn get_applications() -> Vec<AppData> {
    collect_applications(get_application_files().iter().map(PathBuf::as_path))
}

fn collect_applications<'a>(files: impl Iterator<Item = &'a Path>) -> Vec<AppData> {
    let mut apps: Vec<AppData> = Vec::new();
    for file in files {
        let Some(app) = get_application_data(file) else {
            continue;
        };
        if apps.iter().any(|known| known.id == app.id) {
            continue;
        }
        apps.push(app);
    }
    apps.sort_unstable_by_key(|app| app.name.to_lowercase());
    apps
}

#[cfg(not(any(target_os = "linux", target_os = "macos")))]
pub fn get_application_files() -> Vec<PathBuf> {
    Vec::new()
}

#[cfg(not(any(target_os = "linux", target_os = "macos")))]
pub fn get_application_data(_path: &Path) -> Option<AppData> {
    None
}

#[cfg(not(any(target_os = "linux", target_os = "macos")))]
pub fn launch(app: &AppData) -> anyhow::Result<()> {
    Err(anyhow::anyhow!("Launching {} is not supported here", app.name))
}

#[cfg(not(target_os = "macos"))]
pub fn run_event_loop(
    daemon: impl FnOnce() -> anyhow::Result<()> + Send + 'static,
) -> anyhow::Result<()> {
    daemon()
}
