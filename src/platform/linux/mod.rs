/*
 *
 *  This source file is part of the QuickLauncher open source project
 *
 *  Copyright (c) 2024 QuickLauncher project contributors
 *  Licensed under MIT License
 *
 */

mod desktop_file;

use walkdir::WalkDir;

use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;

use super::AppData;

pub fn get_application_data(path: &Path) -> Option<AppData> {
    if path.extension().map_or(true, |ext| ext != "desktop") {
        return None;
    }
    let file_name = path.file_name()?.to_string_lossy().to_string();
    let file = desktop_file::ApplicationDesktopFile::try_from(path).ok()?;

    let mut keywords = file.keywords;
    keywords.extend(file.comment);

    Some(AppData {
        id: file_name,
        name: file.name,
        path: path.to_path_buf(),
        keywords,
        tag: "Application".to_string(),
    })
}

pub fn get_application_folders() -> Vec<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(data_home) = env::var("XDG_DATA_HOME") {
        dirs.push(PathBuf::from(data_home));
    } else {
        dirs.push(
            PathBuf::from("/home")
                .join(whoami::username())
                .join(".local/share"),
        );
    }

    if let Ok(xdg_data_dirs) = env::var("XDG_DATA_DIRS") {
        dirs.extend(xdg_data_dirs.split(':').map(PathBuf::from));
    } else {
        dirs.push(PathBuf::from("/usr/local/share"));
        dirs.push(PathBuf::from("/usr/share"));
    }

    dirs.into_iter()
        .map(|dir| dir.join("applications"))
        .filter(|dir| dir.exists())
        .collect()
}

pub fn get_application_files() -> Vec<PathBuf> {
    let mut files = Vec::new();
    for dir in get_application_folders() {
        for entry in WalkDir::new(dir).into_iter().flatten() {
            if entry.path().extension().is_some_and(|ext| ext == "desktop") {
                files.push(entry.path().to_path_buf());
            }
        }
    }
    files
}

pub fn launch(app: &AppData) -> anyhow::Result<()> {
    let id = app.id.trim_end_matches(".desktop");
    Command::new("gtk-launch").arg(id).spawn()?;
    Ok(())
}
