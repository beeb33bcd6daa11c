/*
 *
 *  This source file is part of the QuickLauncher open source project
 *
 *  Copyright (c) 2024 QuickLauncher project contributors
 *  Licensed under MIT License
 *
 */

use freedesktop_entry_parser::{parse_entry, AttrSelector};
use std::path::Path;

pub(crate) struct ApplicationDesktopFile {
    pub name: String,
    pub comment: Option<String>,
    pub keywords: Vec<String>,
}

#[derive(Debug, PartialEq)]
pub(crate) enum DesktopFileError {
    NoDesktopEntry,
    InvalidFormat,
    HiddenFile,
}

impl TryFrom<&Path> for ApplicationDesktopFile {
    type Error = DesktopFileError;

    fn try_from(value: &Path) -> Result<Self, Self::Error> {
        let entry = parse_entry(value).map_err(|_| DesktopFileError::InvalidFormat)?;

        let content_section: AttrSelector<&str> = entry.section("Desktop Entry");
        let name = content_section
            .attr("Name")
            .ok_or(DesktopFileError::NoDesktopEntry)?
            .to_string();

        let comment = content_section.attr("Comment").map(|s| s.to_string());

        let keywords = content_section
            .attr("Keywords")
            .map(|s| {
                s.split(';')
                    .filter(|s| !s.is_empty())
                    .map(|s| s.to_string())
                    .collect()
            })
            .unwrap_or_default();

        for flag in ["NoDisplay", "Hidden"] {
            let hidden = content_section
                .attr(flag)
                .map_or(Ok(false), |s| s.parse::<bool>())
                .map_err(|_| DesktopFileError::InvalidFormat)?;
            if hidden {
                // Window manager helpers and the like, not something to start by hand.
                return Err(DesktopFileError::HiddenFile);
            }
        }

        Ok(ApplicationDesktopFile {
            name,
            comment,
            keywords,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn parse(contents: &str) -> Result<ApplicationDesktopFile, DesktopFileError> {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.desktop");
        fs::write(&path, contents).unwrap();
        ApplicationDesktopFile::try_from(path.as_path())
    }

    #[test]
    fn reads_name_and_keywords() {
        let file = parse(
            "[Desktop Entry]\nName=Terminal\nComment=Use the command line\nKeywords=shell;prompt;\nExec=term\n",
        )
        .unwrap();
        assert_eq!(file.name, "Terminal");
        assert_eq!(file.comment.as_deref(), Some("Use the command line"));
        assert_eq!(file.keywords, ["shell", "prompt"]);
    }

    #[test]
    fn hidden_entries_are_rejected() {
        assert!(matches!(
            parse("[Desktop Entry]\nName=Helper\nNoDisplay=true\n"),
            Err(DesktopFileError::HiddenFile)
        ));
        assert!(matches!(
            parse("[Desktop Entry]\nName=Helper\nNoDisplay=maybe\n"),
            Err(DesktopFileError::InvalidFormat)
        ));
    }

    #[test]
    fn missing_name_is_rejected() {
        assert!(matches!(
            parse("[Desktop Entry]\nExec=thing\n"),
            Err(DesktopFileError::NoDesktopEntry)
        ));
    }
}
