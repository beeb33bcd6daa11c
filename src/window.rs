/*
 *
 *  This source file is part of the QuickLauncher open source project
 *
 *  Copyright (c) 2024 QuickLauncher project contributors
 *  Licensed under MIT License
 *
 */

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// After staying hidden this long the launcher forgets its query.
pub static RESET_AFTER: Duration = Duration::from_secs(90);

/// Launcher visibility and the query typed into it.
#[derive(Debug)]
pub struct Window {
    hidden: bool,
    hidden_since: Option<Instant>,
    query: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WindowStatus {
    pub open: bool,
    pub query: String,
}

impl Default for Window {
    fn default() -> Self {
        Self {
            hidden: true,
            hidden_since: None,
            query: String::new(),
        }
    }
}

impl Window {
    pub fn is_open(&self) -> bool {
        !self.hidden
    }

    pub fn open(&mut self, now: Instant) {
        if self.hidden {
            self.reset_if_stale(now);
            self.hidden = false;
            self.hidden_since = None;
        }
    }

    pub fn close(&mut self, now: Instant) {
        if !self.hidden {
            self.hidden = true;
            self.hidden_since = Some(now);
        }
    }

    pub fn toggle(&mut self, now: Instant) -> bool {
        if self.hidden {
            self.open(now);
        } else {
            self.close(now);
        }
        self.is_open()
    }

    pub fn set_query(&mut self, query: impl ToString) {
        self.query = query.to_string();
    }

    pub fn query(&mut self, now: Instant) -> &str {
        self.reset_if_stale(now);
        &self.query
    }

    pub fn status(&mut self, now: Instant) -> WindowStatus {
        WindowStatus {
            open: self.is_open(),
            query: self.query(now).to_string(),
        }
    }

    fn reset_if_stale(&mut self, now: Instant) {
        if let Some(since) = self.hidden_since {
            if now.saturating_duration_since(since) >= RESET_AFTER {
                self.query.clear();
                self.hidden_since = None;
            }
        }
    }
}
