//! Control socket between the running daemon and the command line.
//!
//! Every connection carries one request line and one response line, both JSON.

use serde::{Deserialize, Serialize};

use crate::{
    launcher::{Activated, SearchItem},
    window::WindowStatus,
};

pub mod client;
pub mod server;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Request {
    Toggle,
    Show,
    Hide,
    Status,
    Quit,
    /// Without a query the launcher's current query is used.
    Search {
        query: Option<String>,
        limit: Option<usize>,
    },
    History {
        query: Option<String>,
    },
    Activate {
        id: String,
    },
    Delete {
        index: usize,
    },
    /// Deletes the clipboard entry with this item id.
    Forget {
        id: String,
    },
    Clear,
    Pause,
    Resume,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Response {
    Done,
    Window(WindowStatus),
    Status {
        window: WindowStatus,
        entries: usize,
        recording: bool,
    },
    Items(Vec<SearchItem>),
    Activated(Activated),
    Deleted {
        text: String,
    },
    Error {
        message: String,
    },
}

pub(crate) fn encode<T: Serialize>(value: &T) -> anyhow::Result<Vec<u8>> {
    let mut bytes = serde_json::to_vec(value)?;
    bytes.push(b'\n');
    Ok(bytes)
}
