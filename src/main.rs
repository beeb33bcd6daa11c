use app::run_app;
use clap::{Parser, Subcommand};
use ipc::{client::send, Request, Response};
use launcher::{Activated, SearchItem};
use paths::paths;

mod app;
mod clipboard;
mod config;
mod date;
mod hotkey;
mod ipc;
mod launcher;
mod paths;
mod platform;
mod state;
mod window;

/// Quick launcher and clipboard history. Without a command it starts the daemon.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Print responses as JSON
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Show or hide the launcher
    Toggle,
    Show,
    Hide,
    Status,
    /// Stop the running daemon
    Quit,
    /// Search applications and clipboard history
    Search {
        query: Vec<String>,
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// List clipboard history, newest first
    History { query: Option<String> },
    /// Copy a clipboard entry back or open an application, by item id
    Activate { id: String },
    /// Delete the clipboard entry at this position
    Delete { index: usize },
    /// Delete a clipboard entry by item id
    Forget { id: String },
    /// Delete the whole clipboard history
    Clear,
    /// Stop recording clipboard changes
    Pause,
    Resume,
}

impl From<Command> for Request {
    fn from(command: Command) -> Self {
        match command {
            Command::Toggle => Request::Toggle,
            Command::Show => Request::Show,
            Command::Hide => Request::Hide,
            Command::Status => Request::Status,
            Command::Quit => Request::Quit,
            Command::Search { query, limit } => Request::Search {
                query: (!query.is_empty()).then(|| query.join(" ")),
                limit,
            },
            Command::History { query } => Request::History { query },
            Command::Activate { id } => Request::Activate { id },
            Command::Delete { index } => Request::Delete { index },
            Command::Forget { id } => Request::Forget { id },
            Command::Clear => Request::Clear,
            Command::Pause => Request::Pause,
            Command::Resume => Request::Resume,
        }
    }
}

fn preview(text: &str) -> String {
    let mut text = text.trim().replace('\n', " ");
    if text.chars().count() > 60 {
        text = text.chars().take(60).collect();
        text.push_str("...");
    }
    text
}

fn format_items(items: &[SearchItem]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            format!(
                "{:>3}  {:<28}  {}  ({})\n",
                index,
                item.id,
                preview(&item.title),
                item.subtitle
            )
        })
        .collect()
}

/// Human readable form of a response. Errors are left to `main`.
fn format_response(response: &Response) -> String {
    match response {
        Response::Done | Response::Error { .. } => String::new(),
        Response::Window(window) => {
            format!("{}\n", if window.open { "open" } else { "hidden" })
        }
        Response::Status {
            window,
            entries,
            recording,
        } => format!(
            "launcher:  {}\nentries:   {}\nrecording: {}\n",
            if window.open { "open" } else { "hidden" },
            entries,
            recording
        ),
        Response::Items(items) => format_items(items),
        Response::Activated(Activated::Copied { text }) => format!("Copied {}\n", preview(text)),
        Response::Activated(Activated::Launched { name }) => format!("Launched {}\n", name),
        Response::Deleted { text } => format!("Deleted {}\n", preview(text)),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    let Some(command) = cli.command else {
        return run_app();
    };

    let response = async_std::task::block_on(send(&paths().socket(), &command.into()))?;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print!("{}", format_response(&response));
    }
    if let Response::Error { message } = response {
        return Err(anyhow::anyhow!(message));
    }
    Ok(())
}
