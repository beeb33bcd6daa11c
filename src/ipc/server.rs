use std::{path::Path, sync::Arc};

use anyhow::anyhow;
use async_std::{
    channel::{bounded, Sender},
    io::{prelude::BufReadExt, BufReader, WriteExt},
    os::unix::net::{UnixListener, UnixStream},
    prelude::FutureExt,
    task,
};

use crate::state::State;

use super::{encode, Request, Response};

pub async fn setup_socket(path: &Path) -> anyhow::Result<UnixListener> {
    if path.exists() {
        if UnixStream::connect(path).await.is_ok() {
            return Err(anyhow!("Server already running"));
        }
        std::fs::remove_file(path)?;
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let listener = UnixListener::bind(path).await?;
    log::info!("Listening on socket: {:?}", path);

    Ok(listener)
}

enum Event {
    Client(std::io::Result<UnixStream>),
    Quit,
}

/// Serves clients until one of them sends `Quit`.
pub async fn start_server(listener: UnixListener, state: Arc<State>) -> anyhow::Result<()> {
    let (quit, quit_requested) = bounded::<()>(1);
    loop {
        let accept = async { Event::Client(listener.accept().await.map(|(stream, _)| stream)) };
        let stop = async {
            let _ = quit_requested.recv().await;
            Event::Quit
        };
        match accept.race(stop).await {
            Event::Client(stream) => {
                let stream = stream?;
                let state = state.clone();
                let quit = quit.clone();
                task::spawn(async move {
                    if let Err(err) = handle_client(stream, state, quit).await {
                        log::error!("Failed to handle client: {:?}", err);
                    }
                });
            }
            Event::Quit => break,
        }
    }
    log::info!("Server stopped");
    Ok(())
}

async fn handle_client(
    mut stream: UnixStream,
    state: Arc<State>,
    quit: Sender<()>,
) -> anyhow::Result<()> {
    let mut line = String::new();
    BufReader::new(&stream).read_line(&mut line).await?;

    let mut is_quit = false;
    let response = match serde_json::from_str::<Request>(&line) {
        Ok(request) => {
            log::debug!("Received {:?}", request);
            is_quit = request == Request::Quit;
            task::spawn_blocking(move || state.handle(request)).await
        }
        Err(err) => Response::Error {
            message: format!("Invalid request: {}", err),
        },
    };
    let written = stream.write_all(&encode(&response)?).await;
    if is_quit {
        let _ = quit.try_send(());
    }
    Ok(written?)
}
