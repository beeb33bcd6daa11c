use std::path::Path;

use anyhow::anyhow;
use async_std::{
    io::{prelude::BufReadExt, BufReader, WriteExt},
    os::unix::net::UnixStream,
};

use super::{encode, Request, Response};

pub async fn send(path: &Path, request: &Request) -> anyhow::Result<Response> {
    let mut stream = UnixStream::connect(path)
        .await
        .map_err(|err| anyhow!("QuickLauncher is not running ({:?}): {}", path, err))?;
    stream.write_all(&encode(request)?).await?;

    let mut line = String::new();
    BufReader::new(&stream).read_line(&mut line).await?;
    if line.is_empty() {
        return Err(anyhow!("Connection closed without a response"));
    }
    Ok(serde_json::from_str(&line)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[async_std::test]
    async fn fails_when_nobody_listens() {
        let dir = tempfile::tempdir().unwrap();
        let err = send(&dir.path().join("none.sock"), &Request::Status)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("not running"));
    }
}
