// Copyright 2026 The Polycheck Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! IPC client for the GPL sidecar: a separate long-running process that
//! hosts tools (yamllint, hadolint, shellcheck) whose licenses forbid
//! linking into this binary. Framing is newline-delimited JSON over a Unix
//! domain socket.

use std::io::{BufRead, BufReader, Write as _};
use std::os::unix::net::UnixStream;
use std::path::{Path, PathBuf};

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum SidecarError {
    #[error("sidecar socket unavailable")]
    Unavailable,
    #[error("sidecar io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("sidecar protocol error: {0}")]
    Protocol(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
struct Request<'a> {
    tool: &'a str,
    argv: &'a [String],
    cwd: &'a Path,
    stdin_bytes: &'a [u8],
}

#[derive(Debug, Deserialize)]
pub struct Response {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Connects to a single sidecar endpoint. Availability is probed lazily on
/// first use and memoized for the lifetime of this client, mirroring the
/// once-per-process memoization the rest of the crate relies on for cheap
/// cached probes.
pub struct SidecarClient {
    socket_path: PathBuf,
    available: OnceCell<bool>,
}

impl SidecarClient {
    pub fn new(socket_path: impl Into<PathBuf>) -> Self {
        Self {
            socket_path: socket_path.into(),
            available: OnceCell::new(),
        }
    }

    /// Default path used by the CLI when no override is configured.
    pub fn default_at(base_dir: impl AsRef<Path>) -> Self {
        Self::new(base_dir.as_ref().join("polycheck-sidecar.sock"))
    }

    pub fn is_available(&self) -> bool {
        *self
            .available
            .get_or_init(|| UnixStream::connect(&self.socket_path).is_ok())
    }

    pub fn run(
        &self,
        tool: &str,
        argv: &[String],
        cwd: &Path,
        stdin_bytes: &[u8],
    ) -> Result<Response, SidecarError> {
        if !self.is_available() {
            return Err(SidecarError::Unavailable);
        }
        let mut stream = UnixStream::connect(&self.socket_path)?;
        let request = Request {
            tool,
            argv,
            cwd,
            stdin_bytes,
        };
        let mut line = serde_json::to_vec(&request)?;
        line.push(b'\n');
        stream.write_all(&line)?;
        stream.flush()?;

        let mut reader = BufReader::new(stream);
        let mut response_line = String::new();
        reader.read_line(&mut response_line)?;
        Ok(serde_json::from_str(response_line.trim_end())?)
    }
}
