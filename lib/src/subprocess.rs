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

//! Single chokepoint through which every validator invokes its external
//! binary. Keeping this in one place is what lets the GPL/sidecar routing
//! and the timeout live in exactly one spot instead of sixteen.

use std::io::Write as _;
use std::process::{Command, Stdio};
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crate::sidecar::SidecarClient;

const TOOL_TIMEOUT: Duration = Duration::from_secs(30);

/// Names that must be routed through the sidecar when it is reachable,
/// because their upstream license forbids linking them into this process.
pub const GPL_TOOLS: &[&str] = &["yamllint", "hadolint", "shellcheck"];

#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    pub elapsed: Duration,
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{tool} not available")]
    ToolMissing { tool: String },
    #[error("failed to spawn {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },
    #[error("timeout after {}s", TOOL_TIMEOUT.as_secs())]
    Timeout,
    #[error("sidecar transport failed: {0}")]
    Sidecar(String),
}

/// Whether this process is itself already running inside a container, in
/// which case GPL tools may be invoked directly rather than through the
/// sidecar (no cross-license linkage concern once the whole image already
/// bundles them).
fn running_in_container() -> bool {
    std::path::Path::new("/.dockerenv").exists() || std::env::var_os("container").is_some()
}

/// Executes `argv[0]` with the remaining arguments in `cwd`, optionally
/// feeding `stdin` to the child, and returns its captured output.
///
/// Routing, in order: sidecar (if the tool is GPL-listed and a sidecar is
/// reachable), direct invocation (if running inside a container), or a
/// subprocess bounded by a 30-second timeout.
pub fn execute_command(
    sidecar: &SidecarClient,
    tool: &str,
    argv: &[String],
    cwd: &std::path::Path,
    stdin: Option<&[u8]>,
) -> Result<CommandOutput, CommandError> {
    if GPL_TOOLS.contains(&tool) && sidecar.is_available() {
        let start = Instant::now();
        let response = sidecar
            .run(tool, argv, cwd, stdin.unwrap_or(&[]))
            .map_err(|e| CommandError::Sidecar(e.to_string()))?;
        return Ok(CommandOutput {
            exit_code: response.exit_code,
            stdout: response.stdout,
            stderr: response.stderr,
            elapsed: start.elapsed(),
        });
    }

    if running_in_container() {
        return spawn_direct(tool, argv, cwd, stdin, None);
    }

    spawn_direct(tool, argv, cwd, stdin, Some(TOOL_TIMEOUT))
}

/// Best-effort termination of a timed-out child by pid; the worker thread
/// still holding the `Child` will observe the exit and drop its handle once
/// `wait_with_output` unblocks.
fn kill_by_pid(pid: u32) {
    #[cfg(unix)]
    {
        let _ = Command::new("kill").args(["-9", &pid.to_string()]).status();
    }
    #[cfg(windows)]
    {
        let _ = Command::new("taskkill")
            .args(["/PID", &pid.to_string(), "/F"])
            .status();
    }
}

/// Spawns `argv` as a plain child process. When `timeout` is `Some`, the
/// child is killed and [`CommandError::Timeout`] is returned if it has not
/// exited by the deadline.
///
/// The stdin-writer and output-reader each run on their own OS thread so
/// that a child that fills its stdout/stderr pipe before draining stdin
/// cannot deadlock against this thread writing to it.
fn spawn_direct(
    tool: &str,
    argv: &[String],
    cwd: &std::path::Path,
    stdin: Option<&[u8]>,
    timeout: Option<Duration>,
) -> Result<CommandOutput, CommandError> {
    let Some((bin, rest)) = argv.split_first() else {
        return Err(CommandError::ToolMissing {
            tool: tool.to_string(),
        });
    };

    let mut command = Command::new(bin);
    command
        .args(rest)
        .current_dir(cwd)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = command.spawn().map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            CommandError::ToolMissing {
                tool: tool.to_string(),
            }
        } else {
            CommandError::Spawn {
                tool: tool.to_string(),
                source,
            }
        }
    })?;

    let start = Instant::now();
    let pid = child.id();
    let stdin_bytes = stdin.map(<[u8]>::to_vec);
    let mut child_stdin = child.stdin.take();
    std::thread::scope(|scope| {
        scope.spawn(move || {
            if let (Some(mut pipe), Some(bytes)) = (child_stdin.take(), stdin_bytes) {
                let _ = pipe.write_all(&bytes);
            }
        });

        let (tx, rx) = mpsc::channel();
        scope.spawn(move || {
            let output = child.wait_with_output();
            let _ = tx.send(output);
        });

        let output = match timeout {
            Some(limit) => match rx.recv_timeout(limit) {
                Ok(output) => output,
                Err(_) => {
                    kill_by_pid(pid);
                    return Err(CommandError::Timeout);
                }
            },
            None => rx.recv().map_err(|_| CommandError::Timeout)?,
        };
        let output = output.map_err(|source| CommandError::Spawn {
            tool: tool.to_string(),
            source,
        })?;

        Ok(CommandOutput {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            elapsed: start.elapsed(),
        })
    })
}
