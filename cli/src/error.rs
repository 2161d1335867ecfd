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

//! Errors that precede any validator running. Once validators start
//! executing, failures are folded into [`polycheck_core::ToolResult`]
//! instead — this enum only covers the narrow set of things that stop a
//! run in its tracks.

use std::path::PathBuf;

use polycheck_core::PolycheckError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] PolycheckError),
    #[error("no tool named {name:?} is known; run `polycheck tools` to list available tools")]
    UnknownRequestedTool { name: String },
    #[error("failed to discover files under {path}")]
    Discovery {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("terminal I/O error")]
    Terminal(#[from] std::io::Error),
}

impl CliError {
    /// `2` for anything that prevented a validator from running at all.
    /// `0`/`1` (all tools succeeded / at least one didn't) are decided by
    /// the caller from the aggregate `ToolResult`s, not from this type.
    pub fn exit_code(&self) -> i32 {
        2
    }
}
