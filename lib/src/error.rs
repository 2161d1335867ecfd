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

use std::path::PathBuf;

/// Errors that abort a run before any validator executes.
///
/// Per-file, per-tool failures never reach this type: they are folded into
/// [`crate::result::ValidationResult::errors`] instead, so a single flaky
/// tool can't take down an entire invocation.
#[derive(Debug, thiserror::Error)]
pub enum PolycheckError {
    #[error("failed to read config file {path}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("dependency graph contains a cycle involving {tool:?}")]
    DependencyCycle { tool: String },
    #[error("dependency graph references unknown tool {tool:?} as a prerequisite of {of:?}")]
    UnknownDependency { tool: String, of: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type PolycheckResult<T> = Result<T, PolycheckError>;
