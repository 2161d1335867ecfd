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

//! `polycheck-core`: the dependency-aware parallel orchestration engine
//! underneath the `polycheck` CLI.
//!
//! A [`validator::ValidatorRegistry`] turns layered [`config::FixToolsConfig`]
//! into live [`validator::Validator`] instances; an [`executor::Executor`]
//! schedules them level by level over a [`graph::DependencyGraph`]; each
//! validator invocation goes through [`subprocess`] (spawning the tool
//! directly) or, for GPL-licensed tools, [`sidecar`] (an out-of-process
//! helper reached over a Unix socket). [`result`] defines the data this
//! pipeline produces at both granularities.

pub mod config;
pub mod error;
pub mod executor;
pub mod graph;
pub mod result;
pub mod sidecar;
pub mod subprocess;
pub mod validator;
pub mod validators;

pub use error::{PolycheckError, PolycheckResult};
pub use executor::{Executor, ProgressCallback, ProgressStatus, ToolCallable};
pub use graph::{DependencyGraph, Level, Statistics};
pub use result::{ToolResult, ValidationResult};
pub use sidecar::SidecarClient;
pub use validator::{Validator, ValidatorRegistry};
