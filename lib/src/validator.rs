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

use std::collections::BTreeMap;
use std::path::Path;

use crate::result::ValidationResult;
use crate::sidecar::SidecarClient;

/// Uniform wrapper around one external tool.
///
/// A `Validator` never panics and never propagates an error past its own
/// boundary: every failure mode (missing binary, spawn failure, timeout,
/// unparsable output) is folded into a failed [`ValidationResult`] so the
/// executor can keep scheduling the rest of the graph.
pub trait Validator: Send + Sync {
    /// Stable identifier; doubles as the dependency-graph key.
    fn name(&self) -> &str;

    /// Whether this validator claims `path`. The default implementation
    /// matches by file extension; validators with filename- or
    /// directory-based matching (Hadolint, GitLab-CI) override it.
    fn can_handle(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        self.extensions().iter().any(|e| e.trim_start_matches('.') == ext)
    }

    fn extensions(&self) -> &[&str] {
        &[]
    }

    /// Overrides the binary name or path used to invoke this tool.
    /// Validators with no backing binary (Chapel, GitLab-CI) ignore this.
    fn set_command(&mut self, _command: String) {}

    /// Whether the backing tool can currently be invoked.
    fn is_available(&self, sidecar: &SidecarClient) -> bool;

    /// Runs the tool on `path` and returns a uniform result. `auto_fix`
    /// selects fix-mode where the tool supports it; checkers without a fix
    /// mode ignore it.
    fn validate(&self, path: &Path, sidecar: &SidecarClient, auto_fix: bool) -> ValidationResult;
}

/// `name -> Validator` map built from configuration at startup. New
/// validators are added by appending a constructor entry here, never by
/// editing a closed enum.
pub struct ValidatorRegistry {
    validators: BTreeMap<String, Box<dyn Validator>>,
}

impl ValidatorRegistry {
    /// Builds the registry from a layered [`crate::config::FixToolsConfig`]:
    /// every enabled tool, with `command` overrides applied.
    pub fn from_config(config: &crate::config::FixToolsConfig) -> Self {
        let mut validators: BTreeMap<String, Box<dyn Validator>> = BTreeMap::new();
        for validator in crate::validators::build(config) {
            validators.insert(validator.name().to_string(), validator);
        }
        Self { validators }
    }

    /// All sixteen shipped validators, keyed by their registry name, each
    /// using its canonical command with no configuration applied.
    pub fn with_defaults() -> Self {
        let mut validators: BTreeMap<String, Box<dyn Validator>> = BTreeMap::new();
        for validator in crate::validators::all() {
            validators.insert(validator.name().to_string(), validator);
        }
        Self { validators }
    }

    pub fn get(&self, name: &str) -> Option<&dyn Validator> {
        self.validators.get(name).map(AsRef::as_ref)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.validators.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn Validator)> {
        self.validators
            .iter()
            .map(|(name, validator)| (name.as_str(), validator.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}
