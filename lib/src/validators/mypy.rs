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

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::result::ValidationResult;
use crate::sidecar::SidecarClient;
use crate::validator::Validator;
use crate::validators::common;

static DIAGNOSTIC_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<loc>[^:]+:\d+): (?P<level>error|warning|note): (?P<msg>.*)$").unwrap());

pub struct MyPy {
    pub command: String,
}

impl Default for MyPy {
    fn default() -> Self {
        Self {
            command: "mypy".to_string(),
        }
    }
}

impl Validator for MyPy {
    fn name(&self) -> &str {
        "mypy"
    }

    fn extensions(&self) -> &[&str] {
        &["py", "pyi"]
    }

    fn set_command(&mut self, command: String) {
        self.command = command;
    }

    fn is_available(&self, sidecar: &SidecarClient) -> bool {
        common::probe_available(sidecar, self.name(), &self.command)
    }

    /// MyPy has no fix mode; `auto_fix` is ignored.
    fn validate(&self, path: &Path, sidecar: &SidecarClient, _auto_fix: bool) -> ValidationResult {
        let path_str = path.to_string_lossy().into_owned();
        let argv = vec![
            self.command.clone(),
            path_str,
            "--no-error-summary".to_string(),
        ];
        let (output, start) = match common::run(sidecar, self.name(), path, argv) {
            Ok(pair) => pair,
            Err(result) => return result,
        };
        if output.exit_code == 0 {
            return ValidationResult::ok(self.name(), path, start.elapsed());
        }

        let (errors, warnings) = classify(&output.stdout);
        common::result_from_diagnostics(self.name(), path, start, false, errors, warnings)
    }
}

/// `path:line: error|warning|note: msg` lines; `error` becomes an error,
/// `warning`/`note` become warnings.
fn classify(stdout: &str) -> (Vec<String>, Vec<String>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    for line in common::non_empty_lines(stdout) {
        match DIAGNOSTIC_LINE.captures(&line) {
            Some(caps) if &caps["level"] == "error" => errors.push(line),
            Some(_) => warnings.push(line),
            None => errors.push(line),
        }
    }
    (errors, warnings)
}
