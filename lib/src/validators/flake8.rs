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

use crate::result::ValidationResult;
use crate::sidecar::SidecarClient;
use crate::validator::Validator;
use crate::validators::common;

pub struct Flake8 {
    pub command: String,
}

impl Default for Flake8 {
    fn default() -> Self {
        Self {
            command: "flake8".to_string(),
        }
    }
}

impl Validator for Flake8 {
    fn name(&self) -> &str {
        "flake8"
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

    /// Flake8 has no fix mode; `auto_fix` is ignored.
    fn validate(&self, path: &Path, sidecar: &SidecarClient, _auto_fix: bool) -> ValidationResult {
        let path_str = path.to_string_lossy().into_owned();
        let argv = vec![
            self.command.clone(),
            path_str,
            "--format=json".to_string(),
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

/// Flake8's `--format=json` emits `{"<path>": [{"code": ..., "text": ...}]}`.
/// Codes beginning `E` (pycodestyle errors) or `F` (pyflakes) are errors;
/// everything else (e.g. `W`, `C`) is a warning.
fn classify(stdout: &str) -> (Vec<String>, Vec<String>) {
    let Ok(by_file) = serde_json::from_str::<serde_json::Map<String, serde_json::Value>>(stdout)
    else {
        return (vec![stdout.to_string()], vec![]);
    };
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    for issues in by_file.values().filter_map(|v| v.as_array()) {
        for issue in issues {
            let code = issue.get("code").and_then(|v| v.as_str()).unwrap_or("?");
            let text = issue.get("text").and_then(|v| v.as_str()).unwrap_or("");
            let line = format!("{code}: {text}");
            if code.starts_with('E') || code.starts_with('F') {
                errors.push(line);
            } else {
                warnings.push(line);
            }
        }
    }
    (errors, warnings)
}
