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

pub struct Bandit {
    pub command: String,
}

impl Default for Bandit {
    fn default() -> Self {
        Self {
            command: "bandit".to_string(),
        }
    }
}

impl Validator for Bandit {
    fn name(&self) -> &str {
        "bandit"
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

    /// Bandit has no fix mode; `auto_fix` is ignored.
    fn validate(&self, path: &Path, sidecar: &SidecarClient, _auto_fix: bool) -> ValidationResult {
        let path_str = path.to_string_lossy().into_owned();
        let argv = vec![self.command.clone(), "-f".to_string(), "json".to_string(), path_str];
        let (output, start) = match common::run(sidecar, self.name(), path, argv) {
            Ok(pair) => pair,
            Err(result) => return result,
        };

        let parsed: serde_json::Value = match serde_json::from_str(&output.stdout) {
            Ok(value) => value,
            Err(_) => {
                if output.exit_code == 0 {
                    return ValidationResult::ok(self.name(), path, start.elapsed());
                }
                return common::result_from_diagnostics(
                    self.name(),
                    path,
                    start,
                    false,
                    vec![output.stdout.clone()],
                    vec![],
                );
            }
        };

        let results = parsed
            .get("results")
            .and_then(|v| v.as_array())
            .cloned()
            .unwrap_or_default();

        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        for issue in &results {
            let severity = issue
                .get("issue_severity")
                .and_then(|v| v.as_str())
                .unwrap_or("");
            let text = issue
                .get("issue_text")
                .and_then(|v| v.as_str())
                .unwrap_or("");
            let test_id = issue.get("test_id").and_then(|v| v.as_str()).unwrap_or("?");
            let line = format!("{test_id}: {text}");
            if matches!(severity, "HIGH" | "CRITICAL") {
                errors.push(line);
            } else {
                warnings.push(line);
            }
        }

        common::result_from_diagnostics(self.name(), path, start, true, errors, warnings)
    }
}
