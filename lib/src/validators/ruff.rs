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

pub struct Ruff {
    pub command: String,
}

impl Default for Ruff {
    fn default() -> Self {
        Self {
            command: "ruff".to_string(),
        }
    }
}

impl Validator for Ruff {
    fn name(&self) -> &str {
        "ruff"
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

    fn validate(&self, path: &Path, sidecar: &SidecarClient, auto_fix: bool) -> ValidationResult {
        let path_str = path.to_string_lossy().into_owned();
        let mut argv = vec![self.command.clone(), "check".to_string()];
        if auto_fix {
            argv.push("--fix".to_string());
        }
        argv.push(path_str);
        argv.push("--output-format=json".to_string());

        let before = auto_fix.then(|| common::fingerprint(path)).flatten();
        let (output, start) = match common::run(sidecar, self.name(), path, argv) {
            Ok(pair) => pair,
            Err(result) => return result,
        };

        let issues = match common::parse_json_array(&output.stdout) {
            Ok(issues) => issues,
            Err(raw) => {
                return common::result_from_diagnostics(
                    self.name(),
                    path,
                    start,
                    false,
                    vec![raw],
                    vec![],
                );
            }
        };

        // Ruff's JSON carries no severity field; every reported issue is a
        // finding, so all become errors.
        let errors: Vec<String> = issues
            .iter()
            .map(|issue| {
                let code = issue.get("code").and_then(|v| v.as_str()).unwrap_or("?");
                let message = issue
                    .get("message")
                    .and_then(|v| v.as_str())
                    .unwrap_or("");
                format!("{code}: {message}")
            })
            .collect();

        let mut result =
            common::result_from_diagnostics(self.name(), path, start, true, errors, vec![]);
        result.fixed = auto_fix && before.is_some() && before != common::fingerprint(path);
        result
    }
}
