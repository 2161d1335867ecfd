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

pub struct Eslint {
    pub command: String,
}

impl Default for Eslint {
    fn default() -> Self {
        Self {
            command: "eslint".to_string(),
        }
    }
}

impl Validator for Eslint {
    fn name(&self) -> &str {
        "js-eslint"
    }

    fn extensions(&self) -> &[&str] {
        &["js", "jsx", "ts", "tsx", "mjs", "cjs"]
    }

    fn set_command(&mut self, command: String) {
        self.command = command;
    }

    fn is_available(&self, sidecar: &SidecarClient) -> bool {
        common::probe_available(sidecar, self.name(), &self.command)
    }

    fn validate(&self, path: &Path, sidecar: &SidecarClient, auto_fix: bool) -> ValidationResult {
        let path_str = path.to_string_lossy().into_owned();
        let before = auto_fix.then(|| common::fingerprint(path)).flatten();

        let mut argv = vec![self.command.clone(), path_str];
        if auto_fix {
            argv.push("--fix".to_string());
        }
        argv.push("--format=json".to_string());

        let (output, start) = match common::run(sidecar, self.name(), path, argv) {
            Ok(pair) => pair,
            Err(result) => return result,
        };

        let files = match common::parse_json_array(&output.stdout) {
            Ok(files) => files,
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

        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        for messages in files
            .iter()
            .filter_map(|f| f.get("messages"))
            .filter_map(|m| m.as_array())
        {
            for message in messages {
                let severity = message.get("severity").and_then(serde_json::Value::as_i64);
                let rule = message
                    .get("ruleId")
                    .and_then(|v| v.as_str())
                    .unwrap_or("?");
                let text = message
                    .get("message")
                    .and_then(|v| v.as_str())
                    .unwrap_or("");
                let line = format!("{rule}: {text}");
                if severity == Some(2) {
                    errors.push(line);
                } else {
                    warnings.push(line);
                }
            }
        }

        let mut result =
            common::result_from_diagnostics(self.name(), path, start, true, errors, warnings);
        result.fixed = auto_fix && before.is_some() && before != common::fingerprint(path);
        result
    }
}
