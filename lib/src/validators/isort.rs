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

pub struct Isort {
    pub command: String,
}

impl Default for Isort {
    fn default() -> Self {
        Self {
            command: "isort".to_string(),
        }
    }
}

impl Validator for Isort {
    fn name(&self) -> &str {
        "isort"
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

        if !auto_fix {
            let argv = vec![
                self.command.clone(),
                "--check-only".to_string(),
                "--diff".to_string(),
                path_str,
            ];
            let (output, start) = match common::run(sidecar, self.name(), path, argv) {
                Ok(pair) => pair,
                Err(result) => return result,
            };
            return common::result_from_diagnostics(
                self.name(),
                path,
                start,
                output.exit_code == 0,
                if output.exit_code == 0 {
                    vec![]
                } else {
                    common::non_empty_lines(&output.stdout)
                },
                vec![],
            );
        }

        let check_argv = vec![
            self.command.clone(),
            "--check-only".to_string(),
            "--diff".to_string(),
            path_str.clone(),
        ];
        let fix_argv = vec![self.command.clone(), path_str];
        common::check_then_fix(sidecar, self.name(), path, check_argv, fix_argv)
    }
}
