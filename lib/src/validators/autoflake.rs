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

pub struct Autoflake {
    pub command: String,
}

impl Default for Autoflake {
    fn default() -> Self {
        Self {
            command: "autoflake".to_string(),
        }
    }
}

impl Validator for Autoflake {
    fn name(&self) -> &str {
        "autoflake"
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
        let base_flags = [
            "--remove-all-unused-imports".to_string(),
            "--remove-unused-variables".to_string(),
        ];

        if !auto_fix {
            let mut argv = vec![self.command.clone(), "--check".to_string()];
            argv.extend(base_flags);
            argv.push(path_str);
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
                    vec![output.stdout.clone()]
                },
                vec![],
            );
        }

        let mut check_argv = vec![self.command.clone(), "--check".to_string()];
        check_argv.extend(base_flags.clone());
        check_argv.push(path_str.clone());

        let mut fix_argv = vec![self.command.clone(), "--in-place".to_string()];
        fix_argv.extend(base_flags);
        fix_argv.push(path_str);

        common::check_then_fix(sidecar, self.name(), path, check_argv, fix_argv)
    }
}
