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

/// GPL-licensed; routed through the Sidecar Client when one is reachable.
pub struct Hadolint {
    pub command: String,
}

impl Default for Hadolint {
    fn default() -> Self {
        Self {
            command: "hadolint".to_string(),
        }
    }
}

impl Validator for Hadolint {
    fn name(&self) -> &str {
        "hadolint"
    }

    /// Matches `Dockerfile`/`ContainerFile` by filename and `.dockerfile` by
    /// extension, rather than a plain extension set.
    fn can_handle(&self, path: &Path) -> bool {
        let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        if file_name == "Dockerfile" || file_name == "ContainerFile" {
            return true;
        }
        path.extension().and_then(|e| e.to_str()) == Some("dockerfile")
    }

    fn set_command(&mut self, command: String) {
        self.command = command;
    }

    fn is_available(&self, sidecar: &SidecarClient) -> bool {
        common::probe_available(sidecar, self.name(), &self.command)
    }

    /// Hadolint has no fix mode; `auto_fix` is ignored.
    fn validate(&self, path: &Path, sidecar: &SidecarClient, _auto_fix: bool) -> ValidationResult {
        let path_str = path.to_string_lossy().into_owned();
        let argv = vec![self.command.clone(), path_str];
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

/// `file:line DLxxxx level: msg` lines, classified by a case-insensitive
/// substring match on `"error"` rather than parsing Hadolint's `-f json`
/// output.
fn classify(stdout: &str) -> (Vec<String>, Vec<String>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    for line in common::non_empty_lines(stdout) {
        if line.to_lowercase().contains("error") {
            errors.push(line);
        } else {
            warnings.push(line);
        }
    }
    (errors, warnings)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use test_case::test_case;

    use super::*;

    #[test_case("Dockerfile", true; "bare dockerfile")]
    #[test_case("ContainerFile", true; "bare containerfile")]
    #[test_case("build.dockerfile", true; "dockerfile extension")]
    #[test_case("main.rs", false; "unrelated extension")]
    fn can_handle_matches_dockerfile_naming_conventions(name: &str, expected: bool) {
        let hadolint = Hadolint::default();
        assert_eq!(hadolint.can_handle(Path::new(name)), expected);
    }

    #[test_case("Dockerfile:3 DL3008 error: Pin versions", 1, 0; "error line")]
    #[test_case("Dockerfile:7 DL3059 warning: Consolidate RUN", 0, 1; "warning line")]
    #[test_case("Dockerfile:1 DL3006 ERROR: tag missing", 1, 0; "uppercase error keyword")]
    fn classify_buckets_lines_by_the_error_substring(line: &str, errors: usize, warnings: usize) {
        let (e, w) = classify(line);
        assert_eq!(e.len(), errors);
        assert_eq!(w.len(), warnings);
    }
}
