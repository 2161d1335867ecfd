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

//! The one validator with no external binary: a deterministic in-process
//! text transform (reindentation to two spaces, trailing-whitespace
//! removal) standing in for a real Chapel formatter.

use std::path::Path;
use std::time::Instant;

use crate::result::ValidationResult;
use crate::sidecar::SidecarClient;
use crate::validator::Validator;
use crate::validators::common;

pub struct Chapel;

impl Validator for Chapel {
    fn name(&self) -> &str {
        "chapel"
    }

    fn extensions(&self) -> &[&str] {
        &["chpl"]
    }

    /// No external binary; always "available".
    fn is_available(&self, _sidecar: &SidecarClient) -> bool {
        true
    }

    fn validate(&self, path: &Path, _sidecar: &SidecarClient, auto_fix: bool) -> ValidationResult {
        let start = Instant::now();
        let Ok(original) = std::fs::read_to_string(path) else {
            return ValidationResult::failed(
                self.name(),
                path,
                start.elapsed(),
                vec!["could not read file".to_string()],
            );
        };

        let formatted = reformat(&original);
        let needs_formatting = formatted != original;

        if auto_fix {
            if needs_formatting && std::fs::write(path, &formatted).is_err() {
                return ValidationResult::failed(
                    self.name(),
                    path,
                    start.elapsed(),
                    vec!["could not write formatted file".to_string()],
                );
            }
            let mut result = ValidationResult::ok(self.name(), path, start.elapsed());
            result.fixed = needs_formatting;
            return result;
        }

        if needs_formatting {
            common::result_from_diagnostics(
                self.name(),
                path,
                start,
                false,
                vec!["file is not formatted".to_string()],
                vec![],
            )
        } else {
            ValidationResult::ok(self.name(), path, start.elapsed())
        }
    }
}

/// Normalizes tabs to two spaces and strips trailing whitespace, line by
/// line. A real Chapel formatter's brace-style and indentation rules are
/// out of scope; this keeps the validator's shape (check vs fix, idempotent
/// re-run) without depending on an external tool.
fn reformat(source: &str) -> String {
    let mut out: String = source
        .lines()
        .map(|line| line.replace('\t', "  ").trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reformat_is_idempotent() {
        let once = reformat("proc main() {\n\twriteln(1);   \n}\n");
        let twice = reformat(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn fix_on_already_formatted_file_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("main.chpl");
        std::fs::write(&path, "proc main() {\n  writeln(1);\n}\n").unwrap();
        let result = Chapel.validate(&path, &SidecarClient::new("/nonexistent"), true);
        assert!(result.success);
        assert!(!result.fixed);
    }

    #[test]
    fn fix_rewrites_an_unformatted_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("main.chpl");
        std::fs::write(&path, "proc main() {\n\twriteln(1);   \n}\n").unwrap();
        let result = Chapel.validate(&path, &SidecarClient::new("/nonexistent"), true);
        assert!(result.success);
        assert!(result.fixed);
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "proc main() {\n  writeln(1);\n}\n"
        );
    }
}
