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
use std::time::Instant;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::result::ValidationResult;
use crate::sidecar::SidecarClient;
use crate::validator::Validator;
use crate::validators::common;

static PARSABLE_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<loc>[^:]+:\d+:\d+): \[(?P<level>error|warning)\] (?P<msg>.*)$").unwrap()
});

pub struct YamlLint {
    pub command: String,
}

impl Default for YamlLint {
    fn default() -> Self {
        Self {
            command: "yamllint".to_string(),
        }
    }
}

impl Validator for YamlLint {
    fn name(&self) -> &str {
        "yamllint"
    }

    fn extensions(&self) -> &[&str] {
        &["yaml", "yml"]
    }

    fn set_command(&mut self, command: String) {
        self.command = command;
    }

    fn is_available(&self, sidecar: &SidecarClient) -> bool {
        common::probe_available(sidecar, self.name(), &self.command)
    }

    /// YAMLLint has no native fix mode; when `auto_fix` is set we instead run
    /// the pre-pass normalization (strip trailing whitespace per line, ensure
    /// a single trailing newline) and report `fixed` based on whether that
    /// rewrote the file, then always run the external linter for diagnostics.
    fn validate(&self, path: &Path, sidecar: &SidecarClient, auto_fix: bool) -> ValidationResult {
        let start = Instant::now();
        let mut fixed = false;
        if auto_fix {
            match normalize_in_place(path) {
                Ok(changed) => fixed = changed,
                Err(io_err) => {
                    return ValidationResult::failed(
                        self.name(),
                        path,
                        start.elapsed(),
                        vec![io_err.to_string()],
                    );
                }
            }
        }

        let path_str = path.to_string_lossy().into_owned();
        let argv = vec![
            self.command.clone(),
            "-f".to_string(),
            "parsable".to_string(),
            path_str,
        ];
        let (output, _) = match common::run(sidecar, self.name(), path, argv) {
            Ok(pair) => pair,
            Err(mut result) => {
                result.duration_ms = start.elapsed().as_millis() as u64;
                return result;
            }
        };

        if output.exit_code == 0 {
            let mut result = ValidationResult::ok(self.name(), path, start.elapsed());
            result.fixed = fixed;
            return result;
        }

        let (errors, warnings) = classify(&output.stdout);
        let mut result =
            common::result_from_diagnostics(self.name(), path, start, false, errors, warnings);
        result.fixed = fixed;
        result
    }
}

/// Strips trailing whitespace from every line and ensures the file ends in
/// exactly one trailing newline. Returns whether the file's bytes changed.
fn normalize_in_place(path: &Path) -> std::io::Result<bool> {
    let original = std::fs::read_to_string(path)?;
    let trimmed_lines: Vec<&str> = original
        .lines()
        .map(str::trim_end)
        .collect();
    let last_non_blank = trimmed_lines.iter().rposition(|line| !line.is_empty());
    let mut normalized = match last_non_blank {
        Some(idx) => trimmed_lines[..=idx].join("\n"),
        None => String::new(),
    };
    normalized.push('\n');
    if normalized != original {
        std::fs::write(path, &normalized)?;
        Ok(true)
    } else {
        Ok(false)
    }
}

/// `path:line:col: [error|warning] msg` lines from `yamllint -f parsable`.
fn classify(stdout: &str) -> (Vec<String>, Vec<String>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    for line in common::non_empty_lines(stdout) {
        match PARSABLE_LINE.captures(&line) {
            Some(caps) if &caps["level"] == "error" => errors.push(line),
            Some(_) => warnings.push(line),
            None => errors.push(line),
        }
    }
    (errors, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn normalize_strips_trailing_whitespace_and_newline() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "a: 1   \nb: 2\t\n\n\n").unwrap();
        let path = file.path().to_path_buf();
        let changed = normalize_in_place(&path).unwrap();
        assert!(changed);
        let result = std::fs::read_to_string(&path).unwrap();
        assert_eq!(result, "a: 1\nb: 2\n");
    }

    #[test]
    fn normalize_is_a_no_op_on_already_clean_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "a: 1\nb: 2\n").unwrap();
        let path = file.path().to_path_buf();
        assert!(!normalize_in_place(&path).unwrap());
    }
}
