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

//! Validates `.gitlab-ci.yml` and `.gitlab/ci/**/*.{yml,yaml}` against a
//! vendored JSON Schema snapshot, entirely in-process — no external binary,
//! no sidecar. Refreshing the vendored schema from GitLab's upstream copy is
//! a CLI/cache concern outside this crate.

use std::path::Path;
use std::time::Instant;

use once_cell::sync::Lazy;

use crate::result::ValidationResult;
use crate::sidecar::SidecarClient;
use crate::validator::Validator;

const SCHEMA_JSON: &str = include_str!("schemas/gitlab-ci.schema.json");

static SCHEMA_VALIDATOR: Lazy<jsonschema::Validator> = Lazy::new(|| {
    let schema: serde_json::Value =
        serde_json::from_str(SCHEMA_JSON).expect("vendored gitlab-ci schema is valid JSON");
    jsonschema::validator_for(&schema).expect("vendored gitlab-ci schema compiles")
});

pub struct GitlabCi;

impl Validator for GitlabCi {
    fn name(&self) -> &str {
        "gitlab-ci"
    }

    fn can_handle(&self, path: &Path) -> bool {
        let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        if file_name == ".gitlab-ci.yml" {
            return true;
        }
        let ext_is_yaml = matches!(path.extension().and_then(|e| e.to_str()), Some("yml" | "yaml"));
        ext_is_yaml
            && path
                .components()
                .any(|c| c.as_os_str() == ".gitlab" || c.as_os_str() == "ci")
    }

    /// No external binary; always "available".
    fn is_available(&self, _sidecar: &SidecarClient) -> bool {
        true
    }

    /// No fix mode; `auto_fix` is ignored.
    fn validate(&self, path: &Path, _sidecar: &SidecarClient, _auto_fix: bool) -> ValidationResult {
        let start = Instant::now();
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                return ValidationResult::failed(
                    self.name(),
                    path,
                    start.elapsed(),
                    vec![err.to_string()],
                );
            }
        };

        let document: serde_yaml::Value = match serde_yaml::from_str(&text) {
            Ok(document) => document,
            Err(err) => {
                return ValidationResult::failed(
                    self.name(),
                    path,
                    start.elapsed(),
                    vec![format!("invalid YAML: {err}")],
                );
            }
        };
        let instance = match serde_json::to_value(&document) {
            Ok(instance) => instance,
            Err(err) => {
                return ValidationResult::failed(
                    self.name(),
                    path,
                    start.elapsed(),
                    vec![err.to_string()],
                );
            }
        };

        let errors: Vec<String> = SCHEMA_VALIDATOR
            .iter_errors(&instance)
            .map(|e| format!("{}: {e}", e.instance_path))
            .collect();

        if errors.is_empty() {
            ValidationResult::ok(self.name(), path, start.elapsed())
        } else {
            ValidationResult::failed(self.name(), path, start.elapsed(), errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_top_level_gitlab_ci_file() {
        let validator = GitlabCi;
        assert!(validator.can_handle(Path::new(".gitlab-ci.yml")));
        assert!(validator.can_handle(Path::new("/repo/.gitlab-ci.yml")));
    }

    #[test]
    fn matches_nested_ci_includes() {
        let validator = GitlabCi;
        assert!(validator.can_handle(Path::new(".gitlab/ci/build.yml")));
        assert!(!validator.can_handle(Path::new("docs/readme.yml")));
    }

    #[test]
    fn well_formed_pipeline_passes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".gitlab-ci.yml");
        std::fs::write(
            &path,
            "stages:\n  - build\nbuild:\n  stage: build\n  script:\n    - echo hi\n",
        )
        .unwrap();
        let result = GitlabCi.validate(&path, &SidecarClient::new("/nonexistent"), false);
        assert!(result.success, "{:?}", result.errors);
    }

    #[test]
    fn malformed_yaml_is_a_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".gitlab-ci.yml");
        std::fs::write(&path, "stages: [build\n").unwrap();
        let result = GitlabCi.validate(&path, &SidecarClient::new("/nonexistent"), false);
        assert!(!result.success);
    }
}
