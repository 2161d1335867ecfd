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

use polycheck_core::{SidecarClient, ValidatorRegistry};

#[test]
fn default_registry_carries_every_shipped_validator() {
    let registry = ValidatorRegistry::with_defaults();
    assert_eq!(registry.len(), 16);
    for name in [
        "python-black",
        "ruff",
        "mypy",
        "js-eslint",
        "gitlab-ci",
        "chapel",
    ] {
        assert!(registry.get(name).is_some(), "missing {name}");
    }
}

#[test]
fn gitlab_ci_validator_is_reachable_through_the_registry() {
    let registry = ValidatorRegistry::with_defaults();
    let validator = registry.get("gitlab-ci").unwrap();
    let sidecar = SidecarClient::new("/nonexistent-polycheck-sidecar.sock");

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".gitlab-ci.yml");
    std::fs::write(
        &path,
        "stages:\n  - test\ntest:\n  stage: test\n  script:\n    - echo ok\n",
    )
    .unwrap();

    assert!(validator.can_handle(&path));
    let result = validator.validate(&path, &sidecar, false);
    assert!(result.success, "{:?}", result.errors);
    assert_eq!(result.tool, "gitlab-ci");
}

#[test]
fn chapel_validator_does_not_claim_python_files() {
    let registry = ValidatorRegistry::with_defaults();
    let chapel = registry.get("chapel").unwrap();
    assert!(!chapel.can_handle(Path::new("main.py")));
    assert!(chapel.can_handle(Path::new("main.chpl")));
}
