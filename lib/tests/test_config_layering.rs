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

use pretty_assertions::assert_eq;

use polycheck_core::config::load_layered;

#[test]
fn layers_apply_lowest_to_highest_precedence() {
    let dir = tempfile::tempdir().unwrap();
    let user_config = dir.path().join("user.toml");
    let repo_config = dir.path().join("repo.toml");

    std::fs::write(
        &user_config,
        r#"
        [tools.python-black]
        enabled = true
        auto_fix = true

        [tools.ruff]
        enabled = true
        "#,
    )
    .unwrap();
    std::fs::write(
        &repo_config,
        r#"
        [tools.python-black]
        enabled = false
        "#,
    )
    .unwrap();

    let cli_overrides = vec![r#"
        [tools.ruff]
        enabled = false
        command = "ruff-nightly"
    "#
    .to_string()];

    let config = load_layered(Some(&user_config), Some(&repo_config), &cli_overrides).unwrap();

    // repo config disabled python-black after the user config enabled it,
    // but only set `enabled` — the user layer's `auto_fix = true` survives
    // because the merge is per-field, not per-tool.
    assert!(!config.tools["python-black"].is_enabled());
    assert!(config.tools["python-black"].auto_fix);
    // the CLI override is the highest-precedence layer.
    assert!(!config.tools["ruff"].is_enabled());
    assert_eq!(config.tools["ruff"].command.as_deref(), Some("ruff-nightly"));

    // tools untouched by any layer keep the compiled-in default.
    assert!(config.tools["mypy"].is_enabled());
}

#[test]
fn missing_optional_layers_are_skipped_without_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does-not-exist.toml");
    let config = load_layered(Some(&missing), None, &[]).unwrap();
    assert!(config.tools["python-black"].is_enabled());
}
