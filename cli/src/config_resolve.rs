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

//! Resolves the layered configuration the CLI hands to
//! [`polycheck_core::config::load_layered`]: the compiled-in defaults, the
//! platform user config, a repo-local `.polycheck.toml` discovered by
//! walking up from the current directory (or an explicit `--config`
//! override), and finally the `--config-toml` fragments, in that order.

use std::path::{Path, PathBuf};

use polycheck_core::config::{self, FixToolsConfig};
use polycheck_core::PolycheckResult;

const REPO_CONFIG_FILE: &str = ".polycheck.toml";

/// Walks from `start` up through its ancestors looking for a
/// `.polycheck.toml`, stopping at the first one found (nearest wins, same
/// as `.gitignore` resolution).
pub fn find_repo_config(start: &Path) -> Option<PathBuf> {
    let mut dir = Some(start);
    while let Some(current) = dir {
        let candidate = current.join(REPO_CONFIG_FILE);
        if candidate.is_file() {
            return Some(candidate);
        }
        dir = current.parent();
    }
    None
}

pub fn resolve(explicit: Option<&Path>, cli_overrides: &[String]) -> PolycheckResult<FixToolsConfig> {
    let user_config = config::user_config_path();
    let repo_config = explicit.map(Path::to_path_buf).or_else(|| {
        std::env::current_dir()
            .ok()
            .and_then(|cwd| find_repo_config(&cwd))
    });
    config::load_layered(user_config.as_deref(), repo_config.as_deref(), cli_overrides)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_repo_config_in_an_ancestor_directory() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(root.path().join(REPO_CONFIG_FILE), "").unwrap();
        let nested = root.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let found = find_repo_config(&nested).unwrap();
        assert_eq!(found, root.path().join(REPO_CONFIG_FILE));
    }

    #[test]
    fn returns_none_when_no_ancestor_has_one() {
        let root = tempfile::tempdir().unwrap();
        assert!(find_repo_config(root.path()).is_none());
    }
}
