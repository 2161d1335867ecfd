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

//! One module per shipped validator, plus [`common`] for the plumbing every
//! one of them shares.

pub mod common;

mod autoflake;
mod bandit;
mod black;
mod chapel;
mod eslint;
mod flake8;
mod gitlab_ci;
mod hadolint;
mod isort;
mod mypy;
mod prettier;
mod ruff;
mod shellcheck;
mod taplo;
mod terraform;
mod yamllint;

use crate::config::FixToolsConfig;
use crate::validator::Validator;

/// Registry names of every validator this crate ships, in the order
/// `all()` constructs them. Used to build the compiled-in default
/// configuration without duplicating the list.
pub const DEFAULT_NAMES: &[&str] = &[
    "python-black",
    "ruff",
    "autoflake",
    "isort",
    "flake8",
    "mypy",
    "bandit",
    "js-eslint",
    "js-prettier",
    "taplo",
    "terraform",
    "yamllint",
    "shellcheck",
    "hadolint",
    "gitlab-ci",
    "chapel",
];

/// Constructs one instance of every shipped validator with its default
/// command. [`crate::validator::ValidatorRegistry`] applies configuration
/// overrides (command, enabled) on top of this list.
pub fn all() -> Vec<Box<dyn Validator>> {
    vec![
        Box::new(black::Black::default()),
        Box::new(ruff::Ruff::default()),
        Box::new(autoflake::Autoflake::default()),
        Box::new(isort::Isort::default()),
        Box::new(flake8::Flake8::default()),
        Box::new(mypy::MyPy::default()),
        Box::new(bandit::Bandit::default()),
        Box::new(eslint::Eslint::default()),
        Box::new(prettier::Prettier::default()),
        Box::new(taplo::Taplo::default()),
        Box::new(terraform::Terraform::default()),
        Box::new(yamllint::YamlLint::default()),
        Box::new(shellcheck::ShellCheck::default()),
        Box::new(hadolint::Hadolint::default()),
        Box::new(gitlab_ci::GitlabCi),
        Box::new(chapel::Chapel),
    ]
}

/// Constructs every *enabled* validator named in `config`, applying each
/// tool's `command` override where one is configured. Validators absent
/// from `config.tools` entirely fall back to enabled-by-default, matching
/// `crate::config`'s compiled-in default layer.
pub fn build(config: &FixToolsConfig) -> Vec<Box<dyn Validator>> {
    all()
        .into_iter()
        .filter(|validator| {
            config
                .tools
                .get(validator.name())
                .map(crate::config::ToolConfig::is_enabled)
                .unwrap_or(true)
        })
        .map(|mut validator| {
            if let Some(command) = config
                .tools
                .get(validator.name())
                .and_then(|t| t.command.clone())
            {
                validator.set_command(command);
            }
            validator
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_names_matches_all_registry_names() {
        let built: Vec<&str> = all().iter().map(|v| v.name()).collect();
        assert_eq!(built, DEFAULT_NAMES);
    }

    #[test]
    fn every_name_is_unique() {
        let names: std::collections::BTreeSet<&str> = DEFAULT_NAMES.iter().copied().collect();
        assert_eq!(names.len(), DEFAULT_NAMES.len());
    }
}
