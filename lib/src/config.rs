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

//! Layered `[tools.<name>]` configuration: a compiled-in default table,
//! merged with an optional user file, an optional repo file, and finally
//! CLI `--config-toml` string overrides, in that precedence order. Each
//! layer is parsed independently with `toml`, then merged field-by-field
//! per tool — a later layer that sets only `auto_fix` doesn't clobber a
//! `command` an earlier layer set for the same tool.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{PolycheckError, PolycheckResult};

/// Resolved configuration for one tool: every field already defaulted
/// after all layers have been merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolConfig {
    pub command: Option<String>,
    pub auto_fix: bool,
    pub enabled: bool,
}

impl ToolConfig {
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

/// One layer's view of a tool: every field is optional, so the merge step
/// can tell "this layer didn't mention it" apart from "this layer set it".
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ToolConfigLayer {
    command: Option<String>,
    auto_fix: Option<bool>,
    enabled: Option<bool>,
}

impl ToolConfigLayer {
    /// `other`'s present fields win; a field `other` leaves unset keeps
    /// `self`'s value.
    fn merge(self, other: Self) -> Self {
        Self {
            command: other.command.or(self.command),
            auto_fix: other.auto_fix.or(self.auto_fix),
            enabled: other.enabled.or(self.enabled),
        }
    }

    fn resolve(self) -> ToolConfig {
        ToolConfig {
            command: self.command,
            auto_fix: self.auto_fix.unwrap_or(false),
            enabled: self.enabled.unwrap_or(true),
        }
    }
}

/// `name -> ToolConfig` map: the fully resolved configuration handed to the
/// rest of the crate once every layer has been merged.
#[derive(Debug, Clone, Default)]
pub struct FixToolsConfig {
    pub tools: BTreeMap<String, ToolConfig>,
}

/// One unresolved `[tools.<name>]` layer, as parsed from a single TOML
/// source, before it's merged with the other layers.
#[derive(Debug, Clone, Default, Deserialize)]
struct RawLayer {
    #[serde(default)]
    tools: BTreeMap<String, ToolConfigLayer>,
}

impl RawLayer {
    fn parse(text: &str, path: Option<&Path>) -> PolycheckResult<Self> {
        toml::from_str(text).map_err(|source| PolycheckError::ConfigParse {
            path: path.map(Path::to_path_buf).unwrap_or_default(),
            source,
        })
    }

    fn read_file(path: &Path) -> PolycheckResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| PolycheckError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, Some(path))
    }

    /// Merges `other` over `self` one tool at a time, and within a tool one
    /// field at a time: a later layer's present field wins, but a field it
    /// doesn't mention leaves the earlier layer's value untouched.
    fn merge(mut self, other: Self) -> Self {
        for (name, layer) in other.tools {
            match self.tools.remove(&name) {
                Some(existing) => {
                    self.tools.insert(name, existing.merge(layer));
                }
                None => {
                    self.tools.insert(name, layer);
                }
            }
        }
        self
    }

    fn resolve(self) -> FixToolsConfig {
        FixToolsConfig {
            tools: self
                .tools
                .into_iter()
                .map(|(name, layer)| (name, layer.resolve()))
                .collect(),
        }
    }
}

/// Platform user-config directory, mirroring `$XDG_CONFIG_HOME` on Unix and
/// falling back to `$HOME/.config` when unset.
pub fn user_config_path() -> Option<PathBuf> {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))?;
    Some(base.join("polycheck").join("config.toml"))
}

/// Loads and merges every configuration layer, lowest precedence first:
/// compiled-in defaults, `user_config`, `repo_config`, then each string in
/// `cli_overrides` (each parsed as an independent TOML fragment).
pub fn load_layered(
    user_config: Option<&Path>,
    repo_config: Option<&Path>,
    cli_overrides: &[String],
) -> PolycheckResult<FixToolsConfig> {
    let mut layered = default_layer();

    if let Some(path) = user_config {
        if path.exists() {
            layered = layered.merge(RawLayer::read_file(path)?);
        }
    }
    if let Some(path) = repo_config {
        if path.exists() {
            layered = layered.merge(RawLayer::read_file(path)?);
        }
    }
    for toml_str in cli_overrides {
        layered = layered.merge(RawLayer::parse(toml_str, None)?);
    }

    Ok(layered.resolve())
}

/// The compiled-in defaults: every shipped validator, with no field set in
/// any layer — `ToolConfigLayer::resolve` turns that into enabled, no
/// `command` override, `auto_fix` off.
fn default_layer() -> RawLayer {
    let tools = crate::validators::DEFAULT_NAMES
        .iter()
        .map(|name| ((*name).to_string(), ToolConfigLayer::default()))
        .collect();
    RawLayer { tools }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_enables_every_shipped_validator() {
        let config = load_layered(None, None, &[]).unwrap();
        assert_eq!(config.tools.len(), crate::validators::DEFAULT_NAMES.len());
        assert!(config.tools.values().all(ToolConfig::is_enabled));
    }

    #[test]
    fn later_layer_overrides_earlier_layer_per_tool() {
        let base = RawLayer::parse(
            r#"
            [tools.python-black]
            enabled = true
            "#,
            None,
        )
        .unwrap();
        let override_layer = RawLayer::parse(
            r#"
            [tools.python-black]
            enabled = false
            "#,
            None,
        )
        .unwrap();
        let merged = base.merge(override_layer).resolve();
        assert!(!merged.tools["python-black"].is_enabled());
    }

    #[test]
    fn later_layer_setting_one_field_does_not_drop_an_earlier_field() {
        let base = RawLayer::parse(
            r#"
            [tools.ruff]
            command = "ruff-nightly"
            "#,
            None,
        )
        .unwrap();
        let override_layer = RawLayer::parse(
            r#"
            [tools.ruff]
            auto_fix = true
            "#,
            None,
        )
        .unwrap();
        let merged = base.merge(override_layer).resolve();
        let ruff = &merged.tools["ruff"];
        assert_eq!(ruff.command.as_deref(), Some("ruff-nightly"));
        assert!(ruff.auto_fix);
    }

    #[test]
    fn malformed_toml_is_a_config_parse_error() {
        let result = RawLayer::parse("not valid [ toml", None);
        assert!(matches!(result, Err(PolycheckError::ConfigParse { .. })));
    }
}
