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

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;

use crate::error::{PolycheckError, PolycheckResult};

/// Static tool -> prerequisite-set declaration, partitioned into levels by
/// Kahn's algorithm. Construction rejects cycles and dangling references up
/// front so a bad declaration never reaches the executor.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    edges: BTreeMap<String, BTreeSet<String>>,
}

/// One level of the execution plan: every tool here has no unresolved
/// prerequisite remaining once the earlier levels have run.
pub type Level = BTreeSet<String>;

#[derive(Debug, Clone, Default)]
pub struct Statistics {
    pub total_tools: usize,
    pub total_levels: usize,
    pub max_parallelism: usize,
    pub avg_parallelism: f64,
    pub sequential_time_estimate: Option<f64>,
    pub parallel_time_estimate: Option<f64>,
    pub speedup_factor: Option<f64>,
}

impl DependencyGraph {
    /// Builds a graph from an edge list. `edges` maps a tool to the set of
    /// tools that must finish before it may start.
    pub fn new(
        edges: impl IntoIterator<Item = (String, BTreeSet<String>)>,
    ) -> PolycheckResult<Self> {
        let edges: BTreeMap<String, BTreeSet<String>> = edges.into_iter().collect();
        let known: BTreeSet<&str> = edges.keys().map(String::as_str).collect();
        for (tool, deps) in &edges {
            for dep in deps {
                if !known.contains(dep.as_str()) {
                    return Err(PolycheckError::UnknownDependency {
                        tool: dep.clone(),
                        of: tool.clone(),
                    });
                }
            }
        }
        let graph = Self { edges };
        graph.topological_levels()?;
        Ok(graph)
    }

    /// The shipped default graph: Python and JS formatters settle in level
    /// 0 before the checkers that read their output run in level 1; every
    /// other tool is independent.
    pub fn default_graph() -> Self {
        let mut edges: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for tool in [
            "python-black",
            "autoflake",
            "isort",
            "js-prettier",
            "taplo",
            "terraform",
            "yamllint",
            "shellcheck",
            "hadolint",
            "gitlab-ci",
            "chapel",
        ] {
            edges.insert(tool.to_string(), BTreeSet::new());
        }
        let python_formatters: BTreeSet<String> = ["python-black", "autoflake", "isort"]
            .into_iter()
            .map(String::from)
            .collect();
        for tool in ["ruff", "flake8", "mypy", "bandit"] {
            edges.insert(tool.to_string(), python_formatters.clone());
        }
        edges.insert(
            "js-eslint".to_string(),
            ["js-prettier".to_string()].into_iter().collect(),
        );
        Self { edges }
    }

    /// Restricts the graph to `requested`. Any requested tool absent from
    /// the graph is treated as dependency-free and placed in level 0 — the
    /// documented resolution for an unknown-tool input.
    pub fn restricted_to(&self, requested: &BTreeSet<String>) -> Self {
        let mut edges = BTreeMap::new();
        for tool in requested {
            let deps = self
                .edges
                .get(tool)
                .cloned()
                .unwrap_or_default()
                .into_iter()
                .filter(|dep| requested.contains(dep))
                .collect();
            edges.insert(tool.clone(), deps);
        }
        Self { edges }
    }

    pub fn total_tools(&self) -> usize {
        self.edges.len()
    }

    /// Kahn's algorithm: repeatedly peel off the frontier of tools with no
    /// remaining unresolved prerequisite. A non-empty remainder after the
    /// frontier goes dry indicates a cycle.
    pub fn topological_levels(&self) -> PolycheckResult<Vec<Level>> {
        let mut remaining: BTreeMap<&str, BTreeSet<&str>> = self
            .edges
            .iter()
            .map(|(tool, deps)| (tool.as_str(), deps.iter().map(String::as_str).collect()))
            .collect();
        let mut levels = Vec::new();

        while !remaining.is_empty() {
            let frontier: Level = remaining
                .iter()
                .filter(|(_, deps)| deps.is_empty())
                .map(|(tool, _)| tool.to_string())
                .collect();
            if frontier.is_empty() {
                let stuck = remaining.keys().next().copied().unwrap_or_default();
                return Err(PolycheckError::DependencyCycle {
                    tool: stuck.to_string(),
                });
            }
            for tool in &frontier {
                remaining.remove(tool.as_str());
            }
            for deps in remaining.values_mut() {
                for tool in &frontier {
                    deps.remove(tool.as_str());
                }
            }
            levels.push(frontier);
        }
        Ok(levels)
    }

    pub fn execution_plan(&self) -> PolycheckResult<Vec<(usize, Level)>> {
        Ok(self
            .topological_levels()?
            .into_iter()
            .enumerate()
            .collect())
    }

    pub fn visualize_dependencies(&self) -> String {
        let mut out = String::new();
        for (tool, deps) in &self.edges {
            if deps.is_empty() {
                let _ = writeln!(out, "{tool} (no dependencies)");
            } else {
                let deps = deps.iter().cloned().collect::<Vec<_>>().join(", ");
                let _ = writeln!(out, "{tool} <- {deps}");
            }
        }
        out
    }

    /// `durations` maps tool name to a nominal per-tool duration used only
    /// to estimate the sequential/parallel speedup; omit entries you don't
    /// have a number for and the corresponding estimates are left `None`.
    pub fn statistics(&self, durations: &BTreeMap<String, f64>) -> PolycheckResult<Statistics> {
        let levels = self.topological_levels()?;
        let total_tools = self.edges.len();
        let total_levels = levels.len();
        let max_parallelism = levels.iter().map(BTreeSet::len).max().unwrap_or(0);
        let avg_parallelism = if total_levels == 0 {
            0.0
        } else {
            total_tools as f64 / total_levels as f64
        };

        let have_all_durations = self.edges.keys().all(|t| durations.contains_key(t));
        let (sequential_time_estimate, parallel_time_estimate, speedup_factor) =
            if have_all_durations {
                let sequential: f64 = durations.values().sum();
                let parallel: f64 = levels
                    .iter()
                    .map(|level| {
                        level
                            .iter()
                            .filter_map(|t| durations.get(t))
                            .cloned()
                            .fold(0.0_f64, f64::max)
                    })
                    .sum();
                let speedup = if parallel > 0.0 {
                    Some(sequential / parallel)
                } else {
                    None
                };
                (Some(sequential), Some(parallel), speedup)
            } else {
                (None, None, None)
            };

        Ok(Statistics {
            total_tools,
            total_levels,
            max_parallelism,
            avg_parallelism,
            sequential_time_estimate,
            parallel_time_estimate,
            speedup_factor,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_of(edges: &[(&str, &[&str])]) -> DependencyGraph {
        DependencyGraph::new(edges.iter().map(|(tool, deps)| {
            (
                tool.to_string(),
                deps.iter().map(|d| d.to_string()).collect(),
            )
        }))
        .unwrap()
    }

    #[test]
    fn linear_chain_produces_three_singleton_levels() {
        let graph = graph_of(&[("a", &[]), ("b", &["a"]), ("c", &["b"])]);
        let levels = graph.topological_levels().unwrap();
        assert_eq!(levels.len(), 3);
        assert_eq!(levels[0], ["a".to_string()].into_iter().collect());
        assert_eq!(levels[1], ["b".to_string()].into_iter().collect());
        assert_eq!(levels[2], ["c".to_string()].into_iter().collect());
    }

    #[test]
    fn wide_fan_out_groups_independent_linters_in_one_level() {
        let graph = graph_of(&[
            ("fmt", &[]),
            ("lint1", &["fmt"]),
            ("lint2", &["fmt"]),
            ("lint3", &["fmt"]),
        ]);
        let levels = graph.topological_levels().unwrap();
        assert_eq!(levels.len(), 2);
        assert_eq!(levels[1].len(), 3);
    }

    #[test]
    fn cycle_is_rejected() {
        let result = DependencyGraph::new([
            ("a".to_string(), ["b".to_string()].into_iter().collect()),
            ("b".to_string(), ["a".to_string()].into_iter().collect()),
        ]);
        assert_matches::assert_matches!(result, Err(PolycheckError::DependencyCycle { .. }));
    }

    #[test]
    fn unknown_dependency_is_rejected() {
        let result = DependencyGraph::new([(
            "a".to_string(),
            ["ghost".to_string()].into_iter().collect(),
        )]);
        assert_matches::assert_matches!(result, Err(PolycheckError::UnknownDependency { .. }));
    }

    #[test]
    fn unknown_requested_tool_lands_in_level_zero() {
        let graph = DependencyGraph::default_graph();
        let mut requested: BTreeSet<String> = BTreeSet::new();
        requested.insert("totally-custom-tool".to_string());
        let restricted = graph.restricted_to(&requested);
        let levels = restricted.topological_levels().unwrap();
        assert_eq!(levels.len(), 1);
        assert!(levels[0].contains("totally-custom-tool"));
    }

    #[test]
    fn partition_covers_every_tool_exactly_once() {
        let graph = DependencyGraph::default_graph();
        let levels = graph.topological_levels().unwrap();
        let total: usize = levels.iter().map(BTreeSet::len).sum();
        assert_eq!(total, graph.total_tools());
    }
}
