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

use std::collections::BTreeMap;

use polycheck_core::DependencyGraph;

#[test]
fn execution_plan_is_idempotent() {
    let graph = DependencyGraph::default_graph();
    let first = graph.execution_plan().unwrap();
    let second = graph.execution_plan().unwrap();
    assert_eq!(first, second);
}

#[test]
fn statistics_without_durations_omits_time_estimates() {
    let graph = DependencyGraph::default_graph();
    let stats = graph.statistics(&BTreeMap::new()).unwrap();
    assert_eq!(stats.total_tools, graph.total_tools());
    assert!(stats.sequential_time_estimate.is_none());
    assert!(stats.parallel_time_estimate.is_none());
    assert!(stats.speedup_factor.is_none());
}

#[test]
fn statistics_with_full_durations_computes_speedup() {
    let graph = DependencyGraph::new([
        ("fmt".to_string(), Default::default()),
        ("lint1".to_string(), ["fmt".to_string()].into_iter().collect()),
        ("lint2".to_string(), ["fmt".to_string()].into_iter().collect()),
    ])
    .unwrap();

    let mut durations = BTreeMap::new();
    durations.insert("fmt".to_string(), 1.0);
    durations.insert("lint1".to_string(), 2.0);
    durations.insert("lint2".to_string(), 3.0);

    let stats = graph.statistics(&durations).unwrap();
    // sequential = 1 + 2 + 3 = 6; parallel = max(1) + max(2,3) = 1 + 3 = 4
    assert_eq!(stats.sequential_time_estimate, Some(6.0));
    assert_eq!(stats.parallel_time_estimate, Some(4.0));
    assert_eq!(stats.speedup_factor, Some(1.5));
}

#[test]
fn visualize_dependencies_names_every_prerequisite() {
    let graph = DependencyGraph::new([
        ("a".to_string(), Default::default()),
        ("b".to_string(), ["a".to_string()].into_iter().collect()),
    ])
    .unwrap();
    let visual = graph.visualize_dependencies();
    assert!(visual.contains("a (no dependencies)"));
    assert!(visual.contains("b <- a"));
}

#[test]
fn default_graph_visualization_snapshot() {
    let graph = DependencyGraph::default_graph();
    insta::assert_snapshot!(graph.visualize_dependencies(), @r"
    autoflake (no dependencies)
    bandit <- autoflake, isort, python-black
    chapel (no dependencies)
    flake8 <- autoflake, isort, python-black
    gitlab-ci (no dependencies)
    hadolint (no dependencies)
    isort (no dependencies)
    js-eslint <- js-prettier
    js-prettier (no dependencies)
    mypy <- autoflake, isort, python-black
    python-black (no dependencies)
    ruff <- autoflake, isort, python-black
    shellcheck (no dependencies)
    taplo (no dependencies)
    terraform (no dependencies)
    yamllint (no dependencies)
    ");
}

#[test]
fn restricted_graph_drops_edges_to_tools_outside_the_request() {
    let graph = DependencyGraph::default_graph();
    let mut requested = std::collections::BTreeSet::new();
    requested.insert("ruff".to_string());
    let restricted = graph.restricted_to(&requested);
    let levels = restricted.topological_levels().unwrap();
    // ruff's prerequisites (the python formatters) aren't requested, so it
    // lands alone in level 0 rather than waiting on tools that won't run.
    assert_eq!(levels.len(), 1);
    assert!(levels[0].contains("ruff"));
}
