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

//! Dependency-aware parallel executor: runs one callable per requested tool,
//! level by level, with a `rayon` thread pool sized per level. Level
//! boundaries are the only synchronization guarantee — within a level,
//! tools may complete in any order.

use std::collections::BTreeMap;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;

use crate::error::PolycheckResult;
use crate::graph::DependencyGraph;
use crate::result::ToolResult;

/// One state transition observed for a tool: `(tool_name,
/// "running"|"success"|"failed")`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressStatus {
    Running,
    Success,
    Failed,
}

impl ProgressStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Success => "success",
            Self::Failed => "failed",
        }
    }
}

/// Reentrant-safe: called concurrently from worker threads, one call per
/// tool per state transition.
pub type ProgressCallback<'a> = dyn Fn(&str, ProgressStatus) + Send + Sync + 'a;

/// One unit of work: running a single tool across every file it matched,
/// producing its aggregate [`ToolResult`].
pub type ToolCallable = Box<dyn Fn() -> ToolResult + Send + Sync>;

/// Executes validators level-by-level against a [`DependencyGraph`].
pub struct Executor<'g> {
    graph: &'g DependencyGraph,
}

impl<'g> Executor<'g> {
    pub fn new(graph: &'g DependencyGraph) -> Self {
        Self { graph }
    }

    /// Runs every tool in `tools`, respecting level ordering from the graph
    /// restricted to the requested tool set. `max_workers` bounds the pool
    /// size per level (default: logical CPU count, clamped to `[1, level
    /// size]`); `cancel`, if set, is polled between levels and causes every
    /// tool in an unreached level to synthesize a `"cancelled"` result
    /// instead of running.
    pub fn execute_tools(
        &self,
        tools: BTreeMap<String, ToolCallable>,
        progress_callback: Option<&ProgressCallback<'_>>,
        max_workers: Option<usize>,
        cancel: Option<&AtomicBool>,
    ) -> PolycheckResult<Vec<ToolResult>> {
        let requested = tools.keys().cloned().collect();
        let plan = self.graph.restricted_to(&requested).topological_levels()?;

        let mut results = Vec::with_capacity(tools.len());
        let mut cancelled = false;

        for level in plan {
            if !cancelled && cancel.is_some_and(|c| c.load(Ordering::SeqCst)) {
                cancelled = true;
            }
            if cancelled {
                results.extend(level.iter().map(|name| ToolResult::cancelled(name)));
                continue;
            }

            let worker_count = max_workers
                .unwrap_or_else(num_cpus::get)
                .max(1)
                .min(level.len().max(1));
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(worker_count)
                .build()
                .expect("building a bounded rayon pool never fails for a sane thread count");

            let level_results: Vec<ToolResult> = pool.install(|| {
                level
                    .par_iter()
                    .map(|name| {
                        if let Some(callback) = progress_callback {
                            callback(name, ProgressStatus::Running);
                        }
                        let callable = tools
                            .get(name)
                            .expect("every tool in a level came from the requested set");
                        let result = std::panic::catch_unwind(AssertUnwindSafe(callable))
                            .unwrap_or_else(|_| crashed(name));
                        if let Some(callback) = progress_callback {
                            let status = if result.success {
                                ProgressStatus::Success
                            } else {
                                ProgressStatus::Failed
                            };
                            callback(name, status);
                        }
                        result
                    })
                    .collect()
            });
            results.extend(level_results);
        }

        Ok(results)
    }
}

fn crashed(tool_name: &str) -> ToolResult {
    ToolResult {
        tool_name: tool_name.to_string(),
        success: false,
        duration: std::time::Duration::ZERO,
        errors: 1,
        warnings: 0,
        output: format!("{tool_name} panicked during execution"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    fn ok_result(name: &str) -> ToolResult {
        ToolResult {
            tool_name: name.to_string(),
            success: true,
            duration: Duration::ZERO,
            errors: 0,
            warnings: 0,
            output: String::new(),
        }
    }

    fn failed_result(name: &str) -> ToolResult {
        ToolResult {
            tool_name: name.to_string(),
            success: false,
            duration: Duration::ZERO,
            errors: 1,
            warnings: 0,
            output: String::new(),
        }
    }

    #[test]
    fn linear_chain_runs_in_order_and_every_tool_appears_once() {
        let graph = DependencyGraph::new([
            ("a".to_string(), BTreeSet::new()),
            ("b".to_string(), ["a".to_string()].into_iter().collect()),
            ("c".to_string(), ["b".to_string()].into_iter().collect()),
        ])
        .unwrap();
        let executor = Executor::new(&graph);

        let order = Arc::new(Mutex::new(Vec::new()));
        let mut tools: BTreeMap<String, ToolCallable> = BTreeMap::new();
        for name in ["a", "b", "c"] {
            let order = Arc::clone(&order);
            let name_owned = name.to_string();
            tools.insert(
                name.to_string(),
                Box::new(move || {
                    order.lock().unwrap().push(name_owned.clone());
                    ok_result(&name_owned)
                }),
            );
        }

        let results = executor.execute_tools(tools, None, None, None).unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(*order.lock().unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn failure_does_not_cancel_downstream_tools() {
        let graph = DependencyGraph::new([
            ("a".to_string(), BTreeSet::new()),
            ("b".to_string(), ["a".to_string()].into_iter().collect()),
        ])
        .unwrap();
        let executor = Executor::new(&graph);

        let mut tools: BTreeMap<String, ToolCallable> = BTreeMap::new();
        tools.insert("a".to_string(), Box::new(|| failed_result("a")));
        tools.insert("b".to_string(), Box::new(|| ok_result("b")));

        let results = executor.execute_tools(tools, None, None, None).unwrap();
        let a = results.iter().find(|r| r.tool_name == "a").unwrap();
        let b = results.iter().find(|r| r.tool_name == "b").unwrap();
        assert!(!a.success);
        assert!(b.success);
    }

    #[test]
    fn unknown_tool_lands_in_level_zero_and_still_runs() {
        let graph = DependencyGraph::default_graph();
        let executor = Executor::new(&graph);

        let mut tools: BTreeMap<String, ToolCallable> = BTreeMap::new();
        tools.insert(
            "totally-custom-tool".to_string(),
            Box::new(|| ok_result("totally-custom-tool")),
        );

        let results = executor.execute_tools(tools, None, None, None).unwrap();
        assert_eq!(results.len(), 1);
        assert!(results[0].success);
    }

    #[test]
    fn progress_callback_observes_running_before_terminal_state() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let graph = DependencyGraph::new([("a".to_string(), BTreeSet::new())]).unwrap();
        let executor = Executor::new(&graph);

        let events = Arc::new(Mutex::new(Vec::new()));
        let mut tools: BTreeMap<String, ToolCallable> = BTreeMap::new();
        tools.insert("a".to_string(), Box::new(|| ok_result("a")));

        let events_for_cb = Arc::clone(&events);
        let callback = move |name: &str, status: ProgressStatus| {
            tracing::debug!(tool = name, ?status, "progress callback observed");
            events_for_cb
                .lock()
                .unwrap()
                .push((name.to_string(), status));
        };

        executor
            .execute_tools(tools, Some(&callback), None, None)
            .unwrap();
        let events = events.lock().unwrap();
        assert_eq!(events[0], ("a".to_string(), ProgressStatus::Running));
        assert_eq!(events[1], ("a".to_string(), ProgressStatus::Success));
    }

    #[test]
    fn cancellation_marks_unstarted_levels() {
        let graph = DependencyGraph::new([
            ("a".to_string(), BTreeSet::new()),
            ("b".to_string(), ["a".to_string()].into_iter().collect()),
        ])
        .unwrap();
        let executor = Executor::new(&graph);

        let cancel = AtomicBool::new(true);
        let mut tools: BTreeMap<String, ToolCallable> = BTreeMap::new();
        tools.insert("a".to_string(), Box::new(|| ok_result("a")));
        tools.insert("b".to_string(), Box::new(|| ok_result("b")));

        let results = executor
            .execute_tools(tools, None, None, Some(&cancel))
            .unwrap();
        assert!(results.iter().all(|r| !r.success));
        assert!(results.iter().all(|r| r.output == "cancelled"));
    }
}
