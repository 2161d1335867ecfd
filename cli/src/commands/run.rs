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

//! Shared implementation behind `polycheck check` and `polycheck fix`: the
//! two subcommands differ only in `auto_fix`.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use globset::{Glob, GlobSet, GlobSetBuilder};
use polycheck_core::{DependencyGraph, Executor, ProgressStatus, SidecarClient, ToolCallable, ToolResult, ValidatorRegistry};

use crate::cli::RunArgs;
use crate::error::CliError;
use crate::progress::{LogSink, ProgressSink, TuiSink, stdout_is_tty};
use crate::tui::ProgressTui;
use crate::{config_resolve, discovery};

const TUI_REFRESH_RATE: Duration = Duration::from_millis(100);

pub fn run(args: RunArgs, auto_fix: bool) -> Result<bool, CliError> {
    let config = config_resolve::resolve(args.config.as_deref(), &args.config_toml)?;
    let registry = Arc::new(ValidatorRegistry::from_config(&config));

    let requested = resolve_requested_tools(&registry, args.tools.as_deref())?;
    let excludes = compile_excludes(&args.exclude);
    let files = discovery::discover_files(&args.paths, &excludes)?;

    tracing::debug!(file_count = files.len(), tools = ?requested, "resolved run inputs");

    let sidecar = Arc::new(SidecarClient::default_at(sidecar_runtime_dir()));
    let graph = DependencyGraph::default_graph();
    let executor = Executor::new(&graph);

    let use_tui = !args.no_tui && stdout_is_tty();
    let tui = use_tui.then(|| Arc::new(ProgressTui::new(TUI_REFRESH_RATE)));
    let sink: Arc<dyn ProgressSink> = match &tui {
        Some(tui) => Arc::new(TuiSink::new(Arc::clone(tui))),
        None => Arc::new(LogSink),
    };

    if let Some(tui) = &tui {
        tui.start(&requested)
            .map_err(CliError::Terminal)?;
    }

    let tools = build_tool_callables(&registry, &sidecar, &sink, &files, &requested, auto_fix);
    let callback = {
        let sink = Arc::clone(&sink);
        move |name: &str, status: ProgressStatus| sink.transition(name, status)
    };

    let results = executor.execute_tools(tools, Some(&callback), args.jobs, None)?;

    if let Some(tui) = &tui {
        tui.stop().map_err(CliError::Terminal)?;
    }

    report(&results);
    Ok(results.iter().all(|r| r.success))
}

fn resolve_requested_tools(
    registry: &ValidatorRegistry,
    requested: Option<&[String]>,
) -> Result<Vec<String>, CliError> {
    match requested {
        None => Ok(registry.names().map(str::to_string).collect()),
        Some(names) => {
            for name in names {
                if registry.get(name).is_none() {
                    return Err(CliError::UnknownRequestedTool { name: name.clone() });
                }
            }
            Ok(names.to_vec())
        }
    }
}

fn compile_excludes(patterns: &[String]) -> GlobSet {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        if let Ok(glob) = Glob::new(pattern) {
            builder.add(glob);
        }
    }
    builder.build().unwrap_or_else(|_| GlobSet::empty())
}

/// One [`ToolCallable`] per requested tool: iterates every file the
/// validator claims via `can_handle`, reporting interim counts to `sink`
/// between files, then folds the per-file results into one [`ToolResult`].
fn build_tool_callables(
    registry: &Arc<ValidatorRegistry>,
    sidecar: &Arc<SidecarClient>,
    sink: &Arc<dyn ProgressSink>,
    files: &[PathBuf],
    requested: &[String],
    auto_fix: bool,
) -> BTreeMap<String, ToolCallable> {
    requested
        .iter()
        .map(|name| {
            let matched: Vec<PathBuf> = files
                .iter()
                .filter(|f| registry.get(name).is_some_and(|v| v.can_handle(f)))
                .cloned()
                .collect();

            let registry = Arc::clone(registry);
            let sidecar = Arc::clone(sidecar);
            let sink = Arc::clone(sink);
            let tool_name = name.clone();

            let callable: ToolCallable = Box::new(move || {
                let validator = registry
                    .get(&tool_name)
                    .expect("tool present at callable-build time");
                let mut file_results = Vec::with_capacity(matched.len());
                let mut errors = 0u32;
                let mut warnings = 0u32;
                for (processed, path) in matched.iter().enumerate() {
                    tracing::debug!(tool = %tool_name, ?path, "spawning validator");
                    let result = validator.validate(path, &sidecar, auto_fix);
                    errors += result.error_count() as u32;
                    warnings += result.warning_count() as u32;
                    file_results.push(result);
                    sink.tick(&tool_name, (processed + 1) as u32, errors, warnings);
                }
                ToolResult::from_file_results(&tool_name, &file_results)
            });
            (name.clone(), callable)
        })
        .collect()
}

fn sidecar_runtime_dir() -> PathBuf {
    std::env::var_os("XDG_RUNTIME_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(std::env::temp_dir)
}

fn report(results: &[ToolResult]) {
    for result in results {
        if result.success {
            println!(
                "{:<16} ok      {:>6.1}s  {} warnings",
                result.tool_name,
                result.duration.as_secs_f64(),
                result.warnings
            );
        } else {
            println!(
                "{:<16} FAILED  {:>6.1}s  {} errors, {} warnings",
                result.tool_name,
                result.duration.as_secs_f64(),
                result.errors,
                result.warnings
            );
            for line in result.output.lines() {
                println!("  {line}");
            }
        }
    }
}
