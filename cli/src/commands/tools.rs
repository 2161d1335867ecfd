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

//! `polycheck tools [--graph|--stats]`: prints the dependency graph or its
//! statistics without running any validator.

use std::collections::BTreeMap;

use polycheck_core::DependencyGraph;

use crate::cli::ToolsArgs;
use crate::config_resolve;
use crate::error::CliError;

pub fn run(args: ToolsArgs) -> Result<(), CliError> {
    let config = config_resolve::resolve(args.config.as_deref(), &args.config_toml)?;
    let enabled: std::collections::BTreeSet<String> = config
        .tools
        .iter()
        .filter(|(_, tool)| tool.is_enabled())
        .map(|(name, _)| name.clone())
        .collect();

    let graph = DependencyGraph::default_graph().restricted_to(&enabled);

    if args.stats || !args.graph {
        let stats = graph.statistics(&BTreeMap::new())?;
        println!("total tools:     {}", stats.total_tools);
        println!("total levels:    {}", stats.total_levels);
        println!("max parallelism: {}", stats.max_parallelism);
        println!("avg parallelism: {:.2}", stats.avg_parallelism);
    }
    if args.graph {
        print!("{}", graph.visualize_dependencies());
    }
    Ok(())
}
