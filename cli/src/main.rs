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

//! `polycheck`: the CLI binary over `polycheck-core`. Three user-facing
//! subcommands (`check`, `fix`, `tools`) plus a `util` group for shell
//! completions and man-page generation.
//!
//! Exit codes: `0` every selected validator succeeded, `1` at least one
//! failed, `2` a configuration or invocation error prevented any validator
//! from running.

mod cli;
mod commands;
mod config_resolve;
mod discovery;
mod error;
mod progress;
mod tui;

use clap::Parser as _;

use cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    let outcome = match cli.command {
        Command::Check(args) => commands::run::run(args, false),
        Command::Fix(args) => commands::run::run(args, true),
        Command::Tools(args) => commands::tools::run(args).map(|()| true),
        Command::Util(command) => commands::util::run(command).map(|()| true),
    };

    std::process::exit(match outcome {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(err) => {
            tracing::error!("{err}");
            err.exit_code()
        }
    });
}

fn init_logging(log_level: Option<&str>) {
    use tracing_subscriber::EnvFilter;

    let filter = log_level
        .map(EnvFilter::new)
        .unwrap_or_else(|| EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

