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

//! Argument surface: three user-facing subcommands (`check`, `fix`,
//! `tools`) plus a `util` group for shell completions and man-page
//! generation.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(name = "polycheck", version, about = "Parallel orchestrator for formatters, linters and security scanners")]
pub struct Cli {
    /// Overrides `RUST_LOG`; accepts `tracing_subscriber::EnvFilter` syntax.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run every enabled validator in check mode and report pass/fail.
    Check(RunArgs),
    /// Run every enabled validator with auto-fix on, rewriting files in place.
    Fix(RunArgs),
    /// Inspect the dependency graph and tool selection without running anything.
    Tools(ToolsArgs),
    /// Shell completions and man-page generation.
    #[command(subcommand)]
    Util(UtilCommand),
}

#[derive(Debug, clap::Args)]
pub struct RunArgs {
    /// Files or directories to scan. Defaults to the current directory.
    pub paths: Vec<PathBuf>,

    /// Restrict to these tool names (registry names, e.g. `python-black,ruff`).
    #[arg(long, value_delimiter = ',')]
    pub tools: Option<Vec<String>>,

    /// Worker count per execution level. Defaults to the logical CPU count.
    #[arg(long)]
    pub jobs: Option<usize>,

    /// Disable the live Progress TUI even on a TTY; falls back to log lines.
    #[arg(long)]
    pub no_tui: bool,

    /// Additional TOML config layer, applied on top of the repo/user config.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Inline `[tools.<name>]` TOML fragments, applied after `--config`, in order given.
    #[arg(long = "config-toml")]
    pub config_toml: Vec<String>,

    /// Glob patterns (relative to cwd) to exclude from discovery.
    #[arg(long)]
    pub exclude: Vec<String>,

    /// Reserved for a future HTTP-backed schema cache refresh; currently a no-op.
    #[arg(long)]
    pub refresh: bool,
}

#[derive(Debug, clap::Args)]
pub struct ToolsArgs {
    /// Print `visualize_dependencies()`.
    #[arg(long)]
    pub graph: bool,

    /// Print `get_statistics()`.
    #[arg(long)]
    pub stats: bool,

    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long = "config-toml")]
    pub config_toml: Vec<String>,
}

#[derive(Debug, Subcommand)]
pub enum UtilCommand {
    /// Emit a shell completion script on stdout.
    Completions { shell: Shell },
    /// Emit a man page on stdout.
    Man,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Elvish,
    PowerShell,
}

impl From<Shell> for clap_complete::Shell {
    fn from(shell: Shell) -> Self {
        match shell {
            Shell::Bash => Self::Bash,
            Shell::Zsh => Self::Zsh,
            Shell::Fish => Self::Fish,
            Shell::Elvish => Self::Elvish,
            Shell::PowerShell => Self::PowerShell,
        }
    }
}
