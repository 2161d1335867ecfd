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

//! `polycheck util completions`/`polycheck util man`: ambient developer
//! ergonomics, built on `clap_complete`/`clap_mangen`.

use clap::CommandFactory as _;

use crate::cli::{Cli, Shell, UtilCommand};
use crate::error::CliError;

pub fn run(command: UtilCommand) -> Result<(), CliError> {
    match command {
        UtilCommand::Completions { shell } => emit_completions(shell),
        UtilCommand::Man => emit_man(),
    }
}

fn emit_completions(shell: Shell) -> Result<(), CliError> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(clap_complete::Shell::from(shell), &mut cmd, name, &mut std::io::stdout());
    Ok(())
}

fn emit_man() -> Result<(), CliError> {
    let cmd = Cli::command();
    let man = clap_mangen::Man::new(cmd);
    man.render(&mut std::io::stdout())?;
    Ok(())
}
