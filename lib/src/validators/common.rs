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

//! Shared plumbing used by every concrete validator: running the backing
//! binary and turning its outcome into a [`ValidationResult`]. Each tool
//! module supplies only what's actually tool-specific (argv shape, output
//! parsing, severity mapping).

use std::path::Path;
use std::time::Instant;

use crate::result::ValidationResult;
use crate::sidecar::SidecarClient;
use crate::subprocess::{self, CommandError, CommandOutput};

/// Checks a binary's availability by running it with a single innocuous
/// flag (`--version` for almost every tool in this table) and treating any
/// successful spawn as "available" regardless of exit code — some tools
/// exit non-zero on `--version` under certain shells but the fact that they
/// spawned at all is what we care about here.
pub fn probe_available(sidecar: &SidecarClient, tool: &str, command: &str) -> bool {
    let argv = vec![command.to_string(), "--version".to_string()];
    subprocess::execute_command(sidecar, tool, &argv, Path::new("."), None).is_ok()
}

/// Runs `argv` in `path`'s parent directory (or `.` for a bare filename)
/// and converts transport failures directly into a failed result, so each
/// validator's `validate` only needs to handle the success path.
pub fn run(
    sidecar: &SidecarClient,
    tool: &str,
    path: &Path,
    argv: Vec<String>,
) -> Result<(CommandOutput, Instant), ValidationResult> {
    let start = Instant::now();
    let cwd = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
    match subprocess::execute_command(sidecar, tool, &argv, cwd, None) {
        Ok(output) => Ok((output, start)),
        Err(err) => Err(command_error_result(tool, path, start, err)),
    }
}

pub fn command_error_result(
    tool: &str,
    path: &Path,
    start: Instant,
    err: CommandError,
) -> ValidationResult {
    let message = match &err {
        CommandError::ToolMissing { tool } => format!("{tool} not available"),
        CommandError::Timeout => "timeout after 30s".to_string(),
        other => other.to_string(),
    };
    ValidationResult::failed(tool, path, start.elapsed(), vec![message])
}

/// Bandit/ESLint/Shellcheck/Ruff all report via JSON; MyPy/Flake8/Hadolint/
/// YAMLLint via one-diagnostic-per-line text. Callers classify each raw
/// line or JSON item into errors vs. warnings per the tool's own convention
/// before handing them here.
pub fn result_from_diagnostics(
    tool: &str,
    path: &Path,
    start: Instant,
    success_exit: bool,
    errors: Vec<String>,
    warnings: Vec<String>,
) -> ValidationResult {
    ValidationResult {
        tool: tool.to_string(),
        filepath: path.to_path_buf(),
        success: success_exit && errors.is_empty(),
        messages: Vec::new(),
        errors,
        warnings,
        fixed: false,
        duration_ms: start.elapsed().as_millis() as u64,
    }
}

/// Parses `stdout` as a JSON array of diagnostics, falling back to treating
/// the raw output as a single unparsed error when it isn't valid JSON.
pub fn parse_json_array(stdout: &str) -> Result<Vec<serde_json::Value>, String> {
    if stdout.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str::<Vec<serde_json::Value>>(stdout).map_err(|_| stdout.to_string())
}

/// Splits non-empty lines out of `text`, trimming trailing carriage returns
/// so Windows-style tool output doesn't leave stray `\r` in messages.
pub fn non_empty_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Shared shape for the four "check then fix" validators (Autoflake, isort,
/// Taplo, Terraform): run the check pass first so a file that already
/// satisfies the tool exits early with `fixed=false`, only invoking the fix
/// pass when the check reports something to change.
pub fn check_then_fix(
    sidecar: &SidecarClient,
    tool: &str,
    path: &Path,
    check_argv: Vec<String>,
    fix_argv: Vec<String>,
) -> ValidationResult {
    let start = Instant::now();
    let cwd = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));

    let check = match subprocess::execute_command(sidecar, tool, &check_argv, cwd, None) {
        Ok(output) => output,
        Err(err) => return command_error_result(tool, path, start, err),
    };
    if check.exit_code == 0 {
        let mut result = ValidationResult::ok(tool, path, start.elapsed());
        result.fixed = false;
        return result;
    }

    let fix = match subprocess::execute_command(sidecar, tool, &fix_argv, cwd, None) {
        Ok(output) => output,
        Err(err) => return command_error_result(tool, path, start, err),
    };
    if fix.exit_code == 0 {
        let mut result = ValidationResult::ok(tool, path, start.elapsed());
        result.fixed = true;
        result
    } else {
        ValidationResult::failed(tool, path, start.elapsed(), vec![fix.stderr])
    }
}

/// A cheap content fingerprint used to detect whether a formatter actually
/// rewrote `path`'s bytes, without trusting each tool's own "did I change
/// anything" signal (which several tools don't expose at all in JSON mode).
pub fn fingerprint(path: &Path) -> Option<u64> {
    use std::hash::Hash as _;
    use std::hash::Hasher as _;
    let bytes = std::fs::read(path).ok()?;
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    bytes.hash(&mut hasher);
    Some(hasher.finish())
}
