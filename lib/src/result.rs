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

use std::path::PathBuf;
use std::time::Duration;

/// Outcome of running one validator on one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub tool: String,
    pub filepath: PathBuf,
    pub success: bool,
    pub messages: Vec<String>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub fixed: bool,
    pub duration_ms: u64,
}

impl ValidationResult {
    pub fn ok(tool: impl Into<String>, filepath: impl Into<PathBuf>, duration: Duration) -> Self {
        Self {
            tool: tool.into(),
            filepath: filepath.into(),
            success: true,
            messages: Vec::new(),
            errors: Vec::new(),
            warnings: Vec::new(),
            fixed: false,
            duration_ms: duration.as_millis() as u64,
        }
    }

    pub fn failed(
        tool: impl Into<String>,
        filepath: impl Into<PathBuf>,
        duration: Duration,
        errors: Vec<String>,
    ) -> Self {
        Self {
            tool: tool.into(),
            filepath: filepath.into(),
            success: false,
            messages: Vec::new(),
            errors,
            warnings: Vec::new(),
            fixed: false,
            duration_ms: duration.as_millis() as u64,
        }
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }
}

/// Aggregate outcome of one tool across every file it matched in a run.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolResult {
    pub tool_name: String,
    pub success: bool,
    pub duration: Duration,
    pub errors: usize,
    pub warnings: usize,
    pub output: String,
}

impl ToolResult {
    /// Folds the per-file results of a single tool into one summary.
    ///
    /// `success` follows the invariant in the data model: true iff no
    /// constituent result failed.
    pub fn from_file_results(tool_name: &str, results: &[ValidationResult]) -> Self {
        let success = results.iter().all(|r| r.success);
        let duration = results
            .iter()
            .map(|r| Duration::from_millis(r.duration_ms))
            .max()
            .unwrap_or_default();
        let errors = results.iter().map(ValidationResult::error_count).sum();
        let warnings = results.iter().map(ValidationResult::warning_count).sum();
        let output = results
            .iter()
            .flat_map(|r| r.errors.iter().chain(r.warnings.iter()))
            .cloned()
            .collect::<Vec<_>>()
            .join("\n");
        Self {
            tool_name: tool_name.to_string(),
            success,
            duration,
            errors,
            warnings,
            output,
        }
    }

    pub fn cancelled(tool_name: &str) -> Self {
        Self {
            tool_name: tool_name.to_string(),
            success: false,
            duration: Duration::ZERO,
            errors: 0,
            warnings: 0,
            output: "cancelled".to_string(),
        }
    }
}
