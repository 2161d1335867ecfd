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

//! Bridges the executor's `(tool_name, status)` progress callback to
//! whichever sink the CLI selected: the live [`crate::tui::ProgressTui`],
//! or one `tracing::info!` line per transition when stdout isn't a TTY or
//! `--no-tui` was passed. Validator callables additionally push interim
//! file/error/warning counts into the same sink while a tool is still
//! `RUNNING`, ahead of the terminal transition the executor itself drives.

use std::sync::Arc;

use polycheck_core::ProgressStatus;

use crate::tui::{ProgressTui, ToolState, TuiUpdate};

pub trait ProgressSink: Send + Sync {
    /// Reports a running tool's counts so far, without changing its state.
    fn tick(&self, name: &str, files_processed: u32, errors: u32, warnings: u32);

    /// Reflects the executor's own state-transition stream.
    fn transition(&self, name: &str, status: ProgressStatus);
}

pub struct TuiSink {
    tui: Arc<ProgressTui>,
}

impl TuiSink {
    pub fn new(tui: Arc<ProgressTui>) -> Self {
        Self { tui }
    }
}

impl ProgressSink for TuiSink {
    fn tick(&self, name: &str, files_processed: u32, errors: u32, warnings: u32) {
        self.tui.update_tool(
            name,
            ToolState::Running,
            TuiUpdate {
                files_processed: Some(files_processed),
                errors: Some(errors),
                warnings: Some(warnings),
            },
        );
    }

    fn transition(&self, name: &str, status: ProgressStatus) {
        let state = match status {
            ProgressStatus::Running => ToolState::Running,
            ProgressStatus::Success => ToolState::Success,
            ProgressStatus::Failed => ToolState::Failed,
        };
        self.tui.update_tool(name, state, TuiUpdate::default());
    }
}

/// Non-interactive fallback: every transition becomes one structured log
/// line; interim ticks are not logged (they'd flood CI output for no
/// benefit once the final per-tool summary line covers the same ground).
pub struct LogSink;

impl ProgressSink for LogSink {
    fn tick(&self, _name: &str, _files_processed: u32, _errors: u32, _warnings: u32) {}

    fn transition(&self, name: &str, status: ProgressStatus) {
        crate::tui::log_transition(name, status.as_str());
    }
}

/// True when stdout is connected to a terminal, i.e. a live TUI would
/// actually render somewhere a human can see it.
pub fn stdout_is_tty() -> bool {
    use std::io::IsTerminal as _;
    std::io::stdout().is_terminal()
}
