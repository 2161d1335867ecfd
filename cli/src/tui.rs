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

//! Live terminal dashboard for an in-flight run: one row per tool, a
//! steady-ticker render loop, and a single mutex guarding every read and
//! write of the snapshot. The render thread only holds the mutex long
//! enough to clone the snapshot; the actual terminal I/O happens after it's
//! released, so a slow redraw never blocks a worker thread's `update_tool`
//! call.

use std::collections::BTreeMap;
use std::io::{self, Stdout};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};

/// One tool's lifecycle state. `Success`, `Failed` and `Skipped` are
/// absorbing: once reached, `update_tool` silently ignores further
/// transitions for that tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolState {
    Pending,
    Running,
    Success,
    Failed,
    Skipped,
}

impl ToolState {
    fn is_terminal(self) -> bool {
        matches!(self, Self::Success | Self::Failed | Self::Skipped)
    }

    fn glyph(self) -> &'static str {
        match self {
            Self::Pending => "·",
            Self::Running => "◐",
            Self::Success => "✓",
            Self::Failed => "✗",
            Self::Skipped => "–",
        }
    }

    fn color(self) -> Color {
        match self {
            Self::Pending => Color::DarkGray,
            Self::Running => Color::Yellow,
            Self::Success => Color::Green,
            Self::Failed => Color::Red,
            Self::Skipped => Color::DarkGray,
        }
    }
}

#[derive(Debug, Clone)]
struct ToolRow {
    state: ToolState,
    files_processed: u32,
    errors: u32,
    warnings: u32,
    started_at: Option<Instant>,
    finished_at: Option<Instant>,
}

impl ToolRow {
    fn new() -> Self {
        Self {
            state: ToolState::Pending,
            files_processed: 0,
            errors: 0,
            warnings: 0,
            started_at: None,
            finished_at: None,
        }
    }

    fn elapsed(&self, now: Instant) -> Duration {
        match (self.started_at, self.finished_at) {
            (Some(start), Some(end)) => end.saturating_duration_since(start),
            (Some(start), None) => now.saturating_duration_since(start),
            (None, _) => Duration::ZERO,
        }
    }
}

struct Snapshot {
    rows: BTreeMap<String, ToolRow>,
    order: Vec<String>,
    start_time: Instant,
}

/// Optional per-call fields for [`ProgressTui::update_tool`]; omitted fields
/// leave the corresponding counter untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct TuiUpdate {
    pub files_processed: Option<u32>,
    pub errors: Option<u32>,
    pub warnings: Option<u32>,
}

/// Thread-safe live dashboard. Construct once per run, call [`Self::start`]
/// before dispatching any tool, [`Self::update_tool`] from worker threads as
/// tools transition, and [`Self::stop`] once the executor drains.
pub struct ProgressTui {
    state: Arc<Mutex<Snapshot>>,
    refresh_rate: Duration,
    render_thread: Mutex<Option<JoinHandle<io::Result<()>>>>,
    stop_flag: Arc<std::sync::atomic::AtomicBool>,
}

impl ProgressTui {
    /// `refresh_rate` is the render loop's tick interval (100ms by
    /// default); it is a configuration parameter here, never a hardcoded
    /// constant.
    pub fn new(refresh_rate: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(Snapshot {
                rows: BTreeMap::new(),
                order: Vec::new(),
                start_time: Instant::now(),
            })),
            refresh_rate,
            render_thread: Mutex::new(None),
            stop_flag: Arc::new(std::sync::atomic::AtomicBool::new(false)),
        }
    }

    /// Initializes one `PENDING` row per name in `tool_names`, then spawns
    /// the render loop on its own OS thread.
    pub fn start(&self, tool_names: &[String]) -> io::Result<()> {
        {
            let mut snapshot = self.state.lock().expect("tui mutex poisoned");
            snapshot.start_time = Instant::now();
            snapshot.order = tool_names.to_vec();
            for name in tool_names {
                snapshot.rows.insert(name.clone(), ToolRow::new());
            }
        }

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let state = Arc::clone(&self.state);
        let stop_flag = Arc::clone(&self.stop_flag);
        let tick = self.refresh_rate;
        let handle = std::thread::spawn(move || -> io::Result<()> {
            while !stop_flag.load(std::sync::atomic::Ordering::Relaxed) {
                let frame = {
                    let snapshot = state.lock().expect("tui mutex poisoned");
                    render_frame(&snapshot)
                };
                terminal.draw(|f| draw(f.area(), f.buffer_mut(), &frame))?;
                std::thread::sleep(tick);
            }
            let frame = {
                let snapshot = state.lock().expect("tui mutex poisoned");
                render_frame(&snapshot)
            };
            terminal.draw(|f| draw(f.area(), f.buffer_mut(), &frame))?;
            Ok(())
        });

        *self.render_thread.lock().expect("tui mutex poisoned") = Some(handle);
        Ok(())
    }

    /// Atomically updates one row. Silently a no-op if `name` isn't a row
    /// started by [`Self::start`], or if the row has already reached a
    /// terminal state — terminal states are absorbing.
    pub fn update_tool(&self, name: &str, state: ToolState, update: TuiUpdate) {
        let mut snapshot = self.state.lock().expect("tui mutex poisoned");
        let now = Instant::now();
        let Some(row) = snapshot.rows.get_mut(name) else {
            return;
        };
        if row.state.is_terminal() {
            return;
        }
        if state == ToolState::Running {
            row.started_at.get_or_insert(now);
        }
        if state.is_terminal() {
            row.finished_at.get_or_insert(now);
        }
        row.state = state;
        if let Some(files) = update.files_processed {
            row.files_processed = files;
        }
        if let Some(errors) = update.errors {
            row.errors = errors;
        }
        if let Some(warnings) = update.warnings {
            row.warnings = warnings;
        }
    }

    /// Joins the render thread after one final render, then restores the
    /// terminal (raw mode off, alternate screen left, cursor visible,
    /// trailing newline).
    pub fn stop(&self) -> io::Result<()> {
        self.stop_flag
            .store(true, std::sync::atomic::Ordering::Relaxed);
        if let Some(handle) = self.render_thread.lock().expect("tui mutex poisoned").take() {
            handle
                .join()
                .unwrap_or_else(|_| Err(io::Error::other("tui render thread panicked")))?;
        }
        disable_raw_mode()?;
        execute!(io::stdout(), LeaveAlternateScreen)?;
        println!();
        Ok(())
    }
}

/// Pre-rendered, mutex-free view of one frame: computed while the lock is
/// held, drawn after it's released.
struct FrameRow {
    name: String,
    state: ToolState,
    elapsed: Duration,
    errors: u32,
    warnings: u32,
    files_processed: u32,
}

struct Frame {
    rows: Vec<FrameRow>,
    completed: usize,
    total: usize,
    elapsed: Duration,
}

fn render_frame(snapshot: &Snapshot) -> Frame {
    let now = Instant::now();
    let rows: Vec<FrameRow> = snapshot
        .order
        .iter()
        .filter_map(|name| {
            snapshot.rows.get(name).map(|row| FrameRow {
                name: name.clone(),
                state: row.state,
                elapsed: row.elapsed(now),
                errors: row.errors,
                warnings: row.warnings,
                files_processed: row.files_processed,
            })
        })
        .collect();
    let completed = rows.iter().filter(|r| r.state.is_terminal()).count();
    Frame {
        total: rows.len(),
        completed,
        elapsed: now.saturating_duration_since(snapshot.start_time),
        rows,
    }
}

fn draw(area: Rect, buf: &mut ratatui::buffer::Buffer, frame: &Frame) {
    use ratatui::widgets::Widget as _;

    let pct = if frame.total == 0 {
        100.0
    } else {
        100.0 * frame.completed as f64 / frame.total as f64
    };
    let header = Paragraph::new(Line::from(vec![Span::raw(format!(
        "polycheck  {}/{} ({pct:.0}%)  {:.1}s",
        frame.completed,
        frame.total,
        frame.elapsed.as_secs_f64()
    ))]))
    .block(Block::default().borders(Borders::BOTTOM));

    let rows: Vec<Row> = frame
        .rows
        .iter()
        .map(|row| {
            Row::new(vec![
                Cell::from(Span::styled(row.state.glyph(), Style::default().fg(row.state.color()))),
                Cell::from(row.name.clone()),
                Cell::from(format!("{:.1}s", row.elapsed.as_secs_f64())),
                Cell::from(row.errors.to_string()),
                Cell::from(row.warnings.to_string()),
                Cell::from(row.files_processed.to_string()),
            ])
        })
        .collect();
    let table = Table::new(
        rows,
        [
            Constraint::Length(2),
            Constraint::Min(20),
            Constraint::Length(8),
            Constraint::Length(7),
            Constraint::Length(9),
            Constraint::Length(6),
        ],
    )
    .header(Row::new(["", "tool", "time", "errors", "warnings", "files"]));

    let header_area = Rect {
        height: 2.min(area.height),
        ..area
    };
    let body_area = Rect {
        y: area.y + header_area.height,
        height: area.height.saturating_sub(header_area.height),
        ..area
    };
    header.render(header_area, buf);
    ratatui::widgets::Widget::render(table, body_area, buf);
}

/// Folds the same state-transition stream into `tracing::info!` lines
/// instead of a live frame, for non-TTY stdout or `--no-tui`. Shares the
/// `progress_callback` contract; only the sink differs.
pub fn log_transition(tool_name: &str, status: &str) {
    tracing::info!(tool = tool_name, status, "validator state transition");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transitions_from_pending_through_running_to_success() {
        let tui = ProgressTui::new(Duration::from_millis(10));
        let names = vec!["black".to_string()];
        {
            let mut snapshot = tui.state.lock().unwrap();
            snapshot.order = names.clone();
            snapshot.rows.insert("black".to_string(), ToolRow::new());
        }

        tui.update_tool("black", ToolState::Running, TuiUpdate::default());
        {
            let snapshot = tui.state.lock().unwrap();
            assert_eq!(snapshot.rows["black"].state, ToolState::Running);
            assert!(snapshot.rows["black"].started_at.is_some());
        }

        tui.update_tool(
            "black",
            ToolState::Success,
            TuiUpdate {
                errors: Some(0),
                warnings: Some(2),
                ..Default::default()
            },
        );
        let snapshot = tui.state.lock().unwrap();
        let row = &snapshot.rows["black"];
        assert_eq!(row.state, ToolState::Success);
        assert_eq!(row.warnings, 2);
        assert!(row.finished_at.is_some());
    }

    #[test]
    fn terminal_state_is_absorbing() {
        let tui = ProgressTui::new(Duration::from_millis(10));
        {
            let mut snapshot = tui.state.lock().unwrap();
            snapshot.rows.insert("ruff".to_string(), ToolRow::new());
        }
        tui.update_tool("ruff", ToolState::Failed, TuiUpdate::default());
        tui.update_tool("ruff", ToolState::Running, TuiUpdate::default());
        let snapshot = tui.state.lock().unwrap();
        assert_eq!(snapshot.rows["ruff"].state, ToolState::Failed);
    }

    #[test]
    fn unknown_tool_name_is_a_no_op() {
        let tui = ProgressTui::new(Duration::from_millis(10));
        tui.update_tool("ghost", ToolState::Running, TuiUpdate::default());
        let snapshot = tui.state.lock().unwrap();
        assert!(snapshot.rows.is_empty());
    }

    #[test]
    fn render_frame_reports_overall_progress() {
        let tui = ProgressTui::new(Duration::from_millis(10));
        {
            let mut snapshot = tui.state.lock().unwrap();
            snapshot.order = vec!["a".to_string(), "b".to_string()];
            snapshot.rows.insert("a".to_string(), ToolRow::new());
            snapshot.rows.insert("b".to_string(), ToolRow::new());
        }
        tui.update_tool("a", ToolState::Running, TuiUpdate::default());
        tui.update_tool("a", ToolState::Success, TuiUpdate::default());

        let snapshot = tui.state.lock().unwrap();
        let frame = render_frame(&snapshot);
        assert_eq!(frame.total, 2);
        assert_eq!(frame.completed, 1);
    }
}
