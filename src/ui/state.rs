//! UI-thread state for the main window, kept free of egui so it can be
//! driven directly from tests.

use std::sync::{mpsc, Arc};

use tracing::{debug, info};

use crate::core::PackageManager;
use crate::types::{Progress, ProtectedSet, RunPhase, TaskEvent};

use super::tasks;

/// Where the window is in its `Idle -> Confirming -> Running -> Idle` cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShellPhase {
    Idle,
    Confirming,
    Running(RunPhase),
}

/// Whether the mutating buttons (show, clear, uninstall) accept clicks.
pub fn controls_enabled(phase: ShellPhase) -> bool {
    matches!(phase, ShellPhase::Idle)
}

/// Result dialog shown after a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub success: bool,
    pub message: String,
}

impl Notice {
    pub fn title(&self) -> &'static str {
        if self.success { "Complete" } else { "Error" }
    }
}

pub struct GuiState<P: ?Sized> {
    pm: Arc<P>,
    protected: ProtectedSet,

    phase: ShellPhase,
    progress: Option<Progress>,
    log: Vec<String>,
    notice: Option<Notice>,

    // events from the current run
    events_rx: Option<mpsc::Receiver<TaskEvent>>,
}

impl<P: PackageManager + ?Sized + 'static> GuiState<P> {
    pub fn new(pm: Arc<P>, protected: ProtectedSet) -> Self {
        Self {
            pm,
            protected,
            phase: ShellPhase::Idle,
            progress: None,
            log: Vec::new(),
            notice: None,
            events_rx: None,
        }
    }

    pub fn phase(&self) -> ShellPhase {
        self.phase
    }

    pub fn protected(&self) -> &ProtectedSet {
        &self.protected
    }

    pub fn controls_enabled(&self) -> bool {
        controls_enabled(self.phase)
    }

    /// Progress to display; `None` hides the indicator.
    pub fn progress(&self) -> Option<Progress> {
        match self.phase {
            ShellPhase::Running(_) => self.progress,
            _ => None,
        }
    }

    pub fn log(&self) -> &[String] {
        &self.log
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn clear_log(&mut self) {
        if self.controls_enabled() {
            self.log.clear();
        }
    }

    /// Run plain `pip list` on the calling thread and show its raw output.
    pub fn show_installed(&mut self) {
        if !self.controls_enabled() {
            return;
        }
        self.log.clear();
        self.log.push("Fetching installed packages...".into());
        match self.pm.list_table() {
            Ok(out) => {
                self.log.extend(out.stdout.lines().map(str::to_string));
                if !out.success {
                    self.log
                        .push(format!("Error ({}): {}", out.status_text(), out.stderr.trim()));
                }
            }
            Err(e) => self.log.push(format!("Error: {}", e)),
        }
    }

    /// "Uninstall All" clicked: ask for confirmation first.
    pub fn request_uninstall(&mut self) {
        if self.controls_enabled() {
            self.phase = ShellPhase::Confirming;
        }
    }

    /// Answer to the confirmation dialog. Accepting starts a background run.
    pub fn resolve_confirmation(&mut self, accepted: bool) {
        if self.phase != ShellPhase::Confirming {
            return;
        }
        if !accepted {
            info!("Uninstall declined");
            self.phase = ShellPhase::Idle;
            return;
        }
        self.log.clear();
        self.notice = None;
        self.progress = Some(Progress::Indeterminate);
        self.phase = ShellPhase::Running(RunPhase::Idle);

        let (tx, rx) = mpsc::channel();
        self.events_rx = Some(rx);
        tasks::spawn_uninstall_all(self.pm.clone(), self.protected.clone(), tx);
    }

    /// Drain pending events without blocking. Returns how many were applied.
    pub fn poll_events(&mut self) -> usize {
        let mut applied = 0;
        loop {
            let Some(rx) = self.events_rx.as_ref() else {
                break;
            };
            let event = match rx.try_recv() {
                Ok(event) => event,
                Err(mpsc::TryRecvError::Empty) => break,
                // worker gone without a terminal event
                Err(mpsc::TryRecvError::Disconnected) => TaskEvent::Completed {
                    success: false,
                    summary: "Error: background task ended unexpectedly".into(),
                },
            };
            self.apply(event);
            applied += 1;
        }
        applied
    }

    pub fn apply(&mut self, event: TaskEvent) {
        match event {
            TaskEvent::Output(text) => self.log.push(text),
            TaskEvent::Progress(p) => {
                self.progress = Some(p);
                self.phase = ShellPhase::Running(match p {
                    Progress::Indeterminate => RunPhase::Listing,
                    Progress::Determinate { .. } => RunPhase::Removing,
                });
            }
            TaskEvent::Completed { success, summary } => {
                debug!("Run completed, success={}", success);
                self.phase = ShellPhase::Idle;
                self.progress = None;
                self.events_rx = None;
                self.notice = Some(Notice {
                    success,
                    message: summary,
                });
            }
        }
    }
}
