//! Background uninstall task: lists packages, removes them one by one and
//! reports everything to the UI thread as [`TaskEvent`]s without blocking it.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{mpsc, Arc};
use std::thread;

use tracing::{debug, error, info};

use crate::core::{list_installed, remove, PackageManager};
use crate::errors::ListError;
use crate::types::{PackageId, Progress, ProtectedSet, RunPhase, TaskEvent};

const RULE_WIDTH: usize = 60;

/// One uninstall-all run. Consumed by [`UninstallTask::run`]; start another
/// run with a new instance.
pub struct UninstallTask<P: ?Sized> {
    pm: Arc<P>,
    protected: ProtectedSet,
    phase: RunPhase,
}

impl<P: PackageManager + ?Sized> UninstallTask<P> {
    pub fn new(pm: Arc<P>, protected: ProtectedSet) -> Self {
        Self {
            pm,
            protected,
            phase: RunPhase::Idle,
        }
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// Drive the whole run, sending events to `tx`. Exactly one
    /// `TaskEvent::Completed` is sent, and it is the last event.
    pub fn run(mut self, tx: &mpsc::Sender<TaskEvent>) -> RunPhase {
        info!("Uninstall run started");
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.drive(tx)));
        let (success, summary) = match outcome {
            Ok(Ok(done)) => done,
            Ok(Err(e)) => {
                error!("Uninstall run failed: {:#}", e);
                (false, format!("Error: {:#}", e))
            }
            Err(payload) => {
                let msg = panic_message(payload.as_ref());
                error!("Uninstall run panicked: {}", msg);
                (false, format!("Error: {}", msg))
            }
        };
        self.set_phase(RunPhase::Completed);
        info!(success, "Uninstall run finished: {}", summary);
        let _ = tx.send(TaskEvent::Completed { success, summary });
        self.phase
    }

    fn drive(&mut self, tx: &mpsc::Sender<TaskEvent>) -> anyhow::Result<(bool, String)> {
        let emit = |event: TaskEvent| {
            let _ = tx.send(event);
        };
        let say = |text: String| emit(TaskEvent::Output(text));

        self.set_phase(RunPhase::Listing);
        say("Fetching list of installed packages...".into());
        emit(TaskEvent::Progress(Progress::Indeterminate));

        let packages: Vec<PackageId> = match list_installed(self.pm.as_ref(), &self.protected) {
            Ok(p) => p,
            Err(ListError::CommandFailed { status, stderr }) => {
                say(format!(
                    "Failed to get package list ({}): {}",
                    status,
                    stderr.trim()
                ));
                return Ok((false, "Failed to get package list".into()));
            }
            Err(e @ ListError::Launch(_)) => return Err(e.into()),
        };

        if packages.is_empty() {
            self.set_phase(RunPhase::Done);
            say("No packages to uninstall".into());
            return Ok((true, "No packages to uninstall".into()));
        }

        let total = packages.len();
        self.set_phase(RunPhase::Removing);
        emit(TaskEvent::Progress(Progress::Determinate { current: 0, total }));
        say(format!("Found {} packages to uninstall", total));
        let names: Vec<&str> = packages.iter().map(PackageId::as_str).collect();
        say(format!("Packages: {}", names.join(", ")));
        say("Uninstalling packages...".into());
        say("-".repeat(RULE_WIDTH));

        let result = remove(
            self.pm.as_ref(),
            &packages,
            |current, total| emit(TaskEvent::Progress(Progress::Determinate { current, total })),
            say,
        )?;

        say("-".repeat(RULE_WIDTH));
        if !result.success() {
            say(format!(
                "⚠ Failed to uninstall {} packages:",
                result.failed.len()
            ));
            for id in &result.failed {
                say(format!("  - {}", id));
            }
        }
        Ok((result.success(), result.summary()))
    }

    fn set_phase(&mut self, phase: RunPhase) {
        debug!("Runner phase {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unexpected failure".to_string()
    }
}

/// Spawn a background thread running a fresh [`UninstallTask`].
pub fn spawn_uninstall_all<P>(pm: Arc<P>, protected: ProtectedSet, tx: mpsc::Sender<TaskEvent>)
where
    P: PackageManager + ?Sized + 'static,
{
    let task = UninstallTask::new(pm, protected);
    let fallback = tx.clone();
    let spawned = thread::Builder::new()
        .name("uninstall-runner".into())
        .spawn(move || {
            task.run(&tx);
        });
    if let Err(e) = spawned {
        error!("Could not start uninstall thread: {}", e);
        let _ = fallback.send(TaskEvent::Completed {
            success: false,
            summary: format!("Error: could not start background task: {}", e),
        });
    }
}
