//! Core data types shared across the application.

use std::collections::BTreeSet;
use std::fmt;
use std::process::Output;

/// Name of an installed package as reported by pip.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackageId(String);

impl PackageId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PackageId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Packages that must survive a bulk removal. Names are matched case-insensitively.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProtectedSet {
    names: BTreeSet<String>,
}

impl ProtectedSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            names: names
                .into_iter()
                .map(|n| n.as_ref().trim().to_lowercase())
                .filter(|n| !n.is_empty())
                .collect(),
        }
    }

    /// The default set extended with extra names.
    pub fn with_extra<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::default();
        set.names.extend(
            extra
                .into_iter()
                .map(|n| n.as_ref().trim().to_lowercase())
                .filter(|n| !n.is_empty()),
        );
        set
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(&name.to_lowercase())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

/// pip itself and its bootstrap tools.
impl Default for ProtectedSet {
    fn default() -> Self {
        Self::new(["pip", "setuptools", "wheel"])
    }
}

/// Captured result of a finished child process.
#[derive(Clone, Debug, Default)]
pub struct CommandOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Human readable exit status, e.g. "exit code 2" or "signal".
    pub fn status_text(&self) -> String {
        match self.code {
            Some(code) => format!("exit code {}", code),
            None => "terminated by signal".to_string(),
        }
    }
}

impl From<Output> for CommandOutput {
    fn from(output: Output) -> Self {
        Self {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}

/// Progress indicator state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Progress {
    /// Total work unknown (listing).
    Indeterminate,
    /// `current` of `total` items, 1-based.
    Determinate { current: usize, total: usize },
}

impl Progress {
    pub fn fraction(&self) -> Option<f32> {
        match *self {
            Progress::Indeterminate => None,
            Progress::Determinate { total: 0, .. } => Some(1.0),
            Progress::Determinate { current, total } => Some(current as f32 / total as f32),
        }
    }
}

/// Message sent from the background runner to the UI thread.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TaskEvent {
    Output(String),
    Progress(Progress),
    /// Terminal event; exactly one per run and always the last.
    Completed { success: bool, summary: String },
}

impl TaskEvent {
    pub fn is_completed(&self) -> bool {
        matches!(self, TaskEvent::Completed { .. })
    }
}

/// Lifecycle of a single background run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunPhase {
    Idle,
    Listing,
    /// Listing found nothing to remove.
    Done,
    Removing,
    Completed,
}
