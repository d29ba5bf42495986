use anyhow::{Context, Result};
use std::{
    io,
    path::{Path, PathBuf},
    process::Command,
};
use tracing::{debug, error, warn};

use crate::errors::ListError;
use crate::types::{CommandOutput, PackageId, ProtectedSet};

// Core/business logic: talking to pip, parsing its listing, and removing
// packages one by one.

/// Separator between name and version in `pip list --format=freeze` output.
pub const FREEZE_SEPARATOR: &str = "==";

/// The three pip invocations the application needs.
///
/// `Err` means the child process could not be launched; a process that ran
/// and failed is reported through [`CommandOutput::success`].
pub trait PackageManager: Send + Sync {
    /// `pip list --format=freeze`
    fn list_frozen(&self) -> io::Result<CommandOutput>;
    /// `pip list` (human readable table)
    fn list_table(&self) -> io::Result<CommandOutput>;
    /// `pip uninstall -y <name>`
    fn uninstall(&self, id: &PackageId) -> io::Result<CommandOutput>;
}

/// pip driven through `<python> -m pip`.
#[derive(Clone, Debug)]
pub struct Pip {
    python: PathBuf,
}

impl Pip {
    pub fn new(python: impl Into<PathBuf>) -> Self {
        Self {
            python: python.into(),
        }
    }

    pub fn python(&self) -> &Path {
        &self.python
    }

    /// `pip --version`, used by the startup check.
    pub fn version(&self) -> io::Result<CommandOutput> {
        self.run(&["--version"])
    }

    fn run(&self, args: &[&str]) -> io::Result<CommandOutput> {
        debug!("Running {} -m pip {}", self.python.display(), args.join(" "));
        let output = Command::new(&self.python)
            .arg("-m")
            .arg("pip")
            .args(args)
            .output()?;
        let out = CommandOutput::from(output);
        debug!("pip {} finished: {}", args.join(" "), out.status_text());
        Ok(out)
    }
}

impl PackageManager for Pip {
    fn list_frozen(&self) -> io::Result<CommandOutput> {
        self.run(&["list", "--format=freeze"])
    }

    fn list_table(&self) -> io::Result<CommandOutput> {
        self.run(&["list"])
    }

    fn uninstall(&self, id: &PackageId) -> io::Result<CommandOutput> {
        self.run(&["uninstall", "-y", id.as_str()])
    }
}

/// Parse freeze-format output into package names, keeping input order and
/// dropping protected names. Lines without `==` are ignored.
pub fn parse_freeze(text: &str, protected: &ProtectedSet) -> Vec<PackageId> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| line.split_once(FREEZE_SEPARATOR))
        .map(|(name, _version)| name.trim())
        .filter(|name| !name.is_empty() && !protected.contains(name))
        .map(PackageId::new)
        .collect()
}

/// List installed packages that are eligible for removal.
pub fn list_installed<P: PackageManager + ?Sized>(
    pm: &P,
    protected: &ProtectedSet,
) -> Result<Vec<PackageId>, ListError> {
    let out = pm.list_frozen()?;
    if !out.success {
        error!("pip list failed ({}): {}", out.status_text(), out.stderr.trim());
        return Err(ListError::CommandFailed {
            status: out.status_text(),
            stderr: out.stderr,
        });
    }
    let packages = parse_freeze(&out.stdout, protected);
    debug!("Parsed {} removable packages", packages.len());
    Ok(packages)
}

/// Outcome of a removal pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunResult {
    pub total: usize,
    pub failed: Vec<PackageId>,
}

impl RunResult {
    pub fn success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn summary(&self) -> String {
        if self.success() {
            format!("Successfully uninstalled {} packages!", self.total)
        } else {
            let names: Vec<&str> = self.failed.iter().map(PackageId::as_str).collect();
            format!(
                "Failed to uninstall {} packages: {}",
                self.failed.len(),
                names.join(", ")
            )
        }
    }
}

/// Uninstall `ids` strictly in order. A failing package is recorded and the
/// loop moves on; only a launch failure aborts the pass.
pub fn remove<P, FP, FO>(
    pm: &P,
    ids: &[PackageId],
    mut on_progress: FP,
    mut on_output: FO,
) -> Result<RunResult>
where
    P: PackageManager + ?Sized,
    FP: FnMut(usize, usize),
    FO: FnMut(String),
{
    let total = ids.len();
    let mut result = RunResult {
        total,
        failed: Vec::new(),
    };

    for (i, id) in ids.iter().enumerate() {
        let current = i + 1;
        on_progress(current, total);
        on_output(format!("[{}/{}] Uninstalling {}...", current, total, id));

        let out = pm
            .uninstall(id)
            .with_context(|| format!("Failed to run pip uninstall for {}", id))?;

        if out.success {
            on_output(format!("  ✓ Uninstalled {}", id));
        } else {
            let reason = match out.stderr.trim() {
                "" => out.status_text(),
                err => err.to_string(),
            };
            warn!("Uninstall of {} failed: {}", id, reason);
            on_output(format!("  ✗ Failed to uninstall {}: {}", id, reason));
            result.failed.push(id.clone());
        }
    }

    Ok(result)
}
