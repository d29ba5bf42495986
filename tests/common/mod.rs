#![allow(dead_code)]

use std::collections::HashMap;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use pip_purge::core::PackageManager;
use pip_purge::types::{CommandOutput, PackageId};

/// In-memory pip that records every call.
#[derive(Default)]
pub struct MockPip {
    pub freeze: String,
    pub table: String,
    pub list_fails_with: Option<String>,
    pub list_launch_error: bool,
    /// package name -> stderr printed by its failing uninstall
    pub failing: HashMap<String, String>,
    pub launch_error_on: Option<String>,
    pub panic_on: Option<String>,

    pub list_calls: AtomicUsize,
    pub table_calls: AtomicUsize,
    pub uninstalled: Mutex<Vec<String>>,
}

impl MockPip {
    pub fn with_freeze(lines: &[&str]) -> Self {
        Self {
            freeze: lines.join("\n"),
            ..Default::default()
        }
    }

    pub fn failing(mut self, name: &str, stderr: &str) -> Self {
        self.failing.insert(name.to_string(), stderr.to_string());
        self
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn uninstall_calls(&self) -> Vec<String> {
        self.uninstalled.lock().unwrap().clone()
    }
}

fn ok(stdout: &str) -> CommandOutput {
    CommandOutput {
        success: true,
        code: Some(0),
        stdout: stdout.to_string(),
        stderr: String::new(),
    }
}

fn failed(stderr: &str) -> CommandOutput {
    CommandOutput {
        success: false,
        code: Some(1),
        stdout: String::new(),
        stderr: stderr.to_string(),
    }
}

impl PackageManager for MockPip {
    fn list_frozen(&self) -> io::Result<CommandOutput> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.list_launch_error {
            return Err(io::Error::new(io::ErrorKind::NotFound, "python not found"));
        }
        Ok(match &self.list_fails_with {
            Some(err) => failed(err),
            None => ok(&self.freeze),
        })
    }

    fn list_table(&self) -> io::Result<CommandOutput> {
        self.table_calls.fetch_add(1, Ordering::SeqCst);
        Ok(ok(&self.table))
    }

    fn uninstall(&self, id: &PackageId) -> io::Result<CommandOutput> {
        let name = id.as_str();
        self.uninstalled.lock().unwrap().push(name.to_string());
        if self.panic_on.as_deref() == Some(name) {
            panic!("backend exploded on {}", name);
        }
        if self.launch_error_on.as_deref() == Some(name) {
            return Err(io::Error::new(io::ErrorKind::Other, "spawn failed"));
        }
        Ok(match self.failing.get(name) {
            Some(err) => failed(err),
            None => ok(&format!("Successfully uninstalled {}", name)),
        })
    }
}
