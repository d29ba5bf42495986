//! Command-line options and the immutable configuration built from them.

use clap::Parser;
use std::path::PathBuf;

use crate::types::ProtectedSet;

#[cfg(windows)]
pub const DEFAULT_PYTHON: &str = "python";
#[cfg(not(windows))]
pub const DEFAULT_PYTHON: &str = "python3";

#[derive(Parser, Debug)]
#[command(name = "pip-purge", version, about = "Uninstall every pip package except pip's own tooling")]
pub struct Cli {
    /// Python interpreter whose packages are managed
    #[arg(long, value_name = "PATH", default_value = DEFAULT_PYTHON)]
    pub python: PathBuf,

    /// Extra package to keep (repeatable); pip, setuptools and wheel are always kept
    #[arg(long = "keep", value_name = "NAME")]
    pub keep: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub python: PathBuf,
    pub protected: ProtectedSet,
}

impl From<Cli> for AppConfig {
    fn from(cli: Cli) -> Self {
        Self {
            python: cli.python,
            protected: ProtectedSet::with_extra(cli.keep),
        }
    }
}
