//! Startup check for pip itself, and the console fallbacks used when the
//! window cannot be shown.

use anyhow::{Context, Result};
use console::{style, Term};
use dialoguer::Input;
use std::path::Path;
use std::process::Command;
use tracing::{info, warn};

use crate::core::Pip;
use crate::types::CommandOutput;

const BANNER_WIDTH: usize = 60;

/// `Ok(version line)` when `python -m pip` works, otherwise the reason it doesn't.
pub fn check_pip(pip: &Pip) -> Result<String, String> {
    match pip.version() {
        Ok(out) if out.success => {
            let version = out.stdout.trim().to_string();
            info!("Using {}", version);
            Ok(version)
        }
        Ok(out) => Err(match out.stderr.trim() {
            "" => format!("pip is not available ({})", out.status_text()),
            err => err.to_string(),
        }),
        Err(e) => Err(format!(
            "could not run {}: {}",
            pip.python().display(),
            e
        )),
    }
}

/// Only a plain "y" counts as consent; anything else means "install manually".
pub fn is_install_confirmed(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}

/// Run `python -m ensurepip --upgrade`.
pub fn install_pip(python: &Path) -> Result<CommandOutput> {
    let output = Command::new(python)
        .arg("-m")
        .arg("ensurepip")
        .arg("--upgrade")
        .output()
        .with_context(|| format!("Failed to run {} -m ensurepip", python.display()))?;
    Ok(CommandOutput::from(output))
}

/// Explain that pip is missing, offer to install it, and report the outcome.
pub fn offer_pip_install(pip: &Pip, reason: &str) {
    warn!("pip unavailable: {}", reason);
    let rule = "=".repeat(BANNER_WIDTH);
    println!("{}", rule);
    println!("{}", style("ERROR: pip is not available!").red().bold());
    println!("{}", rule);
    println!("\n{}", reason);
    println!("\nWould you like to install pip automatically?");

    let answer = Input::<String>::new()
        .with_prompt("Install pip? (y/n)")
        .allow_empty(true)
        .interact_text()
        .unwrap_or_default();

    let python = pip.python();
    if is_install_confirmed(&answer) {
        println!("\nInstalling pip...");
        match install_pip(python) {
            Ok(out) if out.success => {
                println!("{}", style("✓ pip installed successfully!").green());
                println!("Please run this program again.");
            }
            Ok(out) => {
                println!("{}", style("✗ Installation failed:").red());
                println!("{}", out.stderr.trim());
            }
            Err(e) => println!("{} {:#}", style("✗ Installation error:").red(), e),
        }
    } else {
        println!("\nPlease install it manually by running:");
        println!("  {} -m ensurepip --upgrade", python.display());
        println!("\nOr use your system package manager, e.g.:");
        println!("  apt install python3-pip");
    }
    println!("{}", rule);
}

/// Print a fatal startup error in the same banner layout.
pub fn report_fatal(message: &str) {
    let rule = "=".repeat(BANNER_WIDTH);
    eprintln!("{}", rule);
    eprintln!("{}", style("ERROR OCCURRED:").red().bold());
    eprintln!("{}", rule);
    eprintln!("{}", message);
    eprintln!("{}", rule);
}

/// Keep the console open until the user presses Enter.
pub fn wait_for_enter() {
    println!("\nPress Enter to exit...");
    let _ = Term::stdout().read_line();
}
