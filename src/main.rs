use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pip_purge::bootstrap;
use pip_purge::config::{AppConfig, Cli};
use pip_purge::core::Pip;
use pip_purge::ui;

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from(Cli::parse());

    let pip = Pip::new(config.python.clone());
    if let Err(reason) = bootstrap::check_pip(&pip) {
        bootstrap::offer_pip_install(&pip, &reason);
        bootstrap::wait_for_enter();
        return ExitCode::FAILURE;
    }

    if let Err(e) = ui::run(config) {
        bootstrap::report_fatal(&e.to_string());
        bootstrap::wait_for_enter();
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
