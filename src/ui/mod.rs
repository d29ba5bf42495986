//! Egui-based UI for the package uninstaller.
//!
//! This module defines the eframe App, which owns all window state on the UI
//! thread and feeds it events from the background run in ui::tasks.

use std::sync::Arc;
use std::time::Duration;

use eframe::{egui, App};

use crate::config::AppConfig;
use crate::core::{PackageManager, Pip};
use crate::style::set_dark_style;
use crate::types::ProtectedSet;

pub mod dialogs;
mod panels;
pub mod state;
pub mod tasks;

pub use state::{controls_enabled, GuiState, Notice, ShellPhase};

pub const WINDOW_TITLE: &str = "Python Package Uninstaller";

/// Window state backed by any package manager implementation.
pub type AppState = GuiState<dyn PackageManager>;

/// Main eframe application that renders and controls the UI.
pub struct PipPurgeApp {
    state: AppState,
}

impl PipPurgeApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        pm: Arc<dyn PackageManager>,
        protected: ProtectedSet,
    ) -> Self {
        set_dark_style(&cc.egui_ctx);
        Self {
            state: GuiState::new(pm, protected),
        }
    }
}

/// Egui frame update: drains run events, then lays out panels and dialogs.
impl App for PipPurgeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // pull updates from the run channel (non-blocking)
        self.state.poll_events();

        panels::top::show(ctx, &mut self.state);
        panels::bottom::show(ctx, &mut self.state);
        panels::central::show(ctx, &self.state);

        dialogs::show_confirmation(ctx, &mut self.state);
        dialogs::show_notice(ctx, &mut self.state);

        // the worker cannot wake us; keep polling while a run is active
        if matches!(self.state.phase(), ShellPhase::Running(_)) {
            ctx.request_repaint_after(Duration::from_millis(16));
        }
    }
}

/// Open the main window and block until it is closed.
pub fn run(config: AppConfig) -> eframe::Result<()> {
    let AppConfig { python, protected } = config;
    let pm: Arc<dyn PackageManager> = Arc::new(Pip::new(python));

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size([900.0, 700.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };
    eframe::run_native(
        WINDOW_TITLE,
        native_options,
        Box::new(move |cc| Ok(Box::new(PipPurgeApp::new(cc, pm, protected)))),
    )
}
