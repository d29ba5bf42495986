use crate::style;
use crate::types::Progress;
use crate::ui::AppState;
use eframe::egui;

/// Render the progress indicator (while running) and the output log.
pub fn show(ctx: &egui::Context, state: &AppState) {
    egui::CentralPanel::default().show(ctx, |ui| {
        if let Some(progress) = state.progress() {
            let bar = match progress {
                Progress::Indeterminate => egui::ProgressBar::new(0.0)
                    .animate(true)
                    .text("Fetching package list..."),
                Progress::Determinate { current, total } => {
                    egui::ProgressBar::new(progress.fraction().unwrap_or(0.0))
                        .text(format!("{}/{}", current, total))
                }
            };
            ui.add(bar.fill(style::ACCENT).desired_height(18.0));
            ui.add_space(6.0);
        }

        egui::Frame::NONE
            .fill(style::LOG_BG)
            .stroke(egui::Stroke::new(1.0, style::BORDER))
            .inner_margin(egui::Margin::same(5))
            .show(ui, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        ui.style_mut().wrap_mode = Some(egui::TextWrapMode::Wrap);
                        for line in state.log() {
                            ui.label(egui::RichText::new(line).monospace().size(12.0));
                        }
                    });
            });
    });
}
