use eframe::egui;

use crate::style;
use crate::ui::AppState;

/// Render the header: warning label and the "Show Installed Packages" button.
pub fn show(ctx: &egui::Context, state: &mut AppState) {
    egui::TopBottomPanel::top("top").show(ctx, |ui| {
        ui.add_space(8.0);
        let kept: Vec<&str> = state.protected().iter().collect();
        ui.label(
            egui::RichText::new(format!(
                "⚠ WARNING: This will uninstall ALL pip packages (except {})\nThis action cannot be undone easily!",
                kept.join(", ")
            ))
            .strong()
            .size(13.0)
            .color(style::WARNING),
        );
        ui.add_space(6.0);

        let enabled = state.controls_enabled();
        let width = ui.available_width();
        if ui
            .add_enabled(
                enabled,
                egui::Button::new("Show Installed Packages").min_size(egui::vec2(width, 28.0)),
            )
            .clicked()
        {
            state.show_installed();
        }
        ui.add_space(6.0);
    });
}
