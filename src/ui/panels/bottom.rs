use crate::style;
use crate::ui::AppState;
use eframe::egui;
use eframe::epaint::Color32;

/// Render the action bar: "Clear Log" on the left, the destructive button on the right.
pub fn show(ctx: &egui::Context, state: &mut AppState) {
    egui::TopBottomPanel::bottom("bottom_actions")
        .resizable(false)
        .show(ctx, |ui| {
            ui.add_space(6.0);
            let enabled = state.controls_enabled();
            ui.horizontal(|ui| {
                ui.set_height(40.0);
                if ui
                    .add_enabled(enabled, egui::Button::new("Clear Log"))
                    .clicked()
                {
                    state.clear_log();
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let label = egui::RichText::new("🗑 UNINSTALL ALL PACKAGES")
                        .strong()
                        .size(14.0)
                        .color(Color32::WHITE);
                    if ui
                        .add_enabled(
                            enabled,
                            egui::Button::new(label)
                                .fill(style::DANGER)
                                .min_size(egui::vec2(0.0, 36.0)),
                        )
                        .clicked()
                    {
                        state.request_uninstall();
                    }
                });
            });
            ui.add_space(6.0);
        });
}
