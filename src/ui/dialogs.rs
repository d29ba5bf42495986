//! Modal dialogs: the uninstall confirmation and the end-of-run summary.

use eframe::egui;
use eframe::epaint::Color32;

use crate::style;
use crate::ui::state::ShellPhase;
use crate::ui::AppState;

const CONFIRM_TEXT: &str = "Are you ABSOLUTELY SURE you want to uninstall ALL Python packages?\n\n\
    This will remove:\n\
    - Every package except the protected ones listed above\n\
    - Any tools or applications that depend on them\n\
    - You'll need to reinstall everything manually\n\n\
    This action cannot be undone!";

/// Yes/No prompt shown while the shell is confirming. Escape or a click
/// outside counts as "No".
pub fn show_confirmation(ctx: &egui::Context, state: &mut AppState) {
    if state.phase() != ShellPhase::Confirming {
        return;
    }

    let mut answer: Option<bool> = None;
    let modal = egui::Modal::new(egui::Id::new("confirm_uninstall")).show(ctx, |ui| {
        ui.set_width(440.0);
        ui.heading("Confirm Uninstall");
        ui.add_space(6.0);
        ui.label(CONFIRM_TEXT);
        ui.add_space(10.0);
        ui.horizontal(|ui| {
            let yes = egui::Button::new(egui::RichText::new("Yes").strong().color(Color32::WHITE))
                .fill(style::DANGER);
            if ui.add(yes).clicked() {
                answer = Some(true);
            }
            if ui.button("No").clicked() {
                answer = Some(false);
            }
        });
    });

    if answer.is_none() && modal.should_close() {
        answer = Some(false);
    }
    if let Some(accepted) = answer {
        state.resolve_confirmation(accepted);
    }
}

/// Summary of the last run, titled "Complete" or "Error".
pub fn show_notice(ctx: &egui::Context, state: &mut AppState) {
    let Some(notice) = state.notice().cloned() else {
        return;
    };

    let mut close = false;
    let modal = egui::Modal::new(egui::Id::new("run_notice")).show(ctx, |ui| {
        ui.set_width(360.0);
        let color = if notice.success {
            Color32::WHITE
        } else {
            style::WARNING
        };
        ui.heading(egui::RichText::new(notice.title()).color(color));
        ui.add_space(6.0);
        ui.label(notice.message.as_str());
        ui.add_space(10.0);
        if ui.button("OK").clicked() {
            close = true;
        }
    });

    if close || modal.should_close() {
        state.dismiss_notice();
    }
}
