//! Dark theme and the few accent colors used by the window.

use eframe::{egui, epaint};
use eframe::epaint::Color32;

pub const WINDOW_BG: Color32 = Color32::from_rgb(0x2b, 0x2b, 0x2b);
pub const LOG_BG: Color32 = Color32::from_rgb(0x1e, 0x1e, 0x1e);
pub const BUTTON_BG: Color32 = Color32::from_rgb(0x3d, 0x3d, 0x3d);
pub const BUTTON_HOVER: Color32 = Color32::from_rgb(0x4d, 0x4d, 0x4d);
pub const BORDER: Color32 = Color32::from_rgb(0x55, 0x55, 0x55);
pub const ACCENT: Color32 = Color32::from_rgb(0x0d, 0x73, 0x77);
pub const WARNING: Color32 = Color32::from_rgb(0xff, 0x44, 0x44);
pub const DANGER: Color32 = Color32::from_rgb(0xd3, 0x2f, 0x2f);

/// Apply the dark theme to the given egui Context.
pub fn set_dark_style(ctx: &egui::Context) {
    use egui::Visuals;

    let mut visuals = Visuals::dark();
    visuals.window_fill = WINDOW_BG;
    visuals.panel_fill = WINDOW_BG;
    visuals.extreme_bg_color = LOG_BG;
    visuals.selection.bg_fill = ACCENT;
    visuals.override_text_color = Some(Color32::WHITE);
    visuals.widgets.inactive.weak_bg_fill = BUTTON_BG;
    visuals.widgets.inactive.bg_fill = BUTTON_BG;
    visuals.widgets.inactive.bg_stroke = epaint::Stroke::new(1.0, BORDER);
    visuals.widgets.hovered.weak_bg_fill = BUTTON_HOVER;
    visuals.widgets.hovered.bg_fill = BUTTON_HOVER;
    visuals.widgets.active.weak_bg_fill = BORDER;
    visuals.widgets.active.bg_fill = BORDER;
    ctx.set_visuals(visuals);

    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(10.0, 5.0);
    ctx.set_style(style);
}
