//! Application style configuration

use eframe::egui;

/// Dark theme with the configured font size
pub fn configure_styles(ctx: &egui::Context, font_size: f32) {
    let mut style = (*ctx.style()).clone();

    style.visuals = egui::Visuals::dark();

    style.visuals.window_corner_radius = egui::CornerRadius::same(6);
    style.visuals.widgets.inactive.corner_radius = egui::CornerRadius::same(3);
    style.visuals.widgets.hovered.corner_radius = egui::CornerRadius::same(3);
    style.visuals.widgets.active.corner_radius = egui::CornerRadius::same(3);

    style.spacing.item_spacing = egui::vec2(6.0, 4.0);
    style.spacing.button_padding = egui::vec2(8.0, 3.0);
    style.spacing.slider_width = 140.0;

    // Panels a shade lighter than the default scene background
    style.visuals.panel_fill = egui::Color32::from_rgb(34, 34, 38);
    style.visuals.window_fill = egui::Color32::from_rgb(40, 40, 46);
    style.visuals.selection.bg_fill = egui::Color32::from_rgb(60, 90, 130);

    apply_text_styles(&mut style, font_size);
    ctx.set_style(style);
}

/// Apply font size to all text styles
pub fn apply_font_size(ctx: &egui::Context, font_size: f32) {
    let mut style = (*ctx.style()).clone();
    apply_text_styles(&mut style, font_size);
    ctx.set_style(style);
}

fn apply_text_styles(style: &mut egui::Style, font_size: f32) {
    let sizes = [
        (egui::TextStyle::Body, egui::FontId::proportional(font_size)),
        (egui::TextStyle::Button, egui::FontId::proportional(font_size)),
        (egui::TextStyle::Small, egui::FontId::proportional(font_size * 0.85)),
        (egui::TextStyle::Heading, egui::FontId::proportional(font_size * 1.3)),
        (egui::TextStyle::Monospace, egui::FontId::monospace(font_size)),
    ];
    for (text_style, font) in sizes {
        style.text_styles.insert(text_style, font);
    }
}
