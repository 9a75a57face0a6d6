//! Modal notices plus the help and credits dialogs

use eframe::egui;

use crate::state::editor_ops::{CREDITS_TEXT, HELP_TEXT};
use crate::state::{AppState, NoticeLevel};

/// A modal blocks the toolbar, panel, keyboard and viewport until dismissed.
pub fn is_modal_open(state: &AppState) -> bool {
    !state.notices.is_empty() || state.dialogs.help || state.dialogs.credits
}

fn modal(title: &str, id: &str) -> egui::Window<'static> {
    egui::Window::new(title.to_owned())
        .id(egui::Id::new(id.to_owned()))
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
}

pub fn show(ctx: &egui::Context, state: &mut AppState) {
    if let Some(notice) = state.notices.current() {
        let color = match notice.level {
            NoticeLevel::Info => ctx.style().visuals.text_color(),
            NoticeLevel::Warning => egui::Color32::from_rgb(255, 200, 90),
            NoticeLevel::Error => egui::Color32::from_rgb(255, 110, 110),
        };
        let message = notice.message.clone();
        let mut dismissed = false;
        modal(&notice.title, "notice").show(ctx, |ui| {
            ui.set_min_width(260.0);
            ui.colored_label(color, message);
            ui.add_space(8.0);
            ui.vertical_centered(|ui| {
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        });
        if dismissed || ctx.input(|i| i.key_pressed(egui::Key::Enter)) {
            state.notices.dismiss();
        }
        return;
    }

    if state.dialogs.help {
        let mut close = false;
        modal("Help", "help").show(ctx, |ui| {
            ui.monospace(HELP_TEXT);
            ui.add_space(8.0);
            close = ui.button("Close").clicked();
        });
        if close {
            state.dialogs.help = false;
        }
    }

    if state.dialogs.credits {
        let mut close = false;
        modal("Credits", "credits").show(ctx, |ui| {
            ui.label(CREDITS_TEXT);
            ui.add_space(8.0);
            close = ui.button("Close").clicked();
        });
        if close {
            state.dialogs.credits = false;
        }
    }
}
