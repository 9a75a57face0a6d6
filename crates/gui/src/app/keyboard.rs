//! Keyboard shortcut handling

use eframe::egui;

use crate::state::editor_ops::Shortcut;
use crate::state::AppState;

/// Map pressed keys to editor shortcuts
pub fn shortcuts(input: &egui::InputState) -> Vec<Shortcut> {
    let mut out = Vec::new();
    let command = input.modifiers.command;

    if input.key_pressed(egui::Key::Space) {
        out.push(Shortcut::ToggleRunning);
    }
    // Ctrl+Z: undo
    if command && input.key_pressed(egui::Key::Z) && !input.modifiers.shift {
        out.push(Shortcut::Undo);
    }
    // Ctrl+Shift+Z or Ctrl+Y: redo
    if (command && input.modifiers.shift && input.key_pressed(egui::Key::Z))
        || (command && input.key_pressed(egui::Key::Y))
    {
        out.push(Shortcut::Redo);
    }
    // the platform layer turns Ctrl+C / Ctrl+V into clipboard events
    let copy = input.events.iter().any(|e| matches!(e, egui::Event::Copy));
    if copy || (command && input.key_pressed(egui::Key::C)) {
        out.push(Shortcut::Copy);
    }
    let paste = input.events.iter().any(|e| matches!(e, egui::Event::Paste(_)));
    if paste || (command && input.key_pressed(egui::Key::V)) {
        out.push(Shortcut::Paste);
    }
    if input.key_pressed(egui::Key::Delete) || input.key_pressed(egui::Key::Backspace) {
        out.push(Shortcut::Delete);
    }
    if input.key_pressed(egui::Key::Escape) {
        out.push(Shortcut::Cancel);
    }
    out
}

/// Handle keyboard shortcuts for the application
pub fn handle_keyboard(ctx: &egui::Context, state: &mut AppState) {
    // Don't handle shortcuts when a text field is focused
    if ctx.memory(|m| m.focused().is_some()) {
        return;
    }

    for shortcut in ctx.input(shortcuts) {
        state.handle_shortcut(shortcut);
    }
}
