//! Toolbar: file actions, simulation toggles, history, tools and dialogs

use egui::Ui;

use crate::interaction::Tool;
use crate::state::AppState;

fn tool_tip(tool: Tool) -> &'static str {
    match tool {
        Tool::None => "Click to select, drag empty space to pan",
        Tool::Select => "Click or drag a box to select; Shift adds",
        Tool::Drag => "Pull a body with the mouse",
        Tool::Move => "Move the selected bodies",
        Tool::Rotate => "Rotate the selection about its centroid",
        Tool::Box => "Drag to draw a box",
        Tool::Circle => "Drag to draw a circle",
        Tool::Hinge => "Click two bodies to pin them together",
        Tool::Spring => "Click two bodies to join them with a spring",
    }
}

pub fn show(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal_wrapped(|ui| {
        // ── File ──
        ui.menu_button("File", |ui| {
            if ui.button("New").clicked() {
                state.new_scene();
                ui.close_menu();
            }
            let save_path = state.save_path();
            if ui
                .button("Save")
                .on_hover_text(format!("Save to {}", save_path.display()))
                .clicked()
            {
                state.save();
                ui.close_menu();
            }
            if ui
                .button("Load")
                .on_hover_text(format!("Load from {}", save_path.display()))
                .clicked()
            {
                state.load();
                ui.close_menu();
            }
        });

        ui.separator();

        // ── Simulation ──
        let running = state.scene.simulation_running;
        if ui
            .selectable_label(running, if running { "Pause" } else { "Play" })
            .on_hover_text("Space")
            .clicked()
        {
            state.toggle_running();
        }
        if ui
            .selectable_label(state.scene.show_trails, "Trails")
            .clicked()
        {
            state.toggle_trails();
        }

        ui.separator();

        // ── History buttons ──
        if ui
            .add_enabled(state.scene.can_undo(), egui::Button::new("Undo"))
            .on_hover_text("Ctrl+Z")
            .clicked()
        {
            state.undo();
        }
        if ui
            .add_enabled(state.scene.can_redo(), egui::Button::new("Redo"))
            .on_hover_text("Ctrl+Y")
            .clicked()
        {
            state.redo();
        }

        ui.separator();

        // ── Tools ──
        for tool in Tool::ALL {
            let active = state.interaction.tool == tool;
            if ui
                .selectable_label(active, tool.label())
                .on_hover_text(tool_tip(tool))
                .clicked()
            {
                // clicking the active tool switches back to none
                state.set_tool(if active { Tool::None } else { tool });
            }
        }

        ui.separator();

        // ── Edit ──
        let has_selection = !state.selection.is_empty();
        if ui
            .add_enabled(has_selection, egui::Button::new("Copy"))
            .clicked()
        {
            state.copy_selection();
        }
        if ui
            .add_enabled(state.clipboard.is_some(), egui::Button::new("Paste"))
            .clicked()
        {
            state.paste();
        }
        if ui
            .add_enabled(has_selection, egui::Button::new("Delete"))
            .clicked()
        {
            state.delete_selected();
        }

        ui.separator();

        if ui.button("Help").clicked() {
            state.show_help();
        }
        if ui.button("Credits").clicked() {
            state.show_credits();
        }
    });
}
