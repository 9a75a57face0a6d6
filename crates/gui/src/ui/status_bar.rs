use egui::Ui;

use crate::state::AppState;

pub fn show(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui| {
        let body_count = state.scene.world.body_count();
        ui.weak(format!("Bodies: {body_count}"));

        ui.separator();

        let joints = state.scene.world.constraint_count() - usize::from(state.scene.drag_joint().is_some());
        ui.weak(format!("Joints: {joints}"));

        ui.separator();

        if state.scene.simulation_running {
            ui.colored_label(egui::Color32::from_rgb(120, 220, 120), "Running");
        } else {
            ui.weak("Paused");
        }

        ui.separator();
        ui.label(format!("Tool: {}", state.interaction.tool.label()));

        ui.separator();
        let sel = state.selection.count();
        if sel > 0 {
            ui.label(format!("Selected: {sel}"));
        } else if let Some(status) = &state.status {
            ui.weak(status);
        } else {
            ui.weak("Ready");
        }

        // Right-aligned zoom and version
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.weak("Marbles v0.1");
            ui.separator();
            ui.weak(format!("Zoom {:.0}%", state.scene.camera.zoom * 100.0));
        });
    });
}
