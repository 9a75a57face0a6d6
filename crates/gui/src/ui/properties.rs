//! Properties panel: object material, joint parameters or space settings

use egui::Ui;
use shared::Rgba;

use crate::physics::{BodyId, ConstraintKind};
use crate::state::{
    body_display_name, constraint_display_name, material_summary, AppState, BodyProperty,
    PanelMode,
};

/// Slider values kept between frames so a drag edits one value and commits
/// it once on release.
#[derive(Default)]
pub struct PropertiesPanel {
    density: f64,
    friction: f64,
    elasticity: f64,
    color: Rgba,
    background: Rgba,
    gravity: f64,
    /// Scene version and selection the values were read from
    synced: Option<(u64, Vec<BodyId>)>,
    dragging: bool,
}

impl PropertiesPanel {
    fn sync(&mut self, state: &AppState) {
        let key = (state.scene.version(), state.selection.bodies().to_vec());
        if self.dragging || self.synced.as_ref() == Some(&key) {
            return;
        }
        let bodies = state
            .selection
            .bodies()
            .iter()
            .filter_map(|id| state.scene.world.body(*id));
        if let Some(summary) = material_summary(bodies) {
            self.density = summary.density;
            self.friction = summary.friction;
            self.elasticity = summary.elasticity;
            self.color = summary.color;
        }
        self.background = state.scene.background_color;
        self.gravity = state.scene.gravity_multiplier();
        self.synced = Some(key);
    }

    /// Track dragging; true once the edit should be applied.
    fn committed(&mut self, response: &egui::Response) -> bool {
        if response.dragged() {
            self.dragging = true;
        }
        response.drag_stopped() || (response.changed() && !response.dragged())
    }
}

pub fn show(ui: &mut Ui, state: &mut AppState, panel: &mut PropertiesPanel) {
    panel.sync(state);
    panel.dragging = false;

    match state.panel {
        PanelMode::Hidden => {}
        PanelMode::Object => object_view(ui, state, panel),
        PanelMode::Joint => joint_view(ui, state),
        PanelMode::Space => space_view(ui, state, panel),
    }
}

fn object_view(ui: &mut Ui, state: &mut AppState, panel: &mut PropertiesPanel) {
    ui.heading("Object");
    ui.separator();

    let bodies: Vec<_> = state
        .selection
        .bodies()
        .iter()
        .filter_map(|id| state.scene.world.body(*id))
        .collect();
    let Some(summary) = material_summary(bodies.iter().copied()) else {
        ui.weak("Select an object to view its properties.");
        return;
    };
    for body in bodies.iter().take(5) {
        ui.strong(body_display_name(body));
    }
    if bodies.len() > 5 {
        ui.weak(format!("and {} more", bodies.len() - 5));
    }
    ui.add_space(6.0);

    let mut edit = None;
    egui::Grid::new("object_props")
        .num_columns(2)
        .spacing([8.0, 4.0])
        .show(ui, |ui| {
            ui.label("Density:");
            let r = ui.add(egui::Slider::new(&mut panel.density, 0.1..=10.0));
            if panel.committed(&r) {
                edit = Some(BodyProperty::Density(panel.density));
            }
            ui.end_row();

            ui.label("Friction:");
            let r = ui.add(egui::Slider::new(&mut panel.friction, 0.0..=1.0));
            if panel.committed(&r) {
                edit = Some(BodyProperty::Friction(panel.friction));
            }
            ui.end_row();

            ui.label("Elasticity:");
            let r = ui.add(egui::Slider::new(&mut panel.elasticity, 0.0..=1.0));
            if panel.committed(&r) {
                edit = Some(BodyProperty::Elasticity(panel.elasticity));
            }
            ui.end_row();
        });

    ui.add_space(6.0);
    ui.label("Color");
    if rgba_sliders(ui, panel, "object_color", Target::Object) {
        edit = Some(BodyProperty::Color(panel.color));
    }

    ui.add_space(6.0);
    ui.horizontal(|ui| {
        if ui.button("Random color").clicked() {
            edit = Some(BodyProperty::RandomColor);
        }
        if ui
            .button(summary.type_label)
            .on_hover_text("Toggle static / dynamic")
            .clicked()
        {
            state.toggle_static_dynamic();
        }
    });

    if let Some(property) = edit {
        state.apply_property(property);
    }
}

fn joint_view(ui: &mut Ui, state: &AppState) {
    ui.heading("Joint");
    ui.separator();

    let Some(constraint) = state
        .selection
        .constraints()
        .first()
        .and_then(|id| state.scene.world.constraint(*id))
    else {
        ui.weak("Joint not found.");
        return;
    };

    ui.strong(constraint_display_name(constraint));
    ui.add_space(4.0);
    egui::Grid::new("joint_props")
        .num_columns(2)
        .spacing([8.0, 4.0])
        .show(ui, |ui| {
            ui.label("Type:");
            ui.monospace(constraint.kind.type_name());
            ui.end_row();

            ui.label("Collide:");
            ui.label(if constraint.collide_bodies { "Yes" } else { "No" });
            ui.end_row();

            match constraint.kind {
                ConstraintKind::PinJoint { distance } => {
                    ui.label("Distance:");
                    ui.label(format!("{distance:.2}"));
                    ui.end_row();
                }
                ConstraintKind::DampedSpring {
                    rest_length,
                    stiffness,
                    damping,
                } => {
                    ui.label("Rest length:");
                    ui.label(format!("{rest_length:.2}"));
                    ui.end_row();
                    ui.label("Stiffness:");
                    ui.label(format!("{stiffness:.1}"));
                    ui.end_row();
                    ui.label("Damping:");
                    ui.label(format!("{damping:.1}"));
                    ui.end_row();
                }
            }
        });
}

fn space_view(ui: &mut Ui, state: &mut AppState, panel: &mut PropertiesPanel) {
    ui.heading("Space");
    ui.separator();

    ui.label("Background");
    if rgba_sliders(ui, panel, "background_color", Target::Background) {
        state.set_background(Some(panel.background));
    }
    if ui.button("Random background").clicked() {
        state.set_background(None);
    }

    ui.add_space(8.0);
    ui.horizontal(|ui| {
        ui.label("Gravity:");
        let r = ui.add(egui::Slider::new(&mut panel.gravity, -1.0..=1.0));
        if panel.committed(&r) {
            state.set_gravity(panel.gravity);
        }
    });
}

#[derive(Clone, Copy)]
enum Target {
    Object,
    Background,
}

/// Four 0..=255 channel sliders; true when a channel edit is committed.
fn rgba_sliders(ui: &mut Ui, panel: &mut PropertiesPanel, id: &str, target: Target) -> bool {
    let mut color = match target {
        Target::Object => panel.color,
        Target::Background => panel.background,
    };
    let mut commit = false;
    egui::Grid::new(id)
        .num_columns(2)
        .spacing([8.0, 2.0])
        .show(ui, |ui| {
            for (channel, name) in color.iter_mut().zip(["R", "G", "B", "A"]) {
                ui.label(name);
                let r = ui.add(egui::Slider::new(channel, 0..=255));
                commit |= panel.committed(&r);
                ui.end_row();
            }
        });
    let [r, g, b, a] = color;
    let preview = egui::Color32::from_rgba_unmultiplied(r, g, b, a);
    let (rect, _) = ui.allocate_exact_size(egui::vec2(ui.available_width(), 12.0), egui::Sense::hover());
    ui.painter().rect_filled(rect, 2.0, preview);
    match target {
        Target::Object => panel.color = color,
        Target::Background => panel.background = color,
    }
    commit
}
