//! Drag (mouse joint), move and rotate tools

use glam::DVec2;
use tracing::debug;

use super::{Gesture, Tool};
use crate::state::{AppState, Notice};

impl AppState {
    /// Pull the clicked body with a temporary pin to the world anchor.
    pub(super) fn drag_press(&mut self, world: DVec2) {
        let Some(body) = self.scene.world.point_query_nearest(world) else {
            return;
        };
        self.scene.record_history();
        match self.scene.attach_drag_joint(body, world) {
            Ok(_) => {
                self.interaction.gesture = Gesture::Dragging { body };
                debug!(%body, "drag started");
            }
            Err(e) => self.report(&e),
        }
    }

    /// Grab the selection (or the clicked body) and follow the pointer.
    pub(super) fn move_press(&mut self, world: DVec2) {
        let Some(hit) = self.scene.world.point_query_nearest(world) else {
            return;
        };
        if !self.selection.is_selected(hit) {
            self.selection.select(hit);
            self.refresh_panel();
        }
        self.scene.record_history();
        if self.scene.begin_grab(self.selection.bodies(), world) > 0 {
            self.interaction.gesture = Gesture::Moving;
        }
    }

    /// Rotate the selection rigidly about its centroid.
    pub(super) fn rotate_press(&mut self, world: DVec2) {
        let Some(centroid) = self.scene.centroid(self.selection.bodies()) else {
            self.set_tool(Tool::None);
            self.notify(Notice::warning("Select an object to rotate."));
            return;
        };
        self.scene.record_history();
        self.scene.begin_grab(self.selection.bodies(), world);
        let d = world - centroid;
        self.interaction.gesture = Gesture::Rotating {
            centroid,
            initial_pointer_angle: d.y.atan2(d.x),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{move_to, press, release, state};
    use super::*;
    use crate::physics::BodyType;
    use crate::state::ShapeStyle;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_drag_creates_and_removes_mouse_joint() {
        let mut s = state();
        let id = s
            .scene
            .create_circle(DVec2::new(100.0, 700.0), 20.0, ShapeStyle::default())
            .unwrap();
        s.set_tool(Tool::Drag);
        let history = s.scene.history_len();
        press(&mut s, 105.0, 100.0);
        let joint = s.scene.drag_joint().unwrap();
        let c = s.scene.world.constraint(joint).unwrap();
        assert!(c.a.is_anchor());
        assert_eq!(c.b, id);
        assert!(!c.collide_bodies);
        assert_eq!(c.anchor_b, DVec2::new(5.0, 0.0));

        move_to(&mut s, 200.0, 150.0);
        let c = s.scene.world.constraint(joint).unwrap();
        assert_eq!(c.anchor_a, DVec2::new(200.0, 650.0));
        // the mouse joint never reaches snapshots
        assert!(s.scene.snapshot().constraints.is_empty());

        release(&mut s, 200.0, 150.0);
        assert!(s.scene.drag_joint().is_none());
        assert_eq!(s.scene.world.constraint_count(), 0);
        assert_eq!(s.scene.history_len(), history + 1);
    }

    #[test]
    fn test_move_selected_bodies() {
        let mut s = state();
        let a = s
            .scene
            .create_circle(DVec2::new(100.0, 700.0), 20.0, ShapeStyle::default())
            .unwrap();
        let b = s
            .scene
            .create_circle(DVec2::new(200.0, 700.0), 20.0, ShapeStyle::default())
            .unwrap();
        s.selection.select(a);
        s.selection.extend(b);
        s.set_tool(Tool::Move);
        press(&mut s, 100.0, 100.0);
        move_to(&mut s, 110.0, 80.0);
        release(&mut s, 110.0, 80.0);
        assert_eq!(s.scene.world.body(a).unwrap().position, DVec2::new(110.0, 720.0));
        assert_eq!(s.scene.world.body(b).unwrap().position, DVec2::new(210.0, 720.0));
        assert!(!s.scene.has_grab());

        s.undo();
        assert_eq!(s.scene.world.body(a).unwrap().position, DVec2::new(100.0, 700.0));
    }

    #[test]
    fn test_move_while_running_restores_dynamic() {
        let mut s = state();
        let a = s
            .scene
            .create_circle(DVec2::new(100.0, 700.0), 20.0, ShapeStyle::default())
            .unwrap();
        s.scene.simulation_running = true;
        s.set_tool(Tool::Move);
        press(&mut s, 100.0, 100.0);
        assert_eq!(s.scene.world.body(a).unwrap().body_type, BodyType::Kinematic);
        release(&mut s, 100.0, 100.0);
        assert_eq!(s.scene.world.body(a).unwrap().body_type, BodyType::Dynamic);
    }

    #[test]
    fn test_rotate_without_selection_warns() {
        let mut s = state();
        s.set_tool(Tool::Rotate);
        press(&mut s, 100.0, 100.0);
        assert_eq!(s.interaction.tool, Tool::None);
        assert_eq!(s.notices.current().unwrap().message, "Select an object to rotate.");
    }

    #[test]
    fn test_rotate_quarter_turn() {
        let mut s = state();
        let a = s
            .scene
            .create_box(DVec2::new(100.0, 400.0), 20.0, 20.0, ShapeStyle::default())
            .unwrap();
        let b = s
            .scene
            .create_box(DVec2::new(300.0, 400.0), 20.0, 20.0, ShapeStyle::default())
            .unwrap();
        s.selection.select(a);
        s.selection.extend(b);
        s.set_tool(Tool::Rotate);
        // centroid (200, 400) is screen (200, 400); pointer starts to its right
        press(&mut s, 300.0, 400.0);
        move_to(&mut s, 200.0, 300.0);
        release(&mut s, 200.0, 300.0);
        let body_a = s.scene.world.body(a).unwrap();
        assert!((body_a.position - DVec2::new(200.0, 300.0)).length() < 1e-9);
        assert!((body_a.angle - FRAC_PI_2).abs() < 1e-9);
        let body_b = s.scene.world.body(b).unwrap();
        assert!((body_b.position - DVec2::new(200.0, 500.0)).length() < 1e-9);
    }
}
