//! Clicking, box selection and the context click

use glam::DVec2;
use tracing::debug;

use super::{Gesture, Modifiers, Tool};
use crate::physics::ConstraintId;
use crate::state::{AppState, PanelMode};

/// Screen distance within which a click picks a joint anchor
pub const JOINT_PICK_RADIUS: f64 = 10.0;

impl AppState {
    /// Joint whose first anchor is within the pick radius of a viewport point
    pub fn pick_constraint(&self, pos: DVec2) -> Option<ConstraintId> {
        let camera = &self.scene.camera;
        let world = &self.scene.world;
        world
            .constraints()
            .filter(|c| Some(c.id) != self.scene.drag_joint())
            .filter_map(|c| {
                let (a, _) = world.constraint_anchors(c)?;
                let d = camera.to_screen(a).distance(pos);
                (d <= JOINT_PICK_RADIUS).then_some((d, c.id))
            })
            .min_by(|x, y| x.0.total_cmp(&y.0))
            .map(|(_, id)| id)
    }

    /// Default tool: bodies win over joint anchors; empty space pans.
    pub(super) fn none_press(&mut self, pos: DVec2, world: DVec2) {
        if let Some(body) = self.scene.world.point_query_nearest(world) {
            self.selection.select(body);
        } else if let Some(joint) = self.pick_constraint(pos) {
            self.selection.select_constraint(joint);
        } else {
            self.start_pan(pos);
            return;
        }
        self.refresh_panel();
    }

    pub(super) fn select_press(&mut self, world: DVec2, modifiers: Modifiers) {
        match self.scene.world.point_query_nearest(world) {
            Some(body) => {
                self.scene.record_history();
                if modifiers.shift {
                    self.selection.extend(body);
                } else {
                    self.selection.select(body);
                }
            }
            None => {
                if !modifiers.shift {
                    self.selection.clear();
                }
                self.interaction.gesture = Gesture::BoxSelecting {
                    start: world,
                    end: world,
                };
            }
        }
        self.refresh_panel();
    }

    pub(super) fn finish_box_select(&mut self, start: DVec2, end: DVec2) {
        let hits = self.scene.world.bb_query(start.min(end), start.max(end));
        debug!(hits = hits.len(), "box selection");
        for body in hits {
            self.selection.extend(body);
        }
        self.refresh_panel();
    }

    /// Right click: a body opens its properties; empty space opens the space view.
    pub(super) fn context_click(&mut self, pos: DVec2) {
        let world = self.scene.camera.to_world(pos);
        match self.scene.world.point_query_nearest(world) {
            Some(body) => {
                self.selection.select(body);
                self.panel = PanelMode::Object;
            }
            None => {
                self.set_tool(Tool::None);
                self.selection.clear();
                self.panel = PanelMode::Space;
            }
        }
    }
}
