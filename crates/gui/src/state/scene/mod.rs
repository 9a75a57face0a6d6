//! Scene state management
//!
//! The scene is the live physics world plus ambient settings (background,
//! gravity, run/trails flags, camera, id counter) and its undo/redo history.
//! It is the unit of serialization and of history snapshotting.

mod ambient_ops;
mod body_ops;
mod clipboard;
mod display;
mod history;
mod joint_ops;
mod persistence;
mod serializer;
mod transform_ops;

pub use body_ops::{BodyProperty, DeleteReport, ShapeStyle};
pub use clipboard::PASTE_OFFSET;
pub use display::{
    body_display_name, body_type_label, constraint_display_name, material_summary, shape_label,
    MaterialSummary,
};
pub use history::History;
pub use joint_ops::JointKind;
pub use persistence::read_snapshot;

use glam::DVec2;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use shared::{Rgba, DEFAULT_BACKGROUND_COLOR};
use tracing::warn;

use crate::physics::{gravity_for, BodyId, ConstraintId, World};
use crate::viewport::camera::Camera2D;

/// Display color of static bodies
pub const STATIC_BODY_COLOR: Rgba = [100, 100, 100, 255];

/// Scene state: live world, ambient settings and history
pub struct SceneState {
    /// Live physics world
    pub world: World,
    pub background_color: Rgba,
    gravity_multiplier: f64,
    pub simulation_running: bool,
    pub show_trails: bool,
    pub camera: Camera2D,
    /// Next number handed out as `body_<n>`
    pub(crate) next_body_id: u64,
    pub(crate) history: History,
    /// Temporary mouse joint of an in-progress drag. Never serialized.
    pub(crate) drag_joint: Option<ConstraintId>,
    /// Monotonically increasing version counter for UI refresh
    pub(crate) version: u64,
    pub(crate) rng: SmallRng,
}

impl Default for SceneState {
    fn default() -> Self {
        Self::new(history::DEFAULT_CAPACITY)
    }
}

impl SceneState {
    pub fn new(history_capacity: usize) -> Self {
        Self {
            world: World::new(),
            background_color: DEFAULT_BACKGROUND_COLOR,
            gravity_multiplier: 1.0,
            simulation_running: false,
            show_trails: false,
            camera: Camera2D::default(),
            next_body_id: 0,
            history: History::new(history_capacity),
            drag_joint: None,
            version: 0,
            rng: SmallRng::from_os_rng(),
        }
    }

    /// Current scene version (increments on every mutation)
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Bump version without recording history
    pub fn notify_mutated(&mut self) {
        self.version += 1;
    }

    pub fn gravity_multiplier(&self) -> f64 {
        self.gravity_multiplier
    }

    /// Set the multiplier and apply it to the world without recording history.
    pub(crate) fn apply_gravity_multiplier(&mut self, multiplier: f64) {
        self.gravity_multiplier = multiplier;
        self.world.gravity = gravity_for(multiplier);
    }

    pub fn next_body_id_counter(&self) -> u64 {
        self.next_body_id
    }

    /// Hand out a fresh, never-used body id.
    pub(crate) fn allocate_body_id(&mut self) -> BodyId {
        let id = BodyId::new(self.next_body_id);
        self.next_body_id += 1;
        id
    }

    /// Mouse joint of the in-progress drag, if any
    pub fn drag_joint(&self) -> Option<ConstraintId> {
        self.drag_joint
    }

    /// Attach a zero-length pin between the world anchor at `world_point` and `body`.
    pub fn attach_drag_joint(
        &mut self,
        body: BodyId,
        world_point: DVec2,
    ) -> crate::error::Result<ConstraintId> {
        self.detach_drag_joint();
        let local = self
            .world
            .body(body)
            .ok_or_else(|| crate::error::EditorError::Reference(body.to_string()))?
            .world_to_local(world_point);
        let spec = crate::physics::ConstraintSpec::pin(BodyId::ANCHOR, body, world_point, local)
            .without_collision();
        let id = self.world.add_constraint(spec)?;
        self.drag_joint = Some(id);
        Ok(id)
    }

    /// Move the world-side anchor of the drag joint.
    pub fn move_drag_joint(&mut self, world_point: DVec2) {
        if let Some(id) = self.drag_joint {
            if let Err(err) = self.world.set_constraint_anchor_a(id, world_point) {
                warn!(%err, "drag joint lost");
                self.drag_joint = None;
            }
        }
    }

    /// Remove the drag joint if one is attached. Returns whether one was removed.
    pub fn detach_drag_joint(&mut self) -> bool {
        match self.drag_joint.take() {
            Some(id) => self.world.remove_constraint(id).is_some(),
            None => false,
        }
    }
}
