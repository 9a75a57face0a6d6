//! Headless test harness for programmatic scene manipulation.
//!
//! Wraps a full [`AppState`] with default settings (no settings file is read)
//! and offers world-space helpers for driving tools the way a user would.

use glam::DVec2;
use shared::SceneSnapshot;

use crate::interaction::{Modifiers, PointerButton, PointerEvent, Tool};
use crate::physics::{BodyId, ConstraintId};
use crate::state::{AppState, EditorSettings, JointKind, ShapeStyle};

/// Headless test harness: editor state without a window
pub struct TestHarness {
    pub app: AppState,
}

impl TestHarness {
    /// Create a new empty harness.
    pub fn new() -> Self {
        Self {
            app: AppState::with_settings(EditorSettings::default()),
        }
    }

    // ── Scene manipulation ────────────────────────────────────

    /// Create a dynamic box with default material
    pub fn create_box(&mut self, x: f64, y: f64, w: f64, h: f64) -> crate::error::Result<BodyId> {
        self.create_box_with(x, y, w, h, ShapeStyle::default())
    }

    pub fn create_box_with(
        &mut self,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        style: ShapeStyle,
    ) -> crate::error::Result<BodyId> {
        self.app
            .scene
            .create_box(DVec2::new(x, y), w, h, style)
    }

    /// Create a dynamic circle with default material
    pub fn create_circle(&mut self, x: f64, y: f64, r: f64) -> crate::error::Result<BodyId> {
        self.create_circle_with(x, y, r, ShapeStyle::default())
    }

    pub fn create_circle_with(
        &mut self,
        x: f64,
        y: f64,
        r: f64,
        style: ShapeStyle,
    ) -> crate::error::Result<BodyId> {
        self.app.scene.create_circle(DVec2::new(x, y), r, style)
    }

    /// Join two bodies at world-space anchors
    pub fn create_joint(
        &mut self,
        kind: JointKind,
        a: BodyId,
        b: BodyId,
        anchor_a: DVec2,
        anchor_b: DVec2,
    ) -> crate::error::Result<ConstraintId> {
        self.app.scene.create_joint(kind, a, b, anchor_a, anchor_b)
    }

    /// Load a scene (replaces current, no history)
    pub fn load_scene(&mut self, scene: SceneSnapshot) {
        self.app.reset_interaction();
        self.app.scene.restore(scene);
        self.app.selection.clear();
        self.app.trails.clear();
    }

    /// Load a scene from JSON string
    pub fn load_scene_json(&mut self, json: &str) -> Result<(), String> {
        let scene: SceneSnapshot =
            serde_json::from_str(json).map_err(|e| format!("JSON parse error: {e}"))?;
        self.load_scene(scene);
        Ok(())
    }

    /// Export the current scene as JSON
    pub fn export_scene_json(&self) -> String {
        serde_json::to_string_pretty(&self.app.scene.snapshot()).unwrap_or_default()
    }

    /// Undo the last operation
    pub fn undo(&mut self) -> bool {
        if self.app.scene.can_undo() {
            self.app.undo();
            true
        } else {
            false
        }
    }

    /// Redo the last undone operation
    pub fn redo(&mut self) -> bool {
        if self.app.scene.can_redo() {
            self.app.redo();
            true
        } else {
            false
        }
    }

    /// Advance `frames` fixed timesteps (only moves bodies while running)
    pub fn step(&mut self, frames: usize) {
        for _ in 0..frames {
            self.app.advance_frame();
        }
    }

    // ── Selection ─────────────────────────────────────────────

    pub fn select(&mut self, ids: &[BodyId]) {
        self.app.selection.clear();
        for id in ids {
            self.app.selection.extend(*id);
        }
        self.app.refresh_panel();
    }

    /// Clear selection
    pub fn clear_selection(&mut self) {
        self.app.selection.clear();
        self.app.refresh_panel();
    }

    // ── Pointer input in world space ──────────────────────────

    pub fn to_screen(&self, world: DVec2) -> DVec2 {
        self.app.scene.camera.to_screen(world)
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.app.set_tool(tool);
    }

    /// Primary press at a world point
    pub fn press(&mut self, world: DVec2) {
        self.press_with(world, Modifiers::default());
    }

    pub fn press_with(&mut self, world: DVec2, modifiers: Modifiers) {
        let pos = self.to_screen(world);
        self.app.handle_pointer(PointerEvent::Pressed {
            pos,
            button: PointerButton::Primary,
            modifiers,
        });
    }

    pub fn move_to(&mut self, world: DVec2) {
        let pos = self.to_screen(world);
        self.app.handle_pointer(PointerEvent::Moved { pos });
    }

    pub fn release(&mut self, world: DVec2) {
        let pos = self.to_screen(world);
        self.app.handle_pointer(PointerEvent::Released {
            pos,
            button: PointerButton::Primary,
        });
    }

    /// Press, move and release
    pub fn drag(&mut self, from: DVec2, to: DVec2) {
        self.press(from);
        self.move_to(to);
        self.release(to);
    }

    /// Press and release at the same point
    pub fn click(&mut self, world: DVec2) {
        self.press(world);
        self.release(world);
    }

    // ── Inspection ────────────────────────────────────────────

    /// Number of bodies in the scene (anchor excluded)
    pub fn body_count(&self) -> usize {
        self.app.scene.world.body_count()
    }

    pub fn constraint_count(&self) -> usize {
        self.app.scene.world.constraint_count()
    }

    pub fn history_len(&self) -> usize {
        self.app.scene.history_len()
    }

    /// Message of the notice currently displayed
    pub fn last_notice(&self) -> Option<&str> {
        self.app.notices.current().map(|n| n.message.as_str())
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
