//! Camera pan and zoom

use glam::DVec2;

use super::Gesture;
use crate::state::AppState;

impl AppState {
    /// Zoom by wheel notches keeping the world point under the cursor fixed
    pub(super) fn zoom_at_cursor(&mut self, pos: DVec2, notches: i32) {
        self.scene.camera.zoom_notches(pos, notches);
    }

    pub(super) fn start_pan(&mut self, pos: DVec2) {
        self.interaction.gesture = Gesture::Panning { last: pos };
    }
}
