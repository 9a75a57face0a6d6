//! Background, gravity, run/trails flags and new scene

use rand::Rng;
use shared::{Rgba, DEFAULT_BACKGROUND_COLOR};
use tracing::info;

use super::SceneState;
use crate::error::{EditorError, Result};

impl SceneState {
    pub fn set_background_color(&mut self, color: Rgba) {
        self.record_history();
        self.background_color = color;
        self.version += 1;
        info!(?color, "background changed");
    }

    /// Random opaque background. Returns the color chosen.
    pub fn randomize_background_color(&mut self) -> Rgba {
        let color = [
            self.rng.random_range(0..=255),
            self.rng.random_range(0..=255),
            self.rng.random_range(0..=255),
            255,
        ];
        self.set_background_color(color);
        color
    }

    /// Gravity becomes `(0, -981 * multiplier)`.
    pub fn set_gravity_multiplier(&mut self, multiplier: f64) -> Result<()> {
        if !multiplier.is_finite() {
            return Err(EditorError::Validation(
                "Gravity multiplier must be a finite number.".into(),
            ));
        }
        self.record_history();
        self.apply_gravity_multiplier(multiplier);
        self.version += 1;
        info!(multiplier, "gravity changed");
        Ok(())
    }

    /// Play/pause. Returns the new running state.
    pub fn toggle_running(&mut self) -> bool {
        self.record_history();
        self.simulation_running = !self.simulation_running;
        self.version += 1;
        info!(running = self.simulation_running, "simulation toggled");
        self.simulation_running
    }

    /// Returns the new trails state.
    pub fn toggle_trails(&mut self) -> bool {
        self.record_history();
        self.show_trails = !self.show_trails;
        self.version += 1;
        info!(trails = self.show_trails, "trails toggled");
        self.show_trails
    }

    /// Empty the world, reset ambient state and camera, start a fresh history.
    pub fn reset_to_new_scene(&mut self) {
        self.record_history();
        self.world.clear();
        self.drag_joint = None;
        self.background_color = DEFAULT_BACKGROUND_COLOR;
        self.apply_gravity_multiplier(1.0);
        self.simulation_running = false;
        self.show_trails = false;
        self.camera.reset();
        self.next_body_id = 0;
        self.history.clear();
        self.version += 1;
        info!("new scene");
    }
}
