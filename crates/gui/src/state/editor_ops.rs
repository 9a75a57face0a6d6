//! Editor-level commands: scene commands plus selection, trail and notice upkeep

use std::path::{Path, PathBuf};

use glam::DVec2;
use shared::Rgba;
use tracing::{debug, info};

use super::{AppState, Notice, PanelMode};
use crate::error::EditorError;
use crate::physics::BodyType;
use crate::state::scene::{BodyProperty, DeleteReport, PASTE_OFFSET};

/// Keyboard shortcuts understood by the editor
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shortcut {
    ToggleRunning,
    Undo,
    Redo,
    Copy,
    Paste,
    Delete,
    Cancel,
}

pub const HELP_TEXT: &str = "\
Space: Play/Pause simulation
Ctrl+Z: Undo
Ctrl+Y: Redo
Ctrl+C: Copy selection
Ctrl+V: Paste
Delete/Backspace: Delete selection
Escape: Cancel gesture, tool, then selection
Mouse wheel: Zoom to cursor
Left click on empty space: Pan
Right click on empty space: Space properties";

pub const CREDITS_TEXT: &str = "Marbles And Physics\nVersion 0.1.0 alpha";

impl AppState {
    pub fn handle_shortcut(&mut self, shortcut: Shortcut) {
        match shortcut {
            Shortcut::ToggleRunning => {
                self.toggle_running();
            }
            Shortcut::Undo => self.undo(),
            Shortcut::Redo => self.redo(),
            Shortcut::Copy => self.copy_selection(),
            Shortcut::Paste => self.paste(),
            Shortcut::Delete => {
                self.delete_selected();
            }
            Shortcut::Cancel => self.cancel(),
        }
    }

    /// Forget selection, gestures, tool and trails after the scene was replaced
    fn after_scene_replaced(&mut self) {
        self.reset_interaction();
        self.selection.clear();
        self.trails.clear();
        self.refresh_panel();
    }

    pub fn undo(&mut self) {
        self.reset_interaction();
        match self.scene.undo() {
            Ok(()) => self.after_scene_replaced(),
            Err(e) => self.report(&e),
        }
    }

    pub fn redo(&mut self) {
        self.reset_interaction();
        match self.scene.redo() {
            Ok(()) => self.after_scene_replaced(),
            Err(e) => self.report(&e),
        }
    }

    pub fn delete_selected(&mut self) -> DeleteReport {
        self.reset_interaction();
        let report = self
            .scene
            .delete(self.selection.bodies(), self.selection.constraints());
        for id in &report.bodies {
            self.trails.remove(*id);
        }
        self.selection.clear();
        self.refresh_panel();
        if !report.is_empty() {
            self.status = Some(format!(
                "Deleted {} object(s) and {} joint(s).",
                report.bodies.len(),
                report.constraints
            ));
        }
        report
    }

    pub fn apply_property(&mut self, property: BodyProperty) {
        if let Err(e) = self
            .scene
            .apply_property(self.selection.bodies(), property)
        {
            self.report(&e);
        }
    }

    /// Bodies made static lose their trails.
    pub fn toggle_static_dynamic(&mut self) -> Option<BodyType> {
        match self.scene.toggle_static_dynamic(self.selection.bodies()) {
            Ok(body_type) => {
                if body_type == BodyType::Static {
                    for id in self.selection.bodies() {
                        self.trails.remove(*id);
                    }
                }
                Some(body_type)
            }
            Err(e) => {
                self.report(&e);
                None
            }
        }
    }

    pub fn copy_selection(&mut self) {
        if self.selection.is_empty() {
            self.notify(Notice::warning("Nothing selected to copy."));
            return;
        }
        let clip = self
            .scene
            .copy_selection(self.selection.bodies(), self.selection.constraints());
        if clip.objects.is_empty() {
            self.notify(Notice::warning("Select objects to copy."));
            return;
        }
        info!(
            bodies = clip.objects.len(),
            joints = clip.constraints.len(),
            "copied"
        );
        self.status = Some(format!("Copied {} object(s).", clip.objects.len()));
        self.clipboard = Some(clip);
    }

    pub fn paste(&mut self) {
        self.paste_at(PASTE_OFFSET);
    }

    pub fn paste_at(&mut self, offset: DVec2) {
        let Some(clip) = self.clipboard.clone() else {
            self.notify(Notice::warning("Clipboard is empty."));
            return;
        };
        self.reset_interaction();
        match self.scene.paste(&clip, offset) {
            Ok((bodies, joints)) => {
                self.status = Some(format!("Pasted {} object(s).", bodies.len()));
                self.selection.set(bodies, joints);
                self.refresh_panel();
            }
            Err(e) => self.report(&e),
        }
    }

    pub fn new_scene(&mut self) {
        self.scene.reset_to_new_scene();
        self.after_scene_replaced();
        self.panel = PanelMode::Hidden;
        self.status = Some("New scene.".into());
    }

    pub fn save_path(&self) -> PathBuf {
        self.settings.files.save_file.clone()
    }

    pub fn save(&mut self) {
        let path = self.save_path();
        self.save_to(&path);
    }

    pub fn save_to(&mut self, path: &Path) {
        match self.scene.save_to(path) {
            Ok(()) => self.notify(Notice::info(
                "Saved",
                format!("Scene saved to {}.", path.display()),
            )),
            Err(e) => self.report(&e),
        }
    }

    pub fn load(&mut self) {
        let path = self.save_path();
        self.load_from(&path);
    }

    pub fn load_from(&mut self, path: &Path) {
        self.reset_interaction();
        match self.scene.load_from(path) {
            Ok(()) => {
                self.after_scene_replaced();
                self.notify(Notice::info(
                    "Loaded",
                    format!("Scene loaded from {}.", path.display()),
                ));
            }
            Err(e) => self.report(&e),
        }
    }

    /// Set the background, or pick a random one when `color` is None
    pub fn set_background(&mut self, color: Option<Rgba>) {
        match color {
            Some(c) => self.scene.set_background_color(c),
            None => {
                self.scene.randomize_background_color();
            }
        }
    }

    pub fn set_gravity(&mut self, multiplier: f64) {
        if let Err(e) = self.scene.set_gravity_multiplier(multiplier) {
            self.report(&e);
        }
    }

    /// Play or pause. A live move, rotate or drag ends first, since grab
    /// state depends on whether the simulation was running at press time.
    pub fn toggle_running(&mut self) -> bool {
        self.cancel_gesture();
        let running = self.scene.toggle_running();
        self.status = Some(if running { "Running." } else { "Paused." }.into());
        running
    }

    pub fn toggle_trails(&mut self) -> bool {
        let on = self.scene.toggle_trails();
        if !on {
            self.trails.clear();
        }
        on
    }

    pub fn show_help(&mut self) {
        self.dialogs.help = true;
    }

    pub fn show_credits(&mut self) {
        self.dialogs.credits = true;
    }

    /// One frame of simulation: step by the fixed timestep when running,
    /// then sample trail points.
    pub fn advance_frame(&mut self) {
        if !self.scene.simulation_running {
            return;
        }
        self.scene.world.step(self.settings.simulation.timestep);
        self.scene.notify_mutated();
        if self.scene.show_trails {
            let camera = self.scene.camera;
            for body in self.scene.world.bodies().filter(|b| b.is_dynamic()) {
                self.trails.push(body.id, camera.to_screen(body.position));
            }
        }
    }

    /// Load a snapshot at startup without recording history
    pub fn open_initial_scene(&mut self, path: &Path) -> Result<(), EditorError> {
        let snapshot = crate::state::scene::read_snapshot(path)?;
        self.scene.restore(snapshot);
        self.after_scene_replaced();
        debug!(path = %path.display(), "initial scene opened");
        Ok(())
    }
}
