//! Save/load functionality

use std::path::Path;

use shared::SceneSnapshot;
use tracing::{error, info};

use super::SceneState;
use crate::error::{EditorError, Result};

/// Read and parse a snapshot file without touching any scene.
pub fn read_snapshot(path: &Path) -> Result<SceneSnapshot> {
    let json = std::fs::read_to_string(path).map_err(|e| EditorError::io(path, e))?;
    Ok(serde_json::from_str(&json)?)
}

impl SceneState {
    /// Write the scene as pretty JSON, overwriting `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.snapshot())?;
        std::fs::write(path, json).map_err(|e| {
            error!(path = %path.display(), %e, "save failed");
            EditorError::io(path, e)
        })?;
        info!(path = %path.display(), "scene saved");
        Ok(())
    }

    /// Replace the scene with the file contents, recording history first.
    /// On failure the scene is unchanged.
    pub fn load_from(&mut self, path: &Path) -> Result<()> {
        let snapshot = read_snapshot(path).inspect_err(|e| {
            error!(path = %path.display(), %e, "load failed");
        })?;
        self.record_history();
        self.restore(snapshot);
        info!(path = %path.display(), bodies = self.world.body_count(), "scene loaded");
        Ok(())
    }
}
