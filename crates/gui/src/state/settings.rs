//! Application settings

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Scene file settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSettings {
    /// Fixed file used by Save/Load (overwritten without prompting)
    pub save_file: PathBuf,
    /// Plain-text log file, appended to by the binary
    pub log_file: PathBuf,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            save_file: PathBuf::from("autosave.json"),
            log_file: PathBuf::from("LOGFILE.txt"),
        }
    }
}

/// Simulation and editing settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Maximum number of undo snapshots
    pub history_capacity: usize,
    /// Points kept per body trail
    pub trail_length: usize,
    /// Fixed physics timestep in seconds
    pub timestep: f64,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            history_capacity: 50,
            trail_length: 100,
            timestep: 1.0 / 60.0,
        }
    }
}

/// UI settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Font size in points
    pub font_size: f32,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self { font_size: 14.0 }
    }
}

/// All application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    pub files: FileSettings,
    pub simulation: SimulationSettings,
    pub ui: UiSettings,
}

impl EditorSettings {
    fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "marbles", "marbles")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Load settings from file, or return default if not found
    pub fn load() -> Self {
        if let Some(path) = Self::config_path() {
            if let Ok(json) = std::fs::read_to_string(&path) {
                match serde_json::from_str::<Self>(&json) {
                    Ok(settings) => return settings.sanitized(),
                    Err(e) => tracing::warn!(path = %path.display(), %e, "ignoring malformed settings"),
                }
            }
        }
        Self::default()
    }

    /// Save settings to file
    pub fn save(&self) {
        if let Some(path) = Self::config_path() {
            if let Some(dir) = path.parent() {
                if std::fs::create_dir_all(dir).is_err() {
                    return;
                }
            }
            if let Ok(json) = serde_json::to_string_pretty(self) {
                if let Err(e) = std::fs::write(&path, json) {
                    tracing::warn!(path = %path.display(), %e, "settings not saved");
                }
            }
        }
    }

    /// Replace out-of-range values with defaults.
    pub fn sanitized(mut self) -> Self {
        let defaults = SimulationSettings::default();
        let sim = &mut self.simulation;
        if sim.history_capacity < 2 {
            sim.history_capacity = defaults.history_capacity;
        }
        if sim.trail_length == 0 {
            sim.trail_length = defaults.trail_length;
        }
        if !(sim.timestep.is_finite() && sim.timestep > 0.0) {
            sim.timestep = defaults.timestep;
        }
        if !(self.ui.font_size.is_finite() && self.ui.font_size >= 6.0) {
            self.ui.font_size = UiSettings::default().font_size;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = EditorSettings::default();
        assert_eq!(s.files.save_file, PathBuf::from("autosave.json"));
        assert_eq!(s.simulation.history_capacity, 50);
        assert_eq!(s.simulation.trail_length, 100);
        assert!((s.simulation.timestep - 1.0 / 60.0).abs() < 1e-12);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let s: EditorSettings = serde_json::from_str(r#"{"ui": {"font_size": 18}}"#).unwrap();
        assert_eq!(s.ui.font_size, 18.0);
        assert_eq!(s.simulation.trail_length, 100);
    }

    #[test]
    fn test_sanitized_repairs_bad_values() {
        let mut s = EditorSettings::default();
        s.simulation.timestep = -1.0;
        s.simulation.history_capacity = 0;
        s.ui.font_size = f32::NAN;
        let s = s.sanitized();
        assert_eq!(s.simulation.history_capacity, 50);
        assert!(s.simulation.timestep > 0.0);
        assert_eq!(s.ui.font_size, 14.0);
    }
}
