pub mod editor_ops;
pub mod notices;
pub mod scene;
pub mod selection;
pub mod settings;

use shared::SelectionSnapshot;

use crate::interaction::InteractionState;
use crate::viewport::trails::TrailBuffers;
pub use notices::{Notice, NoticeLevel, Notices};
pub use scene::{
    body_display_name, body_type_label, constraint_display_name, material_summary, shape_label,
    BodyProperty, JointKind, MaterialSummary, SceneState, ShapeStyle, STATIC_BODY_COLOR,
};
pub use selection::SelectionState;
pub use settings::EditorSettings;

/// Which properties view the side panel shows
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PanelMode {
    #[default]
    Hidden,
    /// Material and type of the selected bodies
    Object,
    /// Parameters of the selected joint
    Joint,
    /// Background and gravity
    Space,
}

/// Which informational dialogs are open
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DialogVisibility {
    pub help: bool,
    pub credits: bool,
}

/// Combined application state
pub struct AppState {
    pub scene: SceneState,
    pub selection: SelectionState,
    pub interaction: InteractionState,
    pub trails: TrailBuffers,
    /// Last copied bodies and joints
    pub clipboard: Option<SelectionSnapshot>,
    pub notices: Notices,
    pub panel: PanelMode,
    pub dialogs: DialogVisibility,
    /// Short non-modal message for the status bar
    pub status: Option<String>,
    pub settings: EditorSettings,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_settings(EditorSettings::load())
    }
}

impl AppState {
    /// State with explicit settings (no settings file is read)
    pub fn with_settings(settings: EditorSettings) -> Self {
        Self {
            scene: SceneState::new(settings.simulation.history_capacity),
            selection: SelectionState::default(),
            interaction: InteractionState::default(),
            trails: TrailBuffers::new(settings.simulation.trail_length),
            clipboard: None,
            notices: Notices::default(),
            panel: PanelMode::default(),
            dialogs: DialogVisibility::default(),
            status: None,
            settings,
        }
    }

    /// Show a notice and log it
    pub fn notify(&mut self, notice: Notice) {
        match notice.level {
            NoticeLevel::Info => tracing::info!(title = %notice.title, "{}", notice.message),
            NoticeLevel::Warning => tracing::warn!(title = %notice.title, "{}", notice.message),
            NoticeLevel::Error => tracing::error!(title = %notice.title, "{}", notice.message),
        }
        self.notices.push(notice);
    }

    /// Convert a command failure into a notice
    pub fn report(&mut self, err: &crate::error::EditorError) {
        self.notify(Notice::from(err));
    }

    /// Pick the properties view matching the selection. The space view stays
    /// open while nothing is selected.
    pub fn refresh_panel(&mut self) {
        self.panel = if !self.selection.constraints().is_empty() {
            PanelMode::Joint
        } else if !self.selection.bodies().is_empty() {
            PanelMode::Object
        } else if self.panel == PanelMode::Space {
            PanelMode::Space
        } else {
            PanelMode::Hidden
        };
    }

    /// Drop selected ids that no longer exist in the world
    pub fn prune_selection(&mut self) {
        let world = &self.scene.world;
        self.selection.retain(
            |b| world.contains_body(b),
            |c| world.constraint(c).is_some(),
        );
        self.refresh_panel();
    }
}
