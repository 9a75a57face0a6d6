//! Tool and gesture state machine turning pointer input into scene edits.
//!
//! Pointer positions arrive in viewport pixels; every handler converts them to
//! world space through the scene camera. Each tool's press/motion/release
//! handling lives in its own submodule as an `impl AppState` block.

mod camera_nav;
mod create;
mod joint;
mod select;
mod transform;

pub use create::{CREATED_SHAPE_COLOR, MIN_BOX_SIDE, MIN_CIRCLE_RADIUS, MIN_DRAG_PIXELS};
pub use select::JOINT_PICK_RADIUS;

use glam::DVec2;
use tracing::debug;

use crate::physics::BodyId;
use crate::state::scene::JointKind;
use crate::state::AppState;

/// Active editing tool
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Tool {
    /// Click selects, empty-space drag pans
    #[default]
    None,
    Select,
    Drag,
    Move,
    Rotate,
    Box,
    Circle,
    Hinge,
    Spring,
}

impl Tool {
    pub const ALL: [Tool; 9] = [
        Tool::None,
        Tool::Select,
        Tool::Drag,
        Tool::Move,
        Tool::Rotate,
        Tool::Box,
        Tool::Circle,
        Tool::Hinge,
        Tool::Spring,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Tool::None => "None",
            Tool::Select => "Select",
            Tool::Drag => "Drag",
            Tool::Move => "Move",
            Tool::Rotate => "Rotate",
            Tool::Box => "Box",
            Tool::Circle => "Circle",
            Tool::Hinge => "Hinge",
            Tool::Spring => "Spring",
        }
    }

    /// Parse a lowercase tool name as used by the command protocol
    pub fn from_name(name: &str) -> Option<Tool> {
        Tool::ALL
            .into_iter()
            .find(|t| t.label().eq_ignore_ascii_case(name))
    }

    /// Creation and joint tools start from an empty selection
    pub fn clears_selection(self) -> bool {
        matches!(self, Tool::Box | Tool::Circle | Tool::Hinge | Tool::Spring)
    }

    pub fn joint_kind(self) -> Option<JointKind> {
        match self {
            Tool::Hinge => Some(JointKind::Hinge),
            Tool::Spring => Some(JointKind::Spring),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
}

/// Pointer input in viewport pixels (y down)
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Pressed {
        pos: DVec2,
        button: PointerButton,
        modifiers: Modifiers,
    },
    Moved {
        pos: DVec2,
    },
    Released {
        pos: DVec2,
        button: PointerButton,
    },
    /// Positive notches zoom in
    Wheel {
        pos: DVec2,
        notches: i32,
    },
}

/// In-progress pointer gesture. Points are world space unless noted.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Gesture {
    #[default]
    Idle,
    /// Camera pan; `last` is in viewport pixels
    Panning { last: DVec2 },
    /// Rubber band for a new box or circle
    DrawingShape { start: DVec2, end: DVec2 },
    BoxSelecting { start: DVec2, end: DVec2 },
    /// Body pulled by the temporary mouse joint
    Dragging { body: BodyId },
    Moving,
    Rotating {
        centroid: DVec2,
        initial_pointer_angle: f64,
    },
}

/// First endpoint of a hinge or spring awaiting its second click
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JointDraft {
    pub body: BodyId,
    /// World-space anchor point
    pub anchor: DVec2,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct InteractionState {
    pub tool: Tool,
    pub gesture: Gesture,
    pub joint_draft: Option<JointDraft>,
    /// The joint instruction is shown once per tool activation
    pub joint_message_shown: bool,
    /// Last pointer position in viewport pixels
    pub pointer: Option<DVec2>,
}

impl AppState {
    /// Route one pointer event to the active tool.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Wheel { pos, notches } => self.zoom_at_cursor(pos, notches),
            PointerEvent::Pressed {
                pos,
                button: PointerButton::Secondary,
                ..
            } => {
                self.interaction.pointer = Some(pos);
                self.context_click(pos);
            }
            PointerEvent::Pressed {
                pos,
                button: PointerButton::Primary,
                modifiers,
            } => {
                self.interaction.pointer = Some(pos);
                // a press while a gesture is live means its release was lost
                if self.interaction.gesture != Gesture::Idle {
                    self.finish_gesture(pos);
                }
                self.primary_press(pos, modifiers);
            }
            PointerEvent::Moved { pos } => {
                self.interaction.pointer = Some(pos);
                self.pointer_moved(pos);
            }
            PointerEvent::Released {
                pos,
                button: PointerButton::Primary,
            } => {
                self.interaction.pointer = Some(pos);
                self.finish_gesture(pos);
            }
            PointerEvent::Released { .. } => {}
        }
    }

    fn primary_press(&mut self, pos: DVec2, modifiers: Modifiers) {
        let world = self.scene.camera.to_world(pos);
        match self.interaction.tool {
            Tool::None => self.none_press(pos, world),
            Tool::Select => self.select_press(world, modifiers),
            Tool::Drag => self.drag_press(world),
            Tool::Move => self.move_press(world),
            Tool::Rotate => self.rotate_press(world),
            Tool::Box | Tool::Circle => {
                self.interaction.gesture = Gesture::DrawingShape {
                    start: world,
                    end: world,
                };
            }
            Tool::Hinge | Tool::Spring => self.joint_press(world),
        }
    }

    fn pointer_moved(&mut self, pos: DVec2) {
        let world = self.scene.camera.to_world(pos);
        match self.interaction.gesture {
            Gesture::Idle => {}
            Gesture::Panning { last } => {
                self.scene.camera.pan(pos - last);
                self.interaction.gesture = Gesture::Panning { last: pos };
            }
            Gesture::DrawingShape { start, .. } => {
                self.interaction.gesture = Gesture::DrawingShape { start, end: world };
            }
            Gesture::BoxSelecting { start, .. } => {
                self.interaction.gesture = Gesture::BoxSelecting { start, end: world };
            }
            Gesture::Dragging { .. } => self.scene.move_drag_joint(world),
            Gesture::Moving => self.scene.move_grabbed(world),
            Gesture::Rotating {
                centroid,
                initial_pointer_angle,
            } => {
                let d = world - centroid;
                let angle = d.y.atan2(d.x);
                self.scene
                    .rotate_grabbed(centroid, angle - initial_pointer_angle);
            }
        }
    }

    /// Complete the live gesture at `pos` (primary release).
    fn finish_gesture(&mut self, pos: DVec2) {
        let world = self.scene.camera.to_world(pos);
        let gesture = std::mem::take(&mut self.interaction.gesture);
        match gesture {
            Gesture::Idle | Gesture::Panning { .. } => {}
            Gesture::DrawingShape { start, .. } => self.finish_shape(start, world),
            Gesture::BoxSelecting { start, .. } => self.finish_box_select(start, world),
            Gesture::Dragging { .. } => {
                self.scene.detach_drag_joint();
            }
            Gesture::Moving | Gesture::Rotating { .. } => {
                self.scene.end_grab();
            }
        }
        if gesture != Gesture::Idle {
            debug!(?gesture, "gesture finished");
        }
    }

    /// Abort the live gesture without completing it.
    pub fn cancel_gesture(&mut self) {
        match std::mem::take(&mut self.interaction.gesture) {
            Gesture::Dragging { .. } => {
                self.scene.detach_drag_joint();
            }
            Gesture::Moving | Gesture::Rotating { .. } => {
                self.scene.end_grab();
            }
            _ => {}
        }
    }

    /// Switch tools. Clears transient state and, for creation and joint tools,
    /// the selection.
    pub fn set_tool(&mut self, tool: Tool) {
        self.cancel_gesture();
        self.interaction.joint_draft = None;
        self.interaction.joint_message_shown = false;
        if tool.clears_selection() {
            self.selection.clear();
            self.refresh_panel();
        }
        self.interaction.tool = tool;
        debug!(tool = tool.label(), "tool selected");
    }

    /// Back to the default tool with no gesture in progress.
    pub fn reset_interaction(&mut self) {
        self.cancel_gesture();
        self.scene.detach_drag_joint();
        self.interaction.joint_draft = None;
        self.interaction.joint_message_shown = false;
        self.interaction.tool = Tool::None;
    }

    /// Escape: cancel the gesture, else the tool, else the selection.
    pub fn cancel(&mut self) {
        if self.interaction.gesture != Gesture::Idle {
            self.cancel_gesture();
        } else if self.interaction.tool != Tool::None || self.interaction.joint_draft.is_some() {
            self.set_tool(Tool::None);
        } else {
            self.selection.clear();
            self.refresh_panel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{EditorSettings, ShapeStyle};

    pub(crate) fn state() -> AppState {
        AppState::with_settings(EditorSettings::default())
    }

    pub(crate) fn press(s: &mut AppState, x: f64, y: f64) {
        s.handle_pointer(PointerEvent::Pressed {
            pos: DVec2::new(x, y),
            button: PointerButton::Primary,
            modifiers: Modifiers::default(),
        });
    }

    pub(crate) fn move_to(s: &mut AppState, x: f64, y: f64) {
        s.handle_pointer(PointerEvent::Moved {
            pos: DVec2::new(x, y),
        });
    }

    pub(crate) fn release(s: &mut AppState, x: f64, y: f64) {
        s.handle_pointer(PointerEvent::Released {
            pos: DVec2::new(x, y),
            button: PointerButton::Primary,
        });
    }

    #[test]
    fn test_tool_from_name() {
        assert_eq!(Tool::from_name("hinge"), Some(Tool::Hinge));
        assert_eq!(Tool::from_name("None"), Some(Tool::None));
        assert_eq!(Tool::from_name("laser"), None);
    }

    #[test]
    fn test_creation_tool_clears_selection() {
        let mut s = state();
        let id = s
            .scene
            .create_circle(DVec2::ZERO, 10.0, ShapeStyle::default())
            .unwrap();
        s.selection.select(id);
        s.set_tool(Tool::Move);
        assert!(!s.selection.is_empty());
        s.set_tool(Tool::Box);
        assert!(s.selection.is_empty());
    }

    #[test]
    fn test_escape_cascade() {
        let mut s = state();
        let id = s
            .scene
            .create_circle(DVec2::ZERO, 10.0, ShapeStyle::default())
            .unwrap();
        s.selection.select(id);
        s.set_tool(Tool::Select);
        press(&mut s, 500.0, 100.0);
        assert!(matches!(s.interaction.gesture, Gesture::BoxSelecting { .. }));
        s.cancel();
        assert_eq!(s.interaction.gesture, Gesture::Idle);
        assert_eq!(s.interaction.tool, Tool::Select);
        s.cancel();
        assert_eq!(s.interaction.tool, Tool::None);
        s.selection.select(id);
        s.cancel();
        assert!(s.selection.is_empty());
    }
}
