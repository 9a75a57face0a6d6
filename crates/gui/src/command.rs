//! JSON command protocol for headless scripting of the editor.
//!
//! Every command maps onto one scene or editor operation and answers with a
//! [`CommandResponse`]. Body ids use their saved form (`body_<n>`).

use glam::DVec2;
use serde::{Deserialize, Serialize};
use shared::{BodyType, Rgba};

use crate::harness::TestHarness;
use crate::physics::BodyId;
use crate::state::{body_display_name, constraint_display_name, BodyProperty, JointKind, ShapeStyle};

fn default_frames() -> usize {
    1
}

/// A command understood by the scripting interface.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum AgentCommand {
    /// Create a box centered at `position`
    CreateBox {
        position: [f64; 2],
        width: f64,
        height: f64,
        #[serde(default)]
        density: Option<f64>,
        #[serde(default)]
        body_type: BodyType,
        #[serde(default)]
        color: Option<Rgba>,
    },
    /// Create a circle centered at `position`
    CreateCircle {
        position: [f64; 2],
        radius: f64,
        #[serde(default)]
        density: Option<f64>,
        #[serde(default)]
        body_type: BodyType,
        #[serde(default)]
        color: Option<Rgba>,
    },
    /// Replace the selection with the given bodies.
    Select { ids: Vec<String> },
    /// Clear selection.
    ClearSelection,
    /// Change material or color of the selected bodies. Each given field is
    /// applied as its own undoable edit.
    SetProperty {
        #[serde(default)]
        density: Option<f64>,
        #[serde(default)]
        friction: Option<f64>,
        #[serde(default)]
        elasticity: Option<f64>,
        #[serde(default)]
        color: Option<Rgba>,
        #[serde(default)]
        random_color: bool,
    },
    /// Flip the selected bodies between static and dynamic.
    ToggleStatic,
    /// Join two bodies at world-space anchors.
    CreateJoint {
        kind: JointKind,
        body_a: String,
        body_b: String,
        anchor_a: [f64; 2],
        anchor_b: [f64; 2],
    },
    /// Delete the selected bodies and joints.
    DeleteSelected,
    /// Set the background color, or pick a random one when omitted.
    SetBackground {
        #[serde(default)]
        color: Option<Rgba>,
    },
    SetGravity { multiplier: f64 },
    ToggleRunning,
    /// Advance fixed timesteps (bodies only move while running).
    Step {
        #[serde(default = "default_frames")]
        frames: usize,
    },
    /// Undo the last operation.
    Undo,
    /// Redo the last undone operation.
    Redo,
    /// Copy the selection to the clipboard.
    Copy,
    /// Paste the clipboard, offset from the copied position.
    Paste {
        #[serde(default)]
        offset: Option<[f64; 2]>,
    },
    /// Start over with an empty scene and history.
    NewScene,
    /// Inspect the scene: list bodies and joints.
    Inspect,
    /// Export the scene as JSON.
    ExportScene,
}

/// Response from executing a command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl CommandResponse {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
            data: None,
        }
    }

    fn ok_with_data(data: serde_json::Value) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(msg.into()),
            data: None,
        }
    }
}

impl<E: std::fmt::Display> From<std::result::Result<serde_json::Value, E>> for CommandResponse {
    fn from(result: std::result::Result<serde_json::Value, E>) -> Self {
        match result {
            Ok(data) => Self::ok_with_data(data),
            Err(e) => Self::err(e.to_string()),
        }
    }
}

fn parse_body(id: &str) -> Result<BodyId, String> {
    BodyId::parse(id).ok_or_else(|| format!("invalid body id: {id}"))
}

fn style(density: Option<f64>, body_type: BodyType, color: Option<Rgba>) -> ShapeStyle {
    let mut style = ShapeStyle::default().with_body_type(body_type);
    if let Some(d) = density {
        style = style.with_density(d);
    }
    if let Some(c) = color {
        style = style.with_color(c);
    }
    style
}

fn ids<T: ToString>(items: &[T]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

/// Execute a single command on the harness.
pub fn execute_command(harness: &mut TestHarness, cmd: AgentCommand) -> CommandResponse {
    let app = &mut harness.app;
    match cmd {
        AgentCommand::CreateBox {
            position,
            width,
            height,
            density,
            body_type,
            color,
        } => app
            .scene
            .create_box(
                DVec2::from(position),
                width,
                height,
                style(density, body_type, color),
            )
            .map(|id| serde_json::json!({ "id": id.to_string() }))
            .into(),

        AgentCommand::CreateCircle {
            position,
            radius,
            density,
            body_type,
            color,
        } => app
            .scene
            .create_circle(DVec2::from(position), radius, style(density, body_type, color))
            .map(|id| serde_json::json!({ "id": id.to_string() }))
            .into(),

        AgentCommand::Select { ids: wanted } => {
            let mut bodies = Vec::with_capacity(wanted.len());
            for id in &wanted {
                match parse_body(id) {
                    Ok(body) if app.scene.world.contains_body(body) => bodies.push(body),
                    Ok(_) => return CommandResponse::err(format!("unknown body: {id}")),
                    Err(e) => return CommandResponse::err(e),
                }
            }
            app.selection.set(bodies, Vec::new());
            app.refresh_panel();
            CommandResponse::ok_with_data(serde_json::json!({
                "selected": ids(app.selection.bodies()),
            }))
        }

        AgentCommand::ClearSelection => {
            app.selection.clear();
            app.refresh_panel();
            CommandResponse::ok()
        }

        AgentCommand::SetProperty {
            density,
            friction,
            elasticity,
            color,
            random_color,
        } => {
            let properties = [
                density.map(BodyProperty::Density),
                friction.map(BodyProperty::Friction),
                elasticity.map(BodyProperty::Elasticity),
                color.map(BodyProperty::Color),
                random_color.then_some(BodyProperty::RandomColor),
            ];
            let mut updated = 0;
            for property in properties.into_iter().flatten() {
                match app.scene.apply_property(app.selection.bodies(), property) {
                    Ok(n) => updated += n,
                    Err(e) => return CommandResponse::err(e.to_string()),
                }
            }
            CommandResponse::ok_with_data(serde_json::json!({ "updated": updated }))
        }

        AgentCommand::ToggleStatic => app
            .scene
            .toggle_static_dynamic(app.selection.bodies())
            .map(|t| serde_json::json!({ "body_type": t }))
            .into(),

        AgentCommand::CreateJoint {
            kind,
            body_a,
            body_b,
            anchor_a,
            anchor_b,
        } => {
            let (a, b) = match (parse_body(&body_a), parse_body(&body_b)) {
                (Ok(a), Ok(b)) => (a, b),
                (Err(e), _) | (_, Err(e)) => return CommandResponse::err(e),
            };
            app.scene
                .create_joint(kind, a, b, DVec2::from(anchor_a), DVec2::from(anchor_b))
                .map(|id| serde_json::json!({ "id": id.to_string() }))
                .into()
        }

        AgentCommand::DeleteSelected => {
            let report = app.delete_selected();
            CommandResponse::ok_with_data(serde_json::json!({
                "bodies": ids(&report.bodies),
                "constraints": report.constraints,
            }))
        }

        AgentCommand::SetBackground { color } => {
            app.set_background(color);
            CommandResponse::ok_with_data(serde_json::json!({
                "color": app.scene.background_color,
            }))
        }

        AgentCommand::SetGravity { multiplier } => app
            .scene
            .set_gravity_multiplier(multiplier)
            .map(|()| serde_json::json!({ "gravity": multiplier }))
            .into(),

        AgentCommand::ToggleRunning => {
            let running = app.toggle_running();
            CommandResponse::ok_with_data(serde_json::json!({ "running": running }))
        }

        AgentCommand::Step { frames } => {
            harness.step(frames);
            CommandResponse::ok_with_data(serde_json::json!({ "frames": frames }))
        }

        AgentCommand::Undo => {
            let success = harness.undo();
            CommandResponse::ok_with_data(serde_json::json!({ "undone": success }))
        }

        AgentCommand::Redo => {
            let success = harness.redo();
            CommandResponse::ok_with_data(serde_json::json!({ "redone": success }))
        }

        AgentCommand::Copy => {
            if app.selection.is_empty() {
                return CommandResponse::err("Nothing selected to copy.");
            }
            app.copy_selection();
            let copied = app.clipboard.as_ref().map_or(0, |c| c.objects.len());
            CommandResponse::ok_with_data(serde_json::json!({ "copied": copied }))
        }

        AgentCommand::Paste { offset } => {
            let Some(clip) = app.clipboard.clone() else {
                return CommandResponse::err("Clipboard is empty.");
            };
            let offset = offset.map_or(crate::state::scene::PASTE_OFFSET, DVec2::from);
            app.reset_interaction();
            match app.scene.paste(&clip, offset) {
                Ok((bodies, joints)) => {
                    let data = serde_json::json!({
                        "bodies": ids(&bodies),
                        "constraints": joints.len(),
                    });
                    app.selection.set(bodies, joints);
                    app.refresh_panel();
                    CommandResponse::ok_with_data(data)
                }
                Err(e) => CommandResponse::err(e.to_string()),
            }
        }

        AgentCommand::NewScene => {
            app.new_scene();
            CommandResponse::ok()
        }

        AgentCommand::Inspect => {
            let world = &app.scene.world;
            let bodies: Vec<serde_json::Value> = world
                .bodies()
                .map(|body| {
                    serde_json::json!({
                        "id": body.id.to_string(),
                        "name": body_display_name(body),
                        "body_type": body.body_type,
                        "position": [body.position.x, body.position.y],
                        "angle": body.angle,
                        "mass": body.mass,
                        "shape_count": body.shapes.len(),
                    })
                })
                .collect();
            let constraints: Vec<serde_json::Value> = world
                .constraints()
                .filter(|c| Some(c.id) != app.scene.drag_joint())
                .map(|c| {
                    serde_json::json!({
                        "id": c.id.to_string(),
                        "name": constraint_display_name(c),
                        "type": c.kind.type_name(),
                    })
                })
                .collect();
            CommandResponse::ok_with_data(serde_json::json!({
                "body_count": bodies.len(),
                "bodies": bodies,
                "constraint_count": constraints.len(),
                "constraints": constraints,
                "selected": ids(app.selection.bodies()),
                "running": app.scene.simulation_running,
                "gravity": app.scene.gravity_multiplier(),
                "background": app.scene.background_color,
                "history_len": app.scene.history_len(),
            }))
        }

        AgentCommand::ExportScene => {
            let json = harness.export_scene_json();
            CommandResponse::ok_with_data(serde_json::json!({ "scene_json": json }))
        }
    }
}

/// Parse and execute a single JSON command string.
pub fn execute_json(harness: &mut TestHarness, json: &str) -> Result<CommandResponse, String> {
    let cmd: AgentCommand =
        serde_json::from_str(json).map_err(|e| format!("Invalid command JSON: {e}"))?;
    Ok(execute_command(harness, cmd))
}

/// Parse and execute multiple JSON commands (array).
pub fn execute_json_batch(
    harness: &mut TestHarness,
    json: &str,
) -> Result<Vec<CommandResponse>, String> {
    let cmds: Vec<AgentCommand> =
        serde_json::from_str(json).map_err(|e| format!("Invalid commands JSON: {e}"))?;
    Ok(cmds
        .into_iter()
        .map(|cmd| execute_command(harness, cmd))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_serde_undo() {
        let json = r#"{"command": "undo"}"#;
        let cmd: AgentCommand = serde_json::from_str(json).unwrap();
        assert!(matches!(cmd, AgentCommand::Undo));
    }

    #[test]
    fn test_command_serde_create_box_defaults() {
        let json = r#"{"command": "create_box", "position": [1.0, 2.0], "width": 30.0, "height": 40.0}"#;
        let cmd: AgentCommand = serde_json::from_str(json).unwrap();
        match cmd {
            AgentCommand::CreateBox {
                width,
                body_type,
                density,
                ..
            } => {
                assert_eq!(width, 30.0);
                assert_eq!(body_type, BodyType::Dynamic);
                assert_eq!(density, None);
            }
            _ => panic!("Expected CreateBox"),
        }
    }

    #[test]
    fn test_command_serde_create_joint() {
        let json = r#"{"command": "create_joint", "kind": "spring", "body_a": "body_0",
            "body_b": "static_space_body_id", "anchor_a": [0, 0], "anchor_b": [0, 100]}"#;
        let cmd: AgentCommand = serde_json::from_str(json).unwrap();
        match cmd {
            AgentCommand::CreateJoint { kind, body_b, .. } => {
                assert_eq!(kind, JointKind::Spring);
                assert_eq!(body_b, shared::ANCHOR_BODY_ID);
            }
            _ => panic!("Expected CreateJoint"),
        }
    }

    #[test]
    fn test_command_serde_step_default_frames() {
        let cmd: AgentCommand = serde_json::from_str(r#"{"command": "step"}"#).unwrap();
        assert!(matches!(cmd, AgentCommand::Step { frames: 1 }));
    }

    #[test]
    fn test_execute_create_box() {
        let mut h = TestHarness::new();
        let json = r#"{"command": "create_box", "position": [0, 0], "width": 20, "height": 20}"#;
        let resp = execute_json(&mut h, json).unwrap();
        assert!(resp.success);
        assert_eq!(resp.data.unwrap()["id"], "body_0");
        assert_eq!(h.body_count(), 1);
    }

    #[test]
    fn test_execute_degenerate_create_fails() {
        let mut h = TestHarness::new();
        let json = r#"{"command": "create_circle", "position": [0, 0], "radius": 0}"#;
        let resp = execute_json(&mut h, json).unwrap();
        assert!(!resp.success);
        assert!(resp.error.is_some());
        assert_eq!(h.history_len(), 0);
    }

    #[test]
    fn test_execute_select_unknown_body() {
        let mut h = TestHarness::new();
        let resp = execute_json(&mut h, r#"{"command": "select", "ids": ["body_9"]}"#).unwrap();
        assert!(!resp.success);
        let resp = execute_json(&mut h, r#"{"command": "select", "ids": ["nope"]}"#).unwrap();
        assert_eq!(resp.error.as_deref(), Some("invalid body id: nope"));
    }

    #[test]
    fn test_execute_set_property_counts_each_edit() {
        let mut h = TestHarness::new();
        let id = h.create_circle(0.0, 0.0, 10.0).unwrap();
        h.select(&[id]);
        let before = h.history_len();
        let resp = execute_json(
            &mut h,
            r#"{"command": "set_property", "friction": 0.1, "elasticity": 0.2}"#,
        )
        .unwrap();
        assert!(resp.success);
        assert_eq!(resp.data.unwrap()["updated"], 2);
        assert_eq!(h.history_len(), before + 2);
    }

    #[test]
    fn test_execute_inspect() {
        let mut h = TestHarness::new();
        h.create_box(0.0, 0.0, 20.0, 20.0).unwrap();
        h.create_circle(50.0, 0.0, 10.0).unwrap();

        let resp = execute_json(&mut h, r#"{"command": "inspect"}"#).unwrap();
        assert!(resp.success);
        let data = resp.data.unwrap();
        assert_eq!(data["body_count"], 2);
        assert_eq!(data["bodies"][1]["name"], "Circle (body_1)");
    }

    #[test]
    fn test_execute_undo_redo() {
        let mut h = TestHarness::new();
        h.create_box(0.0, 0.0, 20.0, 20.0).unwrap();

        let resp = execute_json(&mut h, r#"{"command": "undo"}"#).unwrap();
        assert!(resp.success);
        assert_eq!(resp.data.unwrap()["undone"], true);
        assert_eq!(h.body_count(), 0);

        let resp = execute_json(&mut h, r#"{"command": "redo"}"#).unwrap();
        assert!(resp.success);
        assert_eq!(resp.data.unwrap()["redone"], true);
        assert_eq!(h.body_count(), 1);
    }

    #[test]
    fn test_execute_copy_without_selection() {
        let mut h = TestHarness::new();
        let resp = execute_json(&mut h, r#"{"command": "copy"}"#).unwrap();
        assert!(!resp.success);
        let resp = execute_json(&mut h, r#"{"command": "paste"}"#).unwrap();
        assert_eq!(resp.error.as_deref(), Some("Clipboard is empty."));
    }

    #[test]
    fn test_execute_export_scene() {
        let mut h = TestHarness::new();
        h.create_box(0.0, 0.0, 20.0, 20.0).unwrap();

        let resp = execute_json(&mut h, r#"{"command": "export_scene"}"#).unwrap();
        assert!(resp.success);
        let data = resp.data.unwrap();
        let scene_json = data["scene_json"].as_str().unwrap();
        assert!(scene_json.contains("objects"));
    }

    #[test]
    fn test_execute_invalid_json() {
        let mut h = TestHarness::new();
        let result = execute_json(&mut h, "not valid json");
        assert!(result.is_err());
    }
}
