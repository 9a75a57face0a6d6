//! Integration tests for TestHarness.
//!
//! Drives tools with world-space pointer input and checks scene, selection
//! and history the way a user session would leave them.

use glam::DVec2;
use marbles_lib::fixtures;
use marbles_lib::harness::TestHarness;
use marbles_lib::interaction::{Modifiers, Tool};
use marbles_lib::physics::BodyType;
use marbles_lib::state::editor_ops::Shortcut;
use marbles_lib::state::{JointKind, PanelMode};

#[test]
fn test_harness_undo_redo_cycle() {
    let mut h = TestHarness::new();
    h.create_box(0.0, 0.0, 20.0, 20.0).unwrap();
    h.create_circle(50.0, 0.0, 10.0).unwrap();
    assert_eq!(h.body_count(), 2);

    assert!(h.undo());
    assert_eq!(h.body_count(), 1);

    assert!(h.undo());
    assert_eq!(h.body_count(), 0);

    assert!(!h.undo()); // nothing to undo
    assert_eq!(h.body_count(), 0);

    assert!(h.redo());
    assert!(h.redo());
    assert_eq!(h.body_count(), 2);
    assert!(!h.redo());
}

#[test]
fn test_harness_new_edit_discards_redo() {
    let mut h = TestHarness::new();
    h.create_box(0.0, 0.0, 20.0, 20.0).unwrap();
    h.create_box(50.0, 0.0, 20.0, 20.0).unwrap();
    assert!(h.undo());

    h.create_circle(0.0, 100.0, 10.0).unwrap();
    assert!(!h.redo());
    assert_eq!(h.body_count(), 2);
    let names: Vec<_> = h
        .app
        .scene
        .world
        .bodies()
        .map(marbles_lib::state::body_display_name)
        .collect();
    // undo rewinds the id counter with the snapshot
    assert_eq!(names, ["Box (body_0)", "Circle (body_1)"]);
}

#[test]
fn test_harness_draw_box_with_tool() {
    let mut h = TestHarness::new();
    h.set_tool(Tool::Box);
    h.drag(DVec2::new(100.0, 100.0), DVec2::new(160.0, 140.0));

    assert_eq!(h.body_count(), 1);
    assert_eq!(h.history_len(), 1);
    let body = h.app.scene.world.bodies().next().unwrap();
    assert_eq!(body.position, DVec2::new(130.0, 120.0));
    assert_eq!(h.app.selection.bodies(), &[body.id]);
    assert_eq!(h.app.panel, PanelMode::Object);
}

#[test]
fn test_harness_tiny_circle_is_rejected() {
    let mut h = TestHarness::new();
    h.set_tool(Tool::Circle);
    h.drag(DVec2::new(0.0, 0.0), DVec2::new(2.0, 0.0));
    assert_eq!(h.body_count(), 0);
    assert_eq!(h.last_notice(), Some("Object too small to create."));
}

#[test]
fn test_harness_move_tool_is_one_undo_step() {
    let mut h = TestHarness::new();
    let id = h.create_box(0.0, 0.0, 40.0, 40.0).unwrap();
    h.select(&[id]);
    h.set_tool(Tool::Move);
    let before = h.history_len();

    h.press(DVec2::new(0.0, 0.0));
    h.move_to(DVec2::new(10.0, 10.0));
    h.move_to(DVec2::new(30.0, 50.0));
    h.release(DVec2::new(30.0, 50.0));

    assert_eq!(h.history_len(), before + 1);
    let pos = h.app.scene.world.body(id).unwrap().position;
    assert!((pos - DVec2::new(30.0, 50.0)).length() < 1e-9);

    assert!(h.undo());
    let pos = h.app.scene.world.body(id).unwrap().position;
    assert!(pos.length() < 1e-9);
}

#[test]
fn test_harness_select_tool_shift_extends_and_box_selects() {
    let mut h = TestHarness::new();
    let a = h.create_box(0.0, 0.0, 20.0, 20.0).unwrap();
    let b = h.create_box(100.0, 0.0, 20.0, 20.0).unwrap();
    let c = h.create_box(300.0, 300.0, 20.0, 20.0).unwrap();
    h.set_tool(Tool::Select);

    h.click(DVec2::new(0.0, 0.0));
    h.press_with(
        DVec2::new(100.0, 0.0),
        Modifiers {
            shift: true,
            ctrl: false,
        },
    );
    h.release(DVec2::new(100.0, 0.0));
    assert_eq!(h.app.selection.bodies(), &[a, b]);

    // dragging a box over empty space replaces the selection
    h.drag(DVec2::new(250.0, 250.0), DVec2::new(350.0, 350.0));
    assert_eq!(h.app.selection.bodies(), &[c]);
}

#[test]
fn test_harness_hinge_tool_two_clicks() {
    let mut h = TestHarness::new();
    let a = h.create_box(0.0, 0.0, 20.0, 20.0).unwrap();
    let b = h.create_box(100.0, 0.0, 20.0, 20.0).unwrap();
    h.set_tool(Tool::Hinge);

    h.click(DVec2::new(0.0, 0.0));
    assert!(h.last_notice().is_some());
    h.app.notices.dismiss();

    h.click(DVec2::new(100.0, 0.0));
    assert_eq!(h.constraint_count(), 1);
    assert_eq!(h.app.interaction.tool, Tool::None);
    let joint = h.app.scene.world.constraints().next().unwrap();
    assert_eq!((joint.a, joint.b), (a, b));
    assert!(joint.is_pin());
}

#[test]
fn test_harness_joint_on_empty_space_cancels_tool() {
    let mut h = TestHarness::new();
    h.set_tool(Tool::Spring);
    h.click(DVec2::new(500.0, 500.0));
    assert_eq!(h.app.interaction.tool, Tool::None);
    assert_eq!(h.last_notice(), Some("No object found for the first anchor."));
    assert_eq!(h.constraint_count(), 0);
}

#[test]
fn test_harness_drag_tool_leaves_no_joint_behind() {
    let mut h = TestHarness::new();
    let id = h.create_circle(0.0, 0.0, 20.0).unwrap();
    h.app.toggle_running();
    h.set_tool(Tool::Drag);

    h.press(DVec2::new(0.0, 0.0));
    assert_eq!(h.constraint_count(), 1);
    h.move_to(DVec2::new(0.0, 200.0));
    h.step(30);
    h.release(DVec2::new(0.0, 200.0));

    assert_eq!(h.constraint_count(), 0);
    assert!(h.app.scene.world.body(id).unwrap().position.y > 0.0);
    // the drag joint never reaches a snapshot
    assert!(h.app.scene.snapshot().constraints.is_empty());
}

#[test]
fn test_harness_load_fixture_scene() {
    let mut h = TestHarness::new();
    h.load_scene(fixtures::scene_pendulum());
    assert_eq!(h.body_count(), 2);
    assert_eq!(h.constraint_count(), 2);
    assert_eq!(h.history_len(), 0);
    assert_eq!(h.app.scene.next_body_id_counter(), 2);

    let id = h.create_circle(0.0, 0.0, 5.0).unwrap();
    assert_eq!(id.to_string(), "body_2");
}

#[test]
fn test_harness_ball_falls_onto_floor() {
    let mut h = TestHarness::new();
    h.load_scene(fixtures::scene_ball_on_floor());
    h.app.toggle_running();
    h.step(240);

    let bodies: Vec<_> = h.app.scene.world.bodies().collect();
    let floor = bodies.iter().find(|b| b.body_type == BodyType::Static).unwrap();
    let ball = bodies.iter().find(|b| b.body_type == BodyType::Dynamic).unwrap();
    assert_eq!(floor.position, DVec2::new(400.0, 50.0));
    // resting on top of the floor, not through it
    assert!(ball.position.y > 50.0);
    assert!(ball.position.y < 300.0);
}

#[test]
fn test_harness_save_and_load_file() {
    let path = std::env::temp_dir().join(format!("marbles_it_{}.json", std::process::id()));
    let mut h = TestHarness::new();
    h.create_box(10.0, 10.0, 30.0, 30.0).unwrap();
    h.app.save_to(&path);
    h.app.notices.dismiss();

    let mut other = TestHarness::new();
    other.create_circle(0.0, 0.0, 5.0).unwrap();
    other.app.load_from(&path);
    assert_eq!(other.body_count(), 1);
    // loading is undoable
    assert!(other.undo());
    assert_eq!(other.body_count(), 1);
    assert_eq!(
        other.app.scene.world.bodies().next().unwrap().shapes[0].kind,
        marbles_lib::physics::ShapeKind::Circle { radius: 5.0 }
    );
    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_harness_load_missing_file_keeps_scene() {
    let mut h = TestHarness::new();
    h.create_box(0.0, 0.0, 20.0, 20.0).unwrap();
    h.app.load_from(std::path::Path::new("/nonexistent/marbles/scene.json"));
    assert_eq!(h.body_count(), 1);
    assert!(h.last_notice().is_some());
}

#[test]
fn test_harness_joint_helper_with_anchor() {
    let mut h = TestHarness::new();
    let id = h.create_box(0.0, 0.0, 20.0, 20.0).unwrap();
    h.create_joint(
        JointKind::Spring,
        marbles_lib::physics::BodyId::ANCHOR,
        id,
        DVec2::new(0.0, 100.0),
        DVec2::ZERO,
    )
    .unwrap();
    let snapshot = h.app.scene.snapshot();
    assert_eq!(snapshot.constraints.len(), 1);
    assert!(h.export_scene_json().contains(shared::ANCHOR_BODY_ID));
}

#[test]
fn test_harness_pause_and_copy_mid_move_keep_bodies_dynamic() {
    let mut h = TestHarness::new();
    let id = h.create_circle(0.0, 0.0, 20.0).unwrap();
    h.app.toggle_running();
    h.select(&[id]);
    h.set_tool(Tool::Move);

    h.press(DVec2::new(0.0, 0.0));
    assert_eq!(h.app.scene.world.body(id).unwrap().body_type, BodyType::Kinematic);
    h.app.handle_shortcut(Shortcut::ToggleRunning);
    h.app.handle_shortcut(Shortcut::Copy);
    h.release(DVec2::new(0.0, 0.0));
    h.app.handle_shortcut(Shortcut::Paste);

    assert_eq!(h.body_count(), 2);
    assert!(h.app.scene.world.bodies().all(|b| b.body_type == BodyType::Dynamic));
    assert!(h.undo());
    assert!(h.undo());
    assert!(h.app.scene.world.bodies().all(|b| b.body_type == BodyType::Dynamic));
    assert!(h
        .app
        .scene
        .snapshot()
        .objects
        .iter()
        .all(|o| o.body_type == BodyType::Dynamic));
}

fn run_with_trails(h: &mut TestHarness) {
    if !h.app.scene.show_trails {
        h.app.toggle_trails();
    }
    if !h.app.scene.simulation_running {
        h.app.toggle_running();
    }
    h.step(5);
    assert!(!h.app.trails.is_empty());
}

#[test]
fn test_harness_scene_replacement_clears_trails() {
    let path = std::env::temp_dir().join(format!("marbles_trails_{}.json", std::process::id()));
    let mut h = TestHarness::new();
    h.create_circle(0.0, 300.0, 10.0).unwrap();
    h.app.save_to(&path);
    h.app.notices.dismiss();

    run_with_trails(&mut h);
    h.app.load_from(&path);
    assert!(h.app.trails.is_empty());

    run_with_trails(&mut h);
    assert!(h.undo());
    assert!(h.app.trails.is_empty());

    run_with_trails(&mut h);
    h.app.new_scene();
    assert!(h.app.trails.is_empty());
    let _ = std::fs::remove_file(&path);
}
