//! Factory functions for creating snapshot test data.
//!
//! Builds `ObjectData`, `ConstraintData` and `SceneSnapshot` values the way a
//! saved file would contain them, for tests and scripted scenes.

use shared::*;

// ── Shape factories ─────────────────────────────────────────────

/// Shape with default material and color.
pub fn shape(geometry: ShapeGeometry) -> ShapeData {
    ShapeData {
        geometry,
        friction: DEFAULT_FRICTION,
        elasticity: DEFAULT_ELASTICITY,
        density: DEFAULT_DENSITY,
        color: DEFAULT_SHAPE_COLOR,
        original_dynamic_color: Some(DEFAULT_SHAPE_COLOR),
        collision_category: COLLIDABLE_CATEGORY,
    }
}

// ── Object factories ────────────────────────────────────────────

/// Dynamic single-shape body at rest.
pub fn object(id: u64, position: [f64; 2], geometry: ShapeGeometry) -> ObjectData {
    ObjectData {
        body_id: Some(format!("body_{id}")),
        position,
        angle: 0.0,
        velocity: [0.0, 0.0],
        angular_velocity: 0.0,
        body_type: BodyType::Dynamic,
        shapes: vec![shape(geometry)],
    }
}

/// Dynamic circle body.
pub fn circle_object(id: u64, position: [f64; 2], radius: f64) -> ObjectData {
    object(id, position, ShapeGeometry::Circle { radius })
}

/// Dynamic box body.
pub fn box_object(id: u64, position: [f64; 2], width: f64, height: f64) -> ObjectData {
    object(id, position, ShapeGeometry::Box { width, height })
}

/// Static box body, e.g. a floor.
pub fn static_box_object(id: u64, position: [f64; 2], width: f64, height: f64) -> ObjectData {
    let mut obj = box_object(id, position, width, height);
    obj.body_type = BodyType::Static;
    obj
}

// ── Constraint factories ────────────────────────────────────────

pub fn pin_joint(a: &str, b: &str, anchor_a: [f64; 2], anchor_b: [f64; 2]) -> ConstraintData {
    ConstraintData::PinJoint {
        body_a_id: a.to_string(),
        body_b_id: b.to_string(),
        anchor_a,
        anchor_b,
    }
}

pub fn spring(a: &str, b: &str, rest_length: f64) -> ConstraintData {
    ConstraintData::DampedSpring {
        body_a_id: a.to_string(),
        body_b_id: b.to_string(),
        anchor_a: [0.0, 0.0],
        anchor_b: [0.0, 0.0],
        rest_length,
        stiffness: 1000.0,
        damping: 10.0,
    }
}

// ── SceneSnapshot factories ─────────────────────────────────────

/// Scene from objects and constraints with default ambient settings.
/// The id counter is left out so it is recomputed on restore.
pub fn scene(objects: Vec<ObjectData>, constraints: Vec<ConstraintData>) -> SceneSnapshot {
    SceneSnapshot {
        objects,
        constraints,
        next_body_id_counter: None,
        ..SceneSnapshot::default()
    }
}

/// Empty scene.
pub fn empty_scene() -> SceneSnapshot {
    SceneSnapshot::default()
}

/// A ball resting above a static floor.
pub fn scene_ball_on_floor() -> SceneSnapshot {
    scene(
        vec![
            static_box_object(0, [400.0, 50.0], 800.0, 20.0),
            circle_object(1, [400.0, 300.0], 20.0),
        ],
        Vec::new(),
    )
}

/// A box hanging from the world anchor on a pin, plus a spring to a circle.
pub fn scene_pendulum() -> SceneSnapshot {
    scene(
        vec![
            box_object(0, [200.0, 400.0], 40.0, 40.0),
            circle_object(1, [320.0, 400.0], 15.0),
        ],
        vec![
            pin_joint(ANCHOR_BODY_ID, "body_0", [200.0, 600.0], [0.0, 20.0]),
            spring("body_0", "body_1", 120.0),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_ids() {
        let obj = circle_object(7, [1.0, 2.0], 3.0);
        assert_eq!(obj.body_id.as_deref(), Some("body_7"));
        assert_eq!(obj.shapes.len(), 1);
    }

    #[test]
    fn test_static_box() {
        let obj = static_box_object(0, [0.0, 0.0], 10.0, 10.0);
        assert_eq!(obj.body_type, BodyType::Static);
    }

    #[test]
    fn test_pendulum_references_anchor() {
        let s = scene_pendulum();
        assert_eq!(s.constraints[0].endpoints(), (ANCHOR_BODY_ID, "body_0"));
        assert!(s.next_body_id_counter.is_none());
    }

    #[test]
    fn test_scene_serializes() {
        let s = scene_ball_on_floor();
        let json = serde_json::to_string(&s).unwrap();
        let back: SceneSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }
}
