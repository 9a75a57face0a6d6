use serde::{Deserialize, Serialize};

/// RGBA color, 0..=255 per channel
pub type Rgba = [u8; 4];

/// Reserved id of the world anchor body in saved constraints
pub const ANCHOR_BODY_ID: &str = "static_space_body_id";

pub const DEFAULT_SHAPE_COLOR: Rgba = [100, 150, 200, 200];
pub const DEFAULT_BACKGROUND_COLOR: Rgba = [20, 20, 20, 255];
pub const DEFAULT_DENSITY: f64 = 1.0;
pub const DEFAULT_FRICTION: f64 = 0.5;
pub const DEFAULT_ELASTICITY: f64 = 0.8;
pub const COLLIDABLE_CATEGORY: u32 = 0b1;
pub const NON_COLLIDABLE_CATEGORY: u32 = 0b10;

fn default_density() -> f64 {
    DEFAULT_DENSITY
}

fn default_friction() -> f64 {
    DEFAULT_FRICTION
}

fn default_elasticity() -> f64 {
    DEFAULT_ELASTICITY
}

fn default_color() -> Rgba {
    DEFAULT_SHAPE_COLOR
}

fn default_background() -> Rgba {
    DEFAULT_BACKGROUND_COLOR
}

fn default_collision_category() -> u32 {
    COLLIDABLE_CATEGORY
}

fn default_radius() -> f64 {
    10.0
}

fn default_side() -> f64 {
    20.0
}

fn default_one() -> f64 {
    1.0
}

/// Simulation type of a body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyType {
    #[default]
    Dynamic,
    Static,
    Kinematic,
}

/// Shape geometry in body-local space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShapeGeometry {
    Circle {
        #[serde(default = "default_radius")]
        radius: f64,
    },
    Box {
        #[serde(default = "default_side")]
        width: f64,
        #[serde(default = "default_side")]
        height: f64,
    },
}

/// Saved shape with material and display attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeData {
    #[serde(flatten)]
    pub geometry: ShapeGeometry,
    #[serde(default = "default_friction")]
    pub friction: f64,
    #[serde(default = "default_elasticity")]
    pub elasticity: f64,
    #[serde(default = "default_density")]
    pub density: f64,
    #[serde(default = "default_color")]
    pub color: Rgba,
    /// Color restored when the body becomes dynamic. Falls back to `color`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_dynamic_color: Option<Rgba>,
    #[serde(default = "default_collision_category")]
    pub collision_category: u32,
}

impl ShapeData {
    pub fn dynamic_color(&self) -> Rgba {
        self.original_dynamic_color.unwrap_or(self.color)
    }
}

/// Saved rigid body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_id: Option<String>,
    #[serde(default)]
    pub position: [f64; 2],
    #[serde(default)]
    pub angle: f64,
    #[serde(default)]
    pub velocity: [f64; 2],
    #[serde(default)]
    pub angular_velocity: f64,
    #[serde(default)]
    pub body_type: BodyType,
    #[serde(default)]
    pub shapes: Vec<ShapeData>,
}

/// Saved joint between two bodies, referenced by body id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ConstraintData {
    PinJoint {
        body_a_id: String,
        body_b_id: String,
        #[serde(default)]
        anchor_a: [f64; 2],
        #[serde(default)]
        anchor_b: [f64; 2],
    },
    DampedSpring {
        body_a_id: String,
        body_b_id: String,
        #[serde(default)]
        anchor_a: [f64; 2],
        #[serde(default)]
        anchor_b: [f64; 2],
        #[serde(default)]
        rest_length: f64,
        #[serde(default)]
        stiffness: f64,
        #[serde(default)]
        damping: f64,
    },
}

impl ConstraintData {
    /// Ids of both endpoint bodies
    pub fn endpoints(&self) -> (&str, &str) {
        match self {
            ConstraintData::PinJoint {
                body_a_id, body_b_id, ..
            }
            | ConstraintData::DampedSpring {
                body_a_id, body_b_id, ..
            } => (body_a_id, body_b_id),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            ConstraintData::PinJoint { .. } => "PinJoint",
            ConstraintData::DampedSpring { .. } => "DampedSpring",
        }
    }
}

/// Complete scene: bodies, joints and ambient settings.
///
/// This is both the save-file format and the history entry type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSnapshot {
    #[serde(default)]
    pub objects: Vec<ObjectData>,
    #[serde(default)]
    pub constraints: Vec<ConstraintData>,
    #[serde(default = "default_background")]
    pub background_color: Rgba,
    #[serde(default)]
    pub simulation_running: bool,
    #[serde(default)]
    pub show_trails: bool,
    #[serde(default)]
    pub camera_offset: [f64; 2],
    #[serde(default = "default_one")]
    pub camera_zoom: f64,
    #[serde(default = "default_one")]
    pub gravity_multiplier: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_body_id_counter: Option<u64>,
}

impl Default for SceneSnapshot {
    fn default() -> Self {
        Self {
            objects: Vec::new(),
            constraints: Vec::new(),
            background_color: DEFAULT_BACKGROUND_COLOR,
            simulation_running: false,
            show_trails: false,
            camera_offset: [0.0, 0.0],
            camera_zoom: 1.0,
            gravity_multiplier: 1.0,
            next_body_id_counter: Some(0),
        }
    }
}

/// Copied bodies and joints (clipboard contents)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionSnapshot {
    #[serde(default)]
    pub objects: Vec<ObjectData>,
    #[serde(default)]
    pub constraints: Vec<ConstraintData>,
}

impl SelectionSnapshot {
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty() && self.constraints.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip<T: Serialize + for<'de> Deserialize<'de> + PartialEq + std::fmt::Debug>(val: &T) {
        let json = serde_json::to_string(val).expect("serialize");
        let back: T = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(*val, back);
    }

    #[test]
    fn test_body_type_serde() {
        assert_eq!(serde_json::to_string(&BodyType::Dynamic).unwrap(), r#""dynamic""#);
        assert_eq!(serde_json::to_string(&BodyType::Kinematic).unwrap(), r#""kinematic""#);
        let t: BodyType = serde_json::from_str(r#""static""#).unwrap();
        assert_eq!(t, BodyType::Static);
    }

    #[test]
    fn test_shape_flattened_type_tag() {
        let shape = ShapeData {
            geometry: ShapeGeometry::Box { width: 50.0, height: 30.0 },
            friction: 0.5,
            elasticity: 0.8,
            density: 1.0,
            color: [1, 2, 3, 4],
            original_dynamic_color: Some([1, 2, 3, 4]),
            collision_category: COLLIDABLE_CATEGORY,
        };
        roundtrip(&shape);
        let json = serde_json::to_string(&shape).unwrap();
        assert!(json.contains(r#""type":"box""#));
        assert!(json.contains(r#""width":50.0"#));
    }

    #[test]
    fn test_shape_defaults_when_fields_missing() {
        let shape: ShapeData = serde_json::from_str(r#"{"type": "circle"}"#).unwrap();
        assert_eq!(shape.geometry, ShapeGeometry::Circle { radius: 10.0 });
        assert_eq!(shape.density, 1.0);
        assert_eq!(shape.friction, 0.5);
        assert_eq!(shape.elasticity, 0.8);
        assert_eq!(shape.color, DEFAULT_SHAPE_COLOR);
        assert_eq!(shape.collision_category, COLLIDABLE_CATEGORY);

        let shape: ShapeData = serde_json::from_str(r#"{"type": "box"}"#).unwrap();
        assert_eq!(shape.geometry, ShapeGeometry::Box { width: 20.0, height: 20.0 });
    }

    #[test]
    fn test_dynamic_color_falls_back_to_color() {
        let shape: ShapeData =
            serde_json::from_str(r#"{"type": "circle", "radius": 5, "color": [9, 8, 7, 6]}"#).unwrap();
        assert_eq!(shape.dynamic_color(), [9, 8, 7, 6]);
    }

    #[test]
    fn test_constraint_serde_tags() {
        let pin = ConstraintData::PinJoint {
            body_a_id: "body_0".into(),
            body_b_id: ANCHOR_BODY_ID.into(),
            anchor_a: [1.0, 2.0],
            anchor_b: [0.0, 0.0],
        };
        roundtrip(&pin);
        let json = serde_json::to_string(&pin).unwrap();
        assert!(json.contains(r#""type":"PinJoint""#));
        assert_eq!(pin.endpoints(), ("body_0", ANCHOR_BODY_ID));

        let spring = ConstraintData::DampedSpring {
            body_a_id: "body_1".into(),
            body_b_id: "body_2".into(),
            anchor_a: [0.0, 0.0],
            anchor_b: [0.0, 0.0],
            rest_length: 40.0,
            stiffness: 1000.0,
            damping: 10.0,
        };
        roundtrip(&spring);
        assert_eq!(spring.type_name(), "DampedSpring");
    }

    #[test]
    fn test_empty_scene_defaults() {
        let scene: SceneSnapshot = serde_json::from_str("{}").unwrap();
        assert!(scene.objects.is_empty());
        assert_eq!(scene.background_color, DEFAULT_BACKGROUND_COLOR);
        assert_eq!(scene.camera_zoom, 1.0);
        assert_eq!(scene.gravity_multiplier, 1.0);
        assert!(scene.next_body_id_counter.is_none());
    }

    #[test]
    fn test_full_scene_serde_roundtrip() {
        let scene = SceneSnapshot {
            objects: vec![ObjectData {
                body_id: Some("body_3".into()),
                position: [10.0, -5.0],
                angle: 0.5,
                velocity: [1.0, 2.0],
                angular_velocity: 0.25,
                body_type: BodyType::Static,
                shapes: vec![ShapeData {
                    geometry: ShapeGeometry::Circle { radius: 12.0 },
                    friction: 0.1,
                    elasticity: 0.2,
                    density: 3.0,
                    color: [100, 100, 100, 255],
                    original_dynamic_color: Some([10, 20, 30, 255]),
                    collision_category: NON_COLLIDABLE_CATEGORY,
                }],
            }],
            constraints: vec![],
            background_color: [1, 1, 1, 255],
            simulation_running: true,
            show_trails: true,
            camera_offset: [3.0, 4.0],
            camera_zoom: 2.0,
            gravity_multiplier: -0.5,
            next_body_id_counter: Some(4),
        };
        roundtrip(&scene);
    }
}
