//! Rigid bodies.

use std::fmt;

use glam::DVec2;
pub use shared::BodyType;

use super::shape::{floor_positive, Shape};

/// Session-unique body identity.
///
/// Regular bodies display as `body_<n>`; the world anchor uses a reserved value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(u64);

impl BodyId {
    /// The immutable world anchor used for mouse dragging and as a joint endpoint.
    pub const ANCHOR: BodyId = BodyId(u64::MAX);

    pub fn new(n: u64) -> Self {
        Self(n)
    }

    pub fn number(self) -> u64 {
        self.0
    }

    pub fn is_anchor(self) -> bool {
        self == Self::ANCHOR
    }

    /// Parse a saved id (`body_<n>` or the anchor sentinel).
    pub fn parse(s: &str) -> Option<Self> {
        if s == shared::ANCHOR_BODY_ID {
            return Some(Self::ANCHOR);
        }
        s.strip_prefix("body_")?
            .parse::<u64>()
            .ok()
            .filter(|n| *n != u64::MAX)
            .map(Self)
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_anchor() {
            f.write_str(shared::ANCHOR_BODY_ID)
        } else {
            write!(f, "body_{}", self.0)
        }
    }
}

/// Transient data captured when a move or rotate gesture grabs a body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GrabState {
    /// Type to restore on release, set when the body was made kinematic for the gesture
    pub restore_type: Option<BodyType>,
    /// Pointer position minus body position at press time (world units)
    pub offset: DVec2,
    /// Body position at press time
    pub initial_position: DVec2,
    /// Body angle at press time
    pub initial_angle: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    pub id: BodyId,
    pub body_type: BodyType,
    pub position: DVec2,
    pub angle: f64,
    pub velocity: DVec2,
    pub angular_velocity: f64,
    pub mass: f64,
    pub inertia: f64,
    pub shapes: Vec<Shape>,
    pub grab: Option<GrabState>,
}

impl Body {
    /// A body with no shapes. Mass follows from `body_type` once shapes are attached.
    pub fn new(id: BodyId, body_type: BodyType, position: DVec2) -> Self {
        let mut body = Self {
            id,
            body_type,
            position,
            angle: 0.0,
            velocity: DVec2::ZERO,
            angular_velocity: 0.0,
            mass: f64::INFINITY,
            inertia: f64::INFINITY,
            shapes: Vec::new(),
            grab: None,
        };
        body.refresh_mass();
        body
    }

    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shapes.push(shape);
        self.refresh_mass();
        self
    }

    /// The world anchor: static, shapeless, at the origin.
    pub(crate) fn anchor() -> Self {
        Self::new(BodyId::ANCHOR, BodyType::Static, DVec2::ZERO)
    }

    pub fn is_dynamic(&self) -> bool {
        self.body_type == BodyType::Dynamic
    }

    /// Sum per-shape mass and inertia, each contribution floored.
    pub fn recompute_mass(&mut self) {
        let mass: f64 = self.shapes.iter().map(Shape::mass).sum();
        let inertia: f64 = self.shapes.iter().map(Shape::inertia).sum();
        self.mass = floor_positive(mass);
        self.inertia = floor_positive(inertia);
    }

    /// Recompute mass for dynamic bodies; others get infinite mass.
    pub fn refresh_mass(&mut self) {
        if self.is_dynamic() {
            self.recompute_mass();
        } else {
            self.mass = f64::INFINITY;
            self.inertia = f64::INFINITY;
        }
    }

    /// Change the simulation type, keeping mass and velocity consistent with it.
    pub fn set_body_type(&mut self, body_type: BodyType) {
        self.body_type = body_type;
        self.refresh_mass();
        if body_type == BodyType::Static {
            self.velocity = DVec2::ZERO;
            self.angular_velocity = 0.0;
        }
    }

    pub fn rotation(&self) -> DVec2 {
        DVec2::from_angle(self.angle)
    }

    pub fn local_to_world(&self, local: DVec2) -> DVec2 {
        self.position + self.rotation().rotate(local)
    }

    pub fn world_to_local(&self, world: DVec2) -> DVec2 {
        let r = self.rotation();
        DVec2::new(r.x, -r.y).rotate(world - self.position)
    }

    /// Box corners in world space. Empty for circles.
    pub fn world_vertices(&self, shape: &Shape) -> Vec<DVec2> {
        shape
            .local_vertices()
            .into_iter()
            .map(|v| self.local_to_world(v))
            .collect()
    }
}
