//! Joints between two bodies.

use std::fmt;

use glam::DVec2;

use super::body::BodyId;

/// World-allocated constraint handle. Not persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConstraintId(pub(crate) u64);

impl fmt::Display for ConstraintId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "joint_{}", self.0)
    }
}

/// Default spring stiffness for interactively created springs.
pub const DEFAULT_SPRING_STIFFNESS: f64 = 1000.0;
/// Default spring damping for interactively created springs.
pub const DEFAULT_SPRING_DAMPING: f64 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConstraintKind {
    /// Keeps the anchors at a fixed distance, captured when the joint is added.
    PinJoint { distance: f64 },
    DampedSpring {
        rest_length: f64,
        stiffness: f64,
        damping: f64,
    },
}

impl ConstraintKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            ConstraintKind::PinJoint { .. } => "PinJoint",
            ConstraintKind::DampedSpring { .. } => "DampedSpring",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Constraint {
    pub id: ConstraintId,
    pub a: BodyId,
    pub b: BodyId,
    /// Anchor on body A, body-local
    pub anchor_a: DVec2,
    /// Anchor on body B, body-local
    pub anchor_b: DVec2,
    /// Whether the two endpoint bodies still collide with each other
    pub collide_bodies: bool,
    pub kind: ConstraintKind,
}

/// A constraint before the world assigns it an id.
#[derive(Clone, Debug, PartialEq)]
pub struct ConstraintSpec {
    pub a: BodyId,
    pub b: BodyId,
    pub anchor_a: DVec2,
    pub anchor_b: DVec2,
    pub collide_bodies: bool,
    pub kind: ConstraintSpecKind,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConstraintSpecKind {
    PinJoint,
    DampedSpring {
        rest_length: f64,
        stiffness: f64,
        damping: f64,
    },
}

impl ConstraintSpec {
    pub fn pin(a: BodyId, b: BodyId, anchor_a: DVec2, anchor_b: DVec2) -> Self {
        Self {
            a,
            b,
            anchor_a,
            anchor_b,
            collide_bodies: true,
            kind: ConstraintSpecKind::PinJoint,
        }
    }

    pub fn spring(
        a: BodyId,
        b: BodyId,
        anchor_a: DVec2,
        anchor_b: DVec2,
        rest_length: f64,
        stiffness: f64,
        damping: f64,
    ) -> Self {
        Self {
            a,
            b,
            anchor_a,
            anchor_b,
            collide_bodies: true,
            kind: ConstraintSpecKind::DampedSpring {
                rest_length,
                stiffness,
                damping,
            },
        }
    }

    /// Disable collision between the two endpoints.
    pub fn without_collision(mut self) -> Self {
        self.collide_bodies = false;
        self
    }
}

impl Constraint {
    pub fn involves(&self, body: BodyId) -> bool {
        self.a == body || self.b == body
    }

    pub fn is_pin(&self) -> bool {
        matches!(self.kind, ConstraintKind::PinJoint { .. })
    }
}
