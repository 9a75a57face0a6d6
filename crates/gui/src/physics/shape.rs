//! Collision shapes and their mass properties.

use glam::DVec2;
use shared::{Rgba, COLLIDABLE_CATEGORY};

/// Floor applied to density and geometry before any mass/inertia formula.
pub const MIN_POSITIVE: f64 = 0.001;

/// Clamp a value to the strictly positive floor.
#[inline]
pub fn floor_positive(value: f64) -> f64 {
    if value.is_finite() {
        value.max(MIN_POSITIVE)
    } else {
        MIN_POSITIVE
    }
}

/// Geometry of a shape in body-local space, centered on the body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShapeKind {
    Circle { radius: f64 },
    Box { width: f64, height: f64 },
}

impl ShapeKind {
    /// Area with floored dimensions.
    pub fn area(&self) -> f64 {
        match *self {
            ShapeKind::Circle { radius } => {
                let r = floor_positive(radius);
                std::f64::consts::PI * r * r
            }
            ShapeKind::Box { width, height } => floor_positive(width) * floor_positive(height),
        }
    }

    /// Moment of inertia about the centroid for the given mass.
    pub fn moment(&self, mass: f64) -> f64 {
        match *self {
            ShapeKind::Circle { radius } => {
                let r = floor_positive(radius);
                mass * r * r / 2.0
            }
            ShapeKind::Box { width, height } => {
                let w = floor_positive(width);
                let h = floor_positive(height);
                mass * (w * w + h * h) / 12.0
            }
        }
    }

}

/// Collision category and mask bits.
///
/// Two shapes collide when each one's category is in the other's mask.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CollisionFilter {
    pub category: u32,
    pub mask: u32,
}

impl CollisionFilter {
    pub fn with_category(category: u32) -> Self {
        Self {
            category,
            mask: u32::MAX,
        }
    }
}

impl Default for CollisionFilter {
    fn default() -> Self {
        Self::with_category(COLLIDABLE_CATEGORY)
    }
}

/// A shape owned by a body, with material and display attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    pub kind: ShapeKind,
    pub friction: f64,
    pub elasticity: f64,
    pub density: f64,
    /// Color currently displayed
    pub color: Rgba,
    /// Color restored when the body switches back to dynamic
    pub original_dynamic_color: Rgba,
    pub filter: CollisionFilter,
}

impl Shape {
    pub fn new(kind: ShapeKind, density: f64, color: Rgba) -> Self {
        Self {
            kind,
            friction: shared::DEFAULT_FRICTION,
            elasticity: shared::DEFAULT_ELASTICITY,
            density: floor_positive(density),
            color,
            original_dynamic_color: color,
            filter: CollisionFilter::default(),
        }
    }

    pub fn circle(radius: f64, density: f64, color: Rgba) -> Self {
        Self::new(
            ShapeKind::Circle {
                radius: floor_positive(radius),
            },
            density,
            color,
        )
    }

    pub fn rect(width: f64, height: f64, density: f64, color: Rgba) -> Self {
        Self::new(
            ShapeKind::Box {
                width: floor_positive(width),
                height: floor_positive(height),
            },
            density,
            color,
        )
    }

    /// Mass contribution of this shape, floored.
    pub fn mass(&self) -> f64 {
        floor_positive(floor_positive(self.density) * self.kind.area())
    }

    /// Inertia contribution of this shape, floored.
    pub fn inertia(&self) -> f64 {
        floor_positive(self.kind.moment(self.mass()))
    }

    /// Box corners in body-local space, counter-clockwise. Empty for circles.
    pub fn local_vertices(&self) -> Vec<DVec2> {
        match self.kind {
            ShapeKind::Circle { .. } => Vec::new(),
            ShapeKind::Box { width, height } => {
                let hw = width / 2.0;
                let hh = height / 2.0;
                vec![
                    DVec2::new(-hw, -hh),
                    DVec2::new(hw, -hh),
                    DVec2::new(hw, hh),
                    DVec2::new(-hw, hh),
                ]
            }
        }
    }
}
