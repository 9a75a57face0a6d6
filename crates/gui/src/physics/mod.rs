//! 2D rigid-body physics on rapier2d: editor-side body, shape and joint
//! records mirrored into a rapier pipeline, point and region queries,
//! fixed-timestep stepping.

pub mod body;
pub mod constraint;
pub mod shape;
pub mod world;

pub use body::{Body, BodyId, BodyType, GrabState};
pub use constraint::{
    Constraint, ConstraintId, ConstraintKind, ConstraintSpec, ConstraintSpecKind,
    DEFAULT_SPRING_DAMPING, DEFAULT_SPRING_STIFFNESS,
};
pub use shape::{floor_positive, CollisionFilter, Shape, ShapeKind, MIN_POSITIVE};
pub use world::{gravity_for, World, GRAVITY_SCALE};
