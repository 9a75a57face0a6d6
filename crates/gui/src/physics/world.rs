//! Physics simulation world.
//!
//! Wraps a rapier2d pipeline. `Body` and `Constraint` records are the editor's
//! view of the simulation: edits go through [`World::update_body`] so they
//! reach the rigid-body set, and [`World::step`] copies simulated poses and
//! velocities back into the records.

use glam::DVec2;
use rapier2d::math::{Isometry, Point, Real, Vector};
use rapier2d::parry::bounding_volume::Aabb;
use rapier2d::parry::query::PointQuery;
use rapier2d::prelude::{
    CCDSolver, CoefficientCombineRule, ColliderBuilder, ColliderHandle, ColliderSet,
    DefaultBroadPhase, GenericJoint, GenericJointBuilder, Group, ImpulseJointHandle,
    ImpulseJointSet, IntegrationParameters, InteractionGroups, IslandManager, JointAxesMask,
    JointAxis, MultibodyJointSet, NarrowPhase, PhysicsPipeline, QueryFilter, QueryPipeline,
    RevoluteJointBuilder, RigidBodyBuilder, RigidBodyHandle, RigidBodySet, RigidBodyType,
    SpringJointBuilder,
};

use super::body::{Body, BodyId, BodyType};
use super::constraint::{Constraint, ConstraintId, ConstraintKind, ConstraintSpec, ConstraintSpecKind};
use super::shape::{CollisionFilter, Shape, ShapeKind};
use crate::error::EditorError;

/// Gravity magnitude per unit multiplier (world units / s²).
pub const GRAVITY_SCALE: f64 = 981.0;

/// World units are pixels, roughly a hundred per meter.
const LENGTH_UNIT: Real = 100.0;
/// Pins shorter than this act as a pivot.
const POINT_JOINT_EPSILON: f64 = 1e-6;

/// Gravity vector for a multiplier.
pub fn gravity_for(multiplier: f64) -> DVec2 {
    DVec2::new(0.0, -GRAVITY_SCALE * multiplier)
}

fn to_vector(v: DVec2) -> Vector<Real> {
    Vector::new(v.x, v.y)
}

fn to_point(v: DVec2) -> Point<Real> {
    Point::new(v.x, v.y)
}

fn from_vector(v: &Vector<Real>) -> DVec2 {
    DVec2::new(v.x, v.y)
}

fn rigid_body_type(body_type: BodyType) -> RigidBodyType {
    match body_type {
        BodyType::Dynamic => RigidBodyType::Dynamic,
        BodyType::Static => RigidBodyType::Fixed,
        BodyType::Kinematic => RigidBodyType::KinematicVelocityBased,
    }
}

/// Collision groups for a filter. Rapier applies the same two-way bit test.
fn interaction_groups(filter: CollisionFilter) -> InteractionGroups {
    InteractionGroups::new(
        Group::from_bits_truncate(filter.category),
        Group::from_bits_truncate(filter.mask),
    )
}

fn collider_for(shape: &Shape) -> ColliderBuilder {
    let builder = match shape.kind {
        ShapeKind::Circle { radius } => ColliderBuilder::ball(radius),
        ShapeKind::Box { width, height } => ColliderBuilder::cuboid(width / 2.0, height / 2.0),
    };
    builder
        .density(shape.density)
        .friction(shape.friction)
        .restitution(shape.elasticity)
        .friction_combine_rule(CoefficientCombineRule::Multiply)
        .restitution_combine_rule(CoefficientCombineRule::Multiply)
        .collision_groups(interaction_groups(shape.filter))
}

fn attach_colliders(
    colliders: &mut ColliderSet,
    bodies: &mut RigidBodySet,
    parent: RigidBodyHandle,
    shapes: &[Shape],
) -> Vec<ColliderHandle> {
    shapes
        .iter()
        .map(|shape| colliders.insert_with_parent(collider_for(shape), parent, bodies))
        .collect()
}

fn joint_for(constraint: &Constraint) -> GenericJoint {
    let anchor1 = to_point(constraint.anchor_a);
    let anchor2 = to_point(constraint.anchor_b);
    let mut joint: GenericJoint = match constraint.kind {
        ConstraintKind::PinJoint { distance } if distance < POINT_JOINT_EPSILON => {
            RevoluteJointBuilder::new()
                .local_anchor1(anchor1)
                .local_anchor2(anchor2)
                .build()
                .into()
        }
        ConstraintKind::PinJoint { distance } => GenericJointBuilder::new(JointAxesMask::empty())
            .coupled_axes(JointAxesMask::LIN_AXES)
            .limits(JointAxis::LinX, [distance, distance])
            .local_anchor1(anchor1)
            .local_anchor2(anchor2)
            .build(),
        ConstraintKind::DampedSpring {
            rest_length,
            stiffness,
            damping,
        } => SpringJointBuilder::new(rest_length, stiffness, damping)
            .local_anchor1(anchor1)
            .local_anchor2(anchor2)
            .build()
            .into(),
    };
    joint.contacts_enabled = constraint.collide_bodies;
    joint
}

/// A body record and the rapier objects backing it.
struct BodyEntry {
    body: Body,
    handle: RigidBodyHandle,
    colliders: Vec<ColliderHandle>,
}

struct JointEntry {
    constraint: Constraint,
    handle: ImpulseJointHandle,
}

/// The physics simulation world.
pub struct World {
    /// Index 0 is always the world anchor.
    entries: Vec<BodyEntry>,
    joints: Vec<JointEntry>,
    pub gravity: DVec2,
    next_constraint_id: u64,

    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    pub fn new() -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.length_unit = LENGTH_UNIT;

        let mut world = Self {
            entries: Vec::new(),
            joints: Vec::new(),
            gravity: gravity_for(1.0),
            next_constraint_id: 0,
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
        };
        world.insert_entry(Body::anchor());
        world
    }

    // ── Bodies ────────────────────────────────────────────────

    pub fn anchor(&self) -> &Body {
        &self.entries[0].body
    }

    /// All regular bodies, in insertion order. The anchor is excluded.
    pub fn bodies(&self) -> impl Iterator<Item = &Body> {
        self.entries.iter().skip(1).map(|e| &e.body)
    }

    pub fn body_count(&self) -> usize {
        self.entries.len() - 1
    }

    fn index_of(&self, id: BodyId) -> Option<usize> {
        self.entries.iter().position(|e| e.body.id == id)
    }

    fn handle_of(&self, id: BodyId) -> Option<RigidBodyHandle> {
        self.index_of(id).map(|i| self.entries[i].handle)
    }

    /// Look up a body, including the anchor.
    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.index_of(id).map(|i| &self.entries[i].body)
    }

    pub fn contains_body(&self, id: BodyId) -> bool {
        self.index_of(id).is_some()
    }

    fn insert_entry(&mut self, body: Body) {
        let rigid_body = RigidBodyBuilder::new(rigid_body_type(body.body_type))
            .position(Isometry::new(to_vector(body.position), body.angle))
            .linvel(to_vector(body.velocity))
            .angvel(body.angular_velocity)
            .user_data(u128::from(body.id.number()))
            .build();
        let handle = self.bodies.insert(rigid_body);
        let colliders = attach_colliders(&mut self.colliders, &mut self.bodies, handle, &body.shapes);
        self.entries.push(BodyEntry {
            body,
            handle,
            colliders,
        });
    }

    pub fn add_body(&mut self, body: Body) -> Result<BodyId, EditorError> {
        if body.id.is_anchor() {
            return Err(EditorError::State("the world anchor cannot be re-added".into()));
        }
        if self.contains_body(body.id) {
            return Err(EditorError::State(format!("body {} already exists", body.id)));
        }
        let id = body.id;
        self.insert_entry(body);
        self.refresh_queries();
        Ok(id)
    }

    /// Edit a regular body and push the result into the simulation.
    ///
    /// Colliders are rebuilt when the shapes changed. The anchor cannot be edited.
    pub fn update_body<R>(&mut self, id: BodyId, edit: impl FnOnce(&mut Body) -> R) -> Option<R> {
        if id.is_anchor() {
            return None;
        }
        let index = self.index_of(id)?;
        let shapes = self.entries[index].body.shapes.clone();
        let result = edit(&mut self.entries[index].body);
        let reshaped = self.entries[index].body.shapes != shapes;
        self.push_entry(index, reshaped);
        self.refresh_queries();
        Some(result)
    }

    /// [`World::update_body`] for every regular body.
    pub fn update_bodies(&mut self, mut edit: impl FnMut(&mut Body)) {
        for index in 1..self.entries.len() {
            let shapes = self.entries[index].body.shapes.clone();
            edit(&mut self.entries[index].body);
            let reshaped = self.entries[index].body.shapes != shapes;
            self.push_entry(index, reshaped);
        }
        self.refresh_queries();
    }

    /// Copy a body record into its rigid body.
    fn push_entry(&mut self, index: usize, reshaped: bool) {
        let entry = &mut self.entries[index];
        let body = &entry.body;
        if let Some(rigid_body) = self.bodies.get_mut(entry.handle) {
            rigid_body.set_body_type(rigid_body_type(body.body_type), true);
            rigid_body.set_position(Isometry::new(to_vector(body.position), body.angle), true);
            rigid_body.set_linvel(to_vector(body.velocity), true);
            rigid_body.set_angvel(body.angular_velocity, true);
        }
        if reshaped {
            for handle in entry.colliders.drain(..) {
                self.colliders
                    .remove(handle, &mut self.island_manager, &mut self.bodies, true);
            }
            entry.colliders =
                attach_colliders(&mut self.colliders, &mut self.bodies, entry.handle, &entry.body.shapes);
        }
    }

    /// Remove a body and every constraint referencing it. The anchor is never removed.
    pub fn remove_body(&mut self, id: BodyId) -> Option<Body> {
        if id.is_anchor() {
            return None;
        }
        let index = self.index_of(id)?;
        let entry = self.entries.remove(index);
        // rapier drops the attached colliders and joints with the body
        self.bodies.remove(
            entry.handle,
            &mut self.island_manager,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
        self.joints.retain(|j| !j.constraint.involves(id));
        self.refresh_queries();
        Some(entry.body)
    }

    /// Remove every body and constraint except the anchor.
    pub fn clear(&mut self) {
        let gravity = self.gravity;
        let next_constraint_id = self.next_constraint_id;
        *self = Self::new();
        self.gravity = gravity;
        self.next_constraint_id = next_constraint_id;
    }

    // ── Constraints ───────────────────────────────────────────

    pub fn constraints(&self) -> impl Iterator<Item = &Constraint> {
        self.joints.iter().map(|j| &j.constraint)
    }

    pub fn constraint_count(&self) -> usize {
        self.joints.len()
    }

    pub fn constraint(&self, id: ConstraintId) -> Option<&Constraint> {
        self.constraints().find(|c| c.id == id)
    }

    pub fn add_constraint(&mut self, spec: ConstraintSpec) -> Result<ConstraintId, EditorError> {
        if spec.a == spec.b {
            return Err(EditorError::Validation(
                "a joint needs two different bodies".into(),
            ));
        }
        let body_a = self
            .body(spec.a)
            .ok_or_else(|| EditorError::Reference(spec.a.to_string()))?;
        let body_b = self
            .body(spec.b)
            .ok_or_else(|| EditorError::Reference(spec.b.to_string()))?;

        let kind = match spec.kind {
            ConstraintSpecKind::PinJoint => ConstraintKind::PinJoint {
                distance: body_a
                    .local_to_world(spec.anchor_a)
                    .distance(body_b.local_to_world(spec.anchor_b)),
            },
            ConstraintSpecKind::DampedSpring {
                rest_length,
                stiffness,
                damping,
            } => ConstraintKind::DampedSpring {
                rest_length: rest_length.max(0.0),
                stiffness,
                damping,
            },
        };

        let id = ConstraintId(self.next_constraint_id);
        self.next_constraint_id += 1;
        let constraint = Constraint {
            id,
            a: spec.a,
            b: spec.b,
            anchor_a: spec.anchor_a,
            anchor_b: spec.anchor_b,
            collide_bodies: spec.collide_bodies,
            kind,
        };
        let handle = self.insert_joint(&constraint)?;
        self.joints.push(JointEntry { constraint, handle });
        Ok(id)
    }

    fn insert_joint(&mut self, constraint: &Constraint) -> Result<ImpulseJointHandle, EditorError> {
        let a = self
            .handle_of(constraint.a)
            .ok_or_else(|| EditorError::Reference(constraint.a.to_string()))?;
        let b = self
            .handle_of(constraint.b)
            .ok_or_else(|| EditorError::Reference(constraint.b.to_string()))?;
        Ok(self.impulse_joints.insert(a, b, joint_for(constraint), true))
    }

    pub fn remove_constraint(&mut self, id: ConstraintId) -> Option<Constraint> {
        let index = self.joints.iter().position(|j| j.constraint.id == id)?;
        let entry = self.joints.remove(index);
        self.impulse_joints.remove(entry.handle, true);
        Some(entry.constraint)
    }

    /// Move the body-A anchor of a constraint (body-local).
    pub fn set_constraint_anchor_a(&mut self, id: ConstraintId, anchor: DVec2) -> Result<(), EditorError> {
        let index = self
            .joints
            .iter()
            .position(|j| j.constraint.id == id)
            .ok_or_else(|| EditorError::Reference(id.to_string()))?;
        self.joints[index].constraint.anchor_a = anchor;
        let old = self.joints[index].handle;
        self.impulse_joints.remove(old, true);
        let constraint = self.joints[index].constraint.clone();
        self.joints[index].handle = self.insert_joint(&constraint)?;
        Ok(())
    }

    /// World positions of both anchors of a constraint.
    pub fn constraint_anchors(&self, constraint: &Constraint) -> Option<(DVec2, DVec2)> {
        let a = self.body(constraint.a)?;
        let b = self.body(constraint.b)?;
        Some((
            a.local_to_world(constraint.anchor_a),
            b.local_to_world(constraint.anchor_b),
        ))
    }

    // ── Queries ───────────────────────────────────────────────

    fn refresh_queries(&mut self) {
        self.bodies
            .propagate_modified_body_positions_to_colliders(&mut self.colliders);
        self.query_pipeline.update(&self.colliders);
    }

    fn collider_body(&self, handle: ColliderHandle) -> Option<BodyId> {
        let parent = self.colliders.get(handle)?.parent()?;
        let rigid_body = self.bodies.get(parent)?;
        u64::try_from(rigid_body.user_data).ok().map(BodyId::new)
    }

    /// Body whose shape contains `point`, preferring the deepest hit.
    pub fn point_query_nearest(&self, point: DVec2) -> Option<BodyId> {
        let target = to_point(point);
        let mut best: Option<(Real, ColliderHandle)> = None;
        self.query_pipeline.intersections_with_point(
            &self.bodies,
            &self.colliders,
            &target,
            QueryFilter::default(),
            |handle| {
                if let Some(collider) = self.colliders.get(handle) {
                    let projection = collider
                        .shape()
                        .project_point(collider.position(), &target, false);
                    let depth = (projection.point - target).norm();
                    if best.map_or(true, |(d, _)| depth > d) {
                        best = Some((depth, handle));
                    }
                }
                true
            },
        );
        best.and_then(|(_, handle)| self.collider_body(handle))
    }

    /// Bodies with at least one shape whose bounding box intersects the region.
    pub fn bb_query(&self, min: DVec2, max: DVec2) -> Vec<BodyId> {
        let region = Aabb::new(to_point(min), to_point(max));
        let mut touched = Vec::new();
        self.query_pipeline
            .colliders_with_aabb_intersecting_aabb(&region, |handle| {
                if let Some(id) = self.collider_body(*handle) {
                    touched.push(id);
                }
                true
            });
        self.bodies()
            .map(|b| b.id)
            .filter(|id| touched.contains(id))
            .collect()
    }

    // ── Simulation ────────────────────────────────────────────

    /// Step the simulation forward by `dt` seconds.
    pub fn step(&mut self, dt: f64) {
        if dt <= 0.0 || !dt.is_finite() {
            return;
        }
        self.integration_parameters.dt = dt;
        self.physics_pipeline.step(
            &to_vector(self.gravity),
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );

        for entry in self.entries.iter_mut().skip(1) {
            let Some(rigid_body) = self.bodies.get(entry.handle) else {
                continue;
            };
            let pose = rigid_body.position();
            entry.body.position = from_vector(&pose.translation.vector);
            entry.body.angle = pose.rotation.angle();
            entry.body.velocity = from_vector(rigid_body.linvel());
            entry.body.angular_velocity = rigid_body.angvel();
        }
        self.refresh_queries();
    }

    /// Mass the simulation uses for a body. Infinite for non-dynamic bodies.
    pub fn simulated_mass(&self, id: BodyId) -> Option<f64> {
        let rigid_body = self.bodies.get(self.handle_of(id)?)?;
        Some(if rigid_body.is_dynamic() {
            rigid_body.mass()
        } else {
            f64::INFINITY
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GREY: shared::Rgba = [100, 100, 100, 255];

    fn ball(world: &mut World, n: u64, pos: DVec2) -> BodyId {
        let body = Body::new(BodyId::new(n), BodyType::Dynamic, pos).with_shape(Shape::circle(10.0, 1.0, GREY));
        world.add_body(body).unwrap()
    }

    fn ground(world: &mut World, n: u64) -> BodyId {
        let body = Body::new(BodyId::new(n), BodyType::Static, DVec2::new(0.0, -20.0))
            .with_shape(Shape::rect(400.0, 20.0, 1.0, GREY));
        world.add_body(body).unwrap()
    }

    fn steps(world: &mut World, n: usize) {
        for _ in 0..n {
            world.step(1.0 / 60.0);
        }
    }

    #[test]
    fn test_new_world_only_has_anchor() {
        let world = World::new();
        assert_eq!(world.body_count(), 0);
        assert!(world.body(BodyId::ANCHOR).is_some());
        assert_eq!(world.gravity, DVec2::new(0.0, -981.0));
    }

    #[test]
    fn test_anchor_cannot_be_removed_or_edited() {
        let mut world = World::new();
        assert!(world.remove_body(BodyId::ANCHOR).is_none());
        assert!(world.update_body(BodyId::ANCHOR, |_| ()).is_none());
        assert!(world.add_body(Body::anchor()).is_err());
    }

    #[test]
    fn test_duplicate_body_rejected() {
        let mut world = World::new();
        ball(&mut world, 0, DVec2::ZERO);
        let dup = Body::new(BodyId::new(0), BodyType::Dynamic, DVec2::ZERO);
        assert!(world.add_body(dup).is_err());
    }

    #[test]
    fn test_gravity_accelerates_dynamic_bodies() {
        let mut world = World::new();
        let id = ball(&mut world, 0, DVec2::ZERO);
        steps(&mut world, 2);
        let body = world.body(id).unwrap();
        assert!(body.velocity.y < 0.0);
        assert!(body.position.y < 0.0);
    }

    #[test]
    fn test_static_bodies_do_not_move() {
        let mut world = World::new();
        let id = ground(&mut world, 0);
        steps(&mut world, 10);
        assert_eq!(world.body(id).unwrap().position, DVec2::new(0.0, -20.0));
    }

    #[test]
    fn test_ball_rests_on_ground() {
        let mut world = World::new();
        ground(&mut world, 0);
        let id = ball(&mut world, 1, DVec2::new(0.0, 30.0));
        steps(&mut world, 240);
        let y = world.body(id).unwrap().position.y;
        assert!(y > -5.0 && y < 40.0, "ball fell through or flew away: y = {y}");
    }

    #[test]
    fn test_filtered_shapes_pass_through() {
        let mut world = World::new();
        let floor = Body::new(BodyId::new(0), BodyType::Static, DVec2::new(0.0, -20.0)).with_shape(Shape {
            filter: CollisionFilter { category: 0b10, mask: 0b10 },
            ..Shape::rect(400.0, 20.0, 1.0, GREY)
        });
        world.add_body(floor).unwrap();
        let id = ball(&mut world, 1, DVec2::new(0.0, 30.0));
        steps(&mut world, 120);
        assert!(world.body(id).unwrap().position.y < -40.0);
    }

    #[test]
    fn test_update_body_reaches_simulation() {
        let mut world = World::new();
        world.gravity = DVec2::ZERO;
        let id = ball(&mut world, 0, DVec2::ZERO);
        world.update_body(id, |b| {
            b.position = DVec2::new(100.0, 0.0);
            b.velocity = DVec2::new(60.0, 0.0);
        });
        world.step(1.0 / 60.0);
        let body = world.body(id).unwrap();
        assert!((body.position.x - 101.0).abs() < 1e-6, "x = {}", body.position.x);
        assert_eq!(world.point_query_nearest(DVec2::new(101.0, 0.0)), Some(id));
    }

    #[test]
    fn test_reshaped_body_changes_simulated_mass() {
        let mut world = World::new();
        let id = ball(&mut world, 0, DVec2::ZERO);
        world.update_body(id, |b| {
            b.shapes[0].density = 2.0;
            b.recompute_mass();
        });
        world.step(1.0 / 60.0);
        let body_mass = world.body(id).unwrap().mass;
        let simulated = world.simulated_mass(id).unwrap();
        assert!((simulated - body_mass).abs() / body_mass < 1e-6);

        world.update_body(id, |b| b.set_body_type(BodyType::Static));
        assert!(world.simulated_mass(id).unwrap().is_infinite());
    }

    #[test]
    fn test_remove_body_cascades_constraints() {
        let mut world = World::new();
        let a = ball(&mut world, 0, DVec2::ZERO);
        let b = ball(&mut world, 1, DVec2::new(50.0, 0.0));
        world
            .add_constraint(ConstraintSpec::pin(a, b, DVec2::ZERO, DVec2::ZERO))
            .unwrap();
        world
            .add_constraint(ConstraintSpec::pin(BodyId::ANCHOR, b, DVec2::new(50.0, 0.0), DVec2::ZERO))
            .unwrap();
        assert_eq!(world.constraint_count(), 2);
        world.remove_body(a);
        assert_eq!(world.constraint_count(), 1);
        world.remove_body(b);
        assert_eq!(world.constraint_count(), 0);
        steps(&mut world, 1);
    }

    #[test]
    fn test_add_constraint_rejects_unknown_or_same_body() {
        let mut world = World::new();
        let a = ball(&mut world, 0, DVec2::ZERO);
        let missing = BodyId::new(99);
        assert!(matches!(
            world.add_constraint(ConstraintSpec::pin(a, missing, DVec2::ZERO, DVec2::ZERO)),
            Err(EditorError::Reference(_))
        ));
        assert!(matches!(
            world.add_constraint(ConstraintSpec::pin(a, a, DVec2::ZERO, DVec2::ZERO)),
            Err(EditorError::Validation(_))
        ));
    }

    #[test]
    fn test_pin_distance_captured_at_creation() {
        let mut world = World::new();
        let a = ball(&mut world, 0, DVec2::ZERO);
        let b = ball(&mut world, 1, DVec2::new(30.0, 40.0));
        let id = world
            .add_constraint(ConstraintSpec::pin(a, b, DVec2::ZERO, DVec2::ZERO))
            .unwrap();
        match world.constraint(id).unwrap().kind {
            ConstraintKind::PinJoint { distance } => assert!((distance - 50.0).abs() < 1e-9),
            _ => panic!("expected pin joint"),
        }
    }

    #[test]
    fn test_pinned_to_anchor_stays_near_pivot() {
        let mut world = World::new();
        let id = ball(&mut world, 0, DVec2::new(30.0, -40.0));
        world
            .add_constraint(ConstraintSpec::pin(BodyId::ANCHOR, id, DVec2::ZERO, DVec2::ZERO))
            .unwrap();
        steps(&mut world, 120);
        let d = world.body(id).unwrap().position.length();
        assert!((d - 50.0).abs() < 5.0, "pendulum length drifted to {d}");
    }

    #[test]
    fn test_moved_anchor_drags_body() {
        let mut world = World::new();
        world.gravity = DVec2::ZERO;
        let id = ball(&mut world, 0, DVec2::ZERO);
        let joint = world
            .add_constraint(ConstraintSpec::pin(BodyId::ANCHOR, id, DVec2::ZERO, DVec2::ZERO).without_collision())
            .unwrap();
        world.set_constraint_anchor_a(joint, DVec2::new(0.0, 100.0)).unwrap();
        assert_eq!(world.constraint(joint).unwrap().anchor_a, DVec2::new(0.0, 100.0));
        steps(&mut world, 60);
        assert!(world.body(id).unwrap().position.y > 50.0);
    }

    #[test]
    fn test_point_query_hits_and_misses() {
        let mut world = World::new();
        let id = ball(&mut world, 0, DVec2::new(100.0, 100.0));
        assert_eq!(world.point_query_nearest(DVec2::new(105.0, 100.0)), Some(id));
        assert_eq!(world.point_query_nearest(DVec2::new(120.0, 100.0)), None);
    }

    #[test]
    fn test_point_query_prefers_deepest() {
        let mut world = World::new();
        let big = Body::new(BodyId::new(0), BodyType::Static, DVec2::ZERO)
            .with_shape(Shape::rect(400.0, 400.0, 1.0, GREY));
        world.add_body(big).unwrap();
        let small = ball(&mut world, 1, DVec2::new(190.0, 0.0));
        assert_eq!(world.point_query_nearest(DVec2::new(190.0, 0.0)), Some(small));
    }

    #[test]
    fn test_bb_query_excludes_anchor() {
        let mut world = World::new();
        let a = ball(&mut world, 0, DVec2::ZERO);
        let _b = ball(&mut world, 1, DVec2::new(500.0, 0.0));
        let hits = world.bb_query(DVec2::new(-20.0, -20.0), DVec2::new(20.0, 20.0));
        assert_eq!(hits, vec![a]);
    }

    #[test]
    fn test_clear_keeps_anchor() {
        let mut world = World::new();
        ball(&mut world, 0, DVec2::ZERO);
        world.gravity = gravity_for(0.5);
        world.clear();
        assert_eq!(world.body_count(), 0);
        assert!(world.body(BodyId::ANCHOR).is_some());
        assert_eq!(world.gravity, gravity_for(0.5));
        assert_eq!(world.point_query_nearest(DVec2::ZERO), None);
    }

    #[test]
    fn test_spring_pulls_bodies_together() {
        let mut world = World::new();
        world.gravity = DVec2::ZERO;
        let a = ball(&mut world, 0, DVec2::ZERO);
        let b = ball(&mut world, 1, DVec2::new(100.0, 0.0));
        world
            .add_constraint(ConstraintSpec::spring(a, b, DVec2::ZERO, DVec2::ZERO, 50.0, 1000.0, 10.0))
            .unwrap();
        world.step(1.0 / 60.0);
        assert!(world.body(a).unwrap().velocity.x > 0.0);
        assert!(world.body(b).unwrap().velocity.x < 0.0);
    }
}
