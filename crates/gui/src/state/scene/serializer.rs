//! Conversion between the live world and plain snapshot data

use std::collections::HashMap;

use glam::DVec2;
use shared::{
    BodyType, ConstraintData, ObjectData, SceneSnapshot, ShapeData, ShapeGeometry,
};
use tracing::{debug, warn};

use super::{SceneState, STATIC_BODY_COLOR};
use crate::physics::{
    Body, BodyId, CollisionFilter, Constraint, ConstraintKind, ConstraintSpec, Shape, ShapeKind,
};
use crate::viewport::camera::{MAX_ZOOM, MIN_ZOOM};

fn vec2(v: [f64; 2]) -> DVec2 {
    DVec2::new(v[0], v[1])
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

pub(crate) fn shape_to_data(shape: &Shape) -> ShapeData {
    let geometry = match shape.kind {
        ShapeKind::Circle { radius } => ShapeGeometry::Circle { radius },
        ShapeKind::Box { width, height } => ShapeGeometry::Box { width, height },
    };
    ShapeData {
        geometry,
        friction: shape.friction,
        elasticity: shape.elasticity,
        density: shape.density,
        color: shape.color,
        original_dynamic_color: Some(shape.original_dynamic_color),
        collision_category: shape.filter.category,
    }
}

pub(crate) fn body_to_data(body: &Body) -> ObjectData {
    ObjectData {
        body_id: Some(body.id.to_string()),
        position: body.position.to_array(),
        angle: body.angle,
        velocity: body.velocity.to_array(),
        angular_velocity: body.angular_velocity,
        // a grabbed body is only kinematic for the gesture
        body_type: body
            .grab
            .and_then(|g| g.restore_type)
            .unwrap_or(body.body_type),
        shapes: body.shapes.iter().map(shape_to_data).collect(),
    }
}

pub(crate) fn constraint_to_data(constraint: &Constraint) -> ConstraintData {
    let body_a_id = constraint.a.to_string();
    let body_b_id = constraint.b.to_string();
    let anchor_a = constraint.anchor_a.to_array();
    let anchor_b = constraint.anchor_b.to_array();
    match constraint.kind {
        ConstraintKind::PinJoint { .. } => ConstraintData::PinJoint {
            body_a_id,
            body_b_id,
            anchor_a,
            anchor_b,
        },
        ConstraintKind::DampedSpring {
            rest_length,
            stiffness,
            damping,
        } => ConstraintData::DampedSpring {
            body_a_id,
            body_b_id,
            anchor_a,
            anchor_b,
            rest_length,
            stiffness,
            damping,
        },
    }
}

/// Rebuild a live shape. Static bodies display the static color; the
/// dynamic color is kept for when the body switches back.
fn shape_from_data(data: &ShapeData, body_type: BodyType) -> Shape {
    let kind = match data.geometry {
        ShapeGeometry::Circle { radius } => ShapeKind::Circle { radius },
        ShapeGeometry::Box { width, height } => ShapeKind::Box { width, height },
    };
    let dynamic_color = data.dynamic_color();
    let color = if body_type == BodyType::Static {
        STATIC_BODY_COLOR
    } else {
        dynamic_color
    };
    let mut shape = match kind {
        ShapeKind::Circle { radius } => Shape::circle(radius, data.density, color),
        ShapeKind::Box { width, height } => Shape::rect(width, height, data.density, color),
    };
    shape.friction = finite_or(data.friction, shared::DEFAULT_FRICTION);
    shape.elasticity = finite_or(data.elasticity, shared::DEFAULT_ELASTICITY);
    shape.original_dynamic_color = dynamic_color;
    shape.filter = CollisionFilter::with_category(data.collision_category);
    shape
}

/// Constraint spec with endpoints resolved through `ids`. None when an endpoint is unknown.
fn constraint_spec(data: &ConstraintData, ids: &HashMap<String, BodyId>) -> Option<ConstraintSpec> {
    let (a_key, b_key) = data.endpoints();
    let resolve = |key: &str| {
        if key == shared::ANCHOR_BODY_ID {
            Some(BodyId::ANCHOR)
        } else {
            ids.get(key).copied()
        }
    };
    let a = resolve(a_key)?;
    let b = resolve(b_key)?;
    Some(match *data {
        ConstraintData::PinJoint {
            anchor_a, anchor_b, ..
        } => ConstraintSpec::pin(a, b, vec2(anchor_a), vec2(anchor_b)),
        ConstraintData::DampedSpring {
            anchor_a,
            anchor_b,
            rest_length,
            stiffness,
            damping,
            ..
        } => ConstraintSpec::spring(
            a,
            b,
            vec2(anchor_a),
            vec2(anchor_b),
            rest_length,
            stiffness,
            damping,
        ),
    })
}

/// How bodies get their ids when instantiated from data
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum IdPolicy {
    /// Keep saved ids where valid and unused (load, undo/redo)
    Preserve,
    /// Always allocate fresh ids (paste)
    Fresh,
}

/// Highest `body_<n>` number in the data plus one, or zero.
fn counter_from_ids(objects: &[ObjectData]) -> u64 {
    objects
        .iter()
        .filter_map(|o| o.body_id.as_deref().and_then(BodyId::parse))
        .filter(|id| !id.is_anchor())
        .map(|id| id.number() + 1)
        .max()
        .unwrap_or(0)
}

impl SceneState {
    /// Plain-data copy of the whole scene. The drag joint is never included.
    pub fn snapshot(&self) -> SceneSnapshot {
        let constraints = self
            .world
            .constraints()
            .filter(|c| Some(c.id) != self.drag_joint)
            .map(constraint_to_data)
            .collect();
        SceneSnapshot {
            objects: self.world.bodies().map(body_to_data).collect(),
            constraints,
            background_color: self.background_color,
            simulation_running: self.simulation_running,
            show_trails: self.show_trails,
            camera_offset: self.camera.offset.to_array(),
            camera_zoom: self.camera.zoom,
            gravity_multiplier: self.gravity_multiplier,
            next_body_id_counter: Some(self.next_body_id),
        }
    }

    /// Replace everything but the anchor with the snapshot contents.
    pub fn restore(&mut self, snapshot: SceneSnapshot) {
        self.world.clear();
        self.drag_joint = None;
        self.next_body_id = snapshot
            .next_body_id_counter
            .unwrap_or_else(|| counter_from_ids(&snapshot.objects));

        let (bodies, constraints) =
            self.instantiate(&snapshot.objects, &snapshot.constraints, DVec2::ZERO, IdPolicy::Preserve);
        debug!(bodies = bodies.len(), constraints = constraints.len(), "scene restored");

        self.background_color = snapshot.background_color;
        self.simulation_running = snapshot.simulation_running;
        self.show_trails = snapshot.show_trails;
        self.camera.offset = vec2(snapshot.camera_offset);
        if !self.camera.offset.is_finite() {
            self.camera.offset = DVec2::ZERO;
        }
        self.camera.zoom = if snapshot.camera_zoom.is_finite() && snapshot.camera_zoom > 0.0 {
            snapshot.camera_zoom.clamp(MIN_ZOOM, MAX_ZOOM)
        } else {
            1.0
        };
        self.apply_gravity_multiplier(finite_or(snapshot.gravity_multiplier, 1.0));
        self.version += 1;
    }

    /// Add bodies and joints from data, translated by `offset`.
    ///
    /// Shapeless bodies are skipped. Joints whose endpoints do not resolve are
    /// skipped. Returns the created bodies and joints.
    pub(crate) fn instantiate(
        &mut self,
        objects: &[ObjectData],
        constraints: &[ConstraintData],
        offset: DVec2,
        policy: IdPolicy,
    ) -> (Vec<BodyId>, Vec<crate::physics::ConstraintId>) {
        let mut ids: HashMap<String, BodyId> = HashMap::new();
        let mut created = Vec::new();

        for data in objects {
            if data.shapes.is_empty() {
                debug!(body = ?data.body_id, "skipping body without shapes");
                continue;
            }
            let saved = data.body_id.as_deref();
            let id = match (policy, saved.and_then(BodyId::parse)) {
                (IdPolicy::Preserve, Some(id)) if !id.is_anchor() && !self.world.contains_body(id) => {
                    self.next_body_id = self.next_body_id.max(id.number() + 1);
                    id
                }
                _ => self.allocate_body_id(),
            };

            let mut body = Body::new(id, data.body_type, vec2(data.position) + offset);
            if !body.position.is_finite() {
                body.position = offset;
            }
            body.angle = finite_or(data.angle, 0.0);
            body.velocity = vec2(data.velocity);
            if !body.velocity.is_finite() {
                body.velocity = DVec2::ZERO;
            }
            body.angular_velocity = finite_or(data.angular_velocity, 0.0);
            body.shapes = data
                .shapes
                .iter()
                .map(|s| shape_from_data(s, data.body_type))
                .collect();
            body.set_body_type(data.body_type);

            match self.world.add_body(body) {
                Ok(id) => {
                    if let Some(key) = saved {
                        ids.insert(key.to_string(), id);
                    }
                    created.push(id);
                }
                Err(err) => warn!(%err, "body not added"),
            }
        }

        let mut joints = Vec::new();
        for data in constraints {
            let Some(spec) = constraint_spec(data, &ids) else {
                debug!(kind = data.type_name(), "skipping joint with unresolved endpoint");
                continue;
            };
            match self.world.add_constraint(spec) {
                Ok(id) => joints.push(id),
                Err(err) => debug!(%err, "skipping joint"),
            }
        }

        (created, joints)
    }
}
