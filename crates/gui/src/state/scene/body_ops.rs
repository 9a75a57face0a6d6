//! Body creation, property edits, type toggling and deletion

use glam::DVec2;
use rand::Rng;
use shared::{BodyType, Rgba, DEFAULT_SHAPE_COLOR};
use tracing::{debug, info};

use super::{SceneState, STATIC_BODY_COLOR};
use crate::error::{EditorError, Result};
use crate::physics::{floor_positive, Body, BodyId, ConstraintId, Shape, MIN_POSITIVE};

/// Material and display attributes for a newly created body
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeStyle {
    pub density: f64,
    pub body_type: BodyType,
    pub color: Rgba,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            density: shared::DEFAULT_DENSITY,
            body_type: BodyType::Dynamic,
            color: DEFAULT_SHAPE_COLOR,
        }
    }
}

impl ShapeStyle {
    pub fn with_density(mut self, density: f64) -> Self {
        self.density = density;
        self
    }

    pub fn with_color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }

    pub fn with_body_type(mut self, body_type: BodyType) -> Self {
        self.body_type = body_type;
        self
    }
}

/// Editable per-shape property, applied to every shape of the target bodies
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BodyProperty {
    Density(f64),
    Friction(f64),
    Elasticity(f64),
    Color(Rgba),
    /// A uniformly random opaque RGB color per body
    RandomColor,
}

impl BodyProperty {
    pub fn name(&self) -> &'static str {
        match self {
            BodyProperty::Density(_) => "density",
            BodyProperty::Friction(_) => "friction",
            BodyProperty::Elasticity(_) => "elasticity",
            BodyProperty::Color(_) => "color",
            BodyProperty::RandomColor => "random_color",
        }
    }

    fn validate(self) -> Result<Self> {
        let finite = |v: f64| {
            if v.is_finite() {
                Ok(v)
            } else {
                Err(EditorError::Validation(format!(
                    "{} must be a finite number",
                    self.name()
                )))
            }
        };
        Ok(match self {
            BodyProperty::Density(v) => BodyProperty::Density(finite(v)?.max(MIN_POSITIVE)),
            BodyProperty::Friction(v) => BodyProperty::Friction(finite(v)?.max(0.0)),
            BodyProperty::Elasticity(v) => BodyProperty::Elasticity(finite(v)?.max(0.0)),
            other => other,
        })
    }
}

/// Bodies and joints removed by a delete
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeleteReport {
    pub bodies: Vec<BodyId>,
    pub constraints: usize,
}

impl DeleteReport {
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty() && self.constraints == 0
    }
}

fn validate_position(position: DVec2) -> Result<()> {
    if position.is_finite() {
        Ok(())
    } else {
        Err(EditorError::Validation("Position must be finite.".into()))
    }
}

fn validate_extent(value: f64, what: &str) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(EditorError::Validation(format!("{what} must be positive.")))
    }
}

impl SceneState {
    /// Create a box body centered at `position`.
    pub fn create_box(
        &mut self,
        position: DVec2,
        width: f64,
        height: f64,
        style: ShapeStyle,
    ) -> Result<BodyId> {
        validate_position(position)?;
        validate_extent(width, "Box width")?;
        validate_extent(height, "Box height")?;
        let shape = Shape::rect(width, height, style.density, style.color);
        let id = self.add_new_body(position, shape, style.body_type)?;
        info!(body = %id, width, height, "box created");
        Ok(id)
    }

    /// Create a circle body centered at `position`.
    pub fn create_circle(&mut self, position: DVec2, radius: f64, style: ShapeStyle) -> Result<BodyId> {
        validate_position(position)?;
        validate_extent(radius, "Circle radius")?;
        let shape = Shape::circle(radius, style.density, style.color);
        let id = self.add_new_body(position, shape, style.body_type)?;
        info!(body = %id, radius, "circle created");
        Ok(id)
    }

    fn add_new_body(&mut self, position: DVec2, mut shape: Shape, body_type: BodyType) -> Result<BodyId> {
        if body_type == BodyType::Static {
            shape.color = STATIC_BODY_COLOR;
        }
        let id = BodyId::new(self.next_body_id);
        if self.world.contains_body(id) {
            return Err(EditorError::State(format!("body {id} already exists")));
        }
        self.record_history();
        let id = self.allocate_body_id();
        self.world.add_body(Body::new(id, body_type, position).with_shape(shape))?;
        self.version += 1;
        Ok(id)
    }

    /// Apply a property to every shape of every listed body. Returns the number of bodies changed.
    pub fn apply_property(&mut self, bodies: &[BodyId], property: BodyProperty) -> Result<usize> {
        let property = property.validate()?;
        let targets: Vec<BodyId> = bodies
            .iter()
            .copied()
            .filter(|id| !id.is_anchor() && self.world.contains_body(*id))
            .collect();
        if targets.is_empty() {
            return Err(EditorError::State("No objects selected.".into()));
        }

        self.record_history();
        for id in &targets {
            let color = match property {
                BodyProperty::RandomColor => Some([
                    self.rng.random_range(0..=255),
                    self.rng.random_range(0..=255),
                    self.rng.random_range(0..=255),
                    255,
                ]),
                BodyProperty::Color(c) => Some(c),
                _ => None,
            };
            self.world.update_body(*id, |body| {
                for shape in &mut body.shapes {
                    match property {
                        BodyProperty::Density(v) => shape.density = floor_positive(v),
                        BodyProperty::Friction(v) => shape.friction = v,
                        BodyProperty::Elasticity(v) => shape.elasticity = v,
                        BodyProperty::Color(_) | BodyProperty::RandomColor => {
                            if let Some(c) = color {
                                shape.color = c;
                                shape.original_dynamic_color = c;
                            }
                        }
                    }
                }
                if matches!(property, BodyProperty::Density(_)) && body.is_dynamic() {
                    body.recompute_mass();
                }
            });
        }
        self.version += 1;
        info!(property = property.name(), bodies = targets.len(), "property applied");
        Ok(targets.len())
    }

    /// Switch the listed bodies between static and dynamic.
    ///
    /// If any of them is static, all become dynamic; otherwise all become static.
    /// Returns the type applied.
    pub fn toggle_static_dynamic(&mut self, bodies: &[BodyId]) -> Result<BodyType> {
        let targets: Vec<BodyId> = bodies
            .iter()
            .copied()
            .filter(|id| !id.is_anchor() && self.world.contains_body(*id))
            .collect();
        if targets.is_empty() {
            return Err(EditorError::State("No objects selected.".into()));
        }
        let any_static = targets.iter().any(|id| {
            self.world
                .body(*id)
                .is_some_and(|b| b.body_type == BodyType::Static)
        });
        let target = if any_static {
            BodyType::Dynamic
        } else {
            BodyType::Static
        };

        self.record_history();
        for id in &targets {
            self.world.update_body(*id, |body| {
                body.grab = None;
                body.set_body_type(target);
                for shape in &mut body.shapes {
                    shape.color = match target {
                        BodyType::Static => STATIC_BODY_COLOR,
                        _ => shape.original_dynamic_color,
                    };
                }
            });
        }
        self.version += 1;
        info!(?target, bodies = targets.len(), "body type toggled");
        Ok(target)
    }

    /// Remove joints, then bodies with every joint still referencing them.
    ///
    /// The drag joint is detached first. The anchor is never removed. An empty
    /// request is a no-op and records nothing.
    pub fn delete(&mut self, bodies: &[BodyId], constraints: &[ConstraintId]) -> DeleteReport {
        let body_targets: Vec<BodyId> = bodies
            .iter()
            .copied()
            .filter(|id| !id.is_anchor() && self.world.contains_body(*id))
            .collect();
        let joint_targets: Vec<ConstraintId> = constraints
            .iter()
            .copied()
            .filter(|id| Some(*id) != self.drag_joint && self.world.constraint(*id).is_some())
            .collect();
        if body_targets.is_empty() && joint_targets.is_empty() {
            debug!("delete: nothing selected");
            self.detach_drag_joint();
            return DeleteReport::default();
        }

        self.record_history();
        self.detach_drag_joint();
        let before = self.world.constraint_count();
        for id in &joint_targets {
            self.world.remove_constraint(*id);
        }
        let mut removed = Vec::new();
        for id in body_targets {
            if self.world.remove_body(id).is_some() {
                removed.push(id);
            }
        }
        let report = DeleteReport {
            constraints: before - self.world.constraint_count(),
            bodies: removed,
        };
        self.version += 1;
        info!(
            bodies = report.bodies.len(),
            constraints = report.constraints,
            "deleted"
        );
        report
    }
}
