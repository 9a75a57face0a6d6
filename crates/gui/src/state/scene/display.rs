//! Display helper functions for bodies and joints

use shared::{BodyType, Rgba};

use crate::physics::{Body, Constraint, ConstraintKind, Shape, ShapeKind};

/// Get display name for a body
pub fn body_display_name(body: &Body) -> String {
    match body.shapes.first() {
        Some(shape) if body.shapes.len() == 1 => format!("{} ({})", shape_label(shape), body.id),
        Some(_) => format!("Compound ({})", body.id),
        None => body.id.to_string(),
    }
}

pub fn shape_label(shape: &Shape) -> &'static str {
    match shape.kind {
        ShapeKind::Circle { .. } => "Circle",
        ShapeKind::Box { .. } => "Box",
    }
}

/// Get display name for a joint
pub fn constraint_display_name(constraint: &Constraint) -> String {
    let kind = match constraint.kind {
        ConstraintKind::PinJoint { .. } => "Pin Joint",
        ConstraintKind::DampedSpring { .. } => "Damped Spring",
    };
    format!("{kind} ({} - {})", constraint.a, constraint.b)
}

/// Label of the static/dynamic toggle for a set of bodies
pub fn body_type_label(types: &[BodyType]) -> &'static str {
    let any_static = types.iter().any(|t| *t == BodyType::Static);
    let all_static = !types.is_empty() && types.iter().all(|t| *t == BodyType::Static);
    if all_static {
        "Static"
    } else if any_static {
        "Mixed (Stat/Dyn)"
    } else {
        "Dynamic"
    }
}

/// Material values shown for a set of selected bodies
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaterialSummary {
    pub density: f64,
    pub friction: f64,
    pub elasticity: f64,
    /// Original dynamic color of the first shape of the first body
    pub color: Rgba,
    pub type_label: &'static str,
}

/// Average density, friction and elasticity over every shape of `bodies`.
/// None when the bodies have no shapes.
pub fn material_summary<'a>(bodies: impl IntoIterator<Item = &'a Body>) -> Option<MaterialSummary> {
    let bodies: Vec<&Body> = bodies.into_iter().collect();
    let shapes: Vec<&Shape> = bodies.iter().flat_map(|b| b.shapes.iter()).collect();
    let first = shapes.first()?;
    let n = shapes.len() as f64;
    let types: Vec<BodyType> = bodies.iter().map(|b| b.body_type).collect();
    Some(MaterialSummary {
        density: shapes.iter().map(|s| s.density).sum::<f64>() / n,
        friction: shapes.iter().map(|s| s.friction).sum::<f64>() / n,
        elasticity: shapes.iter().map(|s| s.elasticity).sum::<f64>() / n,
        color: first.original_dynamic_color,
        type_label: body_type_label(&types),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::BodyId;
    use glam::DVec2;

    #[test]
    fn test_body_type_label() {
        assert_eq!(body_type_label(&[BodyType::Static, BodyType::Static]), "Static");
        assert_eq!(body_type_label(&[BodyType::Dynamic]), "Dynamic");
        assert_eq!(body_type_label(&[BodyType::Kinematic]), "Dynamic");
        assert_eq!(
            body_type_label(&[BodyType::Static, BodyType::Dynamic]),
            "Mixed (Stat/Dyn)"
        );
    }

    #[test]
    fn test_body_display_name() {
        let body = Body::new(BodyId::new(3), BodyType::Dynamic, DVec2::ZERO)
            .with_shape(Shape::circle(4.0, 1.0, [0, 0, 0, 255]));
        assert_eq!(body_display_name(&body), "Circle (body_3)");
    }

    #[test]
    fn test_material_summary_averages() {
        let mut a = Body::new(BodyId::new(0), BodyType::Dynamic, DVec2::ZERO)
            .with_shape(Shape::circle(4.0, 1.0, [1, 2, 3, 255]));
        a.shapes[0].friction = 0.2;
        let b = Body::new(BodyId::new(1), BodyType::Static, DVec2::ZERO)
            .with_shape(Shape::rect(4.0, 4.0, 3.0, [9, 9, 9, 255]));
        let summary = material_summary([&a, &b]).unwrap();
        assert!((summary.density - 2.0).abs() < 1e-12);
        assert!((summary.friction - 0.35).abs() < 1e-12);
        assert_eq!(summary.color, [1, 2, 3, 255]);
        assert_eq!(summary.type_label, "Mixed (Stat/Dyn)");

        let empty = Body::new(BodyId::new(2), BodyType::Dynamic, DVec2::ZERO);
        assert!(material_summary([&empty]).is_none());
    }
}
