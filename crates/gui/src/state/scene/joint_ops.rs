//! Hinge and spring creation

use glam::DVec2;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::SceneState;
use crate::error::{EditorError, Result};
use crate::physics::{
    BodyId, ConstraintId, ConstraintSpec, DEFAULT_SPRING_DAMPING, DEFAULT_SPRING_STIFFNESS,
};

/// Joint created by the two-click joint tools
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JointKind {
    /// Pin joint keeping the anchor distance fixed
    Hinge,
    /// Damped spring resting at the anchor distance
    Spring,
}

impl JointKind {
    pub fn label(self) -> &'static str {
        match self {
            JointKind::Hinge => "Hinge",
            JointKind::Spring => "Spring",
        }
    }
}

impl SceneState {
    /// Join two bodies at world-space anchor points.
    ///
    /// Either body may be the world anchor. Fails without recording when the
    /// bodies are the same or unknown.
    pub fn create_joint(
        &mut self,
        kind: JointKind,
        a: BodyId,
        b: BodyId,
        world_a: DVec2,
        world_b: DVec2,
    ) -> Result<ConstraintId> {
        if a == b {
            return Err(EditorError::Validation(
                "Select a different object for the second anchor.".into(),
            ));
        }
        if !world_a.is_finite() || !world_b.is_finite() {
            return Err(EditorError::Validation("Anchor points must be finite.".into()));
        }
        let local_a = self
            .world
            .body(a)
            .ok_or_else(|| EditorError::Reference(a.to_string()))?
            .world_to_local(world_a);
        let local_b = self
            .world
            .body(b)
            .ok_or_else(|| EditorError::Reference(b.to_string()))?
            .world_to_local(world_b);

        let spec = match kind {
            JointKind::Hinge => ConstraintSpec::pin(a, b, local_a, local_b),
            JointKind::Spring => ConstraintSpec::spring(
                a,
                b,
                local_a,
                local_b,
                world_a.distance(world_b),
                DEFAULT_SPRING_STIFFNESS,
                DEFAULT_SPRING_DAMPING,
            ),
        };

        self.record_history();
        let id = self.world.add_constraint(spec)?;
        self.version += 1;
        info!(joint = %id, kind = kind.label(), %a, %b, "joint created");
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::ConstraintKind;
    use crate::state::scene::ShapeStyle;

    fn two_bodies(scene: &mut SceneState) -> (BodyId, BodyId) {
        let a = scene
            .create_circle(DVec2::ZERO, 10.0, ShapeStyle::default())
            .unwrap();
        let b = scene
            .create_box(DVec2::new(100.0, 0.0), 20.0, 20.0, ShapeStyle::default())
            .unwrap();
        (a, b)
    }

    #[test]
    fn test_hinge_adds_one_pin_and_one_history_entry() {
        let mut scene = SceneState::default();
        let (a, b) = two_bodies(&mut scene);
        let before = scene.history_len();
        let id = scene
            .create_joint(JointKind::Hinge, a, b, DVec2::new(2.0, 0.0), DVec2::new(98.0, 0.0))
            .unwrap();
        assert_eq!(scene.world.constraint_count(), 1);
        assert_eq!(scene.history_len(), before + 1);
        let joint = scene.world.constraint(id).unwrap();
        assert!(joint.is_pin());
        assert!(joint.involves(a) && joint.involves(b));
        assert_eq!(joint.anchor_b, DVec2::new(-2.0, 0.0));
    }

    #[test]
    fn test_spring_rest_length_is_anchor_distance() {
        let mut scene = SceneState::default();
        let (a, b) = two_bodies(&mut scene);
        let id = scene
            .create_joint(JointKind::Spring, a, b, DVec2::ZERO, DVec2::new(100.0, 0.0))
            .unwrap();
        match scene.world.constraint(id).unwrap().kind {
            ConstraintKind::DampedSpring {
                rest_length,
                stiffness,
                damping,
            } => {
                assert!((rest_length - 100.0).abs() < 1e-9);
                assert_eq!(stiffness, DEFAULT_SPRING_STIFFNESS);
                assert_eq!(damping, DEFAULT_SPRING_DAMPING);
            }
            other => panic!("expected spring, got {other:?}"),
        }
    }

    #[test]
    fn test_joint_to_anchor_allowed() {
        let mut scene = SceneState::default();
        let (a, _) = two_bodies(&mut scene);
        assert!(scene
            .create_joint(JointKind::Hinge, BodyId::ANCHOR, a, DVec2::new(0.0, 50.0), DVec2::ZERO)
            .is_ok());
    }

    #[test]
    fn test_same_body_rejected_without_history() {
        let mut scene = SceneState::default();
        let (a, _) = two_bodies(&mut scene);
        let before = scene.history_len();
        assert!(matches!(
            scene.create_joint(JointKind::Hinge, a, a, DVec2::ZERO, DVec2::ZERO),
            Err(EditorError::Validation(_))
        ));
        assert!(matches!(
            scene.create_joint(JointKind::Spring, a, BodyId::new(99), DVec2::ZERO, DVec2::ZERO),
            Err(EditorError::Reference(_))
        ));
        assert_eq!(scene.history_len(), before);
        assert_eq!(scene.world.constraint_count(), 0);
    }
}
