//! Copy and paste of bodies and joints

use std::collections::HashSet;

use glam::DVec2;
use shared::SelectionSnapshot;
use tracing::info;

use super::serializer::{body_to_data, constraint_to_data, IdPolicy};
use super::SceneState;
use crate::error::{EditorError, Result};
use crate::physics::{BodyId, ConstraintId};

/// Offset applied to pasted bodies, world units
pub const PASTE_OFFSET: DVec2 = DVec2::new(20.0, 20.0);

impl SceneState {
    /// Serialize the listed bodies, plus the listed joints and joints between
    /// listed bodies whose endpoints are all copied bodies or the anchor.
    pub fn copy_selection(&self, bodies: &[BodyId], constraints: &[ConstraintId]) -> SelectionSnapshot {
        let copied: HashSet<BodyId> = bodies
            .iter()
            .copied()
            .filter(|id| !id.is_anchor() && self.world.contains_body(*id))
            .collect();
        let endpoint_ok = |id: BodyId| id.is_anchor() || copied.contains(&id);

        let objects = self
            .world
            .bodies()
            .filter(|b| copied.contains(&b.id))
            .map(body_to_data)
            .collect();
        let constraints = self
            .world
            .constraints()
            .filter(|c| Some(c.id) != self.drag_joint)
            .filter(|c| constraints.contains(&c.id) || (copied.contains(&c.a) || copied.contains(&c.b)))
            .filter(|c| endpoint_ok(c.a) && endpoint_ok(c.b))
            .map(constraint_to_data)
            .collect();

        SelectionSnapshot {
            objects,
            constraints,
        }
    }

    /// Instantiate clipboard contents with fresh ids, shifted by `offset`.
    pub fn paste(
        &mut self,
        clipboard: &SelectionSnapshot,
        offset: DVec2,
    ) -> Result<(Vec<BodyId>, Vec<ConstraintId>)> {
        if clipboard.objects.iter().all(|o| o.shapes.is_empty()) {
            return Err(EditorError::State("Clipboard is empty.".into()));
        }
        self.record_history();
        let (bodies, joints) = self.instantiate(
            &clipboard.objects,
            &clipboard.constraints,
            offset,
            IdPolicy::Fresh,
        );
        self.version += 1;
        info!(bodies = bodies.len(), joints = joints.len(), "pasted");
        Ok((bodies, joints))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::ConstraintSpec;
    use crate::state::scene::ShapeStyle;

    fn scene_with_chain() -> (SceneState, BodyId, BodyId, BodyId) {
        let mut scene = SceneState::default();
        let a = scene
            .create_circle(DVec2::ZERO, 10.0, ShapeStyle::default())
            .unwrap();
        let b = scene
            .create_circle(DVec2::new(40.0, 0.0), 10.0, ShapeStyle::default())
            .unwrap();
        let c = scene
            .create_circle(DVec2::new(80.0, 0.0), 10.0, ShapeStyle::default())
            .unwrap();
        for (x, y) in [(a, b), (b, c)] {
            scene
                .world
                .add_constraint(ConstraintSpec::pin(x, y, DVec2::ZERO, DVec2::ZERO))
                .unwrap();
        }
        scene
            .world
            .add_constraint(ConstraintSpec::pin(BodyId::ANCHOR, a, DVec2::new(0.0, 30.0), DVec2::ZERO))
            .unwrap();
        (scene, a, b, c)
    }

    #[test]
    fn test_copy_keeps_only_internal_and_anchor_joints() {
        let (scene, a, b, _) = scene_with_chain();
        let clip = scene.copy_selection(&[a, b], &[]);
        assert_eq!(clip.objects.len(), 2);
        // a-b and anchor-a; b-c crosses the selection boundary
        assert_eq!(clip.constraints.len(), 2);
    }

    #[test]
    fn test_paste_offsets_and_allocates_fresh_ids() {
        let (mut scene, a, b, _) = scene_with_chain();
        let clip = scene.copy_selection(&[a, b], &[]);
        let history = scene.history_len();
        let (bodies, joints) = scene.paste(&clip, PASTE_OFFSET).unwrap();
        assert_eq!(bodies.len(), 2);
        assert_eq!(joints.len(), 2);
        assert!(!bodies.contains(&a) && !bodies.contains(&b));
        assert_eq!(scene.world.body_count(), 5);
        assert_eq!(scene.history_len(), history + 1);
        let pasted = scene.world.body(bodies[0]).unwrap();
        assert_eq!(pasted.position, DVec2::new(20.0, 20.0));
        for joint in joints {
            let c = scene.world.constraint(joint).unwrap();
            assert!(c.a.is_anchor() || bodies.contains(&c.a));
            assert!(bodies.contains(&c.b));
        }
    }

    #[test]
    fn test_paste_empty_is_state_error() {
        let mut scene = SceneState::default();
        assert!(matches!(
            scene.paste(&SelectionSnapshot::default(), PASTE_OFFSET),
            Err(EditorError::State(_))
        ));
        assert_eq!(scene.history_len(), 0);
    }
}
