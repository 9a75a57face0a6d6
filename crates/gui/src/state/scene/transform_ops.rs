//! Direct move/rotate of grabbed bodies

use glam::DVec2;
use shared::BodyType;
use tracing::debug;

use super::SceneState;
use crate::physics::{BodyId, GrabState};

impl SceneState {
    /// Centroid of the listed bodies' positions
    pub fn centroid(&self, bodies: &[BodyId]) -> Option<DVec2> {
        let positions: Vec<DVec2> = bodies
            .iter()
            .filter_map(|id| self.world.body(*id))
            .filter(|b| !b.id.is_anchor())
            .map(|b| b.position)
            .collect();
        if positions.is_empty() {
            return None;
        }
        Some(positions.iter().copied().sum::<DVec2>() / positions.len() as f64)
    }

    /// Capture grab state for a move or rotate gesture.
    ///
    /// Dynamic bodies become kinematic while the simulation runs so that
    /// direct positioning does not fight the integrator.
    pub fn begin_grab(&mut self, bodies: &[BodyId], pointer: DVec2) -> usize {
        let running = self.simulation_running;
        let mut grabbed = 0;
        for id in bodies {
            if id.is_anchor() {
                continue;
            }
            let grabbed_body = self.world.update_body(*id, |body| {
                let restore_type = if running && body.is_dynamic() {
                    body.set_body_type(BodyType::Kinematic);
                    body.velocity = DVec2::ZERO;
                    body.angular_velocity = 0.0;
                    Some(BodyType::Dynamic)
                } else {
                    None
                };
                body.grab = Some(GrabState {
                    restore_type,
                    offset: pointer - body.position,
                    initial_position: body.position,
                    initial_angle: body.angle,
                });
            });
            if grabbed_body.is_some() {
                grabbed += 1;
            }
        }
        debug!(grabbed, "grab started");
        grabbed
    }

    /// Set every grabbed body's position to `pointer - offset`.
    pub fn move_grabbed(&mut self, pointer: DVec2) {
        self.world.update_bodies(|body| {
            if let Some(grab) = body.grab {
                body.position = pointer - grab.offset;
                if !body.is_dynamic() {
                    body.velocity = DVec2::ZERO;
                }
            }
        });
        self.version += 1;
    }

    /// Rotate the grabbed bodies as one rigid assembly about `centroid`.
    pub fn rotate_grabbed(&mut self, centroid: DVec2, angle_delta: f64) {
        let rotation = DVec2::from_angle(angle_delta);
        self.world.update_bodies(|body| {
            if let Some(grab) = body.grab {
                body.angle = grab.initial_angle + angle_delta;
                body.position = centroid + rotation.rotate(grab.initial_position - centroid);
                if !body.is_dynamic() {
                    body.angular_velocity = 0.0;
                }
            }
        });
        self.version += 1;
    }

    /// Restore body types and drop grab state. Returns the number released.
    pub fn end_grab(&mut self) -> usize {
        let mut released = 0;
        self.world.update_bodies(|body| {
            if let Some(grab) = body.grab.take() {
                if let Some(body_type) = grab.restore_type {
                    body.set_body_type(body_type);
                }
                released += 1;
            }
        });
        debug!(released, "grab ended");
        released
    }

    pub fn has_grab(&self) -> bool {
        self.world.bodies().any(|b| b.grab.is_some())
    }
}
