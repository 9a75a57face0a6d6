use crate::physics::{BodyId, ConstraintId};

/// Body and joint selection. Selecting one kind clears the other.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct SelectionState {
    /// Selected bodies (in order of selection)
    bodies: Vec<BodyId>,
    /// Selected joints (in order of selection)
    constraints: Vec<ConstraintId>,
}

impl SelectionState {
    /// Primary (first) selected body
    pub fn primary(&self) -> Option<BodyId> {
        self.bodies.first().copied()
    }

    /// All selected bodies
    pub fn bodies(&self) -> &[BodyId] {
        &self.bodies
    }

    /// All selected joints
    pub fn constraints(&self) -> &[ConstraintId] {
        &self.constraints
    }

    pub fn is_selected(&self, id: BodyId) -> bool {
        self.bodies.contains(&id)
    }

    pub fn is_constraint_selected(&self, id: ConstraintId) -> bool {
        self.constraints.contains(&id)
    }

    /// Select a single body (clears previous selection)
    pub fn select(&mut self, id: BodyId) {
        self.clear();
        self.bodies.push(id);
    }

    /// Add a body without clearing (shift+click and box selection)
    pub fn extend(&mut self, id: BodyId) {
        self.constraints.clear();
        if !self.bodies.contains(&id) {
            self.bodies.push(id);
        }
    }

    /// Toggle a body in the selection
    pub fn toggle(&mut self, id: BodyId) {
        self.constraints.clear();
        if let Some(pos) = self.bodies.iter().position(|b| *b == id) {
            self.bodies.remove(pos);
        } else {
            self.bodies.push(id);
        }
    }

    /// Select a single joint (clears body selection)
    pub fn select_constraint(&mut self, id: ConstraintId) {
        self.clear();
        self.constraints.push(id);
    }

    /// Replace the selection with the given bodies and joints, e.g. after paste
    pub fn set(&mut self, bodies: Vec<BodyId>, constraints: Vec<ConstraintId>) {
        self.bodies = bodies;
        self.constraints = constraints;
    }

    /// Clear all selection
    pub fn clear(&mut self) {
        self.bodies.clear();
        self.constraints.clear();
    }

    /// Drop ids that no longer exist
    pub fn retain(&mut self, body_exists: impl Fn(BodyId) -> bool, joint_exists: impl Fn(ConstraintId) -> bool) {
        self.bodies.retain(|b| body_exists(*b));
        self.constraints.retain(|c| joint_exists(*c));
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty() && self.constraints.is_empty()
    }

    /// Number of selected bodies
    pub fn count(&self) -> usize {
        self.bodies.len()
    }
}
