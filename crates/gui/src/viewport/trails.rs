use std::collections::{HashMap, VecDeque};

use glam::DVec2;

use crate::physics::BodyId;

/// Bounded per-body history of rendered screen positions.
#[derive(Debug, Clone)]
pub struct TrailBuffers {
    buffers: HashMap<BodyId, VecDeque<DVec2>>,
    capacity: usize,
}

impl Default for TrailBuffers {
    fn default() -> Self {
        Self::new(100)
    }
}

impl TrailBuffers {
    pub fn new(capacity: usize) -> Self {
        Self {
            buffers: HashMap::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
        for trail in self.buffers.values_mut() {
            while trail.len() > self.capacity {
                trail.pop_front();
            }
        }
    }

    /// Append a point, dropping the oldest once the trail is full.
    pub fn push(&mut self, body: BodyId, point: DVec2) {
        let trail = self.buffers.entry(body).or_default();
        trail.push_back(point);
        while trail.len() > self.capacity {
            trail.pop_front();
        }
    }

    pub fn remove(&mut self, body: BodyId) {
        self.buffers.remove(&body);
    }

    pub fn clear(&mut self) {
        self.buffers.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    pub fn get(&self, body: BodyId) -> Option<&VecDeque<DVec2>> {
        self.buffers.get(&body)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&BodyId, &VecDeque<DVec2>)> {
        self.buffers.iter()
    }
}
