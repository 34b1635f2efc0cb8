//! Fixed set of vehicle slots, each holding a distance along the path.

use log::warn;

/// Vehicle slots indexed `0..capacity`. Slots with a negative distance are
/// idle; active slots always form the prefix `0..active_count()`.
#[derive(Debug, Clone, PartialEq)]
pub struct VehiclePool {
    distances: Vec<f64>,
    active: usize,
}

impl VehiclePool {
    /// Creates `capacity` idle slots parked `idle_offset` units before the
    /// path start.
    pub fn new(capacity: usize, idle_offset: f64) -> Self {
        Self {
            distances: vec![-idle_offset.abs(); capacity],
            active: 0,
        }
    }

    /// Puts the lowest idle slot at the path start. Returns `None` without
    /// touching anything when every slot is already active.
    pub fn activate_next(&mut self) -> Option<usize> {
        if self.is_saturated() {
            return None;
        }
        let index = self.active;
        self.distances[index] = 0.0;
        self.active += 1;
        Some(index)
    }

    /// Moves slots `0..=last` forward by `step`. Slots past the active prefix
    /// are never touched. Active vehicles never move backward, so a negative
    /// or non-finite step is ignored.
    pub fn advance_active_up_to(&mut self, last: usize, step: f64) {
        if !(step.is_finite() && step >= 0.0) {
            warn!("Ignoring invalid vehicle step {}", step);
            return;
        }
        let end = last.saturating_add(1).min(self.active);
        for distance in &mut self.distances[..end] {
            *distance += step;
        }
    }

    pub fn distances(&self) -> &[f64] {
        &self.distances
    }

    pub fn capacity(&self) -> usize {
        self.distances.len()
    }

    pub fn active_count(&self) -> usize {
        self.active
    }

    pub fn is_saturated(&self) -> bool {
        self.active == self.distances.len()
    }
}
