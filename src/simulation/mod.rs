use nalgebra::{Vector2, Point2};
use std::time::{Duration, Instant};

pub mod geometry;
pub mod arrival;
pub mod pool;
pub mod clock;

pub use geometry::*;
pub use arrival::*;
pub use pool::*;
pub use clock::*;

pub type Vec2 = Vector2<f64>;
pub type Point = Point2<f64>;

/// Read-only view of one tick, handed to whatever draws the simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub tick: u64,
    pub elapsed_seconds: f64,
    /// One coordinate per vehicle slot, indexed like the pool.
    pub positions: Vec<Point>,
    /// Slots `0..active_count` have entered the path.
    pub active_count: usize,
    pub vehicle_radius: f64,
}

impl Frame {
    /// Positions of slots that have entered the path.
    pub fn active_positions(&self) -> &[Point] {
        &self.positions[..self.active_count.min(self.positions.len())]
    }
}

#[derive(Debug, Clone, Default)]
pub struct TickMetrics {
    pub tick_time: Duration,
}

/// Rolling window of wall-clock tick durations.
#[derive(Debug)]
pub struct PerformanceTracker {
    samples: Vec<TickMetrics>,
    max_samples: usize,
    current_tick_start: Option<Instant>,
}

impl PerformanceTracker {
    pub fn new(max_samples: usize) -> Self {
        Self {
            samples: Vec::with_capacity(max_samples),
            max_samples: max_samples.max(1),
            current_tick_start: None,
        }
    }

    pub fn start_tick(&mut self) {
        self.current_tick_start = Some(Instant::now());
    }

    pub fn end_tick(&mut self) {
        if let Some(start) = self.current_tick_start.take() {
            self.record(start.elapsed());
        }
    }

    pub fn record(&mut self, tick_time: Duration) {
        if self.samples.len() >= self.max_samples {
            self.samples.remove(0);
        }
        self.samples.push(TickMetrics { tick_time });
    }

    pub fn average_tick_time(&self) -> Duration {
        if self.samples.is_empty() {
            return Duration::ZERO;
        }

        let total: Duration = self.samples.iter().map(|s| s.tick_time).sum();
        total / self.samples.len() as u32
    }

    pub fn ticks_per_second(&self) -> f64 {
        let avg_tick_time = self.average_tick_time();
        if avg_tick_time.is_zero() {
            return 0.0;
        }
        1.0 / avg_tick_time.as_secs_f64()
    }
}
