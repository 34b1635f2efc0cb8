//! The per-tick spawn-or-advance state machine.

use log::{debug, trace};
use rand::Rng;

use super::{ArrivalSource, Frame, Path, Point, PoissonArrivals, VehiclePool};
use crate::config::{require_positive, ConfigError, SimulationConfig, SimulationParams};

/// Constants derived once from configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClockSettings {
    pub tick_seconds: f64,
    pub arrival_rate_per_tick: f64,
    pub distance_per_tick: f64,
    pub vehicle_size: f64,
    pub capacity: usize,
}

impl From<&SimulationParams> for ClockSettings {
    fn from(params: &SimulationParams) -> Self {
        Self {
            tick_seconds: params.tick_seconds,
            arrival_rate_per_tick: params.arrival_rate_per_tick(),
            distance_per_tick: params.distance_per_tick(),
            vehicle_size: params.vehicle_size,
            capacity: params.capacity(),
        }
    }
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The timer expired and this slot entered the path.
    Spawned(usize),
    /// The timer expired but every slot was already active.
    Saturated,
    /// Active vehicles moved forward.
    Advanced,
}

pub struct SimulationClock<A> {
    path: Path,
    pool: VehiclePool,
    /// `None` when the configured volume is zero.
    arrivals: Option<A>,
    settings: ClockSettings,
    wait_ticks: f64,
    delta_ticks: f64,
    elapsed_seconds: f64,
    tick_count: u64,
    /// Highest slot activated so far.
    active_boundary: Option<usize>,
}

impl<R: Rng> SimulationClock<PoissonArrivals<R>> {
    /// Builds a clock for a validated configuration, drawing arrivals from
    /// `rng`.
    pub fn from_config(config: &SimulationConfig, rng: R) -> Result<Self, ConfigError> {
        let path = config.route.to_path()?;
        let settings = ClockSettings::from(&config.traffic.simulation);
        let arrivals = if config.traffic.simulation.vehicles_per_day > 0 {
            Some(PoissonArrivals::new(settings.arrival_rate_per_tick, rng)?)
        } else {
            None
        };
        Self::new(path, arrivals, settings)
    }
}

impl<A: ArrivalSource> SimulationClock<A> {
    pub fn new(path: Path, arrivals: Option<A>, settings: ClockSettings) -> Result<Self, ConfigError> {
        require_positive("tick length", settings.tick_seconds)?;
        require_positive("distance per tick", settings.distance_per_tick)?;
        require_positive("vehicle size", settings.vehicle_size)?;
        if arrivals.is_some() && settings.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }

        // With no arrivals the timer never expires
        let wait_ticks = if arrivals.is_some() { 0.0 } else { f64::INFINITY };

        Ok(Self {
            pool: VehiclePool::new(settings.capacity, settings.vehicle_size),
            path,
            arrivals,
            settings,
            wait_ticks,
            delta_ticks: 0.0,
            elapsed_seconds: 0.0,
            tick_count: 0,
            active_boundary: None,
        })
    }

    /// Advances the simulation by one tick.
    ///
    /// A tick either spawns (timer expired) or moves the active vehicles,
    /// never both: a vehicle spawned this tick sits at the path start until
    /// the next one.
    pub fn tick(&mut self) -> TickOutcome {
        let outcome = if self.wait_ticks <= 0.0 {
            let outcome = match self.pool.activate_next() {
                Some(index) => {
                    self.active_boundary = Some(index);
                    debug!("Spawned vehicle {} at t={:.0}s", index, self.elapsed_seconds);
                    TickOutcome::Spawned(index)
                }
                None => {
                    debug!("Pool saturated ({} vehicles), skipping arrival", self.pool.capacity());
                    TickOutcome::Saturated
                }
            };

            if let Some(arrivals) = self.arrivals.as_mut() {
                self.wait_ticks = arrivals.next_wait_ticks();
                self.delta_ticks = self.wait_ticks;
            }
            outcome
        } else {
            if let Some(last) = self.active_boundary {
                self.pool.advance_active_up_to(last, self.settings.distance_per_tick);
            }
            self.wait_ticks -= 1.0;
            TickOutcome::Advanced
        };

        self.elapsed_seconds += self.settings.tick_seconds;
        self.tick_count += 1;

        trace!(
            "==== {} ==== wait={:.3} delta={:.3} elapsed={}s rate={:.5}",
            self.tick_count,
            self.wait_ticks,
            self.delta_ticks,
            self.elapsed_seconds,
            self.settings.arrival_rate_per_tick
        );

        outcome
    }

    /// Current coordinate of every slot, idle ones included.
    pub fn positions_this_tick(&self) -> Vec<Point> {
        self.pool
            .distances()
            .iter()
            .map(|d| self.path.coordinate_at(*d))
            .collect()
    }

    /// Owned snapshot of everything a renderer needs for this tick.
    pub fn frame(&self) -> Frame {
        Frame {
            tick: self.tick_count,
            elapsed_seconds: self.elapsed_seconds,
            positions: self.positions_this_tick(),
            active_count: self.pool.active_count(),
            vehicle_radius: self.settings.vehicle_size,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn pool(&self) -> &VehiclePool {
        &self.pool
    }

    pub fn settings(&self) -> &ClockSettings {
        &self.settings
    }

    pub fn wait_ticks(&self) -> f64 {
        self.wait_ticks
    }

    /// Waiting time drawn at the most recent expiry.
    pub fn delta_ticks(&self) -> f64 {
        self.delta_ticks
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed_seconds
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn active_boundary(&self) -> Option<usize> {
        self.active_boundary
    }
}
