use serde::{Deserialize, Serialize};
use super::{require_positive, ConfigError, Validate};

pub const SECONDS_PER_DAY: f64 = 86_400.0;
pub const SECONDS_PER_HOUR: f64 = 3_600.0;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TrafficConfig {
    pub simulation: SimulationParams,
    #[serde(default)]
    pub random: RandomConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimulationParams {
    /// Length of one tick in seconds.
    pub tick_seconds: f64,
    /// Target number of arrivals per day.
    pub vehicles_per_day: u32,
    /// Constant travel speed, in distance units per hour.
    pub speed_limit: f64,
    /// Maximum number of vehicles in one run. Defaults to `vehicles_per_day`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<usize>,
    /// Marker radius; also the idle slots' offset before the path start.
    pub vehicle_size: f64,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            tick_seconds: 60.0,
            vehicles_per_day: 100,
            speed_limit: 60.0,
            capacity: None,
            vehicle_size: 5.0,
        }
    }
}

impl SimulationParams {
    /// Expected spawns per tick.
    pub fn arrival_rate_per_tick(&self) -> f64 {
        self.vehicles_per_day as f64 / SECONDS_PER_DAY * self.tick_seconds
    }

    pub fn distance_per_tick(&self) -> f64 {
        self.speed_limit / SECONDS_PER_HOUR * self.tick_seconds
    }

    pub fn capacity(&self) -> usize {
        self.capacity.unwrap_or(self.vehicles_per_day as usize)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RandomConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Validate for TrafficConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let sim = &self.simulation;
        require_positive("tick length", sim.tick_seconds)?;
        require_positive("speed limit", sim.speed_limit)?;
        require_positive("vehicle size", sim.vehicle_size)?;

        if sim.vehicles_per_day > 0 {
            if sim.capacity() == 0 {
                return Err(ConfigError::ZeroCapacity);
            }
            require_positive("arrival rate", sim.arrival_rate_per_tick())?;
        }

        Ok(())
    }
}
