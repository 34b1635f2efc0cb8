use anyhow::{Context, Result};
use thiserror::Error;

pub mod route;
pub mod traffic;

pub use route::*;
pub use traffic::*;

#[derive(Debug, Clone, Default)]
pub struct SimulationConfig {
    pub route: RouteConfig,
    pub traffic: TrafficConfig,
}

impl SimulationConfig {
    pub fn load_from_files(route_path: &str, traffic_path: &str) -> Result<Self> {
        let route_content = std::fs::read_to_string(route_path)
            .with_context(|| format!("reading route config {}", route_path))?;
        let traffic_content = std::fs::read_to_string(traffic_path)
            .with_context(|| format!("reading traffic config {}", traffic_path))?;

        Self::from_toml_strs(&route_content, &traffic_content)
    }

    pub fn from_toml_strs(route_toml: &str, traffic_toml: &str) -> Result<Self> {
        let route: RouteConfig = toml::from_str(route_toml).context("parsing route config")?;
        let traffic: TrafficConfig = toml::from_str(traffic_toml).context("parsing traffic config")?;

        // Validate configurations
        route.validate()?;
        traffic.validate()?;

        Ok(SimulationConfig { route, traffic })
    }

    /// The effective configuration, defaults filled in, as `(route, traffic)` TOML.
    pub fn to_toml_strings(&self) -> Result<(String, String)> {
        let route = toml::to_string(&self.route).context("serializing route config")?;
        let traffic = toml::to_string(&self.traffic).context("serializing traffic config")?;
        Ok((route, traffic))
    }
}

/// Rejected configuration. Always raised before the first tick.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{0} must be positive, got {1}")]
    NonPositive(&'static str, f64),
    #[error("{0} must be finite")]
    NonFinite(&'static str),
    #[error("a path needs at least 2 vertices, got {0}")]
    TooFewVertices(usize),
    #[error("path segment {0} has zero length")]
    DegenerateSegment(usize),
    #[error("vehicle pool capacity must be greater than zero")]
    ZeroCapacity,
}

pub trait Validate {
    fn validate(&self) -> Result<(), ConfigError>;
}

pub(crate) fn require_positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NonFinite(name));
    }
    if value <= 0.0 {
        return Err(ConfigError::NonPositive(name, value));
    }
    Ok(())
}
