use serde::{Deserialize, Serialize};
use super::{ConfigError, Validate};
use crate::simulation::{Path, Point};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RouteConfig {
    pub route: Route,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Route {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Polyline vertices as `[x, y]` pairs, in drawing units.
    pub vertices: Vec<[f64; 2]>,
    /// Real distance units per drawing unit.
    #[serde(default = "default_scale")]
    pub scale: f64,
}

fn default_scale() -> f64 {
    1.0
}

impl Default for Route {
    fn default() -> Self {
        Self {
            name: "diagonal".to_string(),
            description: "Straight route across a 256 x 256 mile square".to_string(),
            vertices: vec![[0.0, 0.0], [256.0, 256.0]],
            scale: default_scale(),
        }
    }
}

impl RouteConfig {
    pub fn to_path(&self) -> Result<Path, ConfigError> {
        let vertices = self.route.vertices
            .iter()
            .map(|[x, y]| Point::new(*x, *y))
            .collect();
        Path::new(vertices, self.route.scale)
    }
}

impl Validate for RouteConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        // Path construction performs every geometric check
        self.to_path().map(|_| ())
    }
}
