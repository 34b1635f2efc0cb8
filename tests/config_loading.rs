use anyhow::Result;
use assert_approx_eq::assert_approx_eq;
use corridor_sim::config::{ConfigError, SimulationConfig};

const ROUTE: &str = r#"
[route]
name = "dogleg"
vertices = [[0.0, 0.0], [10.0, 0.0], [10.0, 5.0]]
scale = 2.0
"#;

const TRAFFIC: &str = r#"
[simulation]
tick_seconds = 30.0
vehicles_per_day = 2880
speed_limit = 120.0
capacity = 8
vehicle_size = 1.5

[random]
seed = 9
"#;

#[test]
fn shipped_config_loads() -> Result<()> {
    let config = SimulationConfig::load_from_files("route.toml", "traffic.toml")?;
    assert_eq!(config.route.route.vertices.len(), 2);
    assert_eq!(config.traffic.simulation.vehicles_per_day, 100);
    assert_eq!(config.traffic.random.seed, Some(42));
    Ok(())
}

#[test]
fn parses_all_fields() -> Result<()> {
    let config = SimulationConfig::from_toml_strs(ROUTE, TRAFFIC)?;
    let path = config.route.to_path()?;
    assert_eq!(path.total_length(), 30.0);

    let params = &config.traffic.simulation;
    assert_eq!(params.capacity(), 8);
    assert_approx_eq!(params.arrival_rate_per_tick(), 1.0);
    assert_approx_eq!(params.distance_per_tick(), 1.0);
    Ok(())
}

#[test]
fn seed_is_optional() -> Result<()> {
    let traffic = TRAFFIC.replace("[random]\nseed = 9\n", "");
    let config = SimulationConfig::from_toml_strs(ROUTE, &traffic)?;
    assert_eq!(config.traffic.random.seed, None);
    Ok(())
}

#[test]
fn invalid_values_fail_before_any_tick() {
    let traffic = TRAFFIC.replace("speed_limit = 120.0", "speed_limit = 0.0");
    let err = SimulationConfig::from_toml_strs(ROUTE, &traffic).unwrap_err();
    assert_eq!(
        err.downcast_ref::<ConfigError>(),
        Some(&ConfigError::NonPositive("speed limit", 0.0))
    );

    let route = ROUTE.replace("[[0.0, 0.0], [10.0, 0.0], [10.0, 5.0]]", "[[1.0, 1.0]]");
    let err = SimulationConfig::from_toml_strs(&route, TRAFFIC).unwrap_err();
    assert_eq!(err.downcast_ref::<ConfigError>(), Some(&ConfigError::TooFewVertices(1)));
}

#[test]
fn missing_file_is_reported() {
    let err = SimulationConfig::load_from_files("does-not-exist.toml", "traffic.toml").unwrap_err();
    assert!(err.to_string().contains("does-not-exist.toml"));
}

#[test]
fn effective_config_includes_defaults() -> Result<()> {
    let route = "[route]\nname = \"short\"\nvertices = [[0.0, 0.0], [1.0, 0.0]]\n";
    let traffic = TRAFFIC.replace("capacity = 8\n", "");
    let config = SimulationConfig::from_toml_strs(route, &traffic)?;

    let (route_toml, traffic_toml) = config.to_toml_strings()?;
    assert!(route_toml.contains("scale = 1.0"), "{}", route_toml);
    assert!(!traffic_toml.contains("capacity"), "{}", traffic_toml);

    let reloaded = SimulationConfig::from_toml_strs(&route_toml, &traffic_toml)?;
    assert_eq!(reloaded.route.route.scale, 1.0);
    assert_eq!(reloaded.traffic.simulation.capacity(), 2880);
    assert_eq!(reloaded.traffic.random.seed, Some(9));
    Ok(())
}
