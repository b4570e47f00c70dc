//! Runtime configuration loaded from environment variables.
//!
//! Every knob has a default matching the mobile app's constants, so an
//! empty environment produces the stock behavior.

use std::env;

/// Tracker configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Body weight used by the calorie estimate (kg)
    pub body_weight_kg: f64,
    /// Interval between live stats recomputations (ms)
    pub tick_interval_ms: u64,
    /// Requested minimum time between location samples (ms)
    pub sample_time_interval_ms: u64,
    /// Requested minimum movement between location samples (meters)
    pub sample_distance_interval_m: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            body_weight_kg: 70.0,
            tick_interval_ms: 1000,
            sample_time_interval_ms: 1000,
            sample_distance_interval_m: 5.0,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Unset variables fall back to defaults; values that are present but
    /// unparseable are an error rather than a silent fallback.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            body_weight_kg: parse_var("TRACKER_BODY_WEIGHT_KG", 70.0)?,
            tick_interval_ms: parse_var("TRACKER_TICK_INTERVAL_MS", 1000)?,
            sample_time_interval_ms: parse_var("TRACKER_SAMPLE_TIME_INTERVAL_MS", 1000)?,
            sample_distance_interval_m: parse_var("TRACKER_SAMPLE_DISTANCE_INTERVAL_M", 5.0)?,
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(name, raw)),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_app_constants() {
        let config = Config::default();
        assert_eq!(config.body_weight_kg, 70.0);
        assert_eq!(config.tick_interval_ms, 1000);
        assert_eq!(config.sample_time_interval_ms, 1000);
        assert_eq!(config.sample_distance_interval_m, 5.0);
    }

    // Env mutation in a single test to avoid racing parallel tests
    #[test]
    fn test_from_env_overrides_and_rejects_garbage() {
        env::set_var("TRACKER_BODY_WEIGHT_KG", "85.5");
        let config = Config::from_env().expect("Config should load");
        assert_eq!(config.body_weight_kg, 85.5);
        assert_eq!(config.tick_interval_ms, 1000);
        env::remove_var("TRACKER_BODY_WEIGHT_KG");

        env::set_var("TRACKER_TICK_INTERVAL_MS", "soon");
        let result = Config::from_env();
        assert!(matches!(
            result,
            Err(ConfigError::Invalid("TRACKER_TICK_INTERVAL_MS", _))
        ));
        env::remove_var("TRACKER_TICK_INTERVAL_MS");
    }
}
