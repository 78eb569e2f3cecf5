//! Configuration loader for the `mywater-fleet` service.
//!
//! This module centralizes all runtime configuration values and their defaults,
//! loading from environment variables (with optional `.env` file support
//! provided by the caller). Handlers receive the loaded [`Config`] as router
//! state and never read the environment themselves.
//!
use std::env;
use std::net::SocketAddr;

use anyhow::{anyhow, bail, Result};

use crate::impact::ImpactConfig;

/// Parse an optional floating point variable with a default value.
macro_rules! parse_var_f64 {
    ($lookup:expr, $var_name:expr, $default:expr) => {
        $lookup($var_name)
            .map(|v| v.trim().parse::<f64>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
            .unwrap_or($default)
    };
}

/// Parse an optional socket address variable with a default value.
macro_rules! parse_var_addr {
    ($lookup:expr, $var_name:expr, $default:expr) => {
        $lookup($var_name)
            .map(|v| v.trim().parse::<SocketAddr>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
            .unwrap_or_else(|| SocketAddr::from($default))
    };
}

/// Strongly typed application configuration.
///
/// All fields are immutable after loading, ensuring a consistent configuration
/// snapshot for the lifetime of the application.
#[derive(Debug, Clone)]
pub struct Config {
    // ---
    /// Address the HTTP server binds to.
    pub bind_addr: SocketAddr,

    /// Bottle size and price used by the impact calculator.
    pub impact: ImpactConfig,

    /// Liters of water one person drinks per day, scaled by period.
    pub daily_intake_liters: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            impact: ImpactConfig::default(),
            daily_intake_liters: 2.0,
        }
    }
}

/// Load configuration from environment variables with defaults.
///
/// Optional:
/// - `BIND_ADDR` – listen address (default: `0.0.0.0:8080`)
/// - `BOTTLE_SIZE_LITERS` – liters per bottle, must be positive (default: 0.5)
/// - `BOTTLE_COST` – price per bottle (default: 1.1)
/// - `DAILY_INTAKE_LITERS` – daily intake per person (default: 2.0)
///
/// Returns an error if any variable is present but invalid.
pub fn load_from_env() -> Result<Config> {
    load_from(|name| env::var(name).ok())
}

/// Load configuration from an arbitrary variable lookup.
pub fn load_from<F>(lookup: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    // ---
    let bind_addr = parse_var_addr!(lookup, "BIND_ADDR", ([0, 0, 0, 0], 8080));
    let bottle_size = parse_var_f64!(lookup, "BOTTLE_SIZE_LITERS", 0.5);
    let bottle_cost = parse_var_f64!(lookup, "BOTTLE_COST", 1.1);
    let daily_intake_liters = parse_var_f64!(lookup, "DAILY_INTAKE_LITERS", 2.0);

    // The impact calculator divides by the bottle size without checking it
    if !(bottle_size.is_finite() && bottle_size > 0.0) {
        bail!("BOTTLE_SIZE_LITERS must be a positive number, got {}", bottle_size);
    }
    if !bottle_cost.is_finite() || !daily_intake_liters.is_finite() {
        bail!("BOTTLE_COST and DAILY_INTAKE_LITERS must be finite numbers");
    }

    Ok(Config {
        bind_addr,
        impact: ImpactConfig {
            bottle_size,
            bottle_cost,
        },
        daily_intake_liters,
    })
}

impl Config {
    /// Log the loaded configuration for debugging purposes.
    pub fn log_config(&self) {
        // ---
        tracing::info!("Configuration loaded:");
        tracing::info!("  BIND_ADDR           : {}", self.bind_addr);
        tracing::info!("  BOTTLE_SIZE_LITERS  : {}", self.impact.bottle_size);
        tracing::info!("  BOTTLE_COST         : {}", self.impact.bottle_cost);
        tracing::info!("  DAILY_INTAKE_LITERS : {}", self.daily_intake_liters);
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        // ---
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        load_from(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        // ---
        let cfg = load(&[]).unwrap();

        assert_eq!(cfg.bind_addr.port(), 8080);
        assert_eq!(cfg.impact, ImpactConfig::default());
        assert_eq!(cfg.daily_intake_liters, 2.0);
    }

    #[test]
    fn test_overrides() {
        // ---
        let cfg = load(&[
            ("BIND_ADDR", "127.0.0.1:9000"),
            ("BOTTLE_SIZE_LITERS", "1.5"),
            ("BOTTLE_COST", " 0.8 "),
            ("DAILY_INTAKE_LITERS", "3"),
        ])
        .unwrap();

        assert_eq!(cfg.bind_addr, "127.0.0.1:9000".parse::<SocketAddr>().unwrap());
        assert_eq!(cfg.impact.bottle_size, 1.5);
        assert_eq!(cfg.impact.bottle_cost, 0.8);
        assert_eq!(cfg.daily_intake_liters, 3.0);
    }

    #[test]
    fn test_invalid_values_rejected() {
        // ---
        assert!(load(&[("BOTTLE_SIZE_LITERS", "zero")]).is_err());
        assert!(load(&[("BOTTLE_SIZE_LITERS", "0")]).is_err());
        assert!(load(&[("BOTTLE_SIZE_LITERS", "-1")]).is_err());
        assert!(load(&[("BIND_ADDR", "localhost")]).is_err());
        assert!(load(&[("BOTTLE_COST", "inf")]).is_err());
    }
}
