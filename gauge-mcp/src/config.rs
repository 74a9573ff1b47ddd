//! Server configuration from the environment

use std::env;
use gauge_units::DEFAULT_DISPLAY_DECIMALS;
use tracing::warn;

pub const PROTOCOL_VERSION: &str = "2025-11-25";
pub const SERVER_NAME: &str = "gauge";
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Env var holding the headline precision
pub const DISPLAY_DECIMALS_VAR: &str = "GAUGE_DISPLAY_DECIMALS";

/// Upper bound for headline precision; f64 carries ~17 significant digits
const MAX_DISPLAY_DECIMALS: usize = 17;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Decimal places of the headline value
    pub display_decimals: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            display_decimals: DEFAULT_DISPLAY_DECIMALS,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; invalid values fall back to defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(DISPLAY_DECIMALS_VAR) {
            match raw.trim().parse::<usize>() {
                Ok(n) if n <= MAX_DISPLAY_DECIMALS => config.display_decimals = n,
                _ => warn!(
                    value = %raw,
                    default = config.display_decimals,
                    "ignoring invalid {}", DISPLAY_DECIMALS_VAR
                ),
            }
        }

        config
    }
}
