//! Process-wide operating mode.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Environment variable selecting the operating mode.
pub const GATEWAY_ENV: &str = "GATEWAY_ENV";

/// Development serves a single locale via rewrite; production negotiates.
///
/// Resolved once at startup and handed to the dispatcher by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OperatingMode {
    #[default]
    Development,
    Production,
}

impl OperatingMode {
    /// Read the mode from [`GATEWAY_ENV`].
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var(GATEWAY_ENV).ok().as_deref())
    }

    /// Only the exact value `production` selects production mode.
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value {
            Some("production") => OperatingMode::Production,
            _ => OperatingMode::Development,
        }
    }

    pub fn is_production(self) -> bool {
        self == OperatingMode::Production
    }
}

impl fmt::Display for OperatingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperatingMode::Development => f.write_str("development"),
            OperatingMode::Production => f.write_str("production"),
        }
    }
}
