//! Startup orchestration.
//!
//! # Responsibilities
//! - Load and validate configuration
//! - Resolve the operating mode once
//! - Assemble the dispatcher before any listener is bound
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The config file's `locale.mode` wins over `GATEWAY_ENV`

use std::path::Path;

use crate::config::{load_config, validation::validate_config, ConfigError, GatewayConfig};
use crate::locale::{DispatchError, LocaleDispatcher, OperatingMode};

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("dispatcher error: {0}")]
    Dispatch(#[from] DispatchError),
}

/// Everything the server needs, validated.
#[derive(Debug)]
pub struct Prepared {
    pub config: GatewayConfig,
    pub mode: OperatingMode,
    pub dispatcher: LocaleDispatcher,
}

pub fn resolve_mode(config: &GatewayConfig, env_mode: OperatingMode) -> OperatingMode {
    config.locale.mode.unwrap_or(env_mode)
}

/// Load configuration (or defaults) and build the dispatcher.
pub fn prepare(config_path: Option<&Path>, env_mode: OperatingMode) -> Result<Prepared, StartupError> {
    let config = match config_path {
        Some(path) => load_config(path)?,
        None => {
            let config = GatewayConfig::default();
            validate_config(&config).map_err(ConfigError::Validation)?;
            config
        }
    };

    let mode = resolve_mode(&config, env_mode);
    let dispatcher = LocaleDispatcher::from_config(&config, mode)?;

    Ok(Prepared {
        config,
        mode,
        dispatcher,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let prepared = prepare(None, OperatingMode::Development).unwrap();
        assert_eq!(prepared.mode, OperatingMode::Development);
        assert_eq!(prepared.dispatcher.mode(), OperatingMode::Development);

        let prepared = prepare(None, OperatingMode::Production).unwrap();
        assert_eq!(prepared.dispatcher.mode(), OperatingMode::Production);
    }

    #[test]
    fn test_config_mode_overrides_env() {
        let mut config = GatewayConfig::default();
        assert_eq!(resolve_mode(&config, OperatingMode::Production), OperatingMode::Production);

        config.locale.mode = Some(OperatingMode::Development);
        assert_eq!(resolve_mode(&config, OperatingMode::Production), OperatingMode::Development);
    }

    #[test]
    fn test_missing_config_file_is_fatal() {
        let err = prepare(Some(Path::new("/nonexistent/gateway.toml")), OperatingMode::Development).unwrap_err();
        assert!(matches!(err, StartupError::Config(ConfigError::Io(_))));
    }
}
