//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → consumed once at startup to build the dispatcher and server
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the operating mode never changes at runtime
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    GatewayConfig, ListenerConfig, LimitsConfig, LocaleConfig, LogFormat, ObservabilityConfig,
    PrefixStrategy, RoutingConfig, TimeoutConfig, UpstreamConfig,
};
