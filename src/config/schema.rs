//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::locale::OperatingMode;

/// Root configuration for the locale gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Application server that receives dispatched requests.
    pub upstream: UpstreamConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Request size limits.
    pub limits: LimitsConfig,

    /// Locale dispatch and negotiation settings.
    pub locale: LocaleConfig,

    /// Paths that bypass locale handling.
    pub routing: RoutingConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Upstream application server.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Upstream address (e.g., "127.0.0.1:3000").
    pub address: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1:3000".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 2 * 1024 * 1024, // 2MB
        }
    }
}

/// How locale prefixes appear in public URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PrefixStrategy {
    /// Every URL carries a locale prefix.
    #[default]
    Always,
    /// Only non-default locales carry a prefix.
    AsNeeded,
    /// URLs never carry a prefix; the locale is served via rewrite.
    Never,
}

/// Locale dispatch configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LocaleConfig {
    /// Pins the operating mode. When absent it is read from `GATEWAY_ENV`.
    pub mode: Option<OperatingMode>,

    /// Locale prepended to every path in development mode.
    pub dev_locale: String,

    /// Locales the negotiator may select in production mode.
    pub locales: Vec<String>,

    /// Fallback locale when nothing else matches.
    pub default_locale: String,

    /// Prefix strategy for production URLs.
    pub prefix: PrefixStrategy,

    /// Use the `Accept-Language` header for unprefixed paths.
    pub detection: bool,

    /// Cookie remembering the chosen locale across visits.
    pub cookie_name: String,

    /// Lifetime of the locale cookie in seconds.
    pub cookie_max_age_secs: u64,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            mode: None,
            dev_locale: "en".to_string(),
            locales: vec!["en".to_string()],
            default_locale: "en".to_string(),
            prefix: PrefixStrategy::Always,
            detection: true,
            cookie_name: "NEXT_LOCALE".to_string(),
            cookie_max_age_secs: 365 * 24 * 60 * 60,
        }
    }
}

/// Locale exclusion configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Path prefixes that are never localized.
    pub excluded_prefixes: Vec<String>,

    /// Treat any path containing a dot as a static asset.
    pub exclude_dotted_paths: bool,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            excluded_prefixes: ["/_next", "/api", "/_vercel", "/monitoring", "/healthcheck"]
                .into_iter()
                .map(String::from)
                .collect(),
            exclude_dotted_paths: true,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
