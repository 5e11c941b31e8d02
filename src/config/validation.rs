//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses and value ranges (timeouts > 0)
//! - Check locale lists are consistent with the default locale
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use crate::config::schema::GatewayConfig;

/// A single semantic problem found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_socket_addr(&mut errors, "listener.bind_address", &config.listener.bind_address);
    check_socket_addr(&mut errors, "upstream.address", &config.upstream.address);
    if config.observability.metrics_enabled {
        check_socket_addr(
            &mut errors,
            "observability.metrics_address",
            &config.observability.metrics_address,
        );
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than 0"));
    }

    let locale = &config.locale;
    if !is_valid_locale_tag(&locale.dev_locale) {
        errors.push(ValidationError::new(
            "locale.dev_locale",
            format!("invalid locale tag {:?}", locale.dev_locale),
        ));
    }

    if locale.locales.is_empty() {
        errors.push(ValidationError::new("locale.locales", "must not be empty"));
    }

    let mut seen = HashSet::new();
    for tag in &locale.locales {
        if !is_valid_locale_tag(tag) {
            errors.push(ValidationError::new(
                "locale.locales",
                format!("invalid locale tag {:?}", tag),
            ));
        } else if !seen.insert(tag.to_ascii_lowercase()) {
            errors.push(ValidationError::new(
                "locale.locales",
                format!("duplicate locale {:?}", tag),
            ));
        }
    }

    if !locale.locales.iter().any(|l| l.eq_ignore_ascii_case(&locale.default_locale)) {
        errors.push(ValidationError::new(
            "locale.default_locale",
            format!("{:?} is not listed in locale.locales", locale.default_locale),
        ));
    }

    if !is_valid_cookie_name(&locale.cookie_name) {
        errors.push(ValidationError::new(
            "locale.cookie_name",
            format!("invalid cookie name {:?}", locale.cookie_name),
        ));
    }

    for prefix in &config.routing.excluded_prefixes {
        if !prefix.starts_with('/') {
            errors.push(ValidationError::new(
                "routing.excluded_prefixes",
                format!("{:?} must start with '/'", prefix),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Locale tags become path segments, so they are restricted to `[A-Za-z0-9-]`.
pub fn is_valid_locale_tag(tag: &str) -> bool {
    !tag.is_empty()
        && !tag.starts_with('-')
        && !tag.ends_with('-')
        && tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Cookie names are restricted to `[A-Za-z0-9_-]` so they fit a `Set-Cookie` header.
pub fn is_valid_cookie_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn check_socket_addr(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            field,
            format!("{:?} is not a socket address", value),
        ));
    }
}
