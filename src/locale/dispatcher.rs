//! Request locale dispatch.
//!
//! # Responsibilities
//! - Short-circuit excluded paths (internal, API, static assets)
//! - Development: rewrite every other path under a fixed locale
//! - Production: hand the request to the locale negotiator
//! - Carry the negotiator's locale cookie alongside the action
//!
//! # Design Decisions
//! - Exclusions are checked first, in every mode
//! - Pure function of the request: no logging, no metrics, no state
//! - A production dispatcher cannot exist without a negotiator

use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;

use crate::config::GatewayConfig;
use crate::locale::action::ResponseAction;
use crate::locale::mode::OperatingMode;
use crate::locale::negotiator::{LocaleNegotiator, PrefixNegotiator};
use crate::routing::RouteExclusions;

/// Errors raised while assembling a dispatcher at startup.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("production mode requires a locale negotiator")]
    MissingNegotiator,
}

#[derive(Debug)]
enum Strategy {
    /// Prepend a fixed `/{locale}` segment.
    SingleLocale { prefix: String },
    Negotiate(Arc<dyn LocaleNegotiator>),
}

/// Outcome of dispatch: the action plus an optional `Set-Cookie` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub action: ResponseAction,
    pub set_cookie: Option<String>,
}

impl Decision {
    fn bare(action: ResponseAction) -> Self {
        Self {
            action,
            set_cookie: None,
        }
    }
}

/// Chooses exactly one [`ResponseAction`] per request.
#[derive(Debug)]
pub struct LocaleDispatcher {
    exclusions: RouteExclusions,
    strategy: Strategy,
}

impl LocaleDispatcher {
    /// Single-locale dispatcher: non-excluded paths are rewritten to `/{locale}{path}`.
    pub fn development(exclusions: RouteExclusions, locale: &str) -> Self {
        Self {
            exclusions,
            strategy: Strategy::SingleLocale {
                prefix: format!("/{}", locale),
            },
        }
    }

    /// Negotiating dispatcher: non-excluded requests go to `negotiator`.
    pub fn production(exclusions: RouteExclusions, negotiator: Arc<dyn LocaleNegotiator>) -> Self {
        Self {
            exclusions,
            strategy: Strategy::Negotiate(negotiator),
        }
    }

    /// Build a dispatcher for `mode`, failing if production has no negotiator.
    pub fn new(
        mode: OperatingMode,
        exclusions: RouteExclusions,
        dev_locale: &str,
        negotiator: Option<Arc<dyn LocaleNegotiator>>,
    ) -> Result<Self, DispatchError> {
        match mode {
            OperatingMode::Development => Ok(Self::development(exclusions, dev_locale)),
            OperatingMode::Production => negotiator
                .map(|n| Self::production(exclusions, n))
                .ok_or(DispatchError::MissingNegotiator),
        }
    }

    /// Build the dispatcher described by a validated configuration.
    ///
    /// In production mode the negotiator is a [`PrefixNegotiator`] over
    /// `config.locale`.
    pub fn from_config(config: &GatewayConfig, mode: OperatingMode) -> Result<Self, DispatchError> {
        let negotiator: Option<Arc<dyn LocaleNegotiator>> = match mode {
            OperatingMode::Production => Some(Arc::new(PrefixNegotiator::from_config(&config.locale))),
            OperatingMode::Development => None,
        };

        Self::new(
            mode,
            RouteExclusions::from_config(&config.routing),
            &config.locale.dev_locale,
            negotiator,
        )
    }

    pub fn mode(&self) -> OperatingMode {
        match self.strategy {
            Strategy::SingleLocale { .. } => OperatingMode::Development,
            Strategy::Negotiate(_) => OperatingMode::Production,
        }
    }

    pub fn exclusions(&self) -> &RouteExclusions {
        &self.exclusions
    }

    /// Decide what happens to `req`.
    pub fn dispatch(&self, req: &Request<Body>) -> ResponseAction {
        self.decide(req).action
    }

    /// Like [`dispatch`](Self::dispatch), plus the locale cookie to send back.
    ///
    /// Excluded paths and development mode never set a cookie.
    pub fn decide(&self, req: &Request<Body>) -> Decision {
        let path = req.uri().path();

        if self.exclusions.is_excluded(path) {
            return Decision::bare(ResponseAction::PassThrough);
        }

        match &self.strategy {
            Strategy::SingleLocale { prefix } => {
                Decision::bare(ResponseAction::Rewrite(format!("{}{}", prefix, path)))
            }
            Strategy::Negotiate(negotiator) => Decision {
                action: negotiator.negotiate(req),
                set_cookie: negotiator.locale_cookie(req),
            },
        }
    }
}
