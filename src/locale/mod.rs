//! Locale dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path, cookie, Accept-Language)
//!     → dispatcher.rs (exclusions first, then mode branch)
//!         development → Rewrite /{dev_locale}{path}
//!         production  → negotiator.rs (path prefix, cookie, accept_language.rs)
//!     → Decision (ResponseAction + optional locale Set-Cookie)
//! ```
//!
//! # Design Decisions
//! - Operating mode is injected at construction, never read per request
//! - The negotiator is a trait object so deployments can swap it
//! - Dispatch is synchronous and side-effect free

pub mod accept_language;
pub mod action;
pub mod dispatcher;
pub mod mode;
pub mod negotiator;

pub use action::ResponseAction;
pub use dispatcher::{Decision, DispatchError, LocaleDispatcher};
pub use mode::{OperatingMode, GATEWAY_ENV};
pub use negotiator::{LocaleNegotiator, PrefixNegotiator};
