//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path)
//!     → matcher.rs (evaluate exclusion conditions)
//!     → Return: excluded (pass through) or eligible for locale handling
//!
//! Exclusion Compilation (at startup):
//!     RoutingConfig
//!     → Compile prefix and dot matchers
//!     → Freeze as immutable RouteExclusions
//! ```
//!
//! # Design Decisions
//! - Exclusions compiled at startup, immutable at runtime
//! - No regex in hot path (prefix matching only)
//! - Deterministic: same path always yields the same answer

pub mod matcher;

pub use matcher::{AnyMatcher, DotPathMatcher, Matcher, PathPrefixMatcher, RouteExclusions};
