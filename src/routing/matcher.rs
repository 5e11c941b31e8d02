//! Path matching for locale exclusions.
//!
//! # Responsibilities
//! - Match reserved path prefixes (case-sensitive)
//! - Match paths that look like static assets (contain a dot)
//! - Combine conditions with OR semantics
//!
//! # Design Decisions
//! - Matchers only see the request path, never headers
//! - No regex to guarantee O(n) matching
//! - A dot anywhere in the path counts, not only in the last segment

use std::fmt;

use crate::config::RoutingConfig;

/// Trait for matching request paths against conditions.
pub trait Matcher: Send + Sync + fmt::Debug {
    /// Returns true if the path matches this condition.
    fn matches(&self, path: &str) -> bool;
}

/// Matches the request path prefix.
#[derive(Debug, Clone)]
pub struct PathPrefixMatcher {
    prefix: String,
}

impl PathPrefixMatcher {
    /// Create a new path prefix matcher.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

}

impl Matcher for PathPrefixMatcher {
    fn matches(&self, path: &str) -> bool {
        path.starts_with(&self.prefix)
    }
}

/// Matches any path containing a literal `.`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DotPathMatcher;

impl Matcher for DotPathMatcher {
    fn matches(&self, path: &str) -> bool {
        path.contains('.')
    }
}

/// Combines multiple matchers with OR semantics.
#[derive(Debug)]
pub struct AnyMatcher {
    matchers: Vec<Box<dyn Matcher>>,
}

impl AnyMatcher {
    pub fn new(matchers: Vec<Box<dyn Matcher>>) -> Self {
        Self { matchers }
    }
}

impl Matcher for AnyMatcher {
    fn matches(&self, path: &str) -> bool {
        self.matchers.iter().any(|m| m.matches(path))
    }
}

/// Paths that bypass locale handling entirely.
///
/// Compiled once at startup from [`RoutingConfig`] and immutable afterwards.
/// The raw prefixes are kept only to render [`matcher_expression`](Self::matcher_expression).
#[derive(Debug)]
pub struct RouteExclusions {
    matcher: AnyMatcher,
    prefixes: Vec<String>,
    exclude_dotted_paths: bool,
}

impl RouteExclusions {
    pub fn new<I, S>(prefixes: I, exclude_dotted_paths: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let prefixes: Vec<String> = prefixes.into_iter().map(Into::into).collect();

        let mut matchers: Vec<Box<dyn Matcher>> = prefixes
            .iter()
            .map(|p| Box::new(PathPrefixMatcher::new(p.as_str())) as Box<dyn Matcher>)
            .collect();
        if exclude_dotted_paths {
            matchers.push(Box::new(DotPathMatcher));
        }

        Self {
            matcher: AnyMatcher::new(matchers),
            prefixes,
            exclude_dotted_paths,
        }
    }

    pub fn from_config(config: &RoutingConfig) -> Self {
        Self::new(config.excluded_prefixes.iter().cloned(), config.exclude_dotted_paths)
    }

    /// Returns true if `path` must skip locale handling.
    pub fn is_excluded(&self, path: &str) -> bool {
        self.matcher.matches(path)
    }

    /// Render the inclusion matcher as a route-table expression.
    ///
    /// The result selects every path *not* excluded here, in the
    /// negative-lookahead form web frameworks accept, e.g.
    /// `/((?!api|_next|.*\..*).*)`.
    pub fn matcher_expression(&self) -> String {
        let mut alternatives: Vec<&str> = self
            .prefixes
            .iter()
            .map(|p| p.trim_start_matches('/'))
            .filter(|p| !p.is_empty())
            .collect();
        if self.exclude_dotted_paths {
            alternatives.push(r".*\..*");
        }

        if alternatives.is_empty() {
            "/(.*)".to_string()
        } else {
            format!("/((?!{}).*)", alternatives.join("|"))
        }
    }
}

impl Default for RouteExclusions {
    fn default() -> Self {
        Self::from_config(&RoutingConfig::default())
    }
}
