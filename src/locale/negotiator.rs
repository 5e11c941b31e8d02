//! Locale negotiation for production traffic.
//!
//! # Responsibilities
//! - Detect a locale already present in the path
//! - Resolve a locale for unprefixed paths (cookie, `Accept-Language`, default)
//! - Map the result onto a redirect or rewrite per the prefix strategy
//! - Remember the chosen locale in a cookie
//!
//! # Design Decisions
//! - Negotiators are stateless and shared behind `Arc`
//! - Locale matching is case-insensitive; emitted paths use the configured spelling
//! - Emitted paths never start with `//` or `/\`, so redirects stay on this host

use std::borrow::Cow;
use std::fmt;

use axum::body::Body;
use axum::http::{header, Request};

use crate::config::{LocaleConfig, PrefixStrategy};
use crate::locale::accept_language;
use crate::locale::action::ResponseAction;

/// Decides the locale handling for a request that was not excluded.
pub trait LocaleNegotiator: Send + Sync + fmt::Debug {
    fn negotiate(&self, req: &Request<Body>) -> ResponseAction;

    /// `Set-Cookie` value recording the locale chosen for `req`, if one should be sent.
    fn locale_cookie(&self, _req: &Request<Body>) -> Option<String> {
        None
    }
}

/// Negotiator driven by a path prefix of the form `/{locale}/...`.
#[derive(Debug, Clone)]
pub struct PrefixNegotiator {
    locales: Vec<String>,
    default_locale: String,
    strategy: PrefixStrategy,
    detection: bool,
    cookie_name: String,
    cookie_max_age_secs: u64,
}

impl PrefixNegotiator {
    pub fn from_config(config: &LocaleConfig) -> Self {
        let default_locale = config
            .locales
            .iter()
            .find(|l| l.eq_ignore_ascii_case(&config.default_locale))
            .cloned()
            .unwrap_or_else(|| config.default_locale.clone());

        Self {
            locales: config.locales.clone(),
            default_locale,
            strategy: config.prefix,
            detection: config.detection,
            cookie_name: config.cookie_name.clone(),
            cookie_max_age_secs: config.cookie_max_age_secs,
        }
    }

    fn supported(&self, candidate: &str) -> Option<&str> {
        self.locales
            .iter()
            .find(|l| l.eq_ignore_ascii_case(candidate))
            .map(String::as_str)
    }

    /// Split `/{locale}{rest}` into the canonical locale, the raw segment and `rest`.
    fn path_locale<'p>(&self, path: &'p str) -> Option<(&str, &'p str, &'p str)> {
        let trimmed = path.strip_prefix('/')?;
        let (segment, rest) = match trimmed.find('/') {
            Some(idx) => trimmed.split_at(idx),
            None => (trimmed, ""),
        };
        self.supported(segment).map(|locale| (locale, segment, rest))
    }

    fn cookie_locale(&self, req: &Request<Body>) -> Option<&str> {
        req.headers()
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == self.cookie_name)
            .and_then(|(_, value)| self.supported(value.trim()))
    }

    fn header_locale(&self, req: &Request<Body>) -> Option<&str> {
        if !self.detection {
            return None;
        }
        let header = req.headers().get(header::ACCEPT_LANGUAGE)?.to_str().ok()?;
        accept_language::best_match(header, &self.locales)
    }

    /// Locale for a request whose path carries none.
    pub fn resolve(&self, req: &Request<Body>) -> &str {
        self.cookie_locale(req)
            .or_else(|| self.header_locale(req))
            .unwrap_or(&self.default_locale)
    }

    /// Locale the request ends up served in: the path locale, else the resolved one.
    fn selected(&self, req: &Request<Body>) -> &str {
        match self.path_locale(req.uri().path()) {
            Some((locale, _, _)) => locale,
            None => self.resolve(req),
        }
    }

    fn is_default(&self, locale: &str) -> bool {
        locale == self.default_locale
    }
}

/// Reduce any run of leading `/` or `\` to a single `/`.
///
/// Browsers read `//host` and `/\host` as another origin.
fn single_leading_slash(path: &str) -> Cow<'_, str> {
    let stripped = path.trim_start_matches(['/', '\\']);
    if stripped.len() == path.len() || (path.starts_with('/') && stripped.len() + 1 == path.len()) {
        Cow::Borrowed(path)
    } else {
        Cow::Owned(format!("/{}", stripped))
    }
}

fn prefixed(locale: &str, path: &str) -> String {
    let path = single_leading_slash(path);
    if path == "/" || path.is_empty() {
        format!("/{}", locale)
    } else {
        format!("/{}{}", locale, path)
    }
}

fn unprefixed(rest: &str) -> String {
    if rest.is_empty() {
        "/".to_string()
    } else {
        single_leading_slash(rest).into_owned()
    }
}

impl LocaleNegotiator for PrefixNegotiator {
    fn negotiate(&self, req: &Request<Body>) -> ResponseAction {
        let path = req.uri().path();

        if let Some((locale, segment, rest)) = self.path_locale(path) {
            return match self.strategy {
                PrefixStrategy::Never => ResponseAction::Redirect(unprefixed(rest)),
                PrefixStrategy::AsNeeded if self.is_default(locale) => {
                    ResponseAction::Redirect(unprefixed(rest))
                }
                _ if segment != locale => ResponseAction::Redirect(prefixed(locale, rest)),
                _ => ResponseAction::PassThrough,
            };
        }

        let locale = self.resolve(req);
        match self.strategy {
            PrefixStrategy::Always => ResponseAction::Redirect(prefixed(locale, path)),
            PrefixStrategy::AsNeeded if self.is_default(locale) => {
                ResponseAction::Rewrite(prefixed(locale, path))
            }
            PrefixStrategy::AsNeeded => ResponseAction::Redirect(prefixed(locale, path)),
            PrefixStrategy::Never => ResponseAction::Rewrite(prefixed(locale, path)),
        }
    }

    fn locale_cookie(&self, req: &Request<Body>) -> Option<String> {
        let locale = self.selected(req);
        if self.cookie_locale(req) == Some(locale) {
            return None;
        }
        Some(format!(
            "{}={}; Path=/; Max-Age={}; SameSite=Lax",
            self.cookie_name, locale, self.cookie_max_age_secs
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn negotiator(strategy: PrefixStrategy) -> PrefixNegotiator {
        PrefixNegotiator::from_config(&LocaleConfig {
            locales: vec!["en".into(), "fr".into(), "pt-BR".into()],
            default_locale: "en".into(),
            prefix: strategy,
            ..LocaleConfig::default()
        })
    }

    fn request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn request_with(uri: &str, name: header::HeaderName, value: &str) -> Request<Body> {
        Request::builder().uri(uri).header(name, value).body(Body::empty()).unwrap()
    }

    #[test]
    fn test_always_redirects_unprefixed() {
        let n = negotiator(PrefixStrategy::Always);

        assert_eq!(n.negotiate(&request("/settings")), ResponseAction::Redirect("/en/settings".into()));
        assert_eq!(n.negotiate(&request("/")), ResponseAction::Redirect("/en".into()));
    }

    #[test]
    fn test_always_passes_prefixed_paths() {
        let n = negotiator(PrefixStrategy::Always);

        assert_eq!(n.negotiate(&request("/fr/settings")), ResponseAction::PassThrough);
        assert_eq!(n.negotiate(&request("/pt-BR")), ResponseAction::PassThrough);
        assert_eq!(n.negotiate(&request("/en/")), ResponseAction::PassThrough);
    }

    #[test]
    fn test_prefix_case_is_canonicalized() {
        let n = negotiator(PrefixStrategy::Always);

        assert_eq!(n.negotiate(&request("/FR/settings")), ResponseAction::Redirect("/fr/settings".into()));
        assert_eq!(n.negotiate(&request("/pt-br")), ResponseAction::Redirect("/pt-BR".into()));
    }

    #[test]
    fn test_unknown_first_segment_is_not_a_locale() {
        let n = negotiator(PrefixStrategy::Always);

        assert_eq!(n.negotiate(&request("/de/settings")), ResponseAction::Redirect("/en/de/settings".into()));
        assert_eq!(n.negotiate(&request("/french")), ResponseAction::Redirect("/en/french".into()));
    }

    #[test]
    fn test_as_needed() {
        let n = negotiator(PrefixStrategy::AsNeeded);

        assert_eq!(n.negotiate(&request("/settings")), ResponseAction::Rewrite("/en/settings".into()));
        assert_eq!(n.negotiate(&request("/en/settings")), ResponseAction::Redirect("/settings".into()));
        assert_eq!(n.negotiate(&request("/en")), ResponseAction::Redirect("/".into()));
        assert_eq!(n.negotiate(&request("/fr/settings")), ResponseAction::PassThrough);

        let french = request_with("/settings", header::ACCEPT_LANGUAGE, "fr");
        assert_eq!(n.negotiate(&french), ResponseAction::Redirect("/fr/settings".into()));
    }

    #[test]
    fn test_never() {
        let n = negotiator(PrefixStrategy::Never);

        assert_eq!(n.negotiate(&request("/fr/settings")), ResponseAction::Redirect("/settings".into()));

        let french = request_with("/settings", header::ACCEPT_LANGUAGE, "fr-CA");
        assert_eq!(n.negotiate(&french), ResponseAction::Rewrite("/fr/settings".into()));
    }

    #[test]
    fn test_redirects_never_leave_the_host() {
        for strategy in [PrefixStrategy::Always, PrefixStrategy::AsNeeded, PrefixStrategy::Never] {
            let n = negotiator(strategy);
            for path in ["/en//evil.example", "/fr//evil.example/x", "/en///evil.example", "/FR//evil.example", "//evil.example"] {
                let action = n.negotiate(&request(path));
                if let ResponseAction::Redirect(location) | ResponseAction::Rewrite(location) = &action {
                    assert!(!location.starts_with("//"), "{strategy:?} {path} -> {location}");
                    assert!(!location.starts_with("/\\"), "{strategy:?} {path} -> {location}");
                }
            }
        }

        let n = negotiator(PrefixStrategy::Never);
        assert_eq!(n.negotiate(&request("/en//evil.example")), ResponseAction::Redirect("/evil.example".into()));
        assert_eq!(
            negotiator(PrefixStrategy::Always).negotiate(&request("//evil.example")),
            ResponseAction::Redirect("/en/evil.example".into())
        );
    }

    #[test]
    fn test_single_leading_slash() {
        assert_eq!(single_leading_slash("/a"), "/a");
        assert_eq!(single_leading_slash("//a//b"), "/a//b");
        assert_eq!(single_leading_slash("/\\a"), "/a");
        assert_eq!(single_leading_slash("a"), "a");
        assert_eq!(single_leading_slash(""), "");
    }

    #[test]
    fn test_cookie_beats_accept_language() {
        let n = negotiator(PrefixStrategy::Always);
        let req = Request::builder()
            .uri("/settings")
            .header(header::COOKIE, "theme=dark; NEXT_LOCALE=pt-br")
            .header(header::ACCEPT_LANGUAGE, "fr")
            .body(Body::empty())
            .unwrap();

        assert_eq!(n.negotiate(&req), ResponseAction::Redirect("/pt-BR/settings".into()));
    }

    #[test]
    fn test_unsupported_cookie_falls_back() {
        let n = negotiator(PrefixStrategy::Always);
        let req = Request::builder()
            .uri("/settings")
            .header(header::COOKIE, "NEXT_LOCALE=de")
            .header(header::ACCEPT_LANGUAGE, "fr")
            .body(Body::empty())
            .unwrap();

        assert_eq!(n.resolve(&req), "fr");
    }

    #[test]
    fn test_detection_disabled_uses_default() {
        let n = PrefixNegotiator::from_config(&LocaleConfig {
            locales: vec!["en".into(), "fr".into()],
            detection: false,
            ..LocaleConfig::default()
        });

        let french = request_with("/settings", header::ACCEPT_LANGUAGE, "fr");
        assert_eq!(n.resolve(&french), "en");
    }

    #[test]
    fn test_locale_cookie_records_path_locale() {
        let n = negotiator(PrefixStrategy::Never);

        assert_eq!(
            n.locale_cookie(&request("/fr/settings")).as_deref(),
            Some("NEXT_LOCALE=fr; Path=/; Max-Age=31536000; SameSite=Lax")
        );
    }

    #[test]
    fn test_locale_cookie_records_resolved_locale() {
        let n = negotiator(PrefixStrategy::Always);
        let french = request_with("/settings", header::ACCEPT_LANGUAGE, "fr");

        assert_eq!(
            n.locale_cookie(&french).as_deref(),
            Some("NEXT_LOCALE=fr; Path=/; Max-Age=31536000; SameSite=Lax")
        );
    }

    #[test]
    fn test_locale_cookie_skipped_when_unchanged() {
        let n = negotiator(PrefixStrategy::Never);

        let same = request_with("/fr/settings", header::COOKIE, "NEXT_LOCALE=fr");
        assert_eq!(n.locale_cookie(&same), None);

        let changed = request_with("/en/settings", header::COOKIE, "NEXT_LOCALE=fr");
        assert_eq!(
            n.locale_cookie(&changed).as_deref(),
            Some("NEXT_LOCALE=en; Path=/; Max-Age=31536000; SameSite=Lax")
        );
    }
}
