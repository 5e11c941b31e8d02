//! `Accept-Language` header parsing.

use std::cmp::Ordering;

/// One weighted entry of an `Accept-Language` header.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LanguageRange<'a> {
    pub tag: &'a str,
    pub quality: f32,
}

/// Parse a header value into ranges ordered by descending quality.
///
/// Entries with `q=0`, malformed weights, empty tags and the `*` wildcard are
/// dropped. Entries of equal quality keep their header order.
pub fn parse(header: &str) -> Vec<LanguageRange<'_>> {
    let mut ranges: Vec<LanguageRange<'_>> = header
        .split(',')
        .filter_map(|entry| {
            let mut parts = entry.split(';');
            let tag = parts.next()?.trim();
            if tag.is_empty() || tag == "*" {
                return None;
            }

            let quality = parts
                .filter_map(|param| {
                    let (name, value) = param.trim().split_once('=')?;
                    name.trim().eq_ignore_ascii_case("q").then_some(value.trim())
                })
                .next()
                .map(parse_quality)
                .unwrap_or(1.0);

            (quality > 0.0).then_some(LanguageRange { tag, quality })
        })
        .collect();

    // `sort_by` is stable, so ties keep header order.
    ranges.sort_by(|a, b| b.quality.partial_cmp(&a.quality).unwrap_or(Ordering::Equal));
    ranges
}

fn parse_quality(value: &str) -> f32 {
    match value.parse::<f32>() {
        Ok(q) if (0.0..=1.0).contains(&q) => q,
        _ => 0.0,
    }
}

fn primary_subtag(tag: &str) -> &str {
    tag.split(['-', '_']).next().unwrap_or(tag)
}

/// Pick the supported locale that best satisfies `header`.
///
/// For each range in preference order an exact (case-insensitive) match wins,
/// then a locale sharing the primary subtag (`fr-CA` selects `fr`).
pub fn best_match<'a>(header: &str, supported: &'a [String]) -> Option<&'a str> {
    for range in parse(header) {
        if let Some(exact) = supported.iter().find(|l| l.eq_ignore_ascii_case(range.tag)) {
            return Some(exact.as_str());
        }

        let primary = primary_subtag(range.tag);
        if let Some(partial) = supported
            .iter()
            .find(|l| primary_subtag(l).eq_ignore_ascii_case(primary))
        {
            return Some(partial.as_str());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locales(tags: &[&str]) -> Vec<String> {
        tags.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_parse_orders_by_quality() {
        let ranges = parse("da, en-GB;q=0.8, en;q=0.7, fr;q=0.9");
        let tags: Vec<_> = ranges.iter().map(|r| r.tag).collect();

        assert_eq!(tags, vec!["da", "fr", "en-GB", "en"]);
        assert_eq!(ranges[0].quality, 1.0);
    }

    #[test]
    fn test_parse_drops_zero_wildcard_and_garbage() {
        let ranges = parse("*, de;q=0, fr;q=abc, , es ; Q=0.5, it;q=1.5");
        let tags: Vec<_> = ranges.iter().map(|r| r.tag).collect();

        assert_eq!(tags, vec!["es"]);
        assert_eq!(ranges[0].quality, 0.5);
    }

    #[test]
    fn test_best_match() {
        let supported = locales(&["en", "fr", "pt-BR"]);

        assert_eq!(best_match("fr-CA,fr;q=0.9,en;q=0.8", &supported), Some("fr"));
        assert_eq!(best_match("de, en;q=0.5", &supported), Some("en"));
        assert_eq!(best_match("PT-br", &supported), Some("pt-BR"));
        assert_eq!(best_match("pt-PT", &supported), Some("pt-BR"));
        assert_eq!(best_match("de, ja", &supported), None);
        assert_eq!(best_match("", &supported), None);
    }

    #[test]
    fn test_best_match_prefers_quality_over_position() {
        let supported = locales(&["en", "fr"]);
        assert_eq!(best_match("en;q=0.2, fr;q=0.8", &supported), Some("fr"));
    }
}
