use once_cell::sync::Lazy;
use regex::Regex;

use crate::data;
use crate::parse::ParsedUrl;
use crate::policy::Policy;

/// Longest query (counted with its leading `?`) that is not flagged.
const MAX_QUERY_LEN: usize = 80;

static PERCENT_TRIPLET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)%[0-9a-f]{2}").expect("percent triplet regex must compile"));

/// Userinfo trick: `https://paypal.com@evil.example/` lands on evil.example.
pub fn check_at_symbol(url: &ParsedUrl, _policy: &Policy) -> Option<String> {
    if url.href_lower().contains('@') {
        return Some("@ symbol present in URL (can hide real destination).".to_string());
    }
    None
}

/// One indicator for all keyword hits, listed in table order.
pub fn check_sensitive_keywords(url: &ParsedUrl, policy: &Policy) -> Option<String> {
    let full = url.href_lower();
    let mut hits: Vec<String> = Vec::new();

    let mut record = |term: &str| {
        let term = term.to_lowercase();
        if !term.is_empty() && full.contains(&term) && !hits.contains(&term) {
            hits.push(term);
        }
    };

    for (group, terms) in data::keyword_groups() {
        for term in terms.iter() {
            record(*term);
        }
        for term in policy.extra_terms_for(group) {
            record(term.as_str());
        }
    }
    for group in policy.extra_keyword_groups() {
        for term in &group.terms {
            record(term.as_str());
        }
    }

    if hits.is_empty() {
        return None;
    }
    Some(format!(
        "Contains sensitive or urgent keywords: {}.",
        hits.join(", ")
    ))
}

pub fn check_long_query(url: &ParsedUrl, _policy: &Policy) -> Option<String> {
    // Measured the way a browser exposes it: `?` included, empty query ignored.
    let query_len = match url.query() {
        Some(q) if !q.is_empty() => q.len() + 1,
        _ => 0,
    };
    if query_len > MAX_QUERY_LEN {
        return Some("Very long query string (possible tracking or obfuscation).".to_string());
    }
    None
}

pub fn check_encoded_characters(url: &ParsedUrl, _policy: &Policy) -> Option<String> {
    if PERCENT_TRIPLET.is_match(url.href_lower()) {
        return Some("Encoded characters present in URL.".to_string());
    }
    None
}
