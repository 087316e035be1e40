use once_cell::sync::Lazy;
use regex::Regex;

use crate::data;
use crate::parse::ParsedUrl;
use crate::policy::Policy;

/// More labels than this reads as obfuscation (`login.bank.com.evil.example`).
const MAX_HOST_LABELS: usize = 4;

static DOTTED_QUAD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,3}(\.\d{1,3}){3}$").expect("dotted quad regex must compile"));

pub fn check_suspicious_tld(url: &ParsedUrl, policy: &Policy) -> Option<String> {
    let tld = url.host().rsplit('.').next()?;
    if data::is_suspicious_tld(tld) || policy.is_extra_suspicious_tld(tld) {
        return Some(format!("Suspicious top-level domain (.{tld})."));
    }
    None
}

pub fn check_raw_ip(url: &ParsedUrl, _policy: &Policy) -> Option<String> {
    if DOTTED_QUAD.is_match(url.host()) {
        return Some("IP address used instead of domain name.".to_string());
    }
    None
}

pub fn check_excessive_subdomains(url: &ParsedUrl, _policy: &Policy) -> Option<String> {
    if url.host().split('.').count() > MAX_HOST_LABELS {
        return Some("Excessive subdomains used (possible obfuscation).".to_string());
    }
    None
}

pub fn check_punycode_domain(url: &ParsedUrl, _policy: &Policy) -> Option<String> {
    if url.host().starts_with("xn--") {
        return Some("Punycode domain detected (possible homograph attack).".to_string());
    }
    None
}

/// Looks at the host as written: the parser has already IDNA-encoded `host()`.
pub fn check_non_ascii_hostname(url: &ParsedUrl, _policy: &Policy) -> Option<String> {
    if url.raw_host().bytes().any(|b| b > 0x7F) {
        return Some("Non-ASCII characters in domain (possible homoglyph attack).".to_string());
    }
    None
}
