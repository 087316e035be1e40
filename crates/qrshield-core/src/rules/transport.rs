use crate::data;
use crate::parse::ParsedUrl;
use crate::policy::Policy;

/// Ports that legitimate consumer-facing links almost never use.
const ODD_PORTS: [u16; 4] = [8080, 3000, 4443, 1337];

/// Anything other than `https` travels unencrypted or is not a web link at all.
pub fn check_insecure_scheme(url: &ParsedUrl, _policy: &Policy) -> Option<String> {
    if url.scheme() != "https" {
        return Some("Uses HTTP instead of HTTPS.".to_string());
    }
    None
}

pub fn check_url_shortener(url: &ParsedUrl, policy: &Policy) -> Option<String> {
    let host = url.host();
    if data::is_shortener(host) || policy.is_extra_shortener(host) {
        return Some("URL shortener detected (destination may be hidden).".to_string());
    }
    None
}

pub fn check_non_standard_port(url: &ParsedUrl, _policy: &Policy) -> Option<String> {
    let port = url.port()?;
    if ODD_PORTS.contains(&port) {
        return Some(format!("Non-standard port used (:{port})."));
    }
    None
}
