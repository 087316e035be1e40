// Turn decoded QR text into a ParsedUrl: parse as-is, then retry with an
// assumed `https://` when the text carries no HTTP scheme of its own.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use url::Url;

use crate::parse::ParsedUrl;

/// Raised when `normalize` is handed text that `classify` would reject.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    #[error("'{0}' is not a parseable URL")]
    Unparseable(String),
    #[error("'{0}' has no hostname")]
    MissingHost(String),
}

/// Whether `text` already starts with an `http:` or `https:` scheme token.
fn has_http_scheme(text: &str) -> bool {
    let lower = text.get(..6).unwrap_or(text).to_ascii_lowercase();
    lower.starts_with("http:") || lower.starts_with("https:")
}

/// `host:port` written without a scheme. The parser reads it as a hostless
/// URL whose scheme is the host name.
static BARE_HOST_PORT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:localhost|[a-z0-9-]+(?:\.[a-z0-9-]+)+):\d{1,5}(?:[/?#]|$)")
        .expect("host:port regex must compile")
});

/// Two-attempt parse shared by `classify` and `normalize`.
/// Returns the parsed URL and the string it was parsed from.
fn parse_candidate(text: &str) -> Option<(Url, String)> {
    match Url::parse(text) {
        Ok(url) if url.host_str().is_none() && BARE_HOST_PORT.is_match(text) => {
            with_assumed_https(text)
        }
        Ok(url) => Some((url, text.to_string())),
        Err(_) if !has_http_scheme(text) => with_assumed_https(text),
        Err(_) => None,
    }
}

fn with_assumed_https(text: &str) -> Option<(Url, String)> {
    let prefixed = format!("https://{text}");
    let url = Url::parse(&prefixed).ok()?;
    tracing::trace!(input = text, "parsed with assumed https scheme");
    Some((url, prefixed))
}

/// Decide whether decoded text is a URL worth scoring.
pub fn classify(text: &str) -> bool {
    parse_candidate(text)
        .and_then(|(url, source)| ParsedUrl::new(url, &source))
        .is_some()
}

/// Parse decoded text into its canonical form.
///
/// Only call this after `classify` returned true; anything else yields an error.
pub fn normalize(text: &str) -> Result<ParsedUrl, NormalizeError> {
    let (url, source) =
        parse_candidate(text).ok_or_else(|| NormalizeError::Unparseable(text.to_string()))?;
    ParsedUrl::new(url, &source).ok_or_else(|| NormalizeError::MissingHost(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_url() {
        assert!(classify("https://example.com/login"));
        let u = normalize("https://example.com/login").unwrap();
        assert_eq!(u.scheme(), "https");
        assert_eq!(u.host(), "example.com");
    }

    #[test]
    fn test_schemeless_gets_https() {
        assert!(classify("example.com/path"));
        let u = normalize("example.com/path").unwrap();
        assert_eq!(u.scheme(), "https");
        assert_eq!(u.href(), "https://example.com/path");
    }

    #[test]
    fn test_schemeless_ip_with_port() {
        let u = normalize("192.168.0.10:8080/admin").unwrap();
        assert_eq!(u.host(), "192.168.0.10");
        assert_eq!(u.port(), Some(8080));
    }

    #[test]
    fn test_bare_host_with_port() {
        for (input, host, port) in [
            ("evil.xyz:1337/verify", "evil.xyz", 1337),
            ("www.example.com:8080/login", "www.example.com", 8080),
            ("localhost:3000/admin", "localhost", 3000),
            ("example.com:8080", "example.com", 8080),
        ] {
            assert!(classify(input), "{input}");
            let u = normalize(input).unwrap();
            assert_eq!(u.scheme(), "https", "{input}");
            assert_eq!(u.host(), host, "{input}");
            assert_eq!(u.port(), Some(port), "{input}");
        }
    }

    #[test]
    fn test_scheme_with_digits_stays_hostless() {
        assert!(!classify("tel:12345"));
        assert!(!classify("sms:5551234"));
        assert!(!classify("geo:51.5,-0.12"));
    }

    #[test]
    fn test_http_prefixed_host_is_not_a_scheme() {
        assert!(classify("httpbin.org/get"));
        assert_eq!(normalize("httpbin.org/get").unwrap().host(), "httpbin.org");
    }

    #[test]
    fn test_plain_text_is_not_url() {
        assert!(!classify("hello world"));
        assert!(!classify(""));
        assert!(!classify("Call me on 07700 900123"));
        assert!(matches!(
            normalize("hello world"),
            Err(NormalizeError::Unparseable(_))
        ));
    }

    #[test]
    fn test_hostless_schemes_rejected() {
        assert!(!classify("mailto:someone@example.com"));
        assert!(!classify("tel:+441234567890"));
        assert!(!classify("BEGIN:VCARD\nFN:Jane Doe\nEND:VCARD"));
        assert!(!classify("WIFI:S:home;T:WPA;P:secret;;"));
        assert!(matches!(
            normalize("mailto:someone@example.com"),
            Err(NormalizeError::MissingHost(_))
        ));
    }

    #[test]
    fn test_broken_http_url_not_retried() {
        assert!(!classify("http://"));
        assert!(!classify("https:// spaced.example"));
    }

    #[test]
    fn test_normalize_agrees_with_classify() {
        let inputs = [
            "https://example.com",
            "example.com",
            "http://bit.ly/x",
            "ftp://files.example.org/a.zip",
            "hello",
            "mailto:a@b.c",
            "www.example.co.uk/a?b=c",
        ];
        for input in inputs {
            assert_eq!(classify(input), normalize(input).is_ok(), "input: {input}");
        }
    }
}
