use url::Url;

/// A URL accepted by the normalizer, with the views the rules need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUrl {
    parsed: Url,
    host: String,
    raw_host: String,
    href_lower: String,
}

impl ParsedUrl {
    /// Wrap a parsed URL. `source` is the exact string that was handed to the
    /// parser, used to recover the host as written (before IDNA).
    pub(crate) fn new(parsed: Url, source: &str) -> Option<Self> {
        let host = parsed.host_str()?.to_lowercase();
        if host.is_empty() {
            return None;
        }
        let raw_host = extract_raw_host(source)
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| host.clone());
        let href_lower = parsed.as_str().to_lowercase();
        Some(Self {
            parsed,
            host,
            raw_host,
            href_lower,
        })
    }

    /// Scheme without the trailing `:`.
    pub fn scheme(&self) -> &str {
        self.parsed.scheme()
    }

    /// Lowercased hostname, IDNA-encoded as the parser produced it.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Hostname as written in the input (not IDNA-encoded).
    pub fn raw_host(&self) -> &str {
        &self.raw_host
    }

    /// Explicit port; `None` when absent or equal to the scheme default.
    pub fn port(&self) -> Option<u16> {
        self.parsed.port()
    }

    pub fn path(&self) -> &str {
        self.parsed.path()
    }

    /// Query string without the leading `?`.
    pub fn query(&self) -> Option<&str> {
        self.parsed.query()
    }

    pub fn fragment(&self) -> Option<&str> {
        self.parsed.fragment()
    }

    /// Full serialization as produced by the parser.
    pub fn href(&self) -> &str {
        self.parsed.as_str()
    }

    /// Lowercased full serialization.
    pub fn href_lower(&self) -> &str {
        &self.href_lower
    }

}

/// Extract raw authority (host portion) from a URL string before IDNA normalization.
/// Handles IPv6, userinfo, port, and percent-encoded separators. Special schemes
/// may be written with any number of slashes, including none (`https:host`).
pub fn extract_raw_host(url_str: &str) -> Option<String> {
    let (scheme, rest) = url_str.split_once(':')?;
    let scheme_ok = scheme.starts_with(|c: char| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    if !scheme_ok {
        return None;
    }
    let after_scheme = rest.trim_start_matches(['/', '\\']);

    // Authority ends at the first `/`, `?`, `#` (or `\`, which special schemes treat as `/`)
    let authority_end = after_scheme
        .find(['/', '?', '#', '\\'])
        .unwrap_or(after_scheme.len());
    let authority = &after_scheme[..authority_end];

    if authority.is_empty() {
        return Some(String::new());
    }

    let host_part = split_userinfo(authority);
    let host = extract_host_from_hostport(host_part);

    Some(host.to_lowercase())
}

/// Split userinfo from authority, returning the host+port part.
/// Finds the last unencoded `@` (percent-encoded `%40` is NOT a separator).
fn split_userinfo(authority: &str) -> &str {
    let bytes = authority.as_bytes();
    let mut last_at = None;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            i += 3;
            continue;
        }
        if bytes[i] == b'@' {
            last_at = Some(i);
        }
        i += 1;
    }
    match last_at {
        Some(idx) => &authority[idx + 1..],
        None => authority,
    }
}

/// Extract host from a host:port string, handling IPv6 brackets.
fn extract_host_from_hostport(hostport: &str) -> &str {
    if hostport.starts_with('[') {
        if let Some(bracket_end) = hostport.find(']') {
            return &hostport[..bracket_end + 1];
        }
        return hostport;
    }

    match hostport.rfind(':') {
        Some(idx) => {
            let after = &hostport[idx + 1..];
            if after.chars().all(|c| c.is_ascii_digit()) {
                &hostport[..idx]
            } else {
                hostport
            }
        }
        None => hostport,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(s: &str) -> ParsedUrl {
        ParsedUrl::new(Url::parse(s).unwrap(), s).unwrap()
    }

    #[test]
    fn test_components() {
        let u = parsed("https://Example.COM:8080/Path/File.PDF?q=1#frag");
        assert_eq!(u.scheme(), "https");
        assert_eq!(u.host(), "example.com");
        assert_eq!(u.port(), Some(8080));
        assert_eq!(u.path(), "/Path/File.PDF");
        assert_eq!(u.query(), Some("q=1"));
        assert_eq!(u.fragment(), Some("frag"));
        assert_eq!(u.href_lower(), "https://example.com:8080/path/file.pdf?q=1#frag");
    }

    #[test]
    fn test_default_port_is_absent() {
        let u = parsed("https://example.com:443/");
        assert_eq!(u.port(), None);
    }

    #[test]
    fn test_idna_host_keeps_raw_form() {
        let u = parsed("https://b\u{fc}cher.de/");
        assert_eq!(u.host(), "xn--bcher-kva.de");
        assert_eq!(u.raw_host(), "b\u{fc}cher.de");
    }

    #[test]
    fn test_hostless_url_rejected() {
        let url = Url::parse("mailto:someone@example.com").unwrap();
        assert!(ParsedUrl::new(url, "mailto:someone@example.com").is_none());
    }

    #[test]
    fn test_raw_host_ipv6() {
        let host = extract_raw_host("http://[::1]:8080/path");
        assert_eq!(host, Some("[::1]".to_string()));
    }

    #[test]
    fn test_raw_host_userinfo() {
        let host = extract_raw_host("http://user@example.com/path");
        assert_eq!(host, Some("example.com".to_string()));
    }

    #[test]
    fn test_raw_host_encoded_at() {
        let host = extract_raw_host("http://user%40name@host.com/path");
        assert_eq!(host, Some("host.com".to_string()));
    }

    #[test]
    fn test_raw_host_with_port() {
        let host = extract_raw_host("http://example.com:8080/path");
        assert_eq!(host, Some("example.com".to_string()));
    }

    #[test]
    fn test_raw_host_without_scheme_separator() {
        assert_eq!(extract_raw_host("example.com/path"), None);
    }

    #[test]
    fn test_raw_host_slashless_special_scheme() {
        assert_eq!(
            extract_raw_host("https:b\u{fc}cher.de/konto"),
            Some("b\u{fc}cher.de".to_string())
        );
        assert_eq!(
            extract_raw_host("http:\\\\example.com\\a"),
            Some("example.com".to_string())
        );
        let u = parsed("https:b\u{fc}cher.de/");
        assert_eq!(u.host(), "xn--bcher-kva.de");
        assert_eq!(u.raw_host(), "b\u{fc}cher.de");
    }
}
