// Embedded lookup tables from build.rs: suspicious TLDs, shorteners,
// keyword groups, file extensions.

use once_cell::sync::Lazy;
use std::collections::HashSet;

include!(concat!(env!("OUT_DIR"), "/suspicious_tlds_gen.rs"));
include!(concat!(env!("OUT_DIR"), "/shorteners_gen.rs"));
include!(concat!(env!("OUT_DIR"), "/keyword_groups_gen.rs"));
include!(concat!(env!("OUT_DIR"), "/file_extensions_gen.rs"));

static SUSPICIOUS_TLD_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| SUSPICIOUS_TLDS.iter().copied().collect());

static SHORTENER_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| SHORTENERS.iter().copied().collect());

/// Check if a TLD (without the leading dot) is on the built-in suspicious list.
pub fn is_suspicious_tld(tld: &str) -> bool {
    SUSPICIOUS_TLD_SET.contains(tld.to_lowercase().as_str())
}

/// Check if a hostname is exactly one of the built-in shorteners.
pub fn is_shortener(host: &str) -> bool {
    SHORTENER_SET.contains(host.to_lowercase().as_str())
}

/// Keyword table in evaluation order.
pub fn keyword_groups() -> &'static [(&'static str, &'static [&'static str])] {
    KEYWORD_GROUPS
}

/// Whether `group` names one of the built-in keyword groups.
pub fn is_builtin_keyword_group(group: &str) -> bool {
    KEYWORD_GROUPS
        .iter()
        .any(|(g, _)| g.eq_ignore_ascii_case(group))
}

/// First executable/archive extension the (lowercased) path ends with.
pub fn executable_extension(path_lower: &str) -> Option<&'static str> {
    EXECUTABLE_EXTENSIONS
        .iter()
        .copied()
        .find(|ext| path_lower.ends_with(ext))
}

/// First document extension the (lowercased) path ends with.
pub fn document_extension(path_lower: &str) -> Option<&'static str> {
    DOCUMENT_EXTENSIONS
        .iter()
        .copied()
        .find(|ext| path_lower.ends_with(ext))
}
