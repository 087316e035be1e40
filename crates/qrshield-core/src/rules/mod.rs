//! Heuristic rules. Each check is a pure function of the URL (and the active
//! policy's list extensions) returning the indicator message when it fires.

pub mod content;
pub mod hostname;
pub mod path;
pub mod transport;

use crate::parse::ParsedUrl;
use crate::policy::Policy;
use crate::verdict::RuleId;

/// Signature shared by every rule.
pub type RuleCheck = fn(&ParsedUrl, &Policy) -> Option<String>;

/// A rule paired with its identifier.
pub struct Rule {
    pub id: RuleId,
    pub check: RuleCheck,
}

/// All rules, in evaluation order. Indicators appear in this order.
pub static RULES: &[Rule] = &[
    Rule {
        id: RuleId::InsecureScheme,
        check: transport::check_insecure_scheme,
    },
    Rule {
        id: RuleId::SuspiciousTld,
        check: hostname::check_suspicious_tld,
    },
    Rule {
        id: RuleId::UrlShortener,
        check: transport::check_url_shortener,
    },
    Rule {
        id: RuleId::RawIpHost,
        check: hostname::check_raw_ip,
    },
    Rule {
        id: RuleId::ExcessiveSubdomains,
        check: hostname::check_excessive_subdomains,
    },
    Rule {
        id: RuleId::AtSymbol,
        check: content::check_at_symbol,
    },
    Rule {
        id: RuleId::PunycodeDomain,
        check: hostname::check_punycode_domain,
    },
    Rule {
        id: RuleId::SensitiveKeywords,
        check: content::check_sensitive_keywords,
    },
    Rule {
        id: RuleId::LongQuery,
        check: content::check_long_query,
    },
    Rule {
        id: RuleId::EncodedCharacters,
        check: content::check_encoded_characters,
    },
    Rule {
        id: RuleId::ExecutableDownload,
        check: path::check_executable_download,
    },
    Rule {
        id: RuleId::DocumentDownload,
        check: path::check_document_download,
    },
    Rule {
        id: RuleId::NonStandardPort,
        check: transport::check_non_standard_port,
    },
    Rule {
        id: RuleId::NonAsciiHostname,
        check: hostname::check_non_ascii_hostname,
    },
];
