use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Score at or above which an assessment is HIGH risk.
pub const HIGH_THRESHOLD: u32 = 70;
/// Score at or above which an assessment is MEDIUM risk.
pub const MEDIUM_THRESHOLD: u32 = 35;

/// Unique identifier for each heuristic rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleId {
    // Transport rules
    InsecureScheme,
    UrlShortener,
    NonStandardPort,

    // Hostname rules
    SuspiciousTld,
    RawIpHost,
    ExcessiveSubdomains,
    PunycodeDomain,
    NonAsciiHostname,

    // Content rules
    AtSymbol,
    SensitiveKeywords,
    LongQuery,
    EncodedCharacters,

    // Path rules
    ExecutableDownload,
    DocumentDownload,
}

impl RuleId {
    /// Weight added to the score when the rule fires.
    pub fn default_weight(self) -> u32 {
        match self {
            RuleId::ExecutableDownload => 30,
            RuleId::UrlShortener | RuleId::RawIpHost => 25,
            RuleId::InsecureScheme
            | RuleId::SuspiciousTld
            | RuleId::AtSymbol
            | RuleId::PunycodeDomain
            | RuleId::SensitiveKeywords => 20,
            RuleId::ExcessiveSubdomains | RuleId::NonAsciiHostname => 15,
            RuleId::LongQuery
            | RuleId::EncodedCharacters
            | RuleId::DocumentDownload
            | RuleId::NonStandardPort => 10,
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = serde_json::to_value(self)
            .ok()
            .and_then(|v| v.as_str().map(String::from))
            .unwrap_or_else(|| format!("{self:?}"));
        write!(f, "{s}")
    }
}

/// Parse the snake_case name used in serialized output and policy files.
impl FromStr for RuleId {
    type Err = serde_json::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_value(serde_json::Value::String(s.to_string()))
    }
}

/// Discrete risk level derived from the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskTier::Low => write!(f, "LOW"),
            RiskTier::Medium => write!(f, "MEDIUM"),
            RiskTier::High => write!(f, "HIGH"),
        }
    }
}

/// Score cut-offs for tier classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierThresholds {
    pub high: u32,
    pub medium: u32,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            high: HIGH_THRESHOLD,
            medium: MEDIUM_THRESHOLD,
        }
    }
}

impl TierThresholds {
    pub fn classify(&self, score: u32) -> RiskTier {
        if score >= self.high {
            RiskTier::High
        } else if score >= self.medium {
            RiskTier::Medium
        } else {
            RiskTier::Low
        }
    }
}

/// One triggered heuristic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Indicator {
    pub rule_id: RuleId,
    pub weight: u32,
    pub message: String,
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Result of scoring one URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Canonical URL string shown to the user.
    pub url: String,
    pub score: u32,
    pub tier: RiskTier,
    /// In rule evaluation order.
    pub indicators: Vec<Indicator>,
}

impl RiskAssessment {
    /// Sum indicator weights and classify the total.
    pub fn from_indicators(
        url: String,
        indicators: Vec<Indicator>,
        thresholds: TierThresholds,
    ) -> Self {
        let score = indicators
            .iter()
            .fold(0u32, |acc, i| acc.saturating_add(i.weight));
        Self {
            url,
            score,
            tier: thresholds.classify(score),
            indicators,
        }
    }

    pub fn has_indicator(&self, rule_id: RuleId) -> bool {
        self.indicators.iter().any(|i| i.rule_id == rule_id)
    }

    pub fn rule_ids(&self) -> Vec<RuleId> {
        self.indicators.iter().map(|i| i.rule_id).collect()
    }
}
