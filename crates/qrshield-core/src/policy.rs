use etcetera::BaseStrategy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::verdict::{RuleId, TierThresholds, HIGH_THRESHOLD, MEDIUM_THRESHOLD};

/// Environment variable naming an explicit policy file.
pub const POLICY_ENV: &str = "QRSHIELD_POLICY";

#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("failed to read policy at {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse policy at {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("unknown rule '{0}' in policy")]
    UnknownRule(String),
    #[error("medium_threshold ({medium}) is above high_threshold ({high})")]
    InvertedThresholds { medium: u32, high: u32 },
}

/// Extra keyword terms, either for a built-in group or a new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordGroup {
    pub group: String,
    #[serde(default)]
    pub terms: Vec<String>,
}

/// Scoring configuration loaded from YAML. Defaults reproduce the built-in rule set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Policy {
    /// Path this policy was loaded from.
    #[serde(skip)]
    pub path: Option<String>,

    /// Score at or above which the tier is HIGH.
    pub high_threshold: u32,

    /// Score at or above which the tier is MEDIUM.
    pub medium_threshold: u32,

    /// Per-rule weight replacements, keyed by rule id.
    pub weight_overrides: HashMap<String, u32>,

    /// Rules that never fire.
    pub disabled_rules: Vec<String>,

    /// Hostnames treated as shorteners in addition to the built-in list.
    pub additional_shorteners: Vec<String>,

    /// TLDs (without the dot) treated as suspicious in addition to the built-in list.
    pub additional_suspicious_tlds: Vec<String>,

    /// Keyword terms merged into the keyword table.
    pub additional_keywords: Vec<KeywordGroup>,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            path: None,
            high_threshold: HIGH_THRESHOLD,
            medium_threshold: MEDIUM_THRESHOLD,
            weight_overrides: HashMap::new(),
            disabled_rules: Vec::new(),
            additional_shorteners: Vec::new(),
            additional_suspicious_tlds: Vec::new(),
            additional_keywords: Vec::new(),
        }
    }
}

impl Policy {
    /// Discover the policy: `QRSHIELD_POLICY`, then the user config dir, then defaults.
    pub fn discover() -> Self {
        let explicit = std::env::var_os(POLICY_ENV).map(PathBuf::from);
        Self::discover_in(explicit.as_deref(), config_dir().as_deref())
    }

    /// Discovery with the environment resolved by the caller.
    /// Unreadable or invalid files log a warning and fall back to defaults.
    pub fn discover_in(explicit: Option<&Path>, config_dir: Option<&Path>) -> Self {
        let candidate = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => config_dir.and_then(find_policy_in_dir),
        };

        let Some(path) = candidate else {
            return Policy::default();
        };

        match Self::load_from_path(&path) {
            Ok(policy) => {
                tracing::debug!(path = %path.display(), "loaded policy");
                policy
            }
            Err(e) => {
                tracing::warn!("{e}; using default policy");
                Policy::default()
            }
        }
    }

    /// Read, parse and validate a policy file.
    pub fn load_from_path(path: &Path) -> Result<Self, PolicyError> {
        let content = std::fs::read_to_string(path).map_err(|source| PolicyError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let mut policy = Self::from_yaml(&content).map_err(|e| match e {
            PolicyError::Parse { source, .. } => PolicyError::Parse {
                path: path.display().to_string(),
                source,
            },
            other => other,
        })?;
        policy.path = Some(path.display().to_string());
        Ok(policy)
    }

    /// Parse and validate policy YAML.
    pub fn from_yaml(content: &str) -> Result<Self, PolicyError> {
        let policy: Policy = serde_yaml::from_str(content).map_err(|source| PolicyError::Parse {
            path: "<inline>".to_string(),
            source,
        })?;
        policy.validate()?;
        Ok(policy)
    }

    fn validate(&self) -> Result<(), PolicyError> {
        if self.medium_threshold > self.high_threshold {
            return Err(PolicyError::InvertedThresholds {
                medium: self.medium_threshold,
                high: self.high_threshold,
            });
        }
        for name in self.weight_overrides.keys().chain(self.disabled_rules.iter()) {
            if name.parse::<RuleId>().is_err() {
                return Err(PolicyError::UnknownRule(name.clone()));
            }
        }
        Ok(())
    }

    pub fn thresholds(&self) -> TierThresholds {
        TierThresholds {
            high: self.high_threshold,
            medium: self.medium_threshold,
        }
    }

    /// Weight for a rule: override if configured, built-in otherwise.
    pub fn weight_for(&self, rule_id: RuleId) -> u32 {
        self.weight_overrides
            .get(&rule_id.to_string())
            .copied()
            .unwrap_or_else(|| rule_id.default_weight())
    }

    pub fn is_disabled(&self, rule_id: RuleId) -> bool {
        let name = rule_id.to_string();
        self.disabled_rules.iter().any(|r| *r == name)
    }

    pub fn is_extra_shortener(&self, host: &str) -> bool {
        self.additional_shorteners
            .iter()
            .any(|s| s.eq_ignore_ascii_case(host))
    }

    pub fn is_extra_suspicious_tld(&self, tld: &str) -> bool {
        self.additional_suspicious_tlds
            .iter()
            .any(|t| t.trim_start_matches('.').eq_ignore_ascii_case(tld))
    }

    /// Extra terms configured for a built-in keyword group.
    pub fn extra_terms_for<'a>(&'a self, group: &'a str) -> impl Iterator<Item = &'a String> + 'a {
        self.additional_keywords
            .iter()
            .filter(move |g| g.group.eq_ignore_ascii_case(group))
            .flat_map(|g| g.terms.iter())
    }

    /// Configured groups that do not extend a built-in one, in file order.
    pub fn extra_keyword_groups(&self) -> impl Iterator<Item = &KeywordGroup> {
        self.additional_keywords
            .iter()
            .filter(|g| !crate::data::is_builtin_keyword_group(&g.group))
    }
}

/// Try both `.yaml` and `.yml` extensions in a directory.
fn find_policy_in_dir(dir: &Path) -> Option<PathBuf> {
    let yaml = dir.join("policy.yaml");
    if yaml.exists() {
        return Some(yaml);
    }
    let yml = dir.join("policy.yml");
    if yml.exists() {
        return Some(yml);
    }
    None
}

/// Get qrshield config directory.
pub fn config_dir() -> Option<PathBuf> {
    let base = etcetera::choose_base_strategy().ok()?;
    Some(base.config_dir().join("qrshield"))
}
