use once_cell::sync::Lazy;

use crate::normalize;
use crate::parse::ParsedUrl;
use crate::policy::Policy;
use crate::rules::RULES;
use crate::verdict::{Indicator, RiskAssessment};

static DEFAULT_POLICY: Lazy<Policy> = Lazy::new(Policy::default);

/// Score a URL with the built-in rule set.
pub fn assess(url: &ParsedUrl) -> RiskAssessment {
    assess_with(url, &DEFAULT_POLICY)
}

/// Run every enabled rule in order and accumulate the result.
pub fn assess_with(url: &ParsedUrl, policy: &Policy) -> RiskAssessment {
    let mut indicators = Vec::new();

    for rule in RULES {
        if policy.is_disabled(rule.id) {
            continue;
        }
        if let Some(message) = (rule.check)(url, policy) {
            indicators.push(Indicator {
                rule_id: rule.id,
                weight: policy.weight_for(rule.id),
                message,
            });
        }
    }

    let assessment =
        RiskAssessment::from_indicators(url.href().to_string(), indicators, policy.thresholds());

    tracing::debug!(
        url = %assessment.url,
        score = assessment.score,
        tier = %assessment.tier,
        indicators = assessment.indicators.len(),
        "assessed url"
    );

    assessment
}

/// Classify, normalize and score decoded text. `None` when the text is not a URL.
pub fn assess_text(text: &str) -> Option<RiskAssessment> {
    assess_text_with(text, &DEFAULT_POLICY)
}

pub fn assess_text_with(text: &str, policy: &Policy) -> Option<RiskAssessment> {
    if !normalize::classify(text) {
        return None;
    }
    match normalize::normalize(text) {
        Ok(url) => Some(assess_with(&url, policy)),
        Err(e) => {
            tracing::warn!("{e}");
            None
        }
    }
}

/// Score many payloads independently; output order matches input order.
pub fn assess_batch(payloads: &[&str], policy: &Policy) -> Vec<Option<RiskAssessment>> {
    payloads
        .iter()
        .map(|p| assess_text_with(p, policy))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;
    use crate::verdict::{RiskTier, RuleId};

    #[test]
    fn test_login_keyword_only() {
        let a = assess(&normalize("https://example.com/login?session=123").unwrap());
        assert_eq!(a.score, 20);
        assert_eq!(a.tier, RiskTier::Low);
        assert_eq!(a.rule_ids(), vec![RuleId::SensitiveKeywords]);
    }

    #[test]
    fn test_http_xyz_verify() {
        let a = assess(&normalize("http://example.xyz/verify-account").unwrap());
        assert_eq!(a.score, 60);
        assert_eq!(a.tier, RiskTier::Medium);
        assert_eq!(
            a.rule_ids(),
            vec![
                RuleId::InsecureScheme,
                RuleId::SuspiciousTld,
                RuleId::SensitiveKeywords
            ]
        );
    }

    #[test]
    fn test_ip_with_encoded_query() {
        let a = assess(
            &normalize("http://192.168.1.50/login/update?session=999&token=%AF%22%9C").unwrap(),
        );
        assert_eq!(a.score, 75);
        assert_eq!(a.tier, RiskTier::High);
        assert_eq!(
            a.rule_ids(),
            vec![
                RuleId::InsecureScheme,
                RuleId::RawIpHost,
                RuleId::SensitiveKeywords,
                RuleId::EncodedCharacters
            ]
        );
    }

    #[test]
    fn test_shortener_with_keywords() {
        let a = assess(&normalize("http://bit.ly/secure-update-payment?invoice=44882").unwrap());
        assert_eq!(a.score, 65);
        assert_eq!(a.tier, RiskTier::Medium);
        assert_eq!(
            a.rule_ids(),
            vec![
                RuleId::InsecureScheme,
                RuleId::UrlShortener,
                RuleId::SensitiveKeywords
            ]
        );
    }

    #[test]
    fn test_clean_url_scores_zero() {
        let a = assess(&normalize("https://example.com/").unwrap());
        assert_eq!(a.score, 0);
        assert_eq!(a.tier, RiskTier::Low);
        assert!(a.indicators.is_empty());
        assert_eq!(a.url, "https://example.com/");
    }

    #[test]
    fn test_deterministic() {
        let u = normalize("http://a.b.c.d.example.tk:8080/reset/setup.exe?x=%41").unwrap();
        let first = assess(&u);
        let second = assess(&u);
        assert_eq!(first, second);
    }

    #[test]
    fn test_indicators_follow_rule_order() {
        let a = assess(&normalize("http://user@a.b.c.d.example.tk:8080/setup.exe").unwrap());
        let order: Vec<usize> = a
            .indicators
            .iter()
            .map(|i| RULES.iter().position(|r| r.id == i.rule_id).unwrap())
            .collect();
        let mut sorted = order.clone();
        sorted.sort_unstable();
        assert_eq!(order, sorted);
        assert!(a.has_indicator(RuleId::NonStandardPort));
        assert!(a.has_indicator(RuleId::ExcessiveSubdomains));
    }

    #[test]
    fn test_disabled_rule_skipped() {
        let policy = Policy {
            disabled_rules: vec!["insecure_scheme".to_string()],
            ..Policy::default()
        };
        let a = assess_with(&normalize("http://example.com/").unwrap(), &policy);
        assert_eq!(a.score, 0);
    }

    #[test]
    fn test_weight_override_and_thresholds() {
        let mut policy = Policy {
            high_threshold: 50,
            medium_threshold: 10,
            ..Policy::default()
        };
        policy
            .weight_overrides
            .insert("raw_ip_host".to_string(), 40);
        let a = assess_with(&normalize("https://10.0.0.1/").unwrap(), &policy);
        assert_eq!(a.score, 40);
        assert_eq!(a.indicators[0].weight, 40);
        assert_eq!(a.tier, RiskTier::Medium);
    }

    #[test]
    fn test_assess_text_skips_non_urls() {
        assert!(assess_text("Jane Doe, 555-0100").is_none());
        assert!(assess_text("mailto:jane@example.com").is_none());
        assert_eq!(assess_text("example.com").map(|a| a.score), Some(0));
    }

    #[test]
    fn test_batch_is_concurrency_safe() {
        let payloads = ["http://bit.ly/x", "https://example.com/", "not a url"];
        let expected = assess_batch(&payloads, &Policy::default());
        let results: Vec<_> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| s.spawn(|| assess_batch(&payloads, &Policy::default())))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        for r in results {
            assert_eq!(r, expected);
        }
        assert!(expected[2].is_none());
    }
}
