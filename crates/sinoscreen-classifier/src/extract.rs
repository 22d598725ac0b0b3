//! Signal extraction: raw indicator hits from a record

use regex::Regex;
use sinoscreen_core::{Record, SignalHit, SignalTier};
use sinoscreen_indicators::{Indicator, IndicatorRegistry};
use std::sync::OnceLock;

/// Domain-shaped tokens: at least one dotted label, alphanumeric edges
fn domain_token_regex() -> &'static Regex {
    static DOMAIN_TOKEN: OnceLock<Regex> = OnceLock::new();
    DOMAIN_TOKEN.get_or_init(|| {
        Regex::new(r"[A-Za-z0-9][A-Za-z0-9-]*(?:\.[A-Za-z0-9-]+)+")
            .expect("domain token regex is valid")
    })
}

/// Produce every raw signal the registry implies for a record.
///
/// At most one hit per indicator (first match wins); repeated keywords in
/// long text never double-count. Empty text and absent structured hints
/// yield an empty list — absence of signals is the normal result, not an
/// error.
pub fn extract(record: &Record, registry: &IndicatorRegistry) -> Vec<SignalHit> {
    let mut hits = Vec::new();
    let text = record.text.as_str();

    if !text.is_empty() {
        for tier in [SignalTier::Strong, SignalTier::Medium] {
            for (indicator, span) in registry.first_matches(tier, text) {
                hits.push(text_hit(indicator, text, span));
            }
        }
        domain_suffix_hits(text, registry, &mut hits);
    }

    if let Some(code) = record.declared_country_code.as_deref() {
        if let Some(signal) = registry.country_signal(code) {
            hits.push(SignalHit {
                tier: signal.tier,
                label: format!("country:{}", signal.code),
                category: signal.category.clone(),
                matched_text: signal.code.clone(),
                span: None,
                base_confidence: signal.base_confidence,
                dampened: false,
            });
        }
    }

    hits
}

fn text_hit(indicator: &Indicator, text: &str, span: (usize, usize)) -> SignalHit {
    SignalHit {
        tier: indicator.tier,
        label: indicator.label.clone(),
        category: indicator.category.clone(),
        matched_text: text[span.0..span.1].to_string(),
        span: Some(span),
        base_confidence: indicator.base_confidence,
        dampened: false,
    }
}

/// Suffix-match domain-shaped tokens against the registry's suffix
/// indicators. One hit per suffix indicator, on its first matching token.
fn domain_suffix_hits(text: &str, registry: &IndicatorRegistry, hits: &mut Vec<SignalHit>) {
    let tokens: Vec<(usize, usize)> = domain_token_regex()
        .find_iter(text)
        .map(|m| (m.start(), m.end()))
        .collect();
    if tokens.is_empty() {
        return;
    }

    for indicator in registry.domain_suffixes() {
        let suffix = match &indicator.pattern {
            sinoscreen_indicators::IndicatorPattern::Literal(s) => s.as_str(),
            // Registry validation rejects regex suffixes
            sinoscreen_indicators::IndicatorPattern::Regex(_) => continue,
        };

        for &(start, end) in &tokens {
            let token = &text[start..end];
            if token.to_ascii_lowercase().ends_with(suffix) {
                hits.push(SignalHit {
                    tier: SignalTier::DomainSuffix,
                    label: indicator.label.clone(),
                    category: indicator.category.clone(),
                    matched_text: token.to_string(),
                    span: Some((start, end)),
                    base_confidence: indicator.base_confidence,
                    dampened: false,
                });
                break;
            }
        }
    }
}
