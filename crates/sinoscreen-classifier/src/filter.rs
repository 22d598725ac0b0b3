//! Exclusion filtering: contextual overrides applied to raw hits

use sinoscreen_core::{AppliedEffect, ExcludedSignal, Record, SignalHit};
use sinoscreen_indicators::{ExclusionEffect, ExclusionRule};
use tracing::debug;

/// Bytes of context kept on each side of a hit when testing triggers.
/// Wide enough for phrase-level context ("made in ..."), narrow enough that
/// a distant exclusion phrase cannot suppress an unrelated hit.
const WINDOW_RADIUS: usize = 64;

/// Apply exclusion rules to raw hits.
///
/// Returns the surviving hits (possibly dampened, in input order) and the
/// audit list of (hit, rule) applications. Rules are evaluated in
/// registration order; any matching SUPPRESS rule removes the hit outright
/// and takes precedence over dampening, while DAMPEN rules compose
/// multiplicatively. No exclusions matching is the common case and is not
/// an error.
pub fn apply(
    hits: Vec<SignalHit>,
    record: &Record,
    rules: &[ExclusionRule],
) -> (Vec<SignalHit>, Vec<ExcludedSignal>) {
    let mut surviving = Vec::with_capacity(hits.len());
    let mut excluded = Vec::new();

    'hits: for mut hit in hits {
        let window = evaluation_window(record, hit.span);

        // SUPPRESS takes precedence over every other effect
        for rule in rules {
            if rule.effect == ExclusionEffect::Suppress && rule.matches(&window) {
                debug!(
                    rule = %rule.label,
                    indicator = %hit.label,
                    "signal suppressed"
                );
                excluded.push(ExcludedSignal {
                    hit,
                    rule_label: rule.label.clone(),
                    effect: AppliedEffect::Suppressed,
                });
                continue 'hits;
            }
        }

        for rule in rules {
            if let ExclusionEffect::Dampen { factor } = rule.effect {
                if rule.matches(&window) {
                    hit.base_confidence = (hit.base_confidence * factor).max(0.0);
                    hit.dampened = true;
                    excluded.push(ExcludedSignal {
                        hit: hit.clone(),
                        rule_label: rule.label.clone(),
                        effect: AppliedEffect::Dampened { factor },
                    });
                }
            }
        }

        surviving.push(hit);
    }

    (surviving, excluded)
}

/// The text a rule trigger is tested against for one hit: a bounded window
/// around the hit's span, or the full text for structured-field hits, with
/// the record's structured strings appended so suffix/address exclusions
/// can fire from either source.
fn evaluation_window(record: &Record, span: Option<(usize, usize)>) -> String {
    let text = record.text.as_str();
    let base = match span {
        Some((start, end)) => {
            let lo = floor_char_boundary(text, start.saturating_sub(WINDOW_RADIUS));
            let hi = ceil_char_boundary(text, end.saturating_add(WINDOW_RADIUS).min(text.len()));
            &text[lo..hi]
        }
        None => text,
    };

    let mut window = base.to_string();
    for extra in [record.address.as_deref(), record.legal_suffix_hint.as_deref()] {
        if let Some(extra) = extra {
            window.push('\n');
            window.push_str(extra);
        }
    }
    window
}

fn floor_char_boundary(text: &str, mut index: usize) -> usize {
    while index > 0 && !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

fn ceil_char_boundary(text: &str, mut index: usize) -> usize {
    while index < text.len() && !text.is_char_boundary(index) {
        index += 1;
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use sinoscreen_core::SignalTier;
    use sinoscreen_indicators::ExclusionSpec;

    fn rules(specs: Vec<ExclusionSpec>) -> Vec<ExclusionRule> {
        specs.iter().map(|s| ExclusionRule::compile(s).unwrap()).collect()
    }

    fn hit_at(text: &str, needle: &str, tier: SignalTier, confidence: f32) -> SignalHit {
        let start = text.to_ascii_lowercase().find(needle).unwrap();
        SignalHit {
            tier,
            label: needle.to_string(),
            category: None,
            matched_text: text[start..start + needle.len()].to_string(),
            span: Some((start, start + needle.len())),
            base_confidence: confidence,
            dampened: false,
        }
    }

    #[test]
    fn test_suppress_drops_hit_and_records_rule() {
        let text = "Components Made in China by ACME";
        let record = Record::new(text);
        let hits = vec![hit_at(text, "china", SignalTier::Strong, 0.95)];
        let rules = rules(vec![ExclusionSpec::suppress(
            "made_in_china_phrasing",
            r"made\s+in\s+china",
        )]);

        let (surviving, excluded) = apply(hits, &record, &rules);
        assert!(surviving.is_empty());
        assert_eq!(excluded.len(), 1);
        assert_eq!(excluded[0].rule_label, "made_in_china_phrasing");
        assert_eq!(excluded[0].effect, AppliedEffect::Suppressed);
    }

    #[test]
    fn test_dampen_reduces_confidence_and_keeps_hit() {
        let text = "Chinese language classes for staff";
        let record = Record::new(text);
        let hits = vec![hit_at(text, "chinese", SignalTier::Medium, 0.4)];
        let rules = rules(vec![ExclusionSpec::dampen(
            "language_reference",
            r"chinese\s+language",
            0.5,
        )]);

        let (surviving, excluded) = apply(hits, &record, &rules);
        assert_eq!(surviving.len(), 1);
        assert!((surviving[0].base_confidence - 0.2).abs() < 1e-6);
        assert!(surviving[0].dampened);
        // Dampened hits stay auditable on both sides
        assert_eq!(excluded.len(), 1);
        assert_eq!(excluded[0].effect, AppliedEffect::Dampened { factor: 0.5 });
    }

    #[test]
    fn test_multiple_dampens_compose_multiplicatively() {
        let text = "ancient china and chinese culture exhibit";
        let record = Record::new(text);
        let hits = vec![hit_at(text, "china", SignalTier::Strong, 0.9)];
        let rules = rules(vec![
            ExclusionSpec::dampen("historical", r"ancient\s+china", 0.5),
            ExclusionSpec::dampen("culture", r"chinese\s+culture", 0.5),
        ]);

        let (surviving, excluded) = apply(hits, &record, &rules);
        assert_eq!(surviving.len(), 1);
        assert!((surviving[0].base_confidence - 0.225).abs() < 1e-6);
        assert_eq!(excluded.len(), 2);
    }

    #[test]
    fn test_suppress_precedence_over_dampen() {
        let text = "products made in china for chinese culture fans";
        let record = Record::new(text);
        let hits = vec![hit_at(text, "china", SignalTier::Strong, 0.95)];
        let rules = rules(vec![
            ExclusionSpec::dampen("culture", r"chinese\s+culture", 0.5),
            ExclusionSpec::suppress("made_in", r"made\s+in\s+china"),
        ]);

        let (surviving, excluded) = apply(hits, &record, &rules);
        assert!(surviving.is_empty());
        assert_eq!(excluded.len(), 1);
        assert_eq!(excluded[0].effect, AppliedEffect::Suppressed);
    }

    #[test]
    fn test_distant_context_does_not_suppress() {
        // Put the exclusion phrase far outside the hit's window
        let padding = "x".repeat(200);
        let text = format!("huawei router {} made in china", padding);
        let record = Record::new(text.clone());
        let hits = vec![hit_at(&text, "huawei", SignalTier::Strong, 0.95)];
        let rules = rules(vec![ExclusionSpec::suppress(
            "made_in",
            r"made\s+in\s+china",
        )]);

        let (surviving, excluded) = apply(hits, &record, &rules);
        assert_eq!(surviving.len(), 1);
        assert!(excluded.is_empty());
    }

    #[test]
    fn test_structured_fields_join_the_window() {
        let record = Record::new("").with_country("CN").with_legal_suffix("GmbH");
        let hits = vec![SignalHit {
            tier: SignalTier::Strong,
            label: "country:CN".to_string(),
            category: None,
            matched_text: "CN".to_string(),
            span: None,
            base_confidence: 0.95,
            dampened: false,
        }];
        let rules = rules(vec![ExclusionSpec::dampen(
            "non_chinese_legal_suffix",
            r"\bgmbh\b",
            0.6,
        )]);

        let (surviving, excluded) = apply(hits, &record, &rules);
        assert_eq!(surviving.len(), 1);
        assert!(surviving[0].dampened);
        assert_eq!(excluded.len(), 1);
    }

    #[test]
    fn test_no_rules_is_the_common_case() {
        let text = "huawei switchgear";
        let record = Record::new(text);
        let hits = vec![hit_at(text, "huawei", SignalTier::Strong, 0.95)];

        let (surviving, excluded) = apply(hits, &record, &[]);
        assert_eq!(surviving.len(), 1);
        assert!(excluded.is_empty());
    }
}
