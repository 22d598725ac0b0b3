//! Property tests for the classifier invariants

use std::sync::OnceLock;

use proptest::prelude::*;
use sinoscreen_classifier::prelude::*;
use sinoscreen_classifier::{score, STRONG_FLOOR};
use sinoscreen_core::SignalHit;

fn classifier() -> &'static EntityClassifier {
    static CLASSIFIER: OnceLock<EntityClassifier> = OnceLock::new();
    CLASSIFIER.get_or_init(EntityClassifier::with_defaults)
}

fn country_hint() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("CN".to_string())),
        Just(Some("TW".to_string())),
        Just(Some("DE".to_string())),
        Just(Some("not-a-code".to_string())),
    ]
}

fn weak_hit(tier: SignalTier, confidence: f32) -> SignalHit {
    SignalHit {
        tier,
        label: "weak".to_string(),
        category: None,
        matched_text: "weak".to_string(),
        span: None,
        base_confidence: confidence,
        dampened: false,
    }
}

proptest! {
    /// Classification is total: any text and any hint combination yields a
    /// bounded verdict, never a panic.
    #[test]
    fn classify_is_total(text in any::<String>(), country in country_hint()) {
        let mut record = Record::new(text);
        record.declared_country_code = country;

        let verdict = classifier().classify(&record);

        prop_assert!((0.0..=1.0).contains(&verdict.confidence));
        prop_assert!(verdict.evidence.iter().all(|h| h.base_confidence >= 0.0));
        if verdict.evidence.is_empty() {
            prop_assert_eq!(verdict.category, Category::NotDetected);
        }
    }

    /// Two calls over an unchanged record and registry return bit-identical
    /// verdicts.
    #[test]
    fn classify_is_idempotent(text in any::<String>(), country in country_hint()) {
        let mut record = Record::new(text);
        record.declared_country_code = country;

        let first = classifier().classify(&record);
        let second = classifier().classify(&record);
        prop_assert_eq!(first, second);
    }

    /// Appending a strong-indicator mention never lowers confidence.
    #[test]
    fn strong_evidence_is_monotonic(text in "[A-Za-z0-9 ,.]{0,200}") {
        let base = classifier().classify(&Record::new(text.clone()));
        let augmented =
            classifier().classify(&Record::new(format!("{} huawei technologies", text)));

        prop_assert!(augmented.confidence >= base.confidence);
    }

    /// No accumulation of medium/domain evidence reaches the floor a single
    /// undampened strong hit guarantees.
    #[test]
    fn weak_evidence_stays_below_strong_floor(
        confidences in prop::collection::vec((0.0f32..=1.0, any::<bool>()), 0..40)
    ) {
        let hits: Vec<SignalHit> = confidences
            .into_iter()
            .map(|(c, domain)| {
                weak_hit(
                    if domain { SignalTier::DomainSuffix } else { SignalTier::Medium },
                    c,
                )
            })
            .collect();

        prop_assert!(score(&hits) < STRONG_FLOOR);
    }

    /// A single undampened strong hit alone always reaches the floor.
    #[test]
    fn strong_hit_reaches_floor(confidence in 0.0f32..=1.0) {
        let hit = SignalHit {
            tier: SignalTier::Strong,
            label: "strong".to_string(),
            category: None,
            matched_text: "strong".to_string(),
            span: None,
            base_confidence: confidence,
            dampened: false,
        };

        let combined = score(&[hit]);
        prop_assert!(combined >= STRONG_FLOOR);
        prop_assert!(combined <= 1.0);
    }
}
