//! The orchestrating classifier

use std::sync::Arc;

use sinoscreen_core::{ExcludedSignal, Record, Result, SignalHit, Thresholds, Verdict};
use sinoscreen_indicators::IndicatorRegistry;
use tracing::debug;

use crate::extract::extract;
use crate::filter::apply;
use crate::score::score;

/// Entity affiliation classifier.
///
/// Wires extraction, exclusion filtering, and scoring over a shared
/// immutable registry. `classify` is a pure function of the record and the
/// registry state: no interior mutability, no I/O, safe to call from any
/// number of threads.
#[derive(Clone)]
pub struct EntityClassifier {
    registry: Arc<IndicatorRegistry>,
    thresholds: Thresholds,
}

impl EntityClassifier {
    /// Create a classifier over a compiled registry, adopting the
    /// registry's threshold table
    pub fn new(registry: Arc<IndicatorRegistry>) -> Self {
        let thresholds = registry.thresholds();
        Self {
            registry,
            thresholds,
        }
    }

    /// Classifier over the built-in default registry
    pub fn with_defaults() -> Self {
        Self::new(Arc::new(IndicatorRegistry::with_defaults()))
    }

    /// Override the confidence cutoffs. Configuration-fatal if the table
    /// is not strictly descending.
    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Result<Self> {
        thresholds.validate()?;
        self.thresholds = thresholds;
        Ok(self)
    }

    /// The registry this classifier scans with
    pub fn registry(&self) -> &IndicatorRegistry {
        &self.registry
    }

    /// Classify one record.
    ///
    /// Total over the input domain: malformed or empty records degrade to a
    /// `not_detected` verdict with empty evidence, never an error.
    pub fn classify(&self, record: &Record) -> Verdict {
        let hits = extract(record, &self.registry);
        let (surviving, excluded) = apply(hits, record, self.registry.exclusions());
        let confidence = score(&surviving);
        let category = self.thresholds.categorize(confidence);
        let rationale = build_rationale(&surviving, &excluded);

        debug!(
            category = category.label(),
            confidence,
            evidence = surviving.len(),
            excluded = excluded.len(),
            "record classified"
        );

        Verdict {
            source_id: record.source_id.clone(),
            category,
            confidence,
            evidence: surviving,
            excluded_evidence: excluded,
            rationale,
        }
    }

    /// Classify a batch of records.
    ///
    /// Verdicts carry their record's `source_id`, so callers that fan the
    /// work out across threads can re-associate results in any order.
    pub fn classify_batch<'a>(
        &self,
        records: impl IntoIterator<Item = &'a Record>,
    ) -> Vec<Verdict> {
        records.into_iter().map(|r| self.classify(r)).collect()
    }
}

/// One-line summary built from the highest-confidence surviving hit
fn build_rationale(evidence: &[SignalHit], excluded: &[ExcludedSignal]) -> String {
    let mut top: Option<&SignalHit> = None;
    for hit in evidence {
        if top.map_or(true, |t| hit.base_confidence > t.base_confidence) {
            top = Some(hit);
        }
    }

    let Some(top) = top else {
        return if excluded.is_empty() {
            "no indicators matched".to_string()
        } else {
            format!(
                "all matched indicators excluded ({})",
                excluded[0].rule_label
            )
        };
    };

    let descriptor = match &top.category {
        Some(category) => format!("{} indicator '{}' ({})", top.tier.label(), top.label, category),
        None => format!("{} indicator '{}'", top.tier.label(), top.label),
    };

    let mut parts = vec![format!("{} matched", descriptor)];
    let supporting = evidence.len() - 1;
    if supporting > 0 {
        parts.push(format!(
            "{} supporting signal{}",
            supporting,
            if supporting == 1 { "" } else { "s" }
        ));
    }
    if excluded.is_empty() {
        parts.push("no exclusions applied".to_string());
    } else {
        parts.push(format!(
            "{} exclusion{} applied",
            excluded.len(),
            if excluded.len() == 1 { "" } else { "s" }
        ));
    }
    parts.join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use sinoscreen_core::Category;

    #[test]
    fn test_classify_is_deterministic() {
        let classifier = EntityClassifier::with_defaults();
        let record = Record::new("Huawei and ZTE equipment via shenzhen-logistics.cn")
            .with_country("CN");

        let first = classifier.classify(&record);
        let second = classifier.classify(&record);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_record_not_detected() {
        let classifier = EntityClassifier::with_defaults();
        let verdict = classifier.classify(&Record::default());

        assert_eq!(verdict.category, Category::NotDetected);
        assert_eq!(verdict.confidence, 0.0);
        assert!(verdict.evidence.is_empty());
        assert!(verdict.excluded_evidence.is_empty());
        assert_eq!(verdict.rationale, "no indicators matched");
    }

    #[test]
    fn test_rationale_names_top_indicator() {
        let classifier = EntityClassifier::with_defaults();
        let verdict = classifier.classify(&Record::new("Supplier: Huawei Technologies"));

        assert!(verdict.rationale.contains("strong indicator 'huawei'"));
        assert!(verdict.rationale.contains("no exclusions applied"));
    }

    #[test]
    fn test_batch_preserves_source_ids() {
        let classifier = EntityClassifier::with_defaults();
        let records = vec![
            Record::new("Huawei core router").with_source_id("a"),
            Record::new("Polish oak furniture").with_source_id("b"),
        ];

        let verdicts = classifier.classify_batch(&records);
        assert_eq!(verdicts.len(), 2);
        assert_eq!(verdicts[0].source_id.as_deref(), Some("a"));
        assert_eq!(verdicts[1].source_id.as_deref(), Some("b"));
        assert!(verdicts[0].is_flagged());
        assert!(!verdicts[1].is_flagged());
    }

    #[test]
    fn test_threshold_override() {
        let classifier = EntityClassifier::with_defaults()
            .with_thresholds(Thresholds::new(0.99, 0.5, 0.3).unwrap())
            .unwrap();
        let verdict = classifier.classify(&Record::new("Huawei Technologies"));

        // 0.95 no longer clears the confirmed bar
        assert_eq!(verdict.category, Category::Likely);
    }

    #[test]
    fn test_invalid_threshold_override_rejected() {
        let result = EntityClassifier::with_defaults()
            .with_thresholds(Thresholds {
                confirmed: 0.2,
                likely: 0.5,
                uncertain: 0.3,
            });
        assert!(result.is_err());
    }
}
