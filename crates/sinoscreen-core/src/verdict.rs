//! Verdicts, evidence, and the audit trail types

use serde::{Deserialize, Serialize};

/// Priority class of a matched indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalTier {
    /// Named entities, institutes, cities, country codes: a single
    /// undampened match is near-certain
    Strong,

    /// Generic terms that accumulate additively
    Medium,

    /// `.cn`-family internet domain evidence
    DomainSuffix,
}

impl SignalTier {
    /// Human-readable label for rationale strings
    pub fn label(&self) -> &'static str {
        match self {
            Self::Strong => "strong",
            Self::Medium => "medium",
            Self::DomainSuffix => "domain",
        }
    }
}

/// A single matched indicator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalHit {
    /// Tier of the indicator that produced this hit
    pub tier: SignalTier,

    /// Label of the indicator that produced this hit
    pub label: String,

    /// Free-form indicator category tag (e.g. "state_owned", "university")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// The text that matched
    pub matched_text: String,

    /// Byte offsets into the record text; `None` for hits synthesized from
    /// structured fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<(usize, usize)>,

    /// Confidence contributed by this hit, after any dampening
    pub base_confidence: f32,

    /// Set once an exclusion rule has reduced this hit's confidence
    #[serde(default)]
    pub dampened: bool,
}

/// The effect an exclusion rule had on a hit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppliedEffect {
    /// The hit was removed entirely
    Suppressed,

    /// The hit's confidence was multiplied by `factor`
    Dampened { factor: f32 },
}

/// Audit entry: a hit that an exclusion rule suppressed or dampened.
///
/// Dampened hits appear both here and in the surviving evidence list, so a
/// reviewer can see why a match was downgraded even though it still
/// contributed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExcludedSignal {
    /// The affected hit
    pub hit: SignalHit,

    /// Rationale label of the rule that fired
    pub rule_label: String,

    /// What the rule did
    pub effect: AppliedEffect,
}

/// Classification category, derived from confidence against the
/// threshold table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Confidence at or above the confirmed threshold
    Confirmed,
    /// Confidence at or above the likely threshold
    Likely,
    /// Confidence at or above the uncertain threshold
    Uncertain,
    /// Below every threshold, or fully excluded
    NotDetected,
}

impl Category {
    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Confirmed => "confirmed",
            Self::Likely => "likely",
            Self::Uncertain => "uncertain",
            Self::NotDetected => "not_detected",
        }
    }

    /// Supply-chain risk tier for downstream persistence
    pub fn risk_tier(&self) -> Option<RiskTier> {
        match self {
            Self::Confirmed | Self::Likely => Some(RiskTier::High),
            Self::Uncertain => Some(RiskTier::Medium),
            Self::NotDetected => None,
        }
    }
}

/// Supply-chain risk tier derived from the category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    High,
    Medium,
}

/// The structured output of one classification call.
///
/// Immutable once returned; bit-identical for identical inputs against an
/// unchanged registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    /// Source identifier copied from the record, for re-association
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,

    /// Classification category
    pub category: Category,

    /// Combined confidence in [0, 1]
    pub confidence: f32,

    /// Surviving hits that contributed to the score, in extraction order
    pub evidence: Vec<SignalHit>,

    /// Hits an exclusion rule suppressed or dampened, with the rule that fired
    pub excluded_evidence: Vec<ExcludedSignal>,

    /// One-line human-readable summary
    pub rationale: String,
}

impl Verdict {
    /// True when any affiliation evidence survived
    pub fn is_flagged(&self) -> bool {
        self.category != Category::NotDetected
    }

    /// Supply-chain risk tier for downstream persistence
    pub fn risk_tier(&self) -> Option<RiskTier> {
        self.category.risk_tier()
    }

    /// Flatten into the column-shaped row downstream sinks persist
    pub fn to_row(&self) -> VerdictRow {
        VerdictRow {
            source_id: self.source_id.clone(),
            flagged: self.is_flagged(),
            confidence_score: self.confidence,
            detection_rationale: self.rationale.clone(),
            supply_chain_risk: self.risk_tier(),
        }
    }
}

/// Flat, SQL-column-shaped projection of a [`Verdict`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerdictRow {
    /// Source identifier, if the record carried one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,

    /// `category != not_detected`
    pub flagged: bool,

    /// Combined confidence in [0, 1]
    pub confidence_score: f32,

    /// One-line rationale
    pub detection_rationale: String,

    /// Risk tier; absent when nothing was detected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supply_chain_risk: Option<RiskTier>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strong_hit(label: &str) -> SignalHit {
        SignalHit {
            tier: SignalTier::Strong,
            label: label.to_string(),
            category: Some("company".to_string()),
            matched_text: label.to_string(),
            span: Some((0, label.len())),
            base_confidence: 0.95,
            dampened: false,
        }
    }

    #[test]
    fn test_risk_tier_mapping() {
        assert_eq!(Category::Confirmed.risk_tier(), Some(RiskTier::High));
        assert_eq!(Category::Likely.risk_tier(), Some(RiskTier::High));
        assert_eq!(Category::Uncertain.risk_tier(), Some(RiskTier::Medium));
        assert_eq!(Category::NotDetected.risk_tier(), None);
    }

    #[test]
    fn test_verdict_row_projection() {
        let verdict = Verdict {
            source_id: Some("row-42".to_string()),
            category: Category::Confirmed,
            confidence: 0.95,
            evidence: vec![strong_hit("huawei")],
            excluded_evidence: Vec::new(),
            rationale: "strong indicator 'huawei' matched".to_string(),
        };

        let row = verdict.to_row();
        assert!(row.flagged);
        assert_eq!(row.confidence_score, 0.95);
        assert_eq!(row.supply_chain_risk, Some(RiskTier::High));
        assert_eq!(row.source_id.as_deref(), Some("row-42"));
    }

    #[test]
    fn test_not_detected_row_has_no_risk() {
        let verdict = Verdict {
            source_id: None,
            category: Category::NotDetected,
            confidence: 0.0,
            evidence: Vec::new(),
            excluded_evidence: Vec::new(),
            rationale: "no indicators matched".to_string(),
        };

        let row = verdict.to_row();
        assert!(!row.flagged);
        assert!(row.supply_chain_risk.is_none());

        let json = serde_json::to_string(&row).unwrap();
        assert!(!json.contains("supply_chain_risk"));
    }

    #[test]
    fn test_category_serializes_snake_case() {
        let json = serde_json::to_string(&Category::NotDetected).unwrap();
        assert_eq!(json, "\"not_detected\"");
    }

    #[test]
    fn test_applied_effect_tagged_serialization() {
        let json = serde_json::to_string(&AppliedEffect::Dampened { factor: 0.5 }).unwrap();
        assert_eq!(json, "{\"type\":\"dampened\",\"factor\":0.5}");
    }
}
