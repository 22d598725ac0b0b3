//! Indicator definitions and compilation

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use sinoscreen_core::{Error, Result, SignalTier};

/// Declarative indicator definition as it appears in configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSpec {
    /// Stable label used in evidence and rationale strings
    pub label: String,

    /// Literal substring or regex, matched case-insensitively
    pub pattern: String,

    /// Treat `pattern` as a regex instead of a literal substring
    #[serde(default)]
    pub is_regex: bool,

    /// Tier governing how the scorer combines this indicator
    pub tier: SignalTier,

    /// Score contributed when this indicator matches and is not excluded
    pub base_confidence: f32,

    /// Free-form tag for rationale generation (e.g. "state_owned", "city")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl IndicatorSpec {
    /// Literal indicator whose label is the pattern itself
    pub fn literal(pattern: impl Into<String>, tier: SignalTier, base_confidence: f32) -> Self {
        let pattern = pattern.into();
        Self {
            label: pattern.clone(),
            pattern,
            is_regex: false,
            tier,
            base_confidence,
            category: None,
        }
    }

    /// Regex indicator with an explicit label
    pub fn regex(
        label: impl Into<String>,
        pattern: impl Into<String>,
        tier: SignalTier,
        base_confidence: f32,
    ) -> Self {
        Self {
            label: label.into(),
            pattern: pattern.into(),
            is_regex: true,
            tier,
            base_confidence,
            category: None,
        }
    }

    /// Attach a category tag
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// How a compiled indicator matches text
#[derive(Debug, Clone)]
pub enum IndicatorPattern {
    /// Case-insensitive literal, matched through the tier's automaton
    Literal(String),

    /// Compiled case-insensitive regex
    Regex(Regex),
}

/// A compiled, validated indicator
#[derive(Debug, Clone)]
pub struct Indicator {
    /// Stable label surfaced in evidence and rationale strings
    pub label: String,

    /// Tier governing scoring
    pub tier: SignalTier,

    /// Score contributed on an unexcluded match
    pub base_confidence: f32,

    /// Free-form tag for rationale generation
    pub category: Option<String>,

    /// The matching strategy
    pub pattern: IndicatorPattern,
}

impl Indicator {
    /// Compile and validate a spec. Configuration-fatal on bad confidence,
    /// empty patterns, uncompilable regex, or malformed domain suffixes.
    pub fn compile(spec: &IndicatorSpec) -> Result<Self> {
        if spec.label.is_empty() {
            return Err(Error::config("indicator label must not be empty"));
        }
        if spec.pattern.is_empty() {
            return Err(Error::config(format!(
                "indicator '{}' has an empty pattern",
                spec.label
            )));
        }
        if !(0.0..=1.0).contains(&spec.base_confidence) {
            return Err(Error::config(format!(
                "indicator '{}' base_confidence {} is outside [0, 1]",
                spec.label, spec.base_confidence
            )));
        }

        let pattern = if spec.is_regex {
            if spec.tier == SignalTier::DomainSuffix {
                return Err(Error::config(format!(
                    "domain suffix indicator '{}' must be a literal suffix, not a regex",
                    spec.label
                )));
            }
            let regex = RegexBuilder::new(&spec.pattern)
                .case_insensitive(true)
                .build()
                .map_err(|e| {
                    Error::config(format!(
                        "indicator '{}' regex failed to compile: {}",
                        spec.label, e
                    ))
                })?;
            IndicatorPattern::Regex(regex)
        } else {
            if spec.tier == SignalTier::DomainSuffix && !spec.pattern.starts_with('.') {
                return Err(Error::config(format!(
                    "domain suffix indicator '{}' must start with '.', got '{}'",
                    spec.label, spec.pattern
                )));
            }
            IndicatorPattern::Literal(spec.pattern.to_ascii_lowercase())
        };

        Ok(Self {
            label: spec.label.clone(),
            tier: spec.tier,
            base_confidence: spec.base_confidence,
            category: spec.category.clone(),
            pattern,
        })
    }

    /// First match of this indicator in `text`, as byte offsets.
    ///
    /// Literal indicators are normally matched in bulk through the tier
    /// automaton; this per-indicator path keeps literal and regex matching
    /// uniform for callers that need it.
    pub fn first_match(&self, text: &str) -> Option<(usize, usize)> {
        match &self.pattern {
            IndicatorPattern::Literal(needle) => {
                // ASCII lowercasing is length-preserving, so offsets into the
                // folded haystack are valid for the original text.
                let haystack = text.to_ascii_lowercase();
                haystack
                    .find(needle)
                    .map(|start| (start, start + needle.len()))
            }
            IndicatorPattern::Regex(regex) => regex.find(text).map(|m| (m.start(), m.end())),
        }
    }
}
