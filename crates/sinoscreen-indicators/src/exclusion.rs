//! Exclusion rules: contextual overrides that suppress or dampen hits

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use sinoscreen_core::{Error, Result};

/// What an exclusion rule does to a hit whose context it matches
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
#[serde(rename_all = "lowercase")]
pub enum ExclusionEffect {
    /// Drop the hit entirely
    Suppress,

    /// Multiply the hit's confidence by `factor` in (0, 1)
    Dampen {
        /// Multiplier applied to the hit's base confidence
        factor: f32,
    },
}

/// Declarative exclusion rule as it appears in configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExclusionSpec {
    /// Rationale label surfaced in verdicts
    pub label: String,

    /// Regex tested against the hit's context window, case-insensitive
    pub trigger: String,

    /// What to do with the hit
    pub effect: ExclusionEffect,
}

impl ExclusionSpec {
    /// Suppression rule
    pub fn suppress(label: impl Into<String>, trigger: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            trigger: trigger.into(),
            effect: ExclusionEffect::Suppress,
        }
    }

    /// Dampening rule
    pub fn dampen(label: impl Into<String>, trigger: impl Into<String>, factor: f32) -> Self {
        Self {
            label: label.into(),
            trigger: trigger.into(),
            effect: ExclusionEffect::Dampen { factor },
        }
    }
}

/// A compiled, validated exclusion rule
#[derive(Debug, Clone)]
pub struct ExclusionRule {
    /// Rationale label surfaced in verdicts
    pub label: String,

    /// Compiled case-insensitive trigger
    pub trigger: Regex,

    /// What to do with the hit
    pub effect: ExclusionEffect,
}

impl ExclusionRule {
    /// Compile and validate a spec. Configuration-fatal on an uncompilable
    /// trigger or a dampen factor outside (0, 1).
    pub fn compile(spec: &ExclusionSpec) -> Result<Self> {
        if spec.label.is_empty() {
            return Err(Error::config("exclusion rule label must not be empty"));
        }
        if let ExclusionEffect::Dampen { factor } = spec.effect {
            if !(factor > 0.0 && factor < 1.0) {
                return Err(Error::config(format!(
                    "exclusion rule '{}' dampen factor {} is outside (0, 1)",
                    spec.label, factor
                )));
            }
        }

        let trigger = RegexBuilder::new(&spec.trigger)
            .case_insensitive(true)
            .build()
            .map_err(|e| {
                Error::config(format!(
                    "exclusion rule '{}' trigger failed to compile: {}",
                    spec.label, e
                ))
            })?;

        Ok(Self {
            label: spec.label.clone(),
            trigger,
            effect: spec.effect,
        })
    }

    /// Test the trigger against a context window
    pub fn matches(&self, window: &str) -> bool {
        self.trigger.is_match(window)
    }
}
