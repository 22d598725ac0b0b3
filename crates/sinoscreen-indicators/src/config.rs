//! Registry configuration: the versionable YAML surface
//!
//! Indicators and exclusion rules live in a static data file so that tuning
//! the keyword tables never requires recompiling classifier logic.

use serde::{Deserialize, Serialize};
use sinoscreen_core::{Error, Result, SignalTier, Thresholds};

use crate::exclusion::ExclusionSpec;
use crate::indicator::IndicatorSpec;

/// Country-code signal definition.
///
/// Declared-country hints are matched against these entries after trimming
/// and uppercasing; both alpha-2 and alpha-3 codes are accepted since source
/// feeds use them interchangeably.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountrySignalSpec {
    /// ISO-3166 alpha-2 or alpha-3 code
    pub code: String,

    /// Tier governing how the scorer combines this signal
    pub tier: SignalTier,

    /// Score contributed when the record declares this country
    pub base_confidence: f32,

    /// Free-form tag for rationale generation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Complete registry configuration document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Text indicators, in registration order
    #[serde(default)]
    pub indicators: Vec<IndicatorSpec>,

    /// Exclusion rules, in registration order
    #[serde(default)]
    pub exclusions: Vec<ExclusionSpec>,

    /// Country-code signals
    #[serde(default)]
    pub country_signals: Vec<CountrySignalSpec>,

    /// Confidence-to-category cutoffs
    #[serde(default)]
    pub thresholds: Option<Thresholds>,
}

impl RegistryConfig {
    /// Load a configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| Error::config(format!("failed to parse registry config: {}", e)))
    }

    /// Load a configuration from a file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }
}
