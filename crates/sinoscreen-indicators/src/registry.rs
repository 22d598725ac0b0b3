//! The immutable indicator registry
//!
//! Built once from a [`RegistryConfig`], validated fail-fast, and treated as
//! read-only afterwards. A single instance is safe to share across
//! concurrent classification calls.

use std::collections::HashMap;

use aho_corasick::AhoCorasick;
use sinoscreen_core::{Error, Result, SignalTier, Thresholds};
use tracing::info;

use crate::config::RegistryConfig;
use crate::exclusion::ExclusionRule;
use crate::indicator::{Indicator, IndicatorPattern};

/// A compiled country-code signal
#[derive(Debug, Clone)]
pub struct CountrySignal {
    /// Normalized (uppercase) country code
    pub code: String,

    /// Tier governing scoring
    pub tier: SignalTier,

    /// Score contributed when the record declares this country
    pub base_confidence: f32,

    /// Free-form tag for rationale generation
    pub category: Option<String>,
}

/// Literal automaton and member bookkeeping for one tier
#[derive(Debug)]
struct TierIndex {
    /// Indicator indices in this tier, registration order
    members: Vec<usize>,

    /// Automaton over the tier's literal patterns; `None` when the tier
    /// has no literals
    automaton: Option<AhoCorasick>,

    /// Indicator index -> automaton pattern id
    literal_slot: HashMap<usize, usize>,
}

impl TierIndex {
    fn build(indicators: &[Indicator], tier: SignalTier) -> Result<Self> {
        let mut members = Vec::new();
        let mut literal_slot = HashMap::new();
        let mut patterns: Vec<&str> = Vec::new();

        for (idx, indicator) in indicators.iter().enumerate() {
            if indicator.tier != tier {
                continue;
            }
            members.push(idx);
            if let IndicatorPattern::Literal(needle) = &indicator.pattern {
                literal_slot.insert(idx, patterns.len());
                patterns.push(needle);
            }
        }

        let automaton = if patterns.is_empty() {
            None
        } else {
            Some(
                AhoCorasick::builder()
                    .ascii_case_insensitive(true)
                    .build(&patterns)
                    .map_err(|e| {
                        Error::config(format!(
                            "failed to build {} literal matcher: {}",
                            tier.label(),
                            e
                        ))
                    })?,
            )
        };

        Ok(Self {
            members,
            automaton,
            literal_slot,
        })
    }
}

/// Counts for logging and operator visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryStats {
    pub indicators: usize,
    pub strong: usize,
    pub medium: usize,
    pub domain_suffix: usize,
    pub exclusions: usize,
    pub country_signals: usize,
}

/// Holds the compiled indicator and exclusion definitions, grouped by tier
#[derive(Debug)]
pub struct IndicatorRegistry {
    indicators: Vec<Indicator>,
    strong: TierIndex,
    medium: TierIndex,
    domain_members: Vec<usize>,
    exclusions: Vec<ExclusionRule>,
    country_signals: HashMap<String, CountrySignal>,
    thresholds: Thresholds,
}

impl IndicatorRegistry {
    /// Compile and validate a configuration into a registry.
    ///
    /// Fails fast with a configuration error on duplicate strong patterns,
    /// uncompilable regexes, out-of-range confidences or factors, malformed
    /// country codes, or a non-descending threshold table.
    pub fn from_config(config: &RegistryConfig) -> Result<Self> {
        let mut seen_strong: HashMap<&str, &str> = HashMap::new();
        for spec in &config.indicators {
            if spec.tier != SignalTier::Strong {
                continue;
            }
            if let Some(previous) = seen_strong.insert(spec.pattern.as_str(), spec.label.as_str())
            {
                return Err(Error::config(format!(
                    "duplicate strong pattern '{}' (labels '{}' and '{}')",
                    spec.pattern, previous, spec.label
                )));
            }
        }

        let indicators = config
            .indicators
            .iter()
            .map(Indicator::compile)
            .collect::<Result<Vec<_>>>()?;

        let strong = TierIndex::build(&indicators, SignalTier::Strong)?;
        let medium = TierIndex::build(&indicators, SignalTier::Medium)?;
        let domain_members: Vec<usize> = indicators
            .iter()
            .enumerate()
            .filter(|(_, i)| i.tier == SignalTier::DomainSuffix)
            .map(|(idx, _)| idx)
            .collect();

        let exclusions = config
            .exclusions
            .iter()
            .map(ExclusionRule::compile)
            .collect::<Result<Vec<_>>>()?;

        let mut country_signals = HashMap::new();
        for spec in &config.country_signals {
            let code = spec.code.trim().to_ascii_uppercase();
            if !(code.len() == 2 || code.len() == 3) || !code.bytes().all(|b| b.is_ascii_alphabetic())
            {
                return Err(Error::config(format!(
                    "country signal code '{}' is not an ISO-3166 alpha-2/alpha-3 code",
                    spec.code
                )));
            }
            if !(0.0..=1.0).contains(&spec.base_confidence) {
                return Err(Error::config(format!(
                    "country signal '{}' base_confidence {} is outside [0, 1]",
                    code, spec.base_confidence
                )));
            }
            let signal = CountrySignal {
                code: code.clone(),
                tier: spec.tier,
                base_confidence: spec.base_confidence,
                category: spec.category.clone(),
            };
            if country_signals.insert(code.clone(), signal).is_some() {
                return Err(Error::config(format!(
                    "duplicate country signal code '{}'",
                    code
                )));
            }
        }

        let thresholds = config.thresholds.unwrap_or_default();
        thresholds.validate()?;

        let registry = Self {
            indicators,
            strong,
            medium,
            domain_members,
            exclusions,
            country_signals,
            thresholds,
        };

        let stats = registry.stats();
        info!(
            indicators = stats.indicators,
            strong = stats.strong,
            medium = stats.medium,
            domain_suffix = stats.domain_suffix,
            exclusions = stats.exclusions,
            country_signals = stats.country_signals,
            "indicator registry compiled"
        );

        Ok(registry)
    }

    /// Parse and compile a registry from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Self::from_config(&RegistryConfig::from_yaml(yaml)?)
    }

    /// Load and compile a registry from a YAML file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        Self::from_config(&RegistryConfig::from_file(path)?)
    }

    /// Registry compiled from the built-in default configuration
    pub fn with_defaults() -> Self {
        Self::from_config(&crate::builtin::default_config())
            .expect("built-in indicator configuration is valid")
    }

    /// All indicators, in registration order
    pub fn indicators(&self) -> &[Indicator] {
        &self.indicators
    }

    /// Indicators of one tier, preserving registration order
    pub fn lookup(&self, tier: SignalTier) -> Vec<&Indicator> {
        let members = match tier {
            SignalTier::Strong => &self.strong.members,
            SignalTier::Medium => &self.medium.members,
            SignalTier::DomainSuffix => &self.domain_members,
        };
        members.iter().map(|&idx| &self.indicators[idx]).collect()
    }

    /// Domain-suffix indicators, preserving registration order
    pub fn domain_suffixes(&self) -> impl Iterator<Item = &Indicator> {
        self.domain_members.iter().map(|&idx| &self.indicators[idx])
    }

    /// All exclusion rules, in registration order
    pub fn exclusions(&self) -> &[ExclusionRule] {
        &self.exclusions
    }

    /// Country signal for a declared country code, if configured.
    /// Codes are trimmed and uppercased before lookup.
    pub fn country_signal(&self, code: &str) -> Option<&CountrySignal> {
        let code = code.trim().to_ascii_uppercase();
        self.country_signals.get(&code)
    }

    /// The configured confidence cutoffs
    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    /// First match per text indicator of a tier, in registration order.
    ///
    /// Literal indicators are matched in one pass through the tier's
    /// automaton (overlapping matches included, so nested patterns are not
    /// shadowed); regex indicators are searched individually. At most one
    /// span per indicator is returned.
    ///
    /// Domain-suffix indicators use token-suffix semantics, not substring
    /// search, and return no matches here.
    pub fn first_matches<'r>(
        &'r self,
        tier: SignalTier,
        text: &str,
    ) -> Vec<(&'r Indicator, (usize, usize))> {
        let index = match tier {
            SignalTier::Strong => &self.strong,
            SignalTier::Medium => &self.medium,
            SignalTier::DomainSuffix => return Vec::new(),
        };

        let mut literal_first: HashMap<usize, (usize, usize)> = HashMap::new();
        if let Some(automaton) = &index.automaton {
            for m in automaton.find_overlapping_iter(text) {
                literal_first
                    .entry(m.pattern().as_usize())
                    .or_insert((m.start(), m.end()));
            }
        }

        let mut matches = Vec::new();
        for &idx in &index.members {
            let indicator = &self.indicators[idx];
            let span = match &indicator.pattern {
                IndicatorPattern::Literal(_) => index
                    .literal_slot
                    .get(&idx)
                    .and_then(|slot| literal_first.get(slot))
                    .copied(),
                IndicatorPattern::Regex(regex) => regex.find(text).map(|m| (m.start(), m.end())),
            };
            if let Some(span) = span {
                matches.push((indicator, span));
            }
        }
        matches
    }

    /// Counts for logging and operator visibility
    pub fn stats(&self) -> RegistryStats {
        RegistryStats {
            indicators: self.indicators.len(),
            strong: self.strong.members.len(),
            medium: self.medium.members.len(),
            domain_suffix: self.domain_members.len(),
            exclusions: self.exclusions.len(),
            country_signals: self.country_signals.len(),
        }
    }
}

impl Default for IndicatorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
