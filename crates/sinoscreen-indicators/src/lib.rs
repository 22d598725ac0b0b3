//! Sinoscreen Indicators
//!
//! The configuration surface of the sinoscreen entity screening library:
//! tiered indicator definitions, exclusion rules, and the compiled registry
//! the classifier scans with.
//!
//! Definitions are declarative and versionable:
//! - Indicators (literal or regex, with tier and base confidence)
//! - Exclusion rules (suppress or dampen, with a rationale label)
//! - Country-code signals and the confidence threshold table
//!
//! A [`RegistryConfig`] loads from YAML and compiles into an immutable
//! [`IndicatorRegistry`]; validation is fail-fast at construction.

pub mod builtin;
pub mod config;
pub mod exclusion;
pub mod indicator;
pub mod registry;

pub use config::{CountrySignalSpec, RegistryConfig};
pub use exclusion::{ExclusionEffect, ExclusionRule, ExclusionSpec};
pub use indicator::{Indicator, IndicatorPattern, IndicatorSpec};
pub use registry::{CountrySignal, IndicatorRegistry, RegistryStats};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::builtin::default_config;
    pub use crate::config::{CountrySignalSpec, RegistryConfig};
    pub use crate::exclusion::{ExclusionEffect, ExclusionRule, ExclusionSpec};
    pub use crate::indicator::{Indicator, IndicatorSpec};
    pub use crate::registry::{IndicatorRegistry, RegistryStats};
}
