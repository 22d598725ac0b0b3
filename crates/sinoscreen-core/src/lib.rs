//! Sinoscreen Core
//!
//! Core types and error handling shared across the sinoscreen entity
//! screening crates.
//!
//! This crate provides:
//! - The [`Record`] input contract and the [`Verdict`] output contract
//! - Evidence types ([`SignalHit`], [`ExcludedSignal`]) for the audit trail
//! - The confidence [`Thresholds`] table and category/risk mappings
//! - Error types and result handling

pub mod error;
pub mod record;
pub mod thresholds;
pub mod verdict;

pub use error::{Error, Result};
pub use record::Record;
pub use thresholds::Thresholds;
pub use verdict::{
    AppliedEffect, Category, ExcludedSignal, RiskTier, SignalHit, SignalTier, Verdict, VerdictRow,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::record::Record;
    pub use crate::thresholds::Thresholds;
    pub use crate::verdict::{
        AppliedEffect, Category, ExcludedSignal, RiskTier, SignalHit, SignalTier, Verdict,
        VerdictRow,
    };
}
