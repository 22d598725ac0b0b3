//! Confidence-to-category threshold table

use crate::error::{Error, Result};
use crate::verdict::Category;
use serde::{Deserialize, Serialize};

/// The confidence cutoffs that map a score to a [`Category`].
///
/// One table replaces the 0.3/0.5/0.7-style constants that upstream
/// collectors used to carry individually. Thresholds must be strictly
/// descending and within (0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// At or above: confirmed
    pub confirmed: f32,

    /// At or above: likely
    pub likely: f32,

    /// At or above: uncertain; below: not detected
    pub uncertain: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            confirmed: 0.9,
            likely: 0.5,
            uncertain: 0.3,
        }
    }
}

impl Thresholds {
    /// Create a validated threshold table
    pub fn new(confirmed: f32, likely: f32, uncertain: f32) -> Result<Self> {
        let thresholds = Self {
            confirmed,
            likely,
            uncertain,
        };
        thresholds.validate()?;
        Ok(thresholds)
    }

    /// Check ordering and range; configuration-fatal on failure
    pub fn validate(&self) -> Result<()> {
        let ordered = self.uncertain > 0.0
            && self.uncertain < self.likely
            && self.likely < self.confirmed
            && self.confirmed <= 1.0;

        if !ordered {
            return Err(Error::config(format!(
                "thresholds must satisfy 0 < uncertain < likely < confirmed <= 1, \
                 got confirmed={} likely={} uncertain={}",
                self.confirmed, self.likely, self.uncertain
            )));
        }
        Ok(())
    }

    /// Map a confidence score to its category
    pub fn categorize(&self, confidence: f32) -> Category {
        if confidence >= self.confirmed {
            Category::Confirmed
        } else if confidence >= self.likely {
            Category::Likely
        } else if confidence >= self.uncertain {
            Category::Uncertain
        } else {
            Category::NotDetected
        }
    }
}
