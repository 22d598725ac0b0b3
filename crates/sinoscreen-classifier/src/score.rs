//! Confidence scoring: tier-weighted combination of surviving hits

use sinoscreen_core::{SignalHit, SignalTier};

/// Minimum confidence produced by an undampened strong hit
pub const STRONG_FLOOR: f32 = 0.95;

/// Ceiling for scores built from medium/domain evidence alone. Kept below
/// [`STRONG_FLOOR`] so no accumulation of weak signals can match a single
/// strong identity match.
pub const ADDITIVE_CAP: f32 = 0.85;

/// Combine surviving hits into one confidence value in [0, 1].
///
/// An undampened strong hit floors the score at [`STRONG_FLOOR`]; remaining
/// signals accumulate additively and can push it toward 1.0. Without one,
/// the additive sum is capped at [`ADDITIVE_CAP`]. A strong hit that an
/// exclusion rule dampened no longer carries tier certainty and contributes
/// additively at its reduced weight. No hits at all scores exactly 0.0.
pub fn score(hits: &[SignalHit]) -> f32 {
    if hits.is_empty() {
        return 0.0;
    }

    let mut additive = 0.0f32;
    let mut strong_max: Option<f32> = None;

    for hit in hits {
        match hit.tier {
            SignalTier::Strong if !hit.dampened => {
                let current = strong_max.get_or_insert(hit.base_confidence);
                *current = current.max(hit.base_confidence);
            }
            _ => additive += hit.base_confidence,
        }
    }

    match strong_max {
        Some(strong) => strong.max(STRONG_FLOOR).max(additive).min(1.0),
        None => additive.min(ADDITIVE_CAP),
    }
}
