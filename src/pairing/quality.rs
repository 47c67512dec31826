//! Pairing quality as a function of importance and closeness

use crate::types::{Points, Weight};

/// Combine importance and closeness into a single score
///
/// Both inputs are expected in `0..=highest_points`. The `+ 1` offsets keep a
/// zero in one factor from erasing the other. Saturates at `Weight::MAX`,
/// which no matching backend accepts.
pub fn quality(importance: Points, closeness: Points) -> Weight {
    (Weight::from(importance) + 1).saturating_mul(Weight::from(closeness) + 1)
}
