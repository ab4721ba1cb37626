//! Herb quality sampling.
//!
//! Maps a uniform draw in `[0, 1)` to a tier under a fixed cumulative
//! distribution: 50% common, 30% uncommon, 15% rare, 4% epic, 1% legendary.
//! The distribution does not depend on the player.

use xiuxian_types::HerbQuality;

/// Upper bounds (exclusive) of each tier except the last.
const THRESHOLDS: [(f64, HerbQuality); 4] = [
    (0.50, HerbQuality::Common),
    (0.80, HerbQuality::Uncommon),
    (0.95, HerbQuality::Rare),
    (0.99, HerbQuality::Epic),
];

/// Tier for a uniform draw `u`.
pub fn quality_for_draw(u: f64) -> HerbQuality {
    THRESHOLDS
        .iter()
        .find(|(bound, _)| u < *bound)
        .map_or(HerbQuality::Legendary, |(_, q)| *q)
}

/// Wire-name form of [`quality_for_draw`].
pub fn random_quality(u: f64) -> &'static str {
    quality_for_draw(u).as_str()
}

/// Probability mass of a tier under the sampler.
pub fn tier_probability(quality: HerbQuality) -> f64 {
    let mut lower = 0.0;
    for (bound, q) in THRESHOLDS {
        if q == quality {
            return bound - lower;
        }
        lower = bound;
    }
    1.0 - lower
}
