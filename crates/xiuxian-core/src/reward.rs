//! Reward and penalty formulas.
//!
//! All functions are pure. Magnitudes grow with level: a `(base, divisor)`
//! pair yields `floor(base * (level / divisor + 1))`.

use xiuxian_types::HerbQuality;

/// A level-scaled magnitude: `base` at level 0, growing by `base` every
/// `divisor` levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelScale {
    /// Magnitude at level 0.
    pub base: i64,
    /// Levels per additional `base`.
    pub divisor: u32,
}

impl LevelScale {
    /// Construct a scale.
    pub const fn new(base: i64, divisor: u32) -> Self {
        Self { base, divisor }
    }

    /// Magnitude at `level`.
    pub fn at(self, level: u32) -> i64 {
        level_scaled(self.base, level, self.divisor)
    }
}

/// `floor(base * (level / divisor + 1))` with real division.
///
/// A zero divisor is treated as one.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn level_scaled(base: i64, level: u32, divisor: u32) -> i64 {
    let divisor = f64::from(divisor.max(1));
    let factor = f64::from(level) / divisor + 1.0;
    (base as f64 * factor).floor() as i64
}

/// `floor(base_value * multiplier)` for a known quality name; unknown
/// names return `base_value` unchanged.
pub fn herb_value(base_value: i64, quality: &str) -> i64 {
    HerbQuality::parse(quality).map_or(base_value, |q| herb_value_for(base_value, q))
}

/// Typed form of [`herb_value`].
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn herb_value_for(base_value: i64, quality: HerbQuality) -> i64 {
    (base_value as f64 * quality.multiplier()).floor() as i64
}

/// Round to one decimal place, as cultivation is stored.
pub fn round_cultivation(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Subtract and clamp at zero.
pub fn clamp_sub(value: f64, amount: f64) -> f64 {
    (value - amount).max(0.0)
}
