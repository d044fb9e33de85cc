//! Outcome model: win probability and point spread from a rating pair
//!
//! Pure, stateless functions of two ratings plus a fixed home-court bonus.
//! Safe to call from any context, no shared state.

use crate::config::EloSettings;

/// Cap on the base-10 exponent so a huge rating gap saturates the logistic
/// curve. 10^15 keeps both `1/(1 + 10^15)` and `1/(1 + 10^-15)` strictly
/// inside (0, 1) in f64; a larger cap would round one tail to exactly 0 or 1.
const MAX_EXPONENT: f64 = 15.0;

/// Maps rating pairs to predicted outcomes using fixed curve constants
#[derive(Debug, Clone, Copy)]
pub struct OutcomeModel {
    scale: f64,
    points_per_rating: f64,
}

impl OutcomeModel {
    pub fn new(settings: &EloSettings) -> Self {
        Self {
            scale: settings.scale,
            points_per_rating: settings.points_per_rating,
        }
    }

    /// Probability that side A beats side B, with `bonus_for_a` added to A's
    /// effective rating (pass the home advantage for the home side, its
    /// negation when A is the away side)
    ///
    /// Strictly inside (0, 1) for all finite inputs.
    pub fn win_probability(&self, rating_a: f64, rating_b: f64, bonus_for_a: f64) -> f64 {
        let diff = rating_a + bonus_for_a - rating_b;
        let exponent = (-diff / self.scale).clamp(-MAX_EXPONENT, MAX_EXPONENT);
        1.0 / (1.0 + 10f64.powf(exponent))
    }

    /// Expected scoring margin favoring side A, a linear transform of the
    /// effective rating difference
    ///
    /// Positive whenever `win_probability` for A exceeds one half.
    pub fn point_spread(&self, rating_a: f64, rating_b: f64, bonus_for_a: f64) -> f64 {
        (rating_a + bonus_for_a - rating_b) / self.points_per_rating
    }
}
