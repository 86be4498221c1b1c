use rand::Rng;

/// Additive weights used by the keyword matcher
///
/// Only the relative order matters: category > title > tag = taxonomy keyword.
/// `jitter` bounds the random tie-breaker; zero disables it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchWeights {
    pub title: f64,
    pub tag: f64,
    pub category: f64,
    pub keyword: f64,
    pub jitter: f64,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            title: 15.0,
            tag: 10.0,
            category: 20.0,
            keyword: 10.0,
            jitter: 2.0,
        }
    }
}

impl MatchWeights {
    /// Default weights with the tie-breaker switched off
    pub fn without_jitter() -> Self {
        Self {
            jitter: 0.0,
            ..Self::default()
        }
    }
}

/// Weights for the catalog-driven "for you" recommender
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecommendWeights {
    /// Weight of the share of the catalog in the same category
    pub category: f64,
    /// Weight of the mean catalog share of the template's tags
    pub tag: f64,
    /// Multiplier applied once per already-picked template of the same category
    pub diversity_decay: f64,
    /// Bonus for the pro/free side that is behind in the current picks
    pub mix_bonus: f64,
    pub jitter: f64,
}

impl Default for RecommendWeights {
    fn default() -> Self {
        Self {
            category: 1.0,
            tag: 1.0,
            diversity_decay: 0.5,
            mix_bonus: 0.1,
            jitter: 0.25,
        }
    }
}

impl RecommendWeights {
    pub fn without_jitter() -> Self {
        Self {
            jitter: 0.0,
            ..Self::default()
        }
    }
}

/// Draws a tie-breaker in `[0, max)`.
///
/// Returns 0 without touching `rng` when `max` is not a positive finite number.
pub fn jitter<R: Rng + ?Sized>(rng: &mut R, max: f64) -> f64 {
    if max.is_finite() && max > 0.0 {
        rng.random_range(0.0..max)
    } else {
        0.0
    }
}
