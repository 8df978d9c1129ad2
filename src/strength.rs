//! Heuristic strength of a [`GenerationConfig`].
//!
//! This scores the *options*, not a particular password: longer lengths and more character classes
//! score higher. It is not an entropy estimate.

use std::fmt;

use serde::Serialize;

use crate::GenerationConfig;

const MAX_RAW_SCORE: u8 = 6;
const MAX_SCORE: u8 = 4;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize)]
pub enum StrengthTier {
    #[serde(rename = "Very Weak")]
    VeryWeak,
    Weak,
    Moderate,
    Strong,
    #[serde(rename = "Very Strong")]
    VeryStrong,
}

impl StrengthTier {
    fn from_score(score: u8) -> StrengthTier {
        match score {
            0 => StrengthTier::VeryWeak,
            1 => StrengthTier::Weak,
            2 => StrengthTier::Moderate,
            3 => StrengthTier::Strong,
            _ => StrengthTier::VeryStrong,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StrengthTier::VeryWeak => "Very Weak",
            StrengthTier::Weak => "Weak",
            StrengthTier::Moderate => "Moderate",
            StrengthTier::Strong => "Strong",
            StrengthTier::VeryStrong => "Very Strong",
        }
    }
}

impl fmt::Display for StrengthTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct StrengthResult {
    /// `0..=4`
    pub score: u8,
    #[serde(rename = "label")]
    pub tier: StrengthTier,
}

impl StrengthResult {
    pub fn label(&self) -> &'static str {
        self.tier.label()
    }

    /// How full a strength meter should be, in `0.0..=1.0`.
    pub fn fraction(&self) -> f64 {
        f64::from(self.score) / f64::from(MAX_SCORE)
    }
}

/// Score `config`.
///
/// One point each for a length of at least 8, a length of at least 12, and every enabled class,
/// for at most 6; that is scaled down to `0..=4`, rounding down.
pub fn score(config: &GenerationConfig) -> StrengthResult {
    let raw = [
        config.length >= 8,
        config.length >= 12,
        config.use_uppercase,
        config.use_lowercase,
        config.use_digits,
        config.use_symbols,
    ]
    .into_iter()
    .filter(|&satisfied| satisfied)
    .count() as u8;

    let score = (raw * MAX_SCORE / MAX_RAW_SCORE).min(MAX_SCORE);
    StrengthResult {
        score,
        tier: StrengthTier::from_score(score),
    }
}
