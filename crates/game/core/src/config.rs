//! Engine constants and the per-level difficulty profile.

use crate::score::ScoringParams;

/// Board construction constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    /// Pairs drawn per board. The board holds twice this many slots.
    pub pairs_per_game: usize,
}

impl EngineConfig {
    /// 8 pairs = 16 cards, a 4x4 grid.
    pub const DEFAULT_PAIRS_PER_GAME: usize = 8;

    pub fn new() -> Self {
        Self {
            pairs_per_game: Self::DEFAULT_PAIRS_PER_GAME,
        }
    }

    pub fn with_pairs_per_game(pairs_per_game: usize) -> Self {
        Self { pairs_per_game }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-level configuration of timing, scoring, and shuffle/hint policy.
///
/// Supplied by the config collaborator and treated as an immutable value
/// object: a profile is resolved once at session start and held for the
/// session's duration. Config reloads never touch an in-flight session.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DifficultyProfile {
    pub level: u8,
    pub time_seconds: u32,
    pub base_points: u32,
    pub level_multiplier: u32,
    pub combo_bonus: f32,
    /// Fraction of the combo kept on a wrong match, clamped to 0..=1.
    /// 0 resets the combo, 1 preserves it.
    pub combo_penalty: f32,
    pub shuffle_enabled: bool,
    pub shuffle_frequency_seconds: u32,
    pub hints_enabled: bool,
}

impl DifficultyProfile {
    // Documented defaults applied when the remote row omits a field.
    pub const DEFAULT_TIME_SECONDS: u32 = 180;
    pub const DEFAULT_BASE_POINTS: u32 = 5;
    pub const DEFAULT_LEVEL_MULTIPLIER: u32 = 2;
    pub const DEFAULT_COMBO_BONUS: f32 = 1.5;
    pub const DEFAULT_COMBO_PENALTY: f32 = 0.5;

    /// The scoring weights the match machine needs, detached from the
    /// timing/shuffle fields.
    pub fn scoring(&self) -> ScoringParams {
        ScoringParams {
            base_points: self.base_points,
            level_multiplier: self.level_multiplier,
            combo_bonus: self.combo_bonus,
            combo_penalty: self.combo_penalty,
        }
    }
}

impl Default for DifficultyProfile {
    fn default() -> Self {
        Self {
            level: 1,
            time_seconds: Self::DEFAULT_TIME_SECONDS,
            base_points: Self::DEFAULT_BASE_POINTS,
            level_multiplier: Self::DEFAULT_LEVEL_MULTIPLIER,
            combo_bonus: Self::DEFAULT_COMBO_BONUS,
            combo_penalty: Self::DEFAULT_COMBO_PENALTY,
            shuffle_enabled: false,
            shuffle_frequency_seconds: 0,
            hints_enabled: true,
        }
    }
}
