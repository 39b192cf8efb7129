//! Scoring and combo arithmetic.
//!
//! All results are integers. The combo is a non-negative consecutive-success
//! counter that feeds the per-match bonus and is decayed, not reset, on
//! failure. How hard it decays is profile-driven (`combo_penalty`).

/// Scoring weights extracted from the active difficulty profile.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoringParams {
    pub base_points: u32,
    pub level_multiplier: u32,
    pub combo_bonus: f32,
    pub combo_penalty: f32,
}

/// Per-session counters surfaced in the end-of-game summary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionStats {
    pub correct: u32,
    pub wrong: u32,
    pub best_combo: u32,
}

/// Running score, combo, and stats for one session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreTrack {
    pub score: u32,
    pub combo: u32,
    pub stats: SessionStats,
}

impl ScoreTrack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a confirmed match.
    ///
    /// Awards `base_points + level_multiplier + floor(combo * combo_bonus)`
    /// with the combo as it stood *before* this match, then increments the
    /// combo. Returns the points granted.
    pub fn award(&mut self, params: &ScoringParams) -> u32 {
        let combo_bonus = (self.combo as f32 * params.combo_bonus).floor() as u32;
        let points = params.base_points + params.level_multiplier + combo_bonus;

        self.score += points;
        self.combo += 1;
        self.stats.correct += 1;
        self.stats.best_combo = self.stats.best_combo.max(self.combo);

        points
    }

    /// Apply a mismatch: `combo = floor(combo * combo_penalty)`.
    pub fn decay(&mut self, params: &ScoringParams) {
        self.combo = (self.combo as f32 * params.combo_penalty).floor() as u32;
        self.stats.wrong += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> ScoringParams {
        ScoringParams {
            base_points: 5,
            level_multiplier: 2,
            combo_bonus: 1.5,
            combo_penalty: 0.5,
        }
    }

    #[test]
    fn first_match_awards_base_plus_multiplier() {
        let mut track = ScoreTrack::new();
        let points = track.award(&params());
        assert_eq!(points, 7); // 5 + 2 + floor(0 * 1.5)
        assert_eq!(track.score, 7);
        assert_eq!(track.combo, 1);
        assert_eq!(track.stats.correct, 1);
        assert_eq!(track.stats.best_combo, 1);
    }

    #[test]
    fn combo_bonus_uses_prior_combo() {
        let mut track = ScoreTrack {
            combo: 4,
            ..Default::default()
        };
        let points = track.award(&params());
        assert_eq!(points, 13); // 5 + 2 + floor(4 * 1.5)
        assert_eq!(track.combo, 5);
        assert_eq!(track.stats.best_combo, 5);
    }

    #[test]
    fn mismatch_decays_with_floor() {
        let mut track = ScoreTrack {
            combo: 5,
            ..Default::default()
        };
        track.decay(&params());
        assert_eq!(track.combo, 2); // floor(5 * 0.5)
        assert_eq!(track.stats.wrong, 1);
    }

    #[test]
    fn penalty_zero_resets_combo() {
        let mut track = ScoreTrack {
            combo: 9,
            ..Default::default()
        };
        let p = ScoringParams {
            combo_penalty: 0.0,
            ..params()
        };
        track.decay(&p);
        assert_eq!(track.combo, 0);
    }

    #[test]
    fn penalty_one_preserves_combo() {
        let mut track = ScoreTrack {
            combo: 9,
            ..Default::default()
        };
        let p = ScoringParams {
            combo_penalty: 1.0,
            ..params()
        };
        track.decay(&p);
        assert_eq!(track.combo, 9);
    }

    #[test]
    fn best_combo_survives_decay() {
        let mut track = ScoreTrack::new();
        let p = params();
        for _ in 0..3 {
            track.award(&p);
        }
        track.decay(&p);
        assert_eq!(track.combo, 1);
        assert_eq!(track.stats.best_combo, 3);
    }
}
