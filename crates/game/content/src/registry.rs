//! Difficulty registry built from admin-authored rows.

use std::collections::HashMap;

use match_core::DifficultyProfile;
use tracing::debug;

use crate::records::DifficultyRecord;

/// Immutable map of level → profile for one config load.
///
/// Inactive rows are filtered out and missing numeric fields take the
/// documented defaults, so a sparse admin row still yields a complete
/// profile. When the same level appears twice the later row wins.
#[derive(Clone, Debug, Default)]
pub struct DifficultyRegistry {
    profiles: HashMap<u8, DifficultyProfile>,
}

impl DifficultyRegistry {
    pub fn build(records: Vec<DifficultyRecord>) -> Self {
        let mut profiles = HashMap::new();

        for record in records {
            if !record.is_active {
                debug!(level = record.level, "skipping inactive difficulty row");
                continue;
            }
            profiles.insert(record.level, Self::profile_from(record));
        }

        Self { profiles }
    }

    fn profile_from(record: DifficultyRecord) -> DifficultyProfile {
        let shuffle_frequency_seconds = record.shuffle_frequency.unwrap_or(0);
        DifficultyProfile {
            level: record.level,
            time_seconds: record
                .time_seconds
                .unwrap_or(DifficultyProfile::DEFAULT_TIME_SECONDS),
            base_points: record
                .base_points
                .unwrap_or(DifficultyProfile::DEFAULT_BASE_POINTS),
            level_multiplier: record
                .level_multiplier
                .unwrap_or(DifficultyProfile::DEFAULT_LEVEL_MULTIPLIER),
            combo_bonus: record
                .combo_bonus
                .unwrap_or(DifficultyProfile::DEFAULT_COMBO_BONUS),
            combo_penalty: record
                .combo_penalty
                .unwrap_or(DifficultyProfile::DEFAULT_COMBO_PENALTY)
                .clamp(0.0, 1.0),
            shuffle_enabled: record.shuffle_enabled.unwrap_or(false),
            shuffle_frequency_seconds,
            hints_enabled: record.hints_enabled.unwrap_or(true),
        }
    }

    pub fn resolve(&self, level: u8) -> Option<&DifficultyProfile> {
        self.profiles.get(&level)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Zero active profiles is the config-unavailable condition: the
    /// runtime refuses to start a session from an empty registry.
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn levels(&self) -> Vec<u8> {
        let mut levels: Vec<u8> = self.profiles.keys().copied().collect();
        levels.sort_unstable();
        levels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparse_row_gets_documented_defaults() {
        let registry = DifficultyRegistry::build(vec![DifficultyRecord {
            level: 1,
            ..Default::default()
        }]);

        let profile = registry.resolve(1).unwrap();
        assert_eq!(profile.time_seconds, 180);
        assert_eq!(profile.base_points, 5);
        assert_eq!(profile.level_multiplier, 2);
        assert_eq!(profile.combo_bonus, 1.5);
        assert_eq!(profile.combo_penalty, 0.5);
        assert!(!profile.shuffle_enabled);
        assert_eq!(profile.shuffle_frequency_seconds, 0);
        assert!(profile.hints_enabled);
    }

    #[test]
    fn inactive_rows_are_filtered() {
        let registry = DifficultyRegistry::build(vec![
            DifficultyRecord {
                level: 1,
                ..Default::default()
            },
            DifficultyRecord {
                level: 2,
                is_active: false,
                ..Default::default()
            },
        ]);
        assert_eq!(registry.len(), 1);
        assert!(registry.resolve(2).is_none());
    }

    #[test]
    fn combo_penalty_is_clamped_to_unit_range() {
        let registry = DifficultyRegistry::build(vec![DifficultyRecord {
            level: 3,
            combo_penalty: Some(2.5),
            ..Default::default()
        }]);
        assert_eq!(registry.resolve(3).unwrap().combo_penalty, 1.0);
    }

    #[test]
    fn later_duplicate_level_wins() {
        let registry = DifficultyRegistry::build(vec![
            DifficultyRecord {
                level: 1,
                base_points: Some(5),
                ..Default::default()
            },
            DifficultyRecord {
                level: 1,
                base_points: Some(50),
                ..Default::default()
            },
        ]);
        assert_eq!(registry.resolve(1).unwrap().base_points, 50);
    }

    #[test]
    fn empty_build_reports_unavailable() {
        let registry = DifficultyRegistry::build(vec![]);
        assert!(registry.is_empty());
        assert!(registry.levels().is_empty());
    }
}
