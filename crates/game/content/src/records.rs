//! Serde records for the config collaborator's payload.
//!
//! Field names follow the remote API. Two server generations spelled some
//! fields differently (`level` vs `difficulty_level`, `combo_bonus` vs
//! `combo_bonus_per_match`); aliases accept both. Missing numeric fields
//! are represented as `None` and defaulted by the registry builder, so a
//! sparse row is valid input rather than a parse error.

use serde::{Deserialize, Serialize};

/// Everything one config fetch returns.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ConfigPayload {
    #[serde(default)]
    pub config: GlobalConfigRecord,
    #[serde(default)]
    pub fruit_cards: Vec<FruitCardRecord>,
    #[serde(default)]
    pub text_cards: Vec<TextCardRecord>,
    #[serde(default)]
    pub difficulty_settings: Vec<DifficultyRecord>,
}

impl ConfigPayload {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Global, non-per-level switches.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GlobalConfigRecord {
    #[serde(default)]
    pub maintenance_mode: bool,
    /// Overrides every profile's countdown length when set.
    #[serde(default)]
    pub timer_seconds: Option<u32>,
    /// Config revision served, for diagnostics only.
    #[serde(default)]
    pub version: Option<String>,
}

/// An answer card: the always-visible half of a pair.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FruitCardRecord {
    pub id: u32,
    pub code: String,
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub order: u32,
}

/// A clue card, joined to its answer via `correct_fruit_code`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TextCardRecord {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub correct_fruit_code: Option<String>,
    #[serde(default)]
    pub order: u32,
}

/// One admin-authored difficulty row. All gameplay numbers are optional;
/// the registry fills in the documented defaults.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DifficultyRecord {
    #[serde(alias = "difficulty_level")]
    pub level: u8,
    #[serde(default)]
    pub time_seconds: Option<u32>,
    #[serde(default)]
    pub base_points: Option<u32>,
    #[serde(default)]
    pub level_multiplier: Option<u32>,
    #[serde(default, alias = "combo_bonus_per_match")]
    pub combo_bonus: Option<f32>,
    #[serde(default, alias = "combo_penalty_on_wrong")]
    pub combo_penalty: Option<f32>,
    #[serde(default)]
    pub shuffle_enabled: Option<bool>,
    #[serde(default, alias = "shuffle_frequency_seconds")]
    pub shuffle_frequency: Option<u32>,
    #[serde(default)]
    pub hints_enabled: Option<bool>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub order: u32,
}

impl Default for DifficultyRecord {
    fn default() -> Self {
        Self {
            level: 0,
            time_seconds: None,
            base_points: None,
            level_multiplier: None,
            combo_bonus: None,
            combo_penalty: None,
            shuffle_enabled: None,
            shuffle_frequency: None,
            hints_enabled: None,
            is_active: true,
            order: 0,
        }
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_parses_both_server_spellings() {
        let json = r#"{
            "config": {"maintenance_mode": false, "timer_seconds": 90, "promo_score_threshold": 100},
            "fruit_cards": [{"id": 1, "code": "apple", "title": "Apple"}],
            "text_cards": [{"id": 2, "title": "Red and round", "correct_fruit_code": "apple"}],
            "difficulty_settings": [
                {"level": 1, "time_seconds": 180, "combo_bonus": 1.5},
                {"difficulty_level": 2, "combo_bonus_per_match": 2.0, "shuffle_frequency_seconds": 10}
            ]
        }"#;

        let payload = ConfigPayload::from_json(json).unwrap();
        assert_eq!(payload.config.timer_seconds, Some(90));
        assert_eq!(payload.fruit_cards.len(), 1);
        assert!(payload.fruit_cards[0].is_active, "is_active defaults true");
        assert_eq!(payload.difficulty_settings[0].level, 1);
        assert_eq!(payload.difficulty_settings[1].level, 2);
        assert_eq!(payload.difficulty_settings[1].combo_bonus, Some(2.0));
        assert_eq!(payload.difficulty_settings[1].shuffle_frequency, Some(10));
        assert_eq!(payload.difficulty_settings[0].base_points, None);
    }

    #[test]
    fn empty_payload_is_valid() {
        let payload = ConfigPayload::from_json("{}").unwrap();
        assert!(payload.fruit_cards.is_empty());
        assert!(payload.difficulty_settings.is_empty());
    }
}
