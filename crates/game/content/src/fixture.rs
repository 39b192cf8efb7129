//! Built-in sample content for tests, demos, and offline development.
//!
//! Mirrors the dev-mode dataset the game client ships: twelve fruit pairs
//! and three difficulty levels of increasing pressure.

use crate::records::{
    ConfigPayload, DifficultyRecord, FruitCardRecord, GlobalConfigRecord, TextCardRecord,
};

const FRUIT_NAMES: [&str; 12] = [
    "Apple",
    "Banana",
    "Orange",
    "Mango",
    "Peach",
    "Lemon",
    "Strawberry",
    "Kiwi",
    "Grape",
    "Watermelon",
    "Pineapple",
    "Cherry",
];

/// A complete config payload with sample cards and three difficulty rows.
pub fn sample_payload() -> ConfigPayload {
    let mut fruit_cards = Vec::with_capacity(FRUIT_NAMES.len());
    let mut text_cards = Vec::with_capacity(FRUIT_NAMES.len());

    for (i, name) in FRUIT_NAMES.iter().enumerate() {
        let code = format!("f{i}");
        fruit_cards.push(FruitCardRecord {
            id: i as u32,
            code: code.clone(),
            title: (*name).to_owned(),
            image: None,
            is_active: true,
            order: i as u32,
        });
        text_cards.push(TextCardRecord {
            id: 100 + i as u32,
            title: format!("This is {name}"),
            image: None,
            is_active: true,
            correct_fruit_code: Some(code),
            order: i as u32,
        });
    }

    ConfigPayload {
        config: GlobalConfigRecord::default(),
        fruit_cards,
        text_cards,
        difficulty_settings: vec![
            DifficultyRecord {
                level: 1,
                time_seconds: Some(180),
                base_points: Some(5),
                level_multiplier: Some(2),
                combo_bonus: Some(1.5),
                combo_penalty: Some(0.5),
                shuffle_enabled: Some(false),
                hints_enabled: Some(true),
                ..Default::default()
            },
            DifficultyRecord {
                level: 2,
                time_seconds: Some(150),
                base_points: Some(15),
                level_multiplier: Some(4),
                combo_bonus: Some(1.5),
                combo_penalty: Some(0.5),
                shuffle_enabled: Some(true),
                shuffle_frequency: Some(15),
                hints_enabled: Some(false),
                ..Default::default()
            },
            DifficultyRecord {
                level: 3,
                time_seconds: Some(120),
                base_points: Some(20),
                level_multiplier: Some(6),
                combo_bonus: Some(1.5),
                combo_penalty: Some(0.5),
                shuffle_enabled: Some(true),
                shuffle_frequency: Some(8),
                hints_enabled: Some(false),
                ..Default::default()
            },
        ],
    }
}
