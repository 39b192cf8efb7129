//! Card pool derivation from the raw card collections.

use match_core::{Card, CardPair, CardPool, PairCode};
use tracing::debug;

use crate::records::{FruitCardRecord, TextCardRecord};

/// Derive the valid (fruit, text) pairs from the two raw collections.
///
/// For each active fruit card, the first active text card whose
/// `correct_fruit_code` matches is taken as its clue. Fruit cards without
/// a clue (and clue cards without a fruit) are dropped silently: the data
/// is admin-authored and partially broken rows must not block play.
///
/// An empty or undersized pool is a valid result; the board surfaces
/// insufficiency at generation time.
pub fn build_card_pool(fruit_cards: &[FruitCardRecord], text_cards: &[TextCardRecord]) -> CardPool {
    let mut pairs = Vec::new();

    for fruit in fruit_cards.iter().filter(|f| f.is_active) {
        let text = text_cards.iter().find(|t| {
            t.is_active && t.correct_fruit_code.as_deref() == Some(fruit.code.as_str())
        });

        match text {
            Some(text) => {
                let code = PairCode::new(fruit.code.clone());
                pairs.push(CardPair {
                    fruit: Card {
                        id: fruit.id,
                        code: code.clone(),
                        title: fruit.title.clone(),
                        image: fruit.image.clone(),
                    },
                    // The clue card adopts the fruit's code as its join key.
                    text: Card {
                        id: text.id,
                        code,
                        title: text.title.clone(),
                        image: text.image.clone(),
                    },
                });
            }
            None => {
                debug!(code = %fruit.code, "fruit card has no matching text card, dropping");
            }
        }
    }

    CardPool::new(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fruit(id: u32, code: &str, active: bool) -> FruitCardRecord {
        FruitCardRecord {
            id,
            code: code.to_owned(),
            title: format!("Fruit {code}"),
            image: None,
            is_active: active,
            order: id,
        }
    }

    fn text(id: u32, target: Option<&str>, active: bool) -> TextCardRecord {
        TextCardRecord {
            id,
            title: format!("Clue {id}"),
            image: None,
            is_active: active,
            correct_fruit_code: target.map(str::to_owned),
            order: id,
        }
    }

    #[test]
    fn pairs_join_on_correct_fruit_code() {
        let pool = build_card_pool(
            &[fruit(1, "apple", true), fruit(2, "pear", true)],
            &[text(10, Some("pear"), true), text(11, Some("apple"), true)],
        );
        assert_eq!(pool.len(), 2);
        for pair in pool.pairs() {
            assert_eq!(pair.fruit.code, pair.text.code);
        }
    }

    #[test]
    fn unmatched_and_inactive_cards_are_dropped_silently() {
        let pool = build_card_pool(
            &[
                fruit(1, "apple", true),
                fruit(2, "pear", false),
                fruit(3, "plum", true),
            ],
            &[
                text(10, Some("apple"), true),
                text(11, Some("pear"), true),
                text(12, Some("plum"), false),
                text(13, None, true),
            ],
        );
        // pear fruit inactive, plum clue inactive: only apple survives.
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.pairs()[0].code().as_str(), "apple");
    }

    #[test]
    fn empty_input_builds_empty_pool() {
        let pool = build_card_pool(&[], &[]);
        assert!(pool.is_empty());
    }
}
