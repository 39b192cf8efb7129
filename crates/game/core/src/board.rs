//! Board construction, refill, and shuffle.
//!
//! The [`BoardEngine`] owns the slot array and is the only writer of slot
//! state. Every active Text slot has exactly one active Fruit slot sharing
//! its pair code: the board is always a disjoint union of complete,
//! unmatched pairs among active slots.

use std::collections::HashSet;

use thiserror::Error;

use crate::config::EngineConfig;
use crate::rng::{PcgRng, RngOracle, compute_seed};
use crate::types::{BoardSlot, CardPool, PairCode, SlotKind};

// Draw-site contexts for seed mixing.
const CTX_SAMPLE: u32 = 0;
const CTX_SHUFFLE: u32 = 1;
const CTX_REFILL: u32 = 2;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// The pool is smaller than the board. Generation fails whole: a
    /// silently smaller board would corrupt the scoring contract.
    #[error("pool holds {available} pairs but the board needs {required}")]
    InsufficientPairs { available: usize, required: usize },
}

/// Grid of card slots plus the deterministic draw state that fills it.
pub struct BoardEngine<R: RngOracle = PcgRng> {
    slots: Vec<BoardSlot>,
    pairs_per_game: usize,
    rng: R,
    seed: u64,
    draws: u64,
}

impl BoardEngine<PcgRng> {
    pub fn new(config: &EngineConfig, seed: u64) -> Self {
        Self::with_rng(config, seed, PcgRng)
    }
}

impl<R: RngOracle> BoardEngine<R> {
    pub fn with_rng(config: &EngineConfig, seed: u64, rng: R) -> Self {
        Self {
            slots: Vec::new(),
            pairs_per_game: config.pairs_per_game,
            rng,
            seed,
            draws: 0,
        }
    }

    /// Next random index in `0..len`, advancing the draw counter.
    fn next_index(&mut self, len: usize, context: u32) -> usize {
        let seed = compute_seed(self.seed, self.draws, context);
        self.draws += 1;
        self.rng.index(seed, len)
    }

    /// Fisher-Yates over `items`, one draw per swap.
    fn shuffle_indices(&mut self, items: &mut [usize], context: u32) {
        for i in (1..items.len()).rev() {
            let j = self.next_index(i + 1, context);
            items.swap(i, j);
        }
    }

    /// Build a fresh board: sample `pairs_per_game` pairs without
    /// replacement, expand each into one Text and one Fruit slot, and
    /// shuffle the slot order uniformly.
    ///
    /// Fails without touching the existing slots when the pool is too
    /// small; the caller must present a blocking error state.
    pub fn generate(&mut self, pool: &CardPool) -> Result<(), BoardError> {
        let required = self.pairs_per_game;
        let available = pool.len();
        if available < required {
            return Err(BoardError::InsufficientPairs {
                available,
                required,
            });
        }

        let mut pair_indices: Vec<usize> = (0..available).collect();
        self.shuffle_indices(&mut pair_indices, CTX_SAMPLE);
        pair_indices.truncate(required);

        let mut cards = Vec::with_capacity(required * 2);
        for pair_index in pair_indices {
            if let Some(pair) = pool.get(pair_index) {
                cards.push((SlotKind::Text, pair.text.clone()));
                cards.push((SlotKind::Fruit, pair.fruit.clone()));
            }
        }

        let mut order: Vec<usize> = (0..cards.len()).collect();
        self.shuffle_indices(&mut order, CTX_SHUFFLE);

        self.slots = order
            .into_iter()
            .enumerate()
            .map(|(index, card_index)| {
                let (kind, card) = cards[card_index].clone();
                BoardSlot::new(index, kind, card)
            })
            .collect();

        Ok(())
    }

    pub fn slots(&self) -> &[BoardSlot] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Option<&BoardSlot> {
        self.slots.get(index)
    }

    pub fn is_generated(&self) -> bool {
        !self.slots.is_empty()
    }

    /// Reveal a Text slot. No-op for Fruit slots, which are always
    /// face up.
    pub fn reveal(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index) {
            if slot.kind == SlotKind::Text {
                slot.revealed = true;
            }
        }
    }

    /// Hide a Text slot again. No-op for Fruit slots.
    pub fn hide(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index) {
            if slot.kind == SlotKind::Text {
                slot.revealed = false;
            }
        }
    }

    /// Retire both slots of a confirmed match.
    pub fn deactivate_pair(&mut self, text_index: usize, fruit_index: usize) {
        for index in [text_index, fruit_index] {
            if let Some(slot) = self.slots.get_mut(index) {
                slot.active = false;
            }
        }
    }

    /// Replace a matched pair of slots with a fresh draw from the pool.
    ///
    /// Prefers a pair whose code is not in `exclude` (codes still visible
    /// elsewhere on the board). When every pool pair is excluded, falls
    /// back to the whole pool: on-board duplicates are then permitted.
    /// This fallback is intentional, not a bug.
    ///
    /// Returns the drawn pair code, or `None` for an empty pool.
    pub fn refill(
        &mut self,
        text_index: usize,
        fruit_index: usize,
        exclude: &HashSet<PairCode>,
        pool: &CardPool,
    ) -> Option<PairCode> {
        if pool.is_empty() {
            return None;
        }

        let mut candidates: Vec<usize> = (0..pool.len())
            .filter(|&i| {
                pool.get(i)
                    .map(|pair| !exclude.contains(pair.code()))
                    .unwrap_or(false)
            })
            .collect();
        if candidates.is_empty() {
            candidates = (0..pool.len()).collect();
        }

        let chosen = candidates[self.next_index(candidates.len(), CTX_REFILL)];
        let pair = pool.get(chosen)?.clone();

        if let Some(slot) = self.slots.get_mut(text_index) {
            *slot = BoardSlot::new(text_index, SlotKind::Text, pair.text.clone());
        }
        if let Some(slot) = self.slots.get_mut(fruit_index) {
            *slot = BoardSlot::new(fruit_index, SlotKind::Fruit, pair.fruit.clone());
        }

        Some(pair.code().clone())
    }

    /// Reorder the slots uniformly and reassign indices contiguously.
    ///
    /// Never changes which pairs are active, only their layout. Returns the
    /// old-index → new-index mapping so selection state held elsewhere can
    /// be remapped.
    pub fn shuffle_active(&mut self) -> Vec<usize> {
        let len = self.slots.len();
        if len < 2 {
            return (0..len).collect();
        }

        // perm[new_pos] = old_pos
        let mut perm: Vec<usize> = (0..len).collect();
        self.shuffle_indices(&mut perm, CTX_SHUFFLE);

        let mut mapping = vec![0usize; len];
        let reordered: Vec<BoardSlot> = perm
            .iter()
            .enumerate()
            .map(|(new_pos, &old_pos)| {
                mapping[old_pos] = new_pos;
                let mut slot = self.slots[old_pos].clone();
                slot.index = new_pos;
                slot
            })
            .collect();

        self.slots = reordered;
        mapping
    }

    /// First `(text, fruit)` active pair sharing a code, deterministic by
    /// slot order. Drives the hint affordance.
    pub fn find_hint_pair(&self) -> Option<(usize, usize)> {
        for text in self.slots.iter().filter(|s| s.is_text() && s.active) {
            let fruit = self
                .slots
                .iter()
                .find(|s| s.is_fruit() && s.active && s.pair_code == text.pair_code);
            if let Some(fruit) = fruit {
                return Some((text.index, fruit.index));
            }
        }
        None
    }

    /// Codes of all pairs still active on the board; the refill
    /// exclusion set.
    pub fn active_pair_codes(&self) -> HashSet<PairCode> {
        self.slots
            .iter()
            .filter(|s| s.active)
            .map(|s| s.pair_code.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Card, CardPair};

    fn test_pool(pairs: usize) -> CardPool {
        let pairs = (0..pairs)
            .map(|i| {
                let code = PairCode::new(format!("f{i}"));
                CardPair {
                    fruit: Card {
                        id: i as u32,
                        code: code.clone(),
                        title: format!("Fruit {i}"),
                        image: None,
                    },
                    text: Card {
                        id: 100 + i as u32,
                        code,
                        title: format!("This is fruit {i}"),
                        image: None,
                    },
                }
            })
            .collect();
        CardPool::new(pairs)
    }

    fn engine(pairs_per_game: usize, seed: u64) -> BoardEngine {
        BoardEngine::new(&EngineConfig::with_pairs_per_game(pairs_per_game), seed)
    }

    fn assert_pairs_complete(board: &BoardEngine) {
        let mut texts: Vec<&PairCode> = board
            .slots()
            .iter()
            .filter(|s| s.active && s.is_text())
            .map(|s| &s.pair_code)
            .collect();
        let mut fruits: Vec<&PairCode> = board
            .slots()
            .iter()
            .filter(|s| s.active && s.is_fruit())
            .map(|s| &s.pair_code)
            .collect();
        texts.sort();
        fruits.sort();
        assert_eq!(texts, fruits, "active text/fruit codes must pair up");
    }

    #[test]
    fn generate_fails_one_pair_short() {
        let mut board = engine(8, 1);
        let err = board.generate(&test_pool(7)).unwrap_err();
        assert_eq!(
            err,
            BoardError::InsufficientPairs {
                available: 7,
                required: 8
            }
        );
        assert!(!board.is_generated());
    }

    #[test]
    fn generate_succeeds_at_exact_size() {
        let mut board = engine(8, 1);
        board.generate(&test_pool(8)).unwrap();
        assert_eq!(board.slots().len(), 16);
        assert!(board.slots().iter().all(|s| s.active));
        assert!(
            board
                .slots()
                .iter()
                .filter(|s| s.is_text())
                .all(|s| !s.revealed)
        );
        assert_pairs_complete(&board);
    }

    #[test]
    fn generate_is_deterministic_for_a_seed() {
        let pool = test_pool(12);
        let mut a = engine(8, 42);
        let mut b = engine(8, 42);
        a.generate(&pool).unwrap();
        b.generate(&pool).unwrap();

        let layout = |board: &BoardEngine| {
            board
                .slots()
                .iter()
                .map(|s| (s.kind, s.pair_code.clone()))
                .collect::<Vec<_>>()
        };
        assert_eq!(layout(&a), layout(&b));

        let mut c = engine(8, 43);
        c.generate(&pool).unwrap();
        assert_ne!(layout(&a), layout(&c), "different seed, different layout");
    }

    #[test]
    fn refill_prefers_pairs_not_on_board() {
        let pool = test_pool(9);
        let mut board = engine(8, 7);
        board.generate(&pool).unwrap();

        let on_board = board.active_pair_codes();
        let off_board: Vec<PairCode> = pool
            .pairs()
            .iter()
            .map(|p| p.code().clone())
            .filter(|c| !on_board.contains(c))
            .collect();
        assert_eq!(off_board.len(), 1);

        let (text, fruit) = board.find_hint_pair().unwrap();
        board.deactivate_pair(text, fruit);
        let exclude = board.active_pair_codes();
        let drawn = board.refill(text, fruit, &exclude, &pool).unwrap();
        assert_eq!(drawn, off_board[0]);
        assert_pairs_complete(&board);
    }

    #[test]
    fn refill_falls_back_to_duplicates_when_pool_exhausted() {
        let pool = test_pool(2);
        let mut board = engine(2, 3);
        board.generate(&pool).unwrap();

        let (text, fruit) = board.find_hint_pair().unwrap();
        board.deactivate_pair(text, fruit);

        // Pretend every pool code is still visible elsewhere: the engine
        // must reuse one rather than leave the slots dead.
        let exclude: HashSet<PairCode> = pool.pairs().iter().map(|p| p.code().clone()).collect();
        let drawn = board.refill(text, fruit, &exclude, &pool);
        assert!(drawn.is_some());

        let text_slot = board.slot(text).unwrap();
        let fruit_slot = board.slot(fruit).unwrap();
        assert!(text_slot.active && fruit_slot.active);
        assert!(!text_slot.revealed);
        assert_eq!(text_slot.pair_code, fruit_slot.pair_code);
        assert_pairs_complete(&board);
    }

    #[test]
    fn shuffle_reassigns_contiguous_indices_and_reports_mapping() {
        let pool = test_pool(8);
        let mut board = engine(8, 11);
        board.generate(&pool).unwrap();

        let before: Vec<PairCode> = board
            .slots()
            .iter()
            .map(|s| s.pair_code.clone())
            .collect();
        let mapping = board.shuffle_active();

        for (i, slot) in board.slots().iter().enumerate() {
            assert_eq!(slot.index, i);
        }
        for (old, &new) in mapping.iter().enumerate() {
            assert_eq!(board.slot(new).unwrap().pair_code, before[old]);
        }
        assert_pairs_complete(&board);
    }

    #[test]
    fn hint_pair_is_first_in_slot_order() {
        let pool = test_pool(8);
        let mut board = engine(8, 5);
        board.generate(&pool).unwrap();

        let (text, fruit) = board.find_hint_pair().unwrap();
        let first_text = board
            .slots()
            .iter()
            .find(|s| s.is_text() && s.active)
            .unwrap();
        assert_eq!(text, first_text.index);
        assert_eq!(
            board.slot(fruit).unwrap().pair_code,
            first_text.pair_code
        );

        // Retiring the hinted pair moves the hint to the next text slot.
        board.deactivate_pair(text, fruit);
        let (next_text, _) = board.find_hint_pair().unwrap();
        assert_ne!(next_text, text);
    }

    #[test]
    fn reveal_and_hide_only_touch_text_slots() {
        let pool = test_pool(8);
        let mut board = engine(8, 9);
        board.generate(&pool).unwrap();

        let text = board
            .slots()
            .iter()
            .find(|s| s.is_text())
            .map(|s| s.index)
            .unwrap();
        let fruit = board
            .slots()
            .iter()
            .find(|s| s.is_fruit())
            .map(|s| s.index)
            .unwrap();

        board.reveal(text);
        assert!(board.slot(text).unwrap().revealed);
        board.hide(text);
        assert!(!board.slot(text).unwrap().revealed);

        board.reveal(fruit);
        assert!(!board.slot(fruit).unwrap().revealed);
    }
}
