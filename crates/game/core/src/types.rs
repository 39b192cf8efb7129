//! Card and board slot value types.
//!
//! Everything here is a plain value record: slots are addressed by index and
//! carry their own selection/visibility state, so rendering layers can project
//! the board without the board ever depending on them.

use std::fmt;

/// Join key between a fruit card and its clue text card.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PairCode(String);

impl PairCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PairCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PairCode {
    fn from(code: &str) -> Self {
        Self(code.to_owned())
    }
}

/// A single card as loaded for a session. Immutable once loaded.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Card {
    pub id: u32,
    pub code: PairCode,
    pub title: String,
    pub image: Option<String>,
}

/// One fruit card and the clue text card that answers it.
///
/// Built once per config load; the set of pairs is the pool the board
/// draws from.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardPair {
    pub fruit: Card,
    pub text: Card,
}

impl CardPair {
    /// The join code shared by both halves of the pair.
    pub fn code(&self) -> &PairCode {
        &self.fruit.code
    }
}

/// Read-only collection of valid pairs, shared by board generation and
/// refill. An empty or undersized pool is representable; insufficiency is
/// only an error at board-build time.
#[derive(Clone, Debug, Default)]
pub struct CardPool {
    pairs: Vec<CardPair>,
}

impl CardPool {
    pub fn new(pairs: Vec<CardPair>) -> Self {
        Self { pairs }
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CardPair> {
        self.pairs.get(index)
    }

    pub fn pairs(&self) -> &[CardPair] {
        &self.pairs
    }
}

/// Which half of a pair a board slot holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SlotKind {
    /// Clue card: starts hidden, revealed on selection.
    Text,
    /// Answer card: always face up. `revealed` has no meaning here.
    Fruit,
}

/// A board position holding one card instance plus visibility state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardSlot {
    pub index: usize,
    pub pair_code: PairCode,
    pub kind: SlotKind,
    pub card: Card,
    pub active: bool,
    pub revealed: bool,
}

impl BoardSlot {
    pub(crate) fn new(index: usize, kind: SlotKind, card: Card) -> Self {
        Self {
            index,
            pair_code: card.code.clone(),
            kind,
            card,
            active: true,
            revealed: false,
        }
    }

    pub fn is_text(&self) -> bool {
        self.kind == SlotKind::Text
    }

    pub fn is_fruit(&self) -> bool {
        self.kind == SlotKind::Fruit
    }
}
