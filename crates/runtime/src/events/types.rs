//! Event types for each topic.

use serde::Serialize;

use match_core::MatchVerdict;

use crate::api::snapshot::SessionResult;

/// Session lifecycle events.
#[derive(Clone, Debug, Serialize)]
pub enum SessionEvent {
    /// A session started with the given level and countdown length.
    Started {
        level: u8,
        time_seconds: u32,
        /// False when no remote ticket was obtained: the session plays
        /// out unscored.
        scored: bool,
    },
    Paused,
    Resumed,
    /// The session finished (timer expiry, forfeit, or supersession).
    Ended(SessionResult),
}

/// Board and match events.
#[derive(Clone, Debug, Serialize)]
pub enum BoardEvent {
    /// A text slot was turned face up.
    SlotRevealed { index: usize },
    /// A text slot was turned face down again.
    SlotHidden { index: usize },
    /// A selection pair was evaluated.
    MatchResolved {
        verdict: MatchVerdict,
        text: usize,
        fruit: usize,
        /// Points granted; 0 on a mismatch.
        points: u32,
        combo: u32,
    },
    /// A matched pair of slots was replaced from the pool.
    Refilled { text: usize, fruit: usize },
    /// Active slots were reordered. `mapping[old] = new`.
    Shuffled { mapping: Vec<usize> },
    /// A hint was granted for this text/fruit pair.
    HintShown { text: usize, fruit: usize },
}

/// Countdown events, one per elapsed second.
#[derive(Clone, Debug, Serialize)]
pub struct TimerEvent {
    pub remaining: u32,
}
