//! Read-only projections of session state for the presentation layer.
//!
//! Rendering is a pure function of these values; the engine state is never
//! reached through the UI. Hidden text slots carry no card content, so a
//! snapshot cannot leak an unrevealed clue.

use serde::Serialize;

use match_core::{BoardSlot, SessionStats, SlotKind};

/// Externally observable session lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Lifecycle {
    Unloaded,
    Loaded,
    Running,
    Ended,
}

/// One board slot as the UI may see it.
#[derive(Clone, Debug, Serialize)]
pub struct SlotView {
    pub index: usize,
    pub kind: SlotKind,
    pub active: bool,
    pub revealed: bool,
    /// Card title; `None` while a text slot is face down.
    pub title: Option<String>,
    /// Card image reference; `None` while a text slot is face down.
    pub image: Option<String>,
}

impl SlotView {
    pub(crate) fn project(slot: &BoardSlot) -> Self {
        let face_up = slot.kind == SlotKind::Fruit || slot.revealed;
        Self {
            index: slot.index,
            kind: slot.kind,
            active: slot.active,
            revealed: slot.revealed,
            title: face_up.then(|| slot.card.title.clone()),
            image: if face_up { slot.card.image.clone() } else { None },
        }
    }
}

/// Full observable state, refreshed after every transition.
#[derive(Clone, Debug, Serialize)]
pub struct SessionSnapshot {
    pub lifecycle: Lifecycle,
    pub score: u32,
    pub combo: u32,
    /// Remaining seconds on the countdown.
    pub timer: u32,
    pub is_paused: bool,
    pub is_locked: bool,
    pub stats: SessionStats,
    pub slots: Vec<SlotView>,
}

impl SessionSnapshot {
    pub(crate) fn idle(lifecycle: Lifecycle) -> Self {
        Self {
            lifecycle,
            score: 0,
            combo: 0,
            timer: 0,
            is_paused: false,
            is_locked: false,
            stats: SessionStats::default(),
            slots: Vec::new(),
        }
    }
}

/// End-of-session payload surfaced to the caller.
#[derive(Clone, Debug, Serialize)]
pub struct SessionResult {
    pub final_score: u32,
    pub stats: SessionStats,
    /// Seconds actually played.
    pub duration: u32,
    /// Reward returned by the score service, when the session was ticketed
    /// and the submission earned one.
    pub reward_code: Option<String>,
}
