//! Deterministic card-matching game logic shared across clients.
//!
//! `match-core` defines the canonical rules (board construction, the
//! selection/match state machine, scoring) and exposes pure APIs reused by
//! the runtime and offline tools. The crate performs no I/O and owns no
//! clocks: timers, display delays, and remote collaborators live in the
//! runtime layer.
pub mod board;
pub mod config;
pub mod matcher;
pub mod rng;
pub mod score;
pub mod types;

pub use board::{BoardEngine, BoardError};
pub use config::{DifficultyProfile, EngineConfig};
pub use matcher::{Evaluation, MatchStateMachine, MatchVerdict, SelectPhase, TextClick};
pub use rng::{PcgRng, RngOracle, compute_seed};
pub use score::{ScoreTrack, ScoringParams, SessionStats};
pub use types::{BoardSlot, Card, CardPair, CardPool, PairCode, SlotKind};
