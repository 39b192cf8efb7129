//! Remotely configured content and its builders.
//!
//! This crate defines the wire shapes the config collaborator serves
//! (card collections, difficulty rows, global switches) and derives the
//! read-only structures the session runtime consumes:
//! - [`pool::build_card_pool`] → [`match_core::CardPool`]
//! - [`registry::DifficultyRegistry`] keyed by level
//!
//! Content is rebuilt per config load and never mutated in place; a
//! running session keeps the values it resolved at start.

pub mod fixture;
pub mod pool;
pub mod records;
pub mod registry;

pub use fixture::sample_payload;
pub use pool::build_card_pool;
pub use records::{
    ConfigPayload, DifficultyRecord, FruitCardRecord, GlobalConfigRecord, TextCardRecord,
};
pub use registry::DifficultyRegistry;
