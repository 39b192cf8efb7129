//! Async session runtime for the card-matching game.
//!
//! The runtime owns the clocks and the remote collaborators that the pure
//! `match-core` engine deliberately lacks. A single worker task serializes
//! every state transition; callers interact through a cloneable
//! [`SessionHandle`] and observe progress via snapshots and the topic-based
//! event bus.
//!
//! ```no_run
//! use match_runtime::{SessionRuntime, StaticConfigProvider};
//!
//! # async fn demo() -> match_runtime::Result<()> {
//! let runtime = SessionRuntime::builder()
//!     .config_provider(StaticConfigProvider)
//!     .build()?;
//! let handle = runtime.handle();
//!
//! handle.load(false).await?;
//! handle.select_difficulty(1).await?;
//! handle.start().await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod events;
pub mod runtime;

mod cache;
mod workers;

pub use api::{
    ConfigProvider, FinishOutcome, FinishReport, Lifecycle, OfflineSessionBackend, Result,
    SessionBackend, SessionError, SessionHandle, SessionResult, SessionSnapshot, SessionTicket,
    SlotView, StaticConfigProvider,
};
pub use events::{BoardEvent, Event, EventBus, SessionEvent, TimerEvent, Topic};
pub use runtime::{RuntimeConfig, SessionRuntime, SessionRuntimeBuilder};
