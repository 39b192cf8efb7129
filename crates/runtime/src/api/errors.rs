//! Unified error types surfaced by the session runtime API.
//!
//! Fatal errors (config, board generation) halt progression and must be
//! explicitly retried by the caller; everything degradable (missing session
//! ticket, failed score submission) is logged inside the worker and never
//! surfaces here, so gameplay cannot be blocked once started.

use thiserror::Error;
use tokio::sync::oneshot;

pub type Result<T> = std::result::Result<T, SessionError>;

#[derive(Debug, Error)]
pub enum SessionError {
    /// The config collaborator returned zero active difficulty profiles.
    /// Fatal for session start; recoverable by retrying `load`.
    #[error("no active difficulty profiles available")]
    ConfigUnavailable,

    /// The config payload is served with the maintenance switch on.
    #[error("game is under maintenance")]
    Maintenance,

    /// The config fetch itself failed. Same recovery as
    /// [`SessionError::ConfigUnavailable`]: retry `load`.
    #[error("config fetch failed")]
    ConfigFetch(#[source] anyhow::Error),

    /// The selected level does not resolve in the registry. Local and
    /// non-fatal; re-prompt without mutating running state.
    #[error("difficulty level {level} is not configured")]
    UnknownLevel { level: u8 },

    /// `start()` was called before any difficulty was selected.
    #[error("no difficulty level selected")]
    NoLevelSelected,

    /// The pool cannot fill a board. Fatal to generation and surfaced as
    /// a blocking state, never as a silently smaller board.
    #[error("not enough card pairs: {available} available, {required} required")]
    InsufficientPairs { available: usize, required: usize },

    /// The builder was finalized without a config provider.
    #[error("runtime requires a config provider")]
    MissingConfigProvider,

    /// The intent requires a running session.
    #[error("no session is running")]
    NotRunning,

    /// The intent is rejected while the session is paused.
    #[error("session is paused")]
    Paused,

    /// Hints are disabled by the active difficulty profile.
    #[error("hints are disabled for this difficulty")]
    HintsDisabled,

    /// No hintable pair exists on the board right now.
    #[error("no hint pair available")]
    HintUnavailable,

    #[error("session worker command channel closed")]
    CommandChannelClosed,

    #[error("session worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("session worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),
}

impl From<match_core::BoardError> for SessionError {
    fn from(err: match_core::BoardError) -> Self {
        match err {
            match_core::BoardError::InsufficientPairs {
                available,
                required,
            } => SessionError::InsufficientPairs {
                available,
                required,
            },
        }
    }
}
