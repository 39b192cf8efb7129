//! Asynchronous abstractions over the two remote collaborators.
//!
//! The runtime never talks to a transport directly: the config service and
//! the session/score service are injected as trait objects, so production
//! wiring, offline play, and test fixtures all share one code path.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use match_content::{ConfigPayload, sample_payload};

/// Source of game configuration: card collections and difficulty rows.
#[async_trait]
pub trait ConfigProvider: Send + Sync {
    async fn fetch_config(&self) -> anyhow::Result<ConfigPayload>;
}

/// Ticket handed out when a remote session is opened.
///
/// `session_id` may be absent: the session then runs "offline" and its
/// score is never submitted, which is a degradation rather than an error.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SessionTicket {
    pub session_id: Option<String>,
}

/// Final stats submitted when a session ends.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FinishReport {
    pub session_id: String,
    pub score_balls: u32,
    pub duration: u32,
    pub correct_count: u32,
    pub wrong_count: u32,
    pub best_combo: u32,
}

/// What the score service returns for a finished session.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FinishOutcome {
    pub new_promo_code: Option<String>,
}

/// Remote session/score service.
#[async_trait]
pub trait SessionBackend: Send + Sync {
    /// Open a scored session. `mode` is forwarded verbatim ("ranked" in
    /// normal play).
    async fn start_session(&self, mode: &str) -> anyhow::Result<SessionTicket>;

    /// Submit the final stats for a ticketed session.
    async fn finish_session(&self, report: &FinishReport) -> anyhow::Result<FinishOutcome>;
}

/// Config provider serving the built-in sample content.
///
/// Useful for demos and tests; mirrors the client's historical dev-mode
/// fallback dataset.
pub struct StaticConfigProvider;

#[async_trait]
impl ConfigProvider for StaticConfigProvider {
    async fn fetch_config(&self) -> anyhow::Result<ConfigPayload> {
        Ok(sample_payload())
    }
}

/// Backend that never issues a ticket: every session plays out unscored.
pub struct OfflineSessionBackend;

#[async_trait]
impl SessionBackend for OfflineSessionBackend {
    async fn start_session(&self, _mode: &str) -> anyhow::Result<SessionTicket> {
        Ok(SessionTicket::default())
    }

    async fn finish_session(&self, _report: &FinishReport) -> anyhow::Result<FinishOutcome> {
        Ok(FinishOutcome::default())
    }
}
