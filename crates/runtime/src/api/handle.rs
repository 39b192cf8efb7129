//! Cloneable handle for talking to the session worker.

use tokio::sync::{broadcast, mpsc, oneshot};

use crate::api::errors::{Result, SessionError};
use crate::api::snapshot::{SessionResult, SessionSnapshot};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Handle to a running [`SessionRuntime`](crate::runtime::SessionRuntime).
///
/// Cheap to clone; every clone talks to the same worker task. All methods
/// round-trip through the command channel, so callers observe state the
/// worker has already committed.
#[derive(Clone, Debug)]
pub struct SessionHandle {
    command_tx: mpsc::Sender<Command>,
    events: EventBus,
}

impl SessionHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, events: EventBus) -> Self {
        Self { command_tx, events }
    }

    /// Fetch config and rebuild the difficulty registry and card pool.
    pub async fn load(&self, force_refresh: bool) -> Result<()> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Load {
            force_refresh,
            reply,
        })
        .await?;
        rx.await.map_err(SessionError::ReplyChannelClosed)?
    }

    /// Pick the difficulty level for the next session.
    pub async fn select_difficulty(&self, level: u8) -> Result<()> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::SelectDifficulty { level, reply }).await?;
        rx.await.map_err(SessionError::ReplyChannelClosed)?
    }

    /// Start a session on the selected level, ending any session already
    /// running.
    pub async fn start(&self) -> Result<()> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Start { reply }).await?;
        rx.await.map_err(SessionError::ReplyChannelClosed)?
    }

    /// Click the slot at `index`. Clicks that land while the session is
    /// paused or a match is resolving are ignored, not rejected.
    pub async fn click_slot(&self, index: usize) -> Result<()> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::SlotClick { index, reply }).await?;
        rx.await.map_err(SessionError::ReplyChannelClosed)?
    }

    /// Toggle pause. Returns the new paused state.
    pub async fn toggle_pause(&self) -> Result<bool> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::TogglePause { reply }).await?;
        rx.await.map_err(SessionError::ReplyChannelClosed)?
    }

    /// Ask for a matchable (text, fruit) slot pair.
    pub async fn request_hint(&self) -> Result<(usize, usize)> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::RequestHint { reply }).await?;
        rx.await.map_err(SessionError::ReplyChannelClosed)?
    }

    /// End the running session early and return its result.
    pub async fn forfeit(&self) -> Result<SessionResult> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Forfeit { reply }).await?;
        rx.await.map_err(SessionError::ReplyChannelClosed)?
    }

    /// Current projection of the session state.
    pub async fn snapshot(&self) -> Result<SessionSnapshot> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::QuerySnapshot { reply }).await?;
        rx.await.map_err(SessionError::ReplyChannelClosed)
    }

    /// Subscribe to one event topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.events.subscribe(topic)
    }

    async fn send(&self, command: Command) -> Result<()> {
        self.command_tx
            .send(command)
            .await
            .map_err(|_| SessionError::CommandChannelClosed)
    }
}
