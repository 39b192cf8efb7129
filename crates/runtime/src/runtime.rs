//! Runtime assembly: configuration, builder, and lifecycle.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::info;

use match_core::EngineConfig;

use crate::api::errors::{Result, SessionError};
use crate::api::handle::SessionHandle;
use crate::api::providers::{ConfigProvider, OfflineSessionBackend, SessionBackend};
use crate::events::EventBus;
use crate::workers::SessionWorker;

/// Tunables for the runtime. `Default` matches the production values.
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    /// Pairs dealt per board (half the slot count).
    pub pairs_per_game: usize,
    /// How long a fetched config payload stays fresh.
    pub cache_ttl: Duration,
    /// Display window between a match and its refill.
    pub match_display_delay: Duration,
    /// Display window between a mismatch and the hide.
    pub mismatch_display_delay: Duration,
    /// Broadcast buffer per event topic.
    pub event_buffer_size: usize,
    /// Command channel depth.
    pub command_buffer_size: usize,
    /// Fixed seed for board generation. `None` draws from entropy per
    /// session; set it for reproducible boards.
    pub session_seed: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            pairs_per_game: EngineConfig::DEFAULT_PAIRS_PER_GAME,
            cache_ttl: Duration::from_secs(5),
            match_display_delay: Duration::from_millis(800),
            mismatch_display_delay: Duration::from_millis(1500),
            event_buffer_size: 100,
            command_buffer_size: 32,
            session_seed: None,
        }
    }
}

/// Owns the worker task; hand out [`SessionHandle`]s to interact with it.
#[derive(Debug)]
pub struct SessionRuntime {
    handle: SessionHandle,
    worker: JoinHandle<()>,
}

impl SessionRuntime {
    pub fn builder() -> SessionRuntimeBuilder {
        SessionRuntimeBuilder::new()
    }

    pub fn handle(&self) -> SessionHandle {
        self.handle.clone()
    }

    /// Stop the worker and wait for it to drain.
    ///
    /// The worker exits once every [`SessionHandle`] clone is gone; drop
    /// outstanding clones before calling this or the join will not
    /// complete.
    pub async fn shutdown(self) -> Result<()> {
        let Self { handle, worker } = self;
        drop(handle);
        worker.await.map_err(SessionError::WorkerJoin)?;
        info!("session runtime shut down");
        Ok(())
    }
}

/// Builder wiring collaborators into a [`SessionRuntime`].
pub struct SessionRuntimeBuilder {
    config: RuntimeConfig,
    provider: Option<Arc<dyn ConfigProvider>>,
    backend: Option<Arc<dyn SessionBackend>>,
}

impl SessionRuntimeBuilder {
    pub fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            provider: None,
            backend: None,
        }
    }

    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Source of the game configuration payload. Required.
    pub fn config_provider(mut self, provider: impl ConfigProvider + 'static) -> Self {
        self.provider = Some(Arc::new(provider));
        self
    }

    /// Remote scorekeeper. Defaults to [`OfflineSessionBackend`], which
    /// plays every session unscored.
    pub fn session_backend(mut self, backend: impl SessionBackend + 'static) -> Self {
        self.backend = Some(Arc::new(backend));
        self
    }

    /// Fix the board seed for reproducible sessions.
    pub fn session_seed(mut self, seed: u64) -> Self {
        self.config.session_seed = Some(seed);
        self
    }

    /// Spawn the worker and return the assembled runtime.
    pub fn build(self) -> Result<SessionRuntime> {
        let provider = self.provider.ok_or(SessionError::MissingConfigProvider)?;
        let backend = self
            .backend
            .unwrap_or_else(|| Arc::new(OfflineSessionBackend));

        let events = EventBus::with_capacity(self.config.event_buffer_size);
        let (command_tx, command_rx) = mpsc::channel(self.config.command_buffer_size);

        let worker = SessionWorker::new(self.config, provider, backend, command_rx, events.clone());
        let worker = tokio::spawn(worker.run());
        info!("session runtime started");

        Ok(SessionRuntime {
            handle: SessionHandle::new(command_tx, events),
            worker,
        })
    }
}

impl Default for SessionRuntimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
