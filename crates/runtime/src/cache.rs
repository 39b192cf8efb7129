//! Short-lived cache for the config payload.
//!
//! Consecutive `load()` calls within the window reuse the last fetch;
//! `force_refresh` bypasses it, which `start()` always does so a game
//! never begins on stale settings.

use std::time::Duration;

use tokio::time::Instant;

use match_content::ConfigPayload;

pub(crate) struct ConfigCache {
    ttl: Duration,
    entry: Option<(Instant, ConfigPayload)>,
}

impl ConfigCache {
    pub(crate) fn new(ttl: Duration) -> Self {
        Self { ttl, entry: None }
    }

    /// The cached payload, if fresh enough and not bypassed.
    pub(crate) fn get(&self, force_refresh: bool) -> Option<&ConfigPayload> {
        if force_refresh {
            return None;
        }
        match &self.entry {
            Some((stamp, payload)) if stamp.elapsed() < self.ttl => Some(payload),
            _ => None,
        }
    }

    pub(crate) fn store(&mut self, payload: ConfigPayload) {
        self.entry = Some((Instant::now(), payload));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn entry_expires_after_ttl() {
        let mut cache = ConfigCache::new(Duration::from_secs(5));
        cache.store(ConfigPayload::default());

        assert!(cache.get(false).is_some());
        assert!(cache.get(true).is_none(), "force bypasses a fresh entry");

        tokio::time::advance(Duration::from_secs(6)).await;
        assert!(cache.get(false).is_none());
    }
}
