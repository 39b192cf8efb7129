//! Topic-based event bus.
//!
//! Consumers subscribe per topic and only receive events they care about:
//! a HUD can follow `Timer` without draining board traffic, a renderer can
//! follow `Board` alone. Publishing is best-effort; events to a topic with
//! no subscribers are dropped.

use std::collections::HashMap;

use serde::Serialize;
use tokio::sync::broadcast;
use tracing::trace;

use super::types::{BoardEvent, SessionEvent, TimerEvent};

/// Topics for event routing.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize)]
pub enum Topic {
    /// Session lifecycle (start, pause, end).
    Session,
    /// Board and match activity.
    Board,
    /// Countdown ticks.
    Timer,
}

/// Event wrapper carrying the topic-typed payload.
#[derive(Clone, Debug, Serialize)]
pub enum Event {
    Session(SessionEvent),
    Board(BoardEvent),
    Timer(TimerEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Session(_) => Topic::Session,
            Event::Board(_) => Topic::Board,
            Event::Timer(_) => Topic::Timer,
        }
    }
}

/// Per-topic broadcast channels behind one façade.
#[derive(Clone, Debug)]
pub struct EventBus {
    channels: HashMap<Topic, broadcast::Sender<Event>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let mut channels = HashMap::new();
        for topic in [Topic::Session, Topic::Board, Topic::Timer] {
            channels.insert(topic, broadcast::channel(capacity).0);
        }
        Self { channels }
    }

    /// Publish an event to its topic. Best-effort: a topic with no
    /// subscribers drops the event.
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if let Some(sender) = self.channels.get(&topic) {
            if sender.send(event).is_err() {
                trace!(?topic, "no subscribers for event");
            }
        }
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        // Channels for every topic are created up front, so the lookup
        // cannot miss; fall back to a fresh channel to stay panic-free.
        match self.channels.get(&topic) {
            Some(sender) => sender.subscribe(),
            None => broadcast::channel(1).0.subscribe(),
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_only_see_their_topic() {
        let bus = EventBus::new();
        let mut timer_rx = bus.subscribe(Topic::Timer);
        let mut session_rx = bus.subscribe(Topic::Session);

        bus.publish(Event::Timer(TimerEvent { remaining: 9 }));

        let event = timer_rx.recv().await.unwrap();
        assert!(matches!(event, Event::Timer(TimerEvent { remaining: 9 })));
        assert!(session_rx.try_recv().is_err());
    }

    #[test]
    fn publish_without_subscribers_is_silent() {
        let bus = EventBus::new();
        bus.publish(Event::Session(SessionEvent::Paused));
    }
}
