//! Session worker that owns all mutable game state.
//!
//! One task, one `select!` loop: commands from [`SessionHandle`], the 1 Hz
//! countdown, the optional shuffle scheduler, and the deferred display-delay
//! resolutions all interleave here, so no two transitions ever overlap.
//! Ending a session drops the state the deadlines hang off, which is what
//! makes a stale deadline a no-op rather than a race.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::time::{self, Instant};
use tracing::{debug, info, warn};

use match_core::{
    BoardEngine, CardPool, DifficultyProfile, EngineConfig, Evaluation, MatchStateMachine,
    MatchVerdict, ScoreTrack, ScoringParams, SlotKind, TextClick,
};
use match_content::{DifficultyRegistry, build_card_pool};

use crate::api::errors::{Result, SessionError};
use crate::api::providers::{ConfigProvider, FinishReport, SessionBackend};
use crate::api::snapshot::{Lifecycle, SessionResult, SessionSnapshot, SlotView};
use crate::cache::ConfigCache;
use crate::events::{BoardEvent, Event, EventBus, SessionEvent, TimerEvent};
use crate::runtime::RuntimeConfig;

/// Commands that can be sent to the session worker.
pub(crate) enum Command {
    Load {
        force_refresh: bool,
        reply: oneshot::Sender<Result<()>>,
    },
    SelectDifficulty {
        level: u8,
        reply: oneshot::Sender<Result<()>>,
    },
    Start {
        reply: oneshot::Sender<Result<()>>,
    },
    /// A slot-click intent from the presentation layer. Clicks swallowed
    /// by the pause or lock guards still reply `Ok`: ignoring input is
    /// not an error.
    SlotClick {
        index: usize,
        reply: oneshot::Sender<Result<()>>,
    },
    TogglePause {
        reply: oneshot::Sender<Result<bool>>,
    },
    RequestHint {
        reply: oneshot::Sender<Result<(usize, usize)>>,
    },
    Forfeit {
        reply: oneshot::Sender<Result<SessionResult>>,
    },
    QuerySnapshot {
        reply: oneshot::Sender<SessionSnapshot>,
    },
}

/// A display delay whose expiry completes an in-flight match.
struct Pending {
    at: Instant,
    op: PendingOp,
}

enum PendingOp {
    /// Replace a matched pair after the success animation window.
    Refill { text: usize, fruit: usize },
    /// Turn a mismatched text slot face down after the failure window.
    HideMismatch { text: usize },
}

#[derive(Debug)]
enum EndReason {
    TimeUp,
    Forfeit,
    Superseded,
}

/// State that exists only while a session runs. Dropping it cancels the
/// shuffle scheduler and any pending resolution in one move.
struct ActiveSession {
    profile: DifficultyProfile,
    scoring: ScoringParams,
    board: BoardEngine,
    matcher: MatchStateMachine,
    score: ScoreTrack,
    /// Countdown length this session started with (profile value or the
    /// global override); the duration baseline at session end.
    time_seconds: u32,
    /// Seconds left on the countdown.
    remaining: u32,
    /// Next whole-second deadline; stays on a fixed 1 s grid from start.
    next_tick: Instant,
    paused: bool,
    session_id: Option<String>,
    pending: Option<Pending>,
    next_shuffle: Option<Instant>,
}

impl ActiveSession {
    /// The in-flight-match guard: true from fruit selection until the
    /// refill/hide resolution lands.
    fn is_locked(&self) -> bool {
        self.pending.is_some() || self.matcher.is_evaluating()
    }
}

/// Background task that processes session commands and timers.
pub(crate) struct SessionWorker {
    config: RuntimeConfig,
    provider: Arc<dyn ConfigProvider>,
    backend: Arc<dyn SessionBackend>,
    command_rx: mpsc::Receiver<Command>,
    events: EventBus,
    cache: ConfigCache,
    registry: DifficultyRegistry,
    pool: CardPool,
    /// Global countdown override from the config payload, when served.
    countdown_override: Option<u32>,
    selected_level: Option<u8>,
    lifecycle: Lifecycle,
    active: Option<ActiveSession>,
}

impl SessionWorker {
    pub(crate) fn new(
        config: RuntimeConfig,
        provider: Arc<dyn ConfigProvider>,
        backend: Arc<dyn SessionBackend>,
        command_rx: mpsc::Receiver<Command>,
        events: EventBus,
    ) -> Self {
        let cache = ConfigCache::new(config.cache_ttl);
        Self {
            config,
            provider,
            backend,
            command_rx,
            events,
            cache,
            registry: DifficultyRegistry::default(),
            pool: CardPool::default(),
            countdown_override: None,
            selected_level: None,
            lifecycle: Lifecycle::Unloaded,
            active: None,
        }
    }

    /// Main worker loop.
    pub(crate) async fn run(mut self) {
        loop {
            let tick_at = self.active.as_ref().map(|a| a.next_tick);
            let pending_at = self
                .active
                .as_ref()
                .and_then(|a| a.pending.as_ref().map(|p| p.at));
            let shuffle_at = self.active.as_ref().and_then(|a| a.next_shuffle);
            // Placeholder for disabled branches; the guard keeps them
            // from being polled.
            let parked = Instant::now() + Duration::from_secs(3600);

            tokio::select! {
                maybe_cmd = self.command_rx.recv() => match maybe_cmd {
                    Some(cmd) => self.handle_command(cmd).await,
                    None => break,
                },
                _ = time::sleep_until(tick_at.unwrap_or(parked)), if tick_at.is_some() => {
                    self.handle_tick().await;
                }
                _ = time::sleep_until(pending_at.unwrap_or(parked)), if pending_at.is_some() => {
                    self.resolve_pending();
                }
                _ = time::sleep_until(shuffle_at.unwrap_or(parked)), if shuffle_at.is_some() => {
                    self.handle_shuffle_due();
                }
            }
        }

        debug!("session worker stopped");
    }

    async fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Load {
                force_refresh,
                reply,
            } => {
                let result = self.do_load(force_refresh).await;
                if reply.send(result).is_err() {
                    debug!("Load reply channel closed (caller dropped)");
                }
            }
            Command::SelectDifficulty { level, reply } => {
                let result = self.do_select_difficulty(level).await;
                if reply.send(result).is_err() {
                    debug!("SelectDifficulty reply channel closed (caller dropped)");
                }
            }
            Command::Start { reply } => {
                let result = self.do_start().await;
                if reply.send(result).is_err() {
                    debug!("Start reply channel closed (caller dropped)");
                }
            }
            Command::SlotClick { index, reply } => {
                self.handle_slot_click(index);
                if reply.send(Ok(())).is_err() {
                    debug!("SlotClick reply channel closed (caller dropped)");
                }
            }
            Command::TogglePause { reply } => {
                let result = self.handle_toggle_pause();
                if reply.send(result).is_err() {
                    debug!("TogglePause reply channel closed (caller dropped)");
                }
            }
            Command::RequestHint { reply } => {
                let result = self.handle_request_hint();
                if reply.send(result).is_err() {
                    debug!("RequestHint reply channel closed (caller dropped)");
                }
            }
            Command::Forfeit { reply } => {
                let result = self
                    .end_session(EndReason::Forfeit)
                    .await
                    .ok_or(SessionError::NotRunning);
                if reply.send(result).is_err() {
                    debug!("Forfeit reply channel closed (caller dropped)");
                }
            }
            Command::QuerySnapshot { reply } => {
                if reply.send(self.snapshot()).is_err() {
                    debug!("QuerySnapshot reply channel closed (caller dropped)");
                }
            }
        }
    }

    /// Fetch config (through the short-lived cache) and rebuild the
    /// registry and pool. The running session, if any, is untouched: it
    /// holds its profile by value.
    async fn do_load(&mut self, force_refresh: bool) -> Result<()> {
        let payload = match self.cache.get(force_refresh) {
            Some(payload) => payload.clone(),
            None => {
                let fetched = self
                    .provider
                    .fetch_config()
                    .await
                    .map_err(SessionError::ConfigFetch)?;
                self.cache.store(fetched.clone());
                fetched
            }
        };

        if payload.config.maintenance_mode {
            warn!("config served in maintenance mode, refusing to load");
            return Err(SessionError::Maintenance);
        }

        let registry = DifficultyRegistry::build(payload.difficulty_settings);
        if registry.is_empty() {
            warn!("config returned zero active difficulty profiles");
            return Err(SessionError::ConfigUnavailable);
        }
        let pool = build_card_pool(&payload.fruit_cards, &payload.text_cards);
        info!(
            levels = ?registry.levels(),
            pairs = pool.len(),
            version = ?payload.config.version,
            "config loaded"
        );

        self.registry = registry;
        self.pool = pool;
        self.countdown_override = payload.config.timer_seconds;
        if self.lifecycle == Lifecycle::Unloaded {
            self.lifecycle = Lifecycle::Loaded;
        }
        Ok(())
    }

    async fn do_select_difficulty(&mut self, level: u8) -> Result<()> {
        if self.registry.is_empty() {
            self.do_load(false).await?;
        }
        if self.registry.resolve(level).is_none() {
            return Err(SessionError::UnknownLevel { level });
        }
        self.selected_level = Some(level);
        Ok(())
    }

    /// Start a session on the selected level.
    ///
    /// Always reloads with `force_refresh` first so a game never begins on
    /// stale settings (freshness over staleness: one extra round trip per
    /// start). A missing session ticket degrades to unscored play.
    async fn do_start(&mut self) -> Result<()> {
        let level = self.selected_level.ok_or(SessionError::NoLevelSelected)?;

        if self.active.is_some() {
            self.end_session(EndReason::Superseded).await;
        }

        self.do_load(true).await?;
        let profile = self
            .registry
            .resolve(level)
            .cloned()
            .ok_or(SessionError::UnknownLevel { level })?;

        let session_id = match self.backend.start_session("ranked").await {
            Ok(ticket) => ticket.session_id,
            Err(err) => {
                warn!(error = %err, "session backend unavailable, playing unscored");
                None
            }
        };
        if session_id.is_none() {
            debug!("no session ticket; final score will not be submitted");
        }

        let seed = self.config.session_seed.unwrap_or_else(rand::random);
        let engine_config = EngineConfig::with_pairs_per_game(self.config.pairs_per_game);
        let mut board = BoardEngine::new(&engine_config, seed);
        board.generate(&self.pool)?;

        let next_shuffle = (profile.shuffle_enabled && profile.shuffle_frequency_seconds > 0)
            .then(|| Instant::now() + Duration::from_secs(profile.shuffle_frequency_seconds.into()));

        let scored = session_id.is_some();
        let time_seconds = self.countdown_override.unwrap_or(profile.time_seconds);
        self.active = Some(ActiveSession {
            scoring: profile.scoring(),
            board,
            matcher: MatchStateMachine::new(),
            score: ScoreTrack::new(),
            time_seconds,
            remaining: time_seconds,
            next_tick: Instant::now() + Duration::from_secs(1),
            paused: false,
            session_id,
            pending: None,
            next_shuffle,
            profile,
        });
        self.lifecycle = Lifecycle::Running;

        info!(level, time_seconds, scored, "session started");
        self.events.publish(Event::Session(SessionEvent::Started {
            level,
            time_seconds,
            scored,
        }));
        Ok(())
    }

    /// One countdown second. Paused sessions keep the grid but skip the
    /// decrement entirely; no partial tick leaks through.
    async fn handle_tick(&mut self) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        active.next_tick += Duration::from_secs(1);
        if active.paused {
            return;
        }

        active.remaining = active.remaining.saturating_sub(1);
        let remaining = active.remaining;
        self.events.publish(Event::Timer(TimerEvent { remaining }));

        if remaining == 0 {
            self.end_session(EndReason::TimeUp).await;
        }
    }

    /// Route a slot click. Ignored wholesale while paused or while a match
    /// is in flight; this is the input serialization guard.
    fn handle_slot_click(&mut self, index: usize) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        if active.paused || active.is_locked() {
            return;
        }
        let Some(slot) = active.board.slot(index) else {
            return;
        };
        if !slot.active {
            return;
        }

        match slot.kind {
            SlotKind::Text => match active.matcher.select_text(index) {
                TextClick::Ignored => {}
                TextClick::Deselected { index, hide } => {
                    if hide {
                        active.board.hide(index);
                        self.events
                            .publish(Event::Board(BoardEvent::SlotHidden { index }));
                    }
                }
                TextClick::Selected {
                    reveal,
                    hide_previous,
                } => {
                    if let Some(previous) = hide_previous {
                        active.board.hide(previous);
                        self.events
                            .publish(Event::Board(BoardEvent::SlotHidden { index: previous }));
                    }
                    active.board.reveal(reveal);
                    self.events
                        .publish(Event::Board(BoardEvent::SlotRevealed { index: reveal }));
                }
            },
            SlotKind::Fruit => {
                if let Some(evaluation) = active.matcher.select_fruit(index) {
                    self.resolve_evaluation(evaluation);
                }
            }
        }
    }

    /// Compare the locked-in pair, apply scoring, and schedule the
    /// display-delayed resolution.
    fn resolve_evaluation(&mut self, evaluation: Evaluation) {
        let now = Instant::now();
        let Some(active) = self.active.as_mut() else {
            return;
        };

        let codes = match (
            active.board.slot(evaluation.text),
            active.board.slot(evaluation.fruit),
        ) {
            (Some(text), Some(fruit)) => (text.pair_code.clone(), fruit.pair_code.clone()),
            _ => {
                active.matcher.reset();
                return;
            }
        };

        let verdict = active.matcher.evaluate(evaluation, &codes.0, &codes.1);
        let points = match verdict {
            MatchVerdict::Matched => {
                let points = active.score.award(&active.scoring);
                active
                    .board
                    .deactivate_pair(evaluation.text, evaluation.fruit);
                active.pending = Some(Pending {
                    at: now + self.config.match_display_delay,
                    op: PendingOp::Refill {
                        text: evaluation.text,
                        fruit: evaluation.fruit,
                    },
                });
                points
            }
            MatchVerdict::Mismatched => {
                active.score.decay(&active.scoring);
                active.pending = Some(Pending {
                    at: now + self.config.mismatch_display_delay,
                    op: PendingOp::HideMismatch {
                        text: evaluation.text,
                    },
                });
                0
            }
        };

        debug!(?verdict, points, combo = active.score.combo, "match resolved");
        self.events.publish(Event::Board(BoardEvent::MatchResolved {
            verdict,
            text: evaluation.text,
            fruit: evaluation.fruit,
            points,
            combo: active.score.combo,
        }));
    }

    /// A display delay expired: finish the match it belongs to.
    fn resolve_pending(&mut self) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        let Some(pending) = active.pending.take() else {
            return;
        };

        match pending.op {
            PendingOp::Refill { text, fruit } => {
                let exclude = active.board.active_pair_codes();
                if active
                    .board
                    .refill(text, fruit, &exclude, &self.pool)
                    .is_some()
                {
                    active.matcher.slot_refilled(text);
                    self.events
                        .publish(Event::Board(BoardEvent::Refilled { text, fruit }));
                }
            }
            PendingOp::HideMismatch { text } => {
                if !active.matcher.is_permanently_revealed(text) {
                    active.board.hide(text);
                    self.events
                        .publish(Event::Board(BoardEvent::SlotHidden { index: text }));
                }
            }
        }
    }

    /// The shuffle scheduler fired. Rearm first, then shuffle only if
    /// neither paused nor locked: a shuffle never lands mid-match.
    fn handle_shuffle_due(&mut self) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        let frequency = u64::from(active.profile.shuffle_frequency_seconds.max(1));
        active.next_shuffle = Some(Instant::now() + Duration::from_secs(frequency));

        if active.paused || active.is_locked() {
            debug!("shuffle window skipped while paused or locked");
            return;
        }

        let mapping = active.board.shuffle_active();
        active.matcher.remap(&mapping);
        debug!("board shuffled");
        self.events
            .publish(Event::Board(BoardEvent::Shuffled { mapping }));
    }

    fn handle_toggle_pause(&mut self) -> Result<bool> {
        let active = self.active.as_mut().ok_or(SessionError::NotRunning)?;
        active.paused = !active.paused;
        let paused = active.paused;
        self.events.publish(Event::Session(if paused {
            SessionEvent::Paused
        } else {
            SessionEvent::Resumed
        }));
        Ok(paused)
    }

    /// Pause is total for player-facing activity, so hints are refused
    /// while paused rather than silently revealing a pair.
    fn handle_request_hint(&mut self) -> Result<(usize, usize)> {
        let active = self.active.as_ref().ok_or(SessionError::NotRunning)?;
        if active.paused {
            return Err(SessionError::Paused);
        }
        if !active.profile.hints_enabled {
            return Err(SessionError::HintsDisabled);
        }
        let (text, fruit) = active
            .board
            .find_hint_pair()
            .ok_or(SessionError::HintUnavailable)?;
        self.events
            .publish(Event::Board(BoardEvent::HintShown { text, fruit }));
        Ok((text, fruit))
    }

    /// Tear the session down and report the result.
    ///
    /// Taking `active` also clears the shuffle and pending deadlines, so
    /// nothing can fire into a dead session. Submission failure is logged
    /// and swallowed: the local summary must still render.
    async fn end_session(&mut self, reason: EndReason) -> Option<SessionResult> {
        let active = self.active.take()?;
        self.lifecycle = Lifecycle::Ended;

        let duration = active.time_seconds.saturating_sub(active.remaining);
        let mut reward_code = None;

        if let Some(session_id) = active.session_id {
            let report = FinishReport {
                session_id,
                score_balls: active.score.score,
                duration,
                correct_count: active.score.stats.correct,
                wrong_count: active.score.stats.wrong,
                best_combo: active.score.stats.best_combo,
            };
            match self.backend.finish_session(&report).await {
                Ok(outcome) => reward_code = outcome.new_promo_code,
                Err(err) => {
                    warn!(error = %err, "score submission failed, keeping local summary");
                }
            }
        } else {
            debug!("unscored session, skipping submission");
        }

        let result = SessionResult {
            final_score: active.score.score,
            stats: active.score.stats,
            duration,
            reward_code,
        };
        info!(?reason, score = result.final_score, duration, "session ended");
        self.events
            .publish(Event::Session(SessionEvent::Ended(result.clone())));
        Some(result)
    }

    fn snapshot(&self) -> SessionSnapshot {
        match &self.active {
            Some(active) => SessionSnapshot {
                lifecycle: Lifecycle::Running,
                score: active.score.score,
                combo: active.score.combo,
                timer: active.remaining,
                is_paused: active.paused,
                is_locked: active.is_locked(),
                stats: active.score.stats,
                slots: active.board.slots().iter().map(SlotView::project).collect(),
            },
            None => SessionSnapshot::idle(self.lifecycle),
        }
    }
}
