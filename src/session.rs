//! Session shell
//!
//! Owns the game state and drives it from two fixed-period timers. Platform code
//! either feeds wall-clock time into [`Session::advance`] once per frame or calls
//! [`Session::fire`] from its own timers, passing the epoch it was armed with.

use glam::Vec2;

use crate::error::{Result, SimError, check_dimensions};
use crate::highscores::HighScoreStore;
use crate::notify::{Notification, NotificationSink};
use crate::settings::Settings;
use crate::sim::tick::{
    TickInput, TickParams, advance_generation, begin_session, countdown_tick, enter_game_over,
    return_to_start, tick,
};
use crate::sim::{GameEvent, GamePhase, GameState, SimClock, TimerKind, WorldSize, generate};
use crate::snapshot::Snapshot;

pub struct Session<H: HighScoreStore, N: NotificationSink> {
    state: GameState,
    clock: SimClock,
    settings: Settings,
    high_scores: H,
    notifier: N,
    input: TickInput,
}

impl<H: HighScoreStore, N: NotificationSink> Session<H, N> {
    pub fn new(
        seed: u64,
        width: f32,
        height: f32,
        settings: Settings,
        high_scores: H,
        notifier: N,
    ) -> Result<Self> {
        let settings = settings.sanitized();
        let state = GameState::new(seed, width, height, settings.max_particles())?;
        Ok(Self {
            state,
            clock: SimClock::new(),
            settings,
            high_scores,
            notifier,
            input: TickInput::default(),
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn high_scores(&self) -> &H {
        &self.high_scores
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    /// Epoch to stamp on externally scheduled timer fires
    pub fn epoch(&self) -> u64 {
        self.clock.epoch()
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot::capture(&self.state)
    }

    /// Swap in new settings; generation values take effect on the next run
    pub fn apply_settings(&mut self, settings: Settings) {
        let settings = settings.sanitized();
        self.state.particles.set_budget(settings.max_particles());
        self.settings = settings;
    }

    /// Record the latest pointer sample; non-finite samples are rejected
    pub fn set_pointer(&mut self, x: f32, y: f32) -> Result<()> {
        if !(x.is_finite() && y.is_finite()) {
            log::warn!("Ignoring pointer sample ({}, {})", x, y);
            return Err(SimError::InvalidPoint { x, y });
        }
        self.input.target = Some(self.state.world.clamp(Vec2::new(x, y)));
        Ok(())
    }

    /// Viewport changed: re-resolve district bounds, leave objects where they are
    pub fn resize(&mut self, width: f32, height: f32) -> Result<()> {
        check_dimensions(width, height)?;
        self.state.zones.resolve_bounds(width, height)?;
        self.state.world = WorldSize::new(width, height)?;
        if let Some(target) = self.input.target {
            self.input.target = Some(self.state.world.clamp(target));
        }
        log::debug!("World resized to {}x{}", width, height);
        Ok(())
    }

    /// Start (or restart) a run
    ///
    /// On failure the session is left on the main menu and a retryable error
    /// notification is raised.
    pub fn start_session(&mut self) -> Result<()> {
        let world = self.state.world;
        let generated = generate(
            world.width,
            world.height,
            self.state.zones.zones(),
            self.settings.base_count_per_zone,
            &mut self.state.rng,
        );
        let objects = match generated {
            Ok(objects) => objects,
            Err(err) => {
                log::warn!("Session start failed: {}", err);
                self.clock.stop();
                return_to_start(&mut self.state);
                self.notifier.notify(Notification::StartFailed {
                    reason: err.to_string(),
                });
                return Err(err);
            }
        };

        begin_session(
            &mut self.state,
            objects,
            self.settings.generation_delay_ms as f64,
        );
        self.input = TickInput::default();
        let epoch = self.clock.start();
        log::info!("Session started (epoch {})", epoch);
        Ok(())
    }

    /// End the run early and hand back the resulting events
    ///
    /// Empty if there was no run to end.
    pub fn end_session(&mut self) -> Vec<GameEvent> {
        if !enter_game_over(&mut self.state) {
            return Vec::new();
        }
        self.finish();
        self.dispatch()
    }

    /// Back to the main menu from anywhere
    pub fn reset_to_menu(&mut self) {
        self.clock.stop();
        return_to_start(&mut self.state);
        self.input = TickInput::default();
        log::info!("Returned to menu");
    }

    /// Feed elapsed wall-clock time; returns events raised along the way
    pub fn advance(&mut self, elapsed_ms: f64) -> Vec<GameEvent> {
        if !elapsed_ms.is_finite() || elapsed_ms < 0.0 {
            log::warn!("Ignoring elapsed time {}", elapsed_ms);
            return Vec::new();
        }
        if self.state.phase == GamePhase::Playing {
            advance_generation(&mut self.state, elapsed_ms);
        }

        let fires = self.clock.advance(elapsed_ms);
        for _ in 0..fires.gameplay {
            self.run_gameplay_tick();
        }
        for _ in 0..fires.countdown {
            self.run_countdown_tick();
        }
        self.dispatch()
    }

    /// Run one timer fire scheduled by the platform; stale epochs are ignored
    pub fn fire(&mut self, timer: TimerKind, epoch: u64) -> Vec<GameEvent> {
        if !self.clock.is_current(epoch) {
            log::debug!("Stale {:?} fire (epoch {})", timer, epoch);
            return Vec::new();
        }
        match timer {
            TimerKind::Gameplay => {
                advance_generation(&mut self.state, crate::consts::GAMEPLAY_TICK_MS);
                self.run_gameplay_tick();
            }
            TimerKind::Countdown => self.run_countdown_tick(),
        }
        self.dispatch()
    }

    fn run_gameplay_tick(&mut self) {
        let params = TickParams {
            burst_particles: self.settings.burst_particles,
        };
        tick(&mut self.state, &self.input, &params);
    }

    fn run_countdown_tick(&mut self) {
        if countdown_tick(&mut self.state) {
            self.finish();
        }
    }

    /// Bookkeeping for the single transition into game over
    fn finish(&mut self) {
        self.clock.stop();
        let score = self.state.score;
        let new_high_score = self.high_scores.qualifies(score);
        if new_high_score {
            self.high_scores.set_high_score(score);
            self.notifier.notify(Notification::NewHighScore { score });
        }
        log::info!("Game over: score {} (new best: {})", score, new_high_score);
        self.state.events.push(GameEvent::GameOver {
            score,
            new_high_score,
        });
    }

    /// Turn drained events into notifications and hand them to the caller
    fn dispatch(&mut self) -> Vec<GameEvent> {
        let events = self.state.drain_events();
        for event in &events {
            match event {
                GameEvent::ZoneChanged {
                    name,
                    description,
                    previous: Some(_),
                } if self.settings.zone_toasts => {
                    self.notifier.notify(Notification::ZoneEntered {
                        name: name.clone(),
                        description: description.clone(),
                    });
                }
                GameEvent::Consumed { kind, points, .. }
                    if *points >= self.settings.high_value_threshold =>
                {
                    self.notifier.notify(Notification::HighValueConsumed {
                        kind: *kind,
                        points: *points,
                    });
                }
                _ => {}
            }
        }
        events
    }
}
