//! Celebration sequencer
//!
//! This module provides:
//! - **State**: the `SequencerState` snapshot the card renders from
//! - **Timers**: the pending reveal ticks, ordered by deadline
//! - **Sequencer**: the state machine tying timers, audio and confetti together
//!
//! # Timeline
//!
//! With the reference timing (5 candles, 5 balloons, T = 500 ms) and a trigger
//! at t = 0, candles light at 500..=2500, the balloon phase begins at 2500 and
//! balloons pop at 3000..=5000.
//!
//! The balloon phase is scheduled at a fixed offset from the trigger, not
//! chained off the last candle tick. If candle ticks run late the balloon tick
//! still fires on its own schedule; it skips popping until every candle is lit.
//!
//! Audio completion is a separate clock: it only ends the confetti.

mod state;
mod timers;


pub use state::{Phase, RevealTiming, SequencerState};
pub use timers::{ScheduledTimer, TimerKey, TimerQueue};

use birthday_types::{Millis, SoundId, Viewport};

use crate::audio::{AudioPlayer, PlaybackId};
use crate::confetti::ParticleEffect;
use crate::error::CardError;
use crate::sounds;

/// Drives the two-phase reveal from a single trigger.
///
/// The sequencer never reads a clock: every time-dependent call takes `now`,
/// milliseconds since the card was mounted.
pub struct Sequencer<A, P> {
    timing: RevealTiming,
    state: SequencerState,
    viewport: Viewport,
    timers: TimerQueue,
    audio: A,
    particles: P,
    /// Playback whose completion may still end the confetti
    current_playback: Option<PlaybackId>,
    last_playback: PlaybackId,
    disposed: bool,
}

impl<A: AudioPlayer, P: ParticleEffect> Sequencer<A, P> {
    pub fn new(timing: RevealTiming, selected_sound: SoundId, audio: A, particles: P) -> Self {
        Self {
            timing,
            state: SequencerState::new(selected_sound),
            viewport: Viewport::default(),
            timers: TimerQueue::new(),
            audio,
            particles,
            current_playback: None,
            last_playback: PlaybackId::default(),
            disposed: false,
        }
    }

    // ─── Accessors ──────────────────────────────────────────────────────────

    pub fn state(&self) -> &SequencerState {
        &self.state
    }

    pub fn timing(&self) -> RevealTiming {
        self.timing
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Earliest pending timer deadline, if any
    pub fn next_deadline(&self) -> Option<Millis> {
        self.timers.next_deadline()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn particles(&self) -> &P {
        &self.particles
    }

    // ─── User intents ───────────────────────────────────────────────────────

    /// Start (or restart) the celebration at `now`.
    ///
    /// Restarting replays the clip and re-arms the reveal timers; counters are
    /// never reset, so a finished card stays finished. A balloon reveal in
    /// progress is left running.
    pub fn start_celebration(&mut self, now: Millis) {
        if self.disposed {
            return;
        }

        tracing::info!(
            now,
            sound = self.state.selected_sound.key(),
            "Celebration started"
        );

        self.state.celebrating = true;
        self.set_confetti(true);

        self.audio.stop();
        self.last_playback = self.last_playback.next();
        self.current_playback = Some(self.last_playback);
        self.audio.play(self.last_playback, self.state.selected_sound);

        let interval = self.timing.interval_ms;
        self.timers
            .schedule(TimerKey::CandleTick, now + interval, Some(interval));

        // A balloon reveal already under way keeps popping on its own schedule
        let candles_done = self.state.candles_lit >= self.timing.total_candles;
        if candles_done && self.timers.contains(TimerKey::BalloonTick) {
            return;
        }

        self.timers.cancel(TimerKey::BalloonTick);
        self.timers.schedule(
            TimerKey::BalloonPhaseStart,
            now + self.timing.balloon_phase_offset(),
            None,
        );
        self.state.phase = Phase::CandleReveal;
    }

    /// Switch clips. Halts playback and ends the confetti; reveal progress is
    /// left alone.
    pub fn select_sound(&mut self, sound: SoundId) {
        if self.disposed {
            return;
        }

        tracing::info!(sound = sound.key(), "Sound selected");

        self.state.selected_sound = sound;
        self.audio.stop();
        self.current_playback = None;
        self.set_confetti(false);
    }

    /// Validate a selector key and switch to it.
    ///
    /// Unknown keys leave the sequencer untouched.
    pub fn select_sound_key(&mut self, key: &str) -> Result<(), CardError> {
        let sound = sounds::lookup(key)?;
        self.select_sound(sound);
        Ok(())
    }

    // ─── External notifications ─────────────────────────────────────────────

    /// The audio player finished `playback` naturally.
    pub fn on_playback_finished(&mut self, playback: PlaybackId) {
        if self.disposed {
            return;
        }

        if self.current_playback != Some(playback) {
            tracing::debug!(
                playback = playback.get(),
                "Ignoring completion of stale playback"
            );
            return;
        }

        tracing::debug!(playback = playback.get(), "Playback finished");
        self.current_playback = None;
        self.set_confetti(false);
    }

    pub fn resize(&mut self, viewport: Viewport) {
        if self.disposed {
            return;
        }

        self.viewport = viewport;
        self.particles.resize(viewport);
    }

    /// Fire every timer due at or before `now`.
    pub fn advance_to(&mut self, now: Millis) {
        if self.disposed {
            return;
        }

        while let Some(timer) = self.timers.pop_due(now) {
            self.fire(timer);
        }
    }

    /// Tear down: cancel timers and release collaborators. Every later call is
    /// a no-op and the state snapshot is frozen.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }

        tracing::info!(pending_timers = self.timers.len(), "Sequencer disposed");

        self.timers.clear();
        self.audio.stop();
        self.set_confetti(false);
        self.current_playback = None;
        self.disposed = true;
    }

    // ─── Transitions ────────────────────────────────────────────────────────

    fn fire(&mut self, timer: ScheduledTimer) {
        match timer.key {
            TimerKey::CandleTick => {
                if self.state.candles_lit < self.timing.total_candles {
                    self.state.candles_lit += 1;
                    tracing::debug!(candles_lit = self.state.candles_lit, "Candle lit");
                    self.rearm(timer);
                } else {
                    tracing::debug!("Candle reveal complete");
                }
            }
            TimerKey::BalloonPhaseStart => {
                tracing::debug!(at = timer.due_at, "Balloon phase armed");
                let interval = self.timing.interval_ms;
                self.timers.schedule(
                    TimerKey::BalloonTick,
                    timer.due_at + interval,
                    Some(interval),
                );
            }
            TimerKey::BalloonTick => {
                if self.state.candles_lit < self.timing.total_candles {
                    tracing::debug!(
                        candles_lit = self.state.candles_lit,
                        "Balloon tick ahead of candle reveal, skipping"
                    );
                    self.rearm(timer);
                } else if self.state.balloons_popped < self.timing.total_balloons {
                    self.state.balloons_popped += 1;
                    tracing::debug!(
                        balloons_popped = self.state.balloons_popped,
                        "Balloon popped"
                    );
                    self.rearm(timer);
                } else {
                    tracing::debug!("Balloon reveal complete");
                }
            }
        }

        self.update_phase();
    }

    fn rearm(&mut self, timer: ScheduledTimer) {
        if let Some(next) = timer.next_due() {
            self.timers.schedule(timer.key, next, timer.period);
        }
    }

    fn update_phase(&mut self) {
        let candles_done = self.state.candles_lit >= self.timing.total_candles;
        let balloons_done = self.state.balloons_popped >= self.timing.total_balloons;

        let next = match self.state.phase {
            Phase::CandleReveal if candles_done && self.timers.contains(TimerKey::BalloonTick) => {
                Phase::BalloonReveal
            }
            Phase::BalloonReveal if balloons_done => Phase::Done,
            phase => phase,
        };

        if next != self.state.phase {
            tracing::debug!(from = ?self.state.phase, to = ?next, "Phase changed");
            self.state.phase = next;
        }
    }

    fn set_confetti(&mut self, active: bool) {
        self.state.confetti_active = active;
        self.particles.set_active(active);
    }
}
