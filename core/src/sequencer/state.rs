//! Sequencer state (runtime snapshot)
//!
//! `SequencerState` is the single value the presentation layer renders from.
//! It is only ever mutated by `Sequencer` transition methods.

use birthday_types::{Millis, SoundId};

/// Reveal progress of the celebration.
///
/// `Idle → CandleReveal → BalloonReveal → Done`. The candle to balloon
/// transition requires every candle to be lit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    CandleReveal,
    BalloonReveal,
    Done,
}

/// Fixed reveal parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealTiming {
    /// Time between two reveals (T)
    pub interval_ms: Millis,
    pub total_candles: u32,
    pub total_balloons: u32,
}

impl RevealTiming {
    /// Offset from the trigger at which balloon reveal begins.
    pub fn balloon_phase_offset(&self) -> Millis {
        self.total_candles as Millis * self.interval_ms
    }

    /// Nominal length of the whole reveal.
    pub fn total_duration(&self) -> Millis {
        (self.total_candles + self.total_balloons) as Millis * self.interval_ms
    }
}

impl Default for RevealTiming {
    fn default() -> Self {
        Self {
            interval_ms: 500,
            total_candles: 5,
            total_balloons: 5,
        }
    }
}

/// Everything the card renders from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequencerState {
    pub candles_lit: u32,
    pub balloons_popped: u32,
    /// Set by the first celebration and never cleared
    pub celebrating: bool,
    pub confetti_active: bool,
    pub selected_sound: SoundId,
    pub phase: Phase,
}

impl SequencerState {
    pub fn new(selected_sound: SoundId) -> Self {
        Self {
            candles_lit: 0,
            balloons_popped: 0,
            celebrating: false,
            confetti_active: false,
            selected_sound,
            phase: Phase::Idle,
        }
    }
}
