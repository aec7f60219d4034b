//! Audio player seam
//!
//! The sequencer drives playback through [`AudioPlayer`]; it never decodes or
//! outputs audio itself. Completion flows back through
//! `Sequencer::on_playback_finished`, tagged with the [`PlaybackId`] handed
//! out at `play` time so stale notifications can be told apart.

use tokio::sync::mpsc;

use birthday_types::SoundId;

/// Identifies one call to [`AudioPlayer::play`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct PlaybackId(u64);

impl PlaybackId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }

    /// The id following this one
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// Plays one clip at a time.
///
/// Implementations must report natural completion of a playback exactly once
/// and must never report completion for a playback ended by [`stop`].
///
/// [`stop`]: AudioPlayer::stop
pub trait AudioPlayer {
    /// Start `sound` from the beginning. Implies `stop()` of any current clip.
    fn play(&mut self, playback: PlaybackId, sound: SoundId);

    /// Halt the current clip, if any.
    fn stop(&mut self);
}

/// Requests forwarded to an out-of-process or out-of-task audio backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioEvent {
    Play { playback: PlaybackId, sound: SoundId },
    Stop,
}

/// Sender half used by [`ChannelAudio`]
pub type AudioSender = mpsc::UnboundedSender<AudioEvent>;

/// [`AudioPlayer`] that forwards every request over a channel.
///
/// The receiving backend owns decoding and output, and reports completion
/// back to whoever drives the sequencer.
#[derive(Debug, Clone)]
pub struct ChannelAudio {
    tx: AudioSender,
}

impl ChannelAudio {
    pub fn new(tx: AudioSender) -> Self {
        Self { tx }
    }

    fn send(&self, event: AudioEvent) {
        if self.tx.send(event).is_err() {
            tracing::debug!("Audio backend gone, dropping request");
        }
    }
}

impl AudioPlayer for ChannelAudio {
    fn play(&mut self, playback: PlaybackId, sound: SoundId) {
        self.send(AudioEvent::Play { playback, sound });
    }

    fn stop(&mut self) {
        self.send(AudioEvent::Stop);
    }
}

/// Create a channel-backed player and the receiver its backend listens on.
pub fn create_audio_channel() -> (ChannelAudio, mpsc::UnboundedReceiver<AudioEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ChannelAudio::new(tx), rx)
}
