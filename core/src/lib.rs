pub mod audio;
pub mod clock;
pub mod confetti;
pub mod config;
pub mod error;
pub mod presentation;
pub mod sequencer;
pub mod sounds;

#[cfg(not(target_arch = "wasm32"))]
pub mod driver;

// Re-exports for convenience
pub use audio::{AudioEvent, AudioPlayer, ChannelAudio, PlaybackId, create_audio_channel};
pub use birthday_types::{CardConfig, CardText, Color, Millis, SoundId, Viewport};
pub use clock::VirtualClock;
pub use confetti::{ConfettiField, Particle, ParticleEffect};
pub use config::{CardSettings, MUTED_COLOR, Palette, color_to_hex, load_card_config};
pub use error::{CardError, ConfigError};
pub use presentation::{ItemView, balloon_views, candle_views};
pub use sequencer::{Phase, RevealTiming, Sequencer, SequencerState};
