//! Sound catalogue
//!
//! Maps selector option keys to the fixed set of clips. Anything the
//! presentation layer sends is validated here before it reaches the sequencer.

use phf::phf_map;

use crate::error::CardError;
pub use birthday_types::SoundId;

/// Option keys accepted from the sound selector.
///
/// The asset paths are accepted too, since older cards used the clip path as
/// the option value.
pub static SOUND_KEYS: phf::Map<&'static str, SoundId> = phf_map! {
    "birthday-song" => SoundId::BirthdaySong,
    "cheering" => SoundId::Cheering,
    "birthday-wish" => SoundId::BirthdayWish,

    "/sounds/confetti.mp3" => SoundId::BirthdaySong,
    "/sounds/candle-light.mp3" => SoundId::Cheering,
    "/sounds/balloon-pop.mp3" => SoundId::BirthdayWish,
};

/// Resolve a selector key to a sound.
pub fn lookup(key: &str) -> Result<SoundId, CardError> {
    SOUND_KEYS
        .get(key.trim())
        .copied()
        .ok_or_else(|| CardError::UnknownSound {
            key: key.to_string(),
        })
}
