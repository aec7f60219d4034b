mod balloons;
mod candles;
mod confetti;
mod sound_select;

pub use balloons::Balloons;
pub use candles::Candles;
pub use confetti::{ConfettiCanvas, ConfettiControl};
pub use sound_select::SoundSelect;
