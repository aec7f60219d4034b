//! Presentation rules
//!
//! Pure functions from sequencer state to what each candle and balloon looks
//! like. The web card renders these views directly.

use birthday_types::Color;

use crate::config::{MUTED_COLOR, Palette};
use crate::sequencer::{RevealTiming, SequencerState};

/// How one candle or balloon is drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemView {
    pub index: u32,
    /// Candle lit / balloon popped
    pub revealed: bool,
    pub color: Color,
    /// Animation delay before the item's transition starts
    pub delay_secs: f32,
}

/// Candle `index` is lit.
///
/// While celebrating, the candle at the current count is drawn lit too; once
/// idle the count is exclusive.
pub fn candle_revealed(index: u32, candles_lit: u32, celebrating: bool) -> bool {
    if celebrating {
        index <= candles_lit
    } else {
        index < candles_lit
    }
}

/// Balloon `index` is popped.
pub fn balloon_popped(index: u32, balloons_popped: u32) -> bool {
    index < balloons_popped
}

fn palette_color(palette: &[Color], index: u32) -> Color {
    if palette.is_empty() {
        return MUTED_COLOR;
    }
    palette[index as usize % palette.len()]
}

fn stagger_secs(index: u32, timing: &RevealTiming) -> f32 {
    index as f32 * timing.interval_ms as f32 / 1000.0
}

/// Views for every candle, in order
pub fn candle_views(
    state: &SequencerState,
    timing: &RevealTiming,
    palette: &Palette,
) -> Vec<ItemView> {
    (0..timing.total_candles)
        .map(|index| {
            let revealed = candle_revealed(index, state.candles_lit, state.celebrating);
            ItemView {
                index,
                revealed,
                color: if revealed {
                    palette_color(&palette.candles, index)
                } else {
                    MUTED_COLOR
                },
                delay_secs: if state.celebrating {
                    stagger_secs(index, timing)
                } else {
                    0.0
                },
            }
        })
        .collect()
}

/// Views for every balloon, in order
pub fn balloon_views(
    state: &SequencerState,
    timing: &RevealTiming,
    palette: &Palette,
) -> Vec<ItemView> {
    (0..timing.total_balloons)
        .map(|index| {
            let revealed = balloon_popped(index, state.balloons_popped);
            ItemView {
                index,
                revealed,
                color: if revealed {
                    MUTED_COLOR
                } else {
                    palette_color(&palette.balloons, index)
                },
                delay_secs: stagger_secs(index, timing),
            }
        })
        .collect()
}
