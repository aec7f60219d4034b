//! Shared types for the birthday card
//!
//! This crate contains serializable types that are shared between the
//! sequencer core (birthday-core) and the WASM frontend (birthday-app).

use serde::{Deserialize, Serialize};

/// RGBA color bytes.
pub type Color = [u8; 4];

/// Milliseconds since the card was mounted.
pub type Millis = u64;

// ─────────────────────────────────────────────────────────────────────────────
// Sounds
// ─────────────────────────────────────────────────────────────────────────────

/// The fixed set of clips the card can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SoundId {
    #[default]
    BirthdaySong,
    Cheering,
    BirthdayWish,
}

impl SoundId {
    /// Stable key used by the sound selector and the config file.
    pub fn key(&self) -> &'static str {
        match self {
            SoundId::BirthdaySong => "birthday-song",
            SoundId::Cheering => "cheering",
            SoundId::BirthdayWish => "birthday-wish",
        }
    }

    /// Display label for the sound selector.
    pub fn label(&self) -> &'static str {
        match self {
            SoundId::BirthdaySong => "Birthday Song",
            SoundId::Cheering => "Cheering",
            SoundId::BirthdayWish => "Birthday Wish",
        }
    }

    /// Path of the clip relative to the site root.
    pub fn asset_path(&self) -> &'static str {
        match self {
            SoundId::BirthdaySong => "/sounds/confetti.mp3",
            SoundId::Cheering => "/sounds/candle-light.mp3",
            SoundId::BirthdayWish => "/sounds/balloon-pop.mp3",
        }
    }

    /// All sounds in selector order.
    pub fn all() -> &'static [SoundId] {
        &[SoundId::BirthdaySong, SoundId::Cheering, SoundId::BirthdayWish]
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Viewport
// ─────────────────────────────────────────────────────────────────────────────

/// Last known display dimensions in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Serde Default Helpers
// ─────────────────────────────────────────────────────────────────────────────

fn default_title() -> String {
    "Happy 20th Birthday!".to_string()
}
fn default_subtitle() -> String {
    "Sorry for the late wish Sir Asharib".to_string()
}
fn default_date() -> String {
    "2024-09-04".to_string()
}
fn default_interval_ms() -> Millis {
    500
}
fn default_item_count() -> u32 {
    5
}
fn default_item_colors() -> Vec<String> {
    ["#FF6B6B", "#4ECDC4", "#45B7D1", "#FFA07A", "#98D8C8"]
        .iter()
        .map(|c| c.to_string())
        .collect()
}
fn default_confetti_colors() -> Vec<String> {
    [
        "#FF6B6B", "#4ECDC4", "#45B7D1", "#FFA07A", "#98D8C8", "#F7DC6F", "#BB8FCE",
    ]
    .iter()
    .map(|c| c.to_string())
    .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Card Config
// ─────────────────────────────────────────────────────────────────────────────

/// Complete card configuration, as read from `card.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardConfig {
    #[serde(default)]
    pub card: CardText,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub palette: PaletteConfig,
    /// Sound selected when the card mounts
    #[serde(default)]
    pub default_sound: SoundId,
}

/// Static text shown on the card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardText {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_subtitle")]
    pub subtitle: String,
    /// ISO date (YYYY-MM-DD), rendered as "September 4th"
    #[serde(default = "default_date")]
    pub date: String,
}

impl Default for CardText {
    fn default() -> Self {
        Self {
            title: default_title(),
            subtitle: default_subtitle(),
            date: default_date(),
        }
    }
}

/// Reveal timing: one candle or balloon every `interval_ms`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingConfig {
    #[serde(default = "default_interval_ms")]
    pub interval_ms: Millis,
    #[serde(default = "default_item_count")]
    pub total_candles: u32,
    #[serde(default = "default_item_count")]
    pub total_balloons: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            total_candles: default_item_count(),
            total_balloons: default_item_count(),
        }
    }
}

/// Hex color palettes (`#RRGGBB`, leading `#` optional).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteConfig {
    #[serde(default = "default_item_colors")]
    pub candles: Vec<String>,
    #[serde(default = "default_item_colors")]
    pub balloons: Vec<String>,
    #[serde(default = "default_confetti_colors")]
    pub confetti: Vec<String>,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            candles: default_item_colors(),
            balloons: default_item_colors(),
            confetti: default_confetti_colors(),
        }
    }
}
