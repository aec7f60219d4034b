//! Card configuration
//!
//! Parses and validates `card.toml` into [`CardSettings`], the resolved form
//! the sequencer and the card components use.

use chrono::{Datelike, NaiveDate};

use birthday_types::{CardConfig, CardText, Color, PaletteConfig, SoundId, TimingConfig};

use crate::error::ConfigError;
use crate::sequencer::RevealTiming;

/// Muted color for unlit candles and popped balloons (#D1D5DB)
pub const MUTED_COLOR: Color = [0xD1, 0xD5, 0xDB, 255];

/// Validated palettes
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub candles: Vec<Color>,
    pub balloons: Vec<Color>,
    pub confetti: Vec<Color>,
}

/// Validated card configuration
#[derive(Debug, Clone, PartialEq)]
pub struct CardSettings {
    pub text: CardText,
    /// Human-readable date line, e.g. "September 4th"
    pub date_label: String,
    pub timing: RevealTiming,
    pub palette: Palette,
    pub default_sound: SoundId,
}

impl CardSettings {
    /// Validate a deserialized config.
    pub fn from_config(config: CardConfig) -> Result<Self, ConfigError> {
        let date = NaiveDate::parse_from_str(config.card.date.trim(), "%Y-%m-%d").map_err(
            |source| ConfigError::InvalidDate {
                value: config.card.date.clone(),
                source,
            },
        )?;

        Ok(Self {
            date_label: format_card_date(date),
            timing: resolve_timing(&config.timing)?,
            palette: resolve_palette(&config.palette)?,
            default_sound: config.default_sound,
            text: config.card,
        })
    }
}

impl Default for CardSettings {
    fn default() -> Self {
        Self {
            text: CardText::default(),
            date_label: "September 4th".to_string(),
            timing: RevealTiming::default(),
            palette: Palette {
                candles: DEFAULT_ITEM_COLORS.to_vec(),
                balloons: DEFAULT_ITEM_COLORS.to_vec(),
                confetti: DEFAULT_CONFETTI_COLORS.to_vec(),
            },
            default_sound: SoundId::default(),
        }
    }
}

const DEFAULT_ITEM_COLORS: [Color; 5] = [
    [0xFF, 0x6B, 0x6B, 255],
    [0x4E, 0xCD, 0xC4, 255],
    [0x45, 0xB7, 0xD1, 255],
    [0xFF, 0xA0, 0x7A, 255],
    [0x98, 0xD8, 0xC8, 255],
];

const DEFAULT_CONFETTI_COLORS: [Color; 7] = [
    [0xFF, 0x6B, 0x6B, 255],
    [0x4E, 0xCD, 0xC4, 255],
    [0x45, 0xB7, 0xD1, 255],
    [0xFF, 0xA0, 0x7A, 255],
    [0x98, 0xD8, 0xC8, 255],
    [0xF7, 0xDC, 0x6F, 255],
    [0xBB, 0x8F, 0xCE, 255],
];

/// Parse and validate a card TOML document.
pub fn load_card_config(source: &str) -> Result<CardSettings, ConfigError> {
    let config: CardConfig = toml::from_str(source).map_err(ConfigError::ParseToml)?;
    let settings = CardSettings::from_config(config)?;

    tracing::debug!(
        title = %settings.text.title,
        interval_ms = settings.timing.interval_ms,
        total_candles = settings.timing.total_candles,
        total_balloons = settings.timing.total_balloons,
        "Card config loaded"
    );

    Ok(settings)
}

fn resolve_timing(timing: &TimingConfig) -> Result<RevealTiming, ConfigError> {
    if timing.interval_ms == 0 {
        return Err(ConfigError::ZeroInterval);
    }
    if timing.total_candles == 0 {
        return Err(ConfigError::ZeroCount {
            field: "total_candles",
        });
    }
    if timing.total_balloons == 0 {
        return Err(ConfigError::ZeroCount {
            field: "total_balloons",
        });
    }

    Ok(RevealTiming {
        interval_ms: timing.interval_ms,
        total_candles: timing.total_candles,
        total_balloons: timing.total_balloons,
    })
}

fn resolve_palette(palette: &PaletteConfig) -> Result<Palette, ConfigError> {
    Ok(Palette {
        candles: parse_colors("candles", &palette.candles)?,
        balloons: parse_colors("balloons", &palette.balloons)?,
        confetti: parse_colors("confetti", &palette.confetti)?,
    })
}

fn parse_colors(palette: &'static str, values: &[String]) -> Result<Vec<Color>, ConfigError> {
    if values.is_empty() {
        return Err(ConfigError::EmptyPalette { palette });
    }

    values
        .iter()
        .map(|value| {
            parse_hex_color(value).ok_or_else(|| ConfigError::InvalidColor {
                palette,
                value: value.clone(),
            })
        })
        .collect()
}

/// Parse a hex color string (e.g., "#ff0000") to RGBA bytes
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some([r, g, b, 255])
}

/// Format a Color as a CSS hex string
pub fn color_to_hex(color: &Color) -> String {
    format!("#{:02X}{:02X}{:02X}", color[0], color[1], color[2])
}

/// "September 4th"
pub fn format_card_date(date: NaiveDate) -> String {
    let day = date.day();
    let suffix = match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{} {}{}", date.format("%B"), day, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_empty_document_uses_reference_card() {
        let settings = load_card_config("").unwrap();
        assert_eq!(settings, CardSettings::default());
        assert_eq!(settings.timing.interval_ms, 500);
        assert_eq!(settings.palette.confetti.len(), 7);
    }

    #[test]
    fn test_overrides() {
        let settings = load_card_config(
            r##"
default_sound = "cheering"

[card]
title = "Happy Birthday!"
date = "2025-03-22"

[timing]
interval_ms = 250
total_candles = 3

[palette]
confetti = ["#000000", "FFFFFF"]
"##,
        )
        .unwrap();

        assert_eq!(settings.text.title, "Happy Birthday!");
        assert_eq!(settings.text.subtitle, CardText::default().subtitle);
        assert_eq!(settings.date_label, "March 22nd");
        assert_eq!(
            settings.timing,
            RevealTiming {
                interval_ms: 250,
                total_candles: 3,
                total_balloons: 5
            }
        );
        assert_eq!(
            settings.palette.confetti,
            vec![[0, 0, 0, 255], [255, 255, 255, 255]]
        );
        assert_eq!(settings.default_sound, SoundId::Cheering);
    }

    #[test]
    fn test_rejects_bad_color() {
        let err = load_card_config("[palette]\ncandles = [\"#12345\"]").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidColor {
                palette: "candles",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_empty_palette() {
        let err = load_card_config("[palette]\nballoons = []").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::EmptyPalette {
                palette: "balloons"
            }
        ));
    }

    #[test]
    fn test_rejects_zero_timing() {
        assert!(matches!(
            load_card_config("[timing]\ninterval_ms = 0").unwrap_err(),
            ConfigError::ZeroInterval
        ));
        assert!(matches!(
            load_card_config("[timing]\ntotal_balloons = 0").unwrap_err(),
            ConfigError::ZeroCount {
                field: "total_balloons"
            }
        ));
    }

    #[test]
    fn test_rejects_bad_date_and_syntax() {
        assert!(matches!(
            load_card_config("[card]\ndate = \"September 4th\"").unwrap_err(),
            ConfigError::InvalidDate { .. }
        ));
        assert!(matches!(
            load_card_config("[timing\n").unwrap_err(),
            ConfigError::ParseToml(_)
        ));
        assert!(matches!(
            load_card_config("default_sound = \"kazoo\"").unwrap_err(),
            ConfigError::ParseToml(_)
        ));
    }

    #[test]
    fn test_format_card_date() {
        assert_eq!(format_card_date(date(2024, 9, 4)), "September 4th");
        assert_eq!(format_card_date(date(2024, 1, 1)), "January 1st");
        assert_eq!(format_card_date(date(2024, 2, 2)), "February 2nd");
        assert_eq!(format_card_date(date(2024, 5, 23)), "May 23rd");
        assert_eq!(format_card_date(date(2024, 6, 11)), "June 11th");
        assert_eq!(format_card_date(date(2024, 7, 12)), "July 12th");
        assert_eq!(format_card_date(date(2024, 8, 31)), "August 31st");
    }

    #[test]
    fn test_hex_colors() {
        assert_eq!(parse_hex_color("#FF6B6B"), Some([0xFF, 0x6B, 0x6B, 255]));
        assert_eq!(parse_hex_color("98D8C8"), Some([0x98, 0xD8, 0xC8, 255]));
        assert_eq!(parse_hex_color("#GG0000"), None);
        assert_eq!(parse_hex_color("#ééé"), None);
        assert_eq!(parse_hex_color("+F+F+F"), None);
        assert_eq!(parse_hex_color("#-1-1-1"), None);
        assert_eq!(color_to_hex(&[0xD1, 0xD5, 0xDB, 255]), "#D1D5DB");
    }
}
