//! Widget configuration.

use chrono::{Datelike, Local, NaiveDate};
use peniko::Color;
use serde::{Deserialize, Serialize};

/// Default width of the result surface.
pub const DEFAULT_RESULT_WIDTH: u32 = 320;
/// Default height of the result surface.
pub const DEFAULT_RESULT_HEIGHT: u32 = 160;
/// Default stroke width on the result surface.
pub const DEFAULT_LINE_WIDTH: f64 = 2.0;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    /// The light gray (`#ddd`) used for the date watermark.
    pub fn light_gray() -> Self {
        Self::new(0xdd, 0xdd, 0xdd, 255)
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Date watermark painted on the result surface background.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatermarkConfig {
    pub enabled: bool,
    pub color: SerializableColor,
    /// Fixed date to show. `None` uses the local date at init time.
    pub date: Option<NaiveDate>,
}

impl Default for WatermarkConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            color: SerializableColor::light_gray(),
            date: None,
        }
    }
}

impl WatermarkConfig {
    /// Watermark text in `d-m-yyyy` form, without zero padding.
    pub fn text(&self) -> String {
        let date = self.date.unwrap_or_else(|| Local::now().date_naive());
        format!("{}-{}-{}", date.day(), date.month(), date.year())
    }
}

/// Configuration for a signature widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    pub result_width: u32,
    pub result_height: u32,
    /// Stroke width in result space. The display stroke is scaled up.
    pub line_width: f64,
    pub ink: SerializableColor,
    pub background: SerializableColor,
    pub watermark: WatermarkConfig,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            result_width: DEFAULT_RESULT_WIDTH,
            result_height: DEFAULT_RESULT_HEIGHT,
            line_width: DEFAULT_LINE_WIDTH,
            ink: SerializableColor::black(),
            background: SerializableColor::white(),
            watermark: WatermarkConfig::default(),
        }
    }
}

impl WidgetConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Result surface size as `(width, height)`.
    pub fn result_size(&self) -> (u32, u32) {
        (self.result_width, self.result_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WidgetConfig::default();
        assert_eq!(config.result_size(), (320, 160));
        assert!((config.line_width - 2.0).abs() < f64::EPSILON);
        assert!(config.watermark.enabled);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = WidgetConfig::from_json(r#"{"result_width": 400}"#).unwrap();
        assert_eq!(config.result_width, 400);
        assert_eq!(config.result_height, DEFAULT_RESULT_HEIGHT);
        assert_eq!(config.ink, SerializableColor::black());
    }

    #[test]
    fn test_watermark_text_unpadded() {
        let watermark = WatermarkConfig {
            date: NaiveDate::from_ymd_opt(2024, 3, 7),
            ..Default::default()
        };
        assert_eq!(watermark.text(), "7-3-2024");
    }

    #[test]
    fn test_color_conversion() {
        let color: Color = SerializableColor::light_gray().into();
        let back = SerializableColor::from(color);
        assert_eq!(back, SerializableColor::light_gray());
    }
}
