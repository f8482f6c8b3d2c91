//! Device configuration and the system accent colour
//!
//! The instrument stores its settings as JSON. The display only reads the
//! `system_colour` key: a 6-digit hex RGB string. A missing file, a parse
//! failure or an invalid colour all fall back to the default white.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default device config location on the instrument
pub const DEFAULT_DEVICE_CONFIG_PATH: &str = "/udata/delia/config.json";

/// Colour used when none is configured or the configured one is invalid
pub const DEFAULT_SYSTEM_COLOUR: &str = "FFFFFF";

/// Default dimming intensity (out of 10)
pub const DEFAULT_DIM_INTENSITY: u8 = 5;

/// Errors parsing an accent colour string
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColourError {
    #[error("Colour must be 6 hex digits, got {0} characters")]
    BadLength(usize),

    #[error("Invalid hex digit in colour '{0}'")]
    BadDigit(String),
}

/// The instrument-wide accent colour
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemColour {
    rgb: [u8; 3],
    hex: String,
}

impl SystemColour {
    /// Parse a 6-digit hex string (no `#` prefix)
    pub fn parse(hex: &str) -> Result<Self, ColourError> {
        if hex.len() != 6 {
            return Err(ColourError::BadLength(hex.chars().count()));
        }
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColourError::BadDigit(hex.to_string()));
        }

        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| ColourError::BadDigit(hex.to_string()))
        };
        Ok(Self {
            rgb: [channel(0)?, channel(2)?, channel(4)?],
            hex: hex.to_ascii_uppercase(),
        })
    }

    /// Parse, logging and falling back to the default on failure
    pub fn parse_or_default(hex: &str) -> Self {
        Self::parse(hex).unwrap_or_else(|e| {
            log::warn!("Invalid system colour '{}': {}, using {}", hex, e, DEFAULT_SYSTEM_COLOUR);
            Self::default()
        })
    }

    pub fn rgb(&self) -> [u8; 3] {
        self.rgb
    }

    /// Hex string as configured (upper case, no prefix)
    pub fn hex(&self) -> &str {
        &self.hex
    }

    /// Colour scaled to `intensity` tenths of each channel
    pub fn dimmed(&self, intensity: u8) -> [u8; 3] {
        let intensity = u16::from(intensity.min(10));
        self.rgb.map(|c| ((u16::from(c) * intensity) / 10) as u8)
    }
}

impl Default for SystemColour {
    fn default() -> Self {
        Self {
            rgb: [0xFF, 0xFF, 0xFF],
            hex: DEFAULT_SYSTEM_COLOUR.to_string(),
        }
    }
}

/// Subset of the device config file read by the display
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    pub system_colour: Option<String>,
}

impl DeviceConfig {
    /// Accent colour from config, or the default
    pub fn system_colour(&self) -> SystemColour {
        self.system_colour
            .as_deref()
            .map(SystemColour::parse_or_default)
            .unwrap_or_default()
    }
}

/// Default device config path
pub fn default_device_config_path() -> PathBuf {
    PathBuf::from(DEFAULT_DEVICE_CONFIG_PATH)
}

/// Load the device config from a JSON file
///
/// If the file doesn't exist, returns default config.
/// If the file exists but is invalid, logs a warning and returns default config.
pub fn load_device_config(path: &Path) -> DeviceConfig {
    log::info!("load_device_config: Loading from {:?}", path);

    if !path.exists() {
        log::info!("load_device_config: Config file doesn't exist, using defaults");
        return DeviceConfig::default();
    }

    match std::fs::read_to_string(path) {
        Ok(contents) => match serde_json::from_str::<DeviceConfig>(&contents) {
            Ok(config) => {
                log::info!(
                    "load_device_config: Loaded config - system colour: {:?}",
                    config.system_colour
                );
                config
            }
            Err(e) => {
                log::warn!("load_device_config: Failed to parse config: {}, using defaults", e);
                DeviceConfig::default()
            }
        },
        Err(e) => {
            log::warn!(
                "load_device_config: Failed to read config file: {}, using defaults",
                e
            );
            DeviceConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_colour() {
        let colour = SystemColour::parse("ff8000").unwrap();
        assert_eq!(colour.rgb(), [0xFF, 0x80, 0x00]);
        assert_eq!(colour.hex(), "FF8000");
    }

    #[test]
    fn test_invalid_colour_falls_back() {
        assert_eq!(SystemColour::parse("12345"), Err(ColourError::BadLength(5)));
        assert!(matches!(SystemColour::parse("GG0000"), Err(ColourError::BadDigit(_))));
        assert_eq!(SystemColour::parse_or_default("nope"), SystemColour::default());
        assert_eq!(SystemColour::parse_or_default("").hex(), DEFAULT_SYSTEM_COLOUR);
    }

    #[test]
    fn test_dimmed() {
        let colour = SystemColour::parse("FF6432").unwrap();
        assert_eq!(colour.dimmed(DEFAULT_DIM_INTENSITY), [127, 50, 25]);
        assert_eq!(colour.dimmed(10), colour.rgb());
        assert_eq!(colour.dimmed(0), [0, 0, 0]);
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        let config = load_device_config(Path::new("/nonexistent/path/config.json"));
        assert_eq!(config, DeviceConfig::default());
        assert_eq!(config.system_colour(), SystemColour::default());
    }

    #[test]
    fn test_load_reads_system_colour() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "system_colour": "00C0FF", "midi_channel": 3 }"#).unwrap();

        let config = load_device_config(&path);
        assert_eq!(config.system_colour.as_deref(), Some("00C0FF"));
        assert_eq!(config.system_colour().rgb(), [0x00, 0xC0, 0xFF]);
    }

    #[test]
    fn test_load_invalid_json_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ system_colour: ").unwrap();
        assert_eq!(load_device_config(&path), DeviceConfig::default());
    }
}
