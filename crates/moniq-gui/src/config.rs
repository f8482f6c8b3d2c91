//! Runtime paths for moniq-gui
//!
//! On the device every path has a fixed default. Each can be overridden from
//! the environment for running on a development machine:
//!
//! - `MONIQ_DEVICE_CONFIG`: device config JSON (system colour)
//! - `MONIQ_WAVETABLE_DIR`: directory wavetable list entries are loaded from
//! - `MONIQ_CAPTURE_DIR`: removable storage mount for screen captures

use std::path::PathBuf;

use moniq_core::capture::DEFAULT_CAPTURE_DIR;
use moniq_core::config::default_device_config_path;
use moniq_core::scope::default_wavetable_dir;

const DEVICE_CONFIG_ENV: &str = "MONIQ_DEVICE_CONFIG";
const WAVETABLE_DIR_ENV: &str = "MONIQ_WAVETABLE_DIR";
const CAPTURE_DIR_ENV: &str = "MONIQ_CAPTURE_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuiConfig {
    pub device_config_path: PathBuf,
    pub wavetable_dir: PathBuf,
    pub capture_dir: PathBuf,
}

impl Default for GuiConfig {
    fn default() -> Self {
        Self {
            device_config_path: default_device_config_path(),
            wavetable_dir: default_wavetable_dir(),
            capture_dir: PathBuf::from(DEFAULT_CAPTURE_DIR),
        }
    }
}

impl GuiConfig {
    /// Defaults with any environment overrides applied
    pub fn from_env() -> Self {
        Self::with_overrides(|key| std::env::var_os(key).map(PathBuf::from))
    }

    fn with_overrides(lookup: impl Fn(&str) -> Option<PathBuf>) -> Self {
        let defaults = Self::default();
        let config = Self {
            device_config_path: lookup(DEVICE_CONFIG_ENV).unwrap_or(defaults.device_config_path),
            wavetable_dir: lookup(WAVETABLE_DIR_ENV).unwrap_or(defaults.wavetable_dir),
            capture_dir: lookup(CAPTURE_DIR_ENV).unwrap_or(defaults.capture_dir),
        };
        log::debug!("Runtime paths: {:?}", config);
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GuiConfig::with_overrides(|_| None);
        assert_eq!(config.device_config_path, PathBuf::from("/udata/delia/config.json"));
        assert_eq!(config.wavetable_dir, PathBuf::from("/udata/delia/wavetables"));
        assert_eq!(config.capture_dir, PathBuf::from("/media"));
    }

    #[test]
    fn test_override() {
        let config = GuiConfig::with_overrides(|key| {
            (key == WAVETABLE_DIR_ENV).then(|| PathBuf::from("/tmp/wt"))
        });
        assert_eq!(config.wavetable_dir, PathBuf::from("/tmp/wt"));
        assert_eq!(config.capture_dir, PathBuf::from("/media"));
    }
}
