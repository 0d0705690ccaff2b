// Configuration management
//
// Rates, buffer sizing and output settings for the demo renderer.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::blip::MAX_FRAME;

/// Default configuration file path
pub const CONFIG_FILE: &str = "blip_config.toml";

/// Demo renderer configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Output settings
    pub output: OutputConfig,

    /// Source clock settings
    pub clock: ClockConfig,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output sample rate in Hz
    pub sample_rate: u32,

    /// Buffer length in milliseconds
    pub buffer_ms: u32,

    /// Length of each rendered scene in seconds
    pub duration_secs: f64,

    /// Directory wave files are written to
    pub directory: PathBuf,
}

/// Source clock configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClockConfig {
    /// Clock rate of the square sweep scene (NTSC color burst)
    pub square_rate: f64,

    /// Clock rate of the chip log scene
    pub chip_rate: f64,

    /// Frames per second of the square sweep scene
    pub frame_rate: f64,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44_100,
            buffer_ms: 44,
            duration_secs: 2.0,
            directory: PathBuf::from("."),
        }
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            square_rate: 3_579_545.45,
            chip_rate: 1_789_772.727,
            frame_rate: 60.0,
        }
    }
}

impl DemoConfig {
    /// Buffer capacity in samples for the configured rate and length
    ///
    /// Always at least one sample and never more than [`MAX_FRAME`].
    pub fn buffer_capacity(&self) -> usize {
        let samples = self.output.sample_rate as u64 * self.output.buffer_ms as u64 / 1000;
        (samples as usize).clamp(1, MAX_FRAME)
    }

    /// Number of samples per channel in one rendered scene
    pub fn total_samples(&self) -> usize {
        (self.output.duration_secs.max(0.0) * self.output.sample_rate as f64) as usize
    }

    /// Load configuration, falling back to defaults
    ///
    /// A missing or unreadable file yields the default configuration,
    /// which is written back to `path` if possible.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::load(&path).unwrap_or_else(|_| {
            let config = Self::default();
            let _ = config.save(&path);
            config
        })
    }

    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, io::Error> {
        let contents = fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Save configuration to a TOML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), io::Error> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(path, contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DemoConfig::default();
        assert_eq!(config.output.sample_rate, 44_100);
        assert_eq!(config.output.duration_secs, 2.0);
        assert_eq!(config.clock.frame_rate, 60.0);
        assert_eq!(config.buffer_capacity(), 1940);
        assert_eq!(config.total_samples(), 88_200);
    }

    #[test]
    fn test_buffer_capacity_is_limited() {
        let mut config = DemoConfig::default();

        config.output.buffer_ms = 1000;
        assert_eq!(config.buffer_capacity(), MAX_FRAME);

        config.output.buffer_ms = 0;
        assert_eq!(config.buffer_capacity(), 1);
    }

    #[test]
    fn test_config_serialization() {
        let config = DemoConfig::default();
        let toml_str = toml::to_string(&config).expect("Failed to serialize");
        let deserialized: DemoConfig = toml::from_str(&toml_str).expect("Failed to deserialize");

        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_partial_file_is_rejected() {
        let result: Result<DemoConfig, _> = toml::from_str("[output]\nsample_rate = 48000\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("blip_config_{}.toml", std::process::id()));

        let mut config = DemoConfig::default();
        config.output.sample_rate = 48_000;
        config.save(&path).unwrap();

        let loaded = DemoConfig::load(&path).unwrap();
        assert_eq!(loaded.output.sample_rate, 48_000);
        assert_eq!(loaded.buffer_capacity(), 2112);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = std::env::temp_dir().join(format!("blip_missing_{}", std::process::id()));
        let config = DemoConfig::load_or_default(dir.join("nope").join("config.toml"));
        assert_eq!(config, DemoConfig::default());
    }
}
