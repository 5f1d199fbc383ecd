//! Configuration type definitions.

use crate::constants::encode;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Encoding settings for chapter output.
    #[serde(default)]
    pub encode: EncodeConfig,

    /// Default settings.
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Encoding settings for chapter output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeConfig {
    /// Audio bitrate (e.g. "40k").
    pub bitrate: String,

    /// Sample rate in Hz.
    pub sample_rate: u32,

    /// Channel count.
    pub channels: u32,
}

impl Default for EncodeConfig {
    fn default() -> Self {
        Self {
            bitrate: encode::DEFAULT_BITRATE.to_string(),
            sample_rate: encode::DEFAULT_SAMPLE_RATE,
            channels: encode::DEFAULT_CHANNELS,
        }
    }
}

/// Default split settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Default base output directory.
    pub output_dir: Option<PathBuf>,

    /// Default title pattern override.
    pub pattern: Option<String>,
}
