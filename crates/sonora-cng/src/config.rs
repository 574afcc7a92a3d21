//! Encoder configuration.

use std::fmt;

use crate::MAX_LPC_ORDER;

/// SID interval that refreshes the noise description on every frame.
pub const SID_SHORT_INTERVAL_MS: u32 = 1;
/// Typical SID interval.
pub const SID_NORMAL_INTERVAL_MS: u32 = 100;
/// SID interval for links that rarely refresh the noise description.
pub const SID_LONG_INTERVAL_MS: u32 = 10_000;

/// Quality with no reflection coefficients (rejected by the encoder).
pub const NUM_PARAMS_LOW: usize = 0;
/// Typical quality: 8 reflection coefficients.
pub const NUM_PARAMS_NORMAL: usize = 8;
/// Highest supported quality.
pub const NUM_PARAMS_HIGH: usize = MAX_LPC_ORDER;
/// One more coefficient than supported (rejected by the encoder).
pub const NUM_PARAMS_TOO_HIGH: usize = MAX_LPC_ORDER + 1;

/// Error returned by [`EncoderConfig::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Quality (number of reflection coefficients) is outside `1..=12`.
    InvalidQuality { quality: usize },
    /// Sample rate is zero.
    InvalidSampleRate { sample_rate_hz: u32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::InvalidQuality { quality } => write!(
                f,
                "invalid quality {quality}; expected 1..={MAX_LPC_ORDER} reflection coefficients",
            ),
            Self::InvalidSampleRate { sample_rate_hz } => {
                write!(f, "invalid sample rate {sample_rate_hz}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Static configuration of a [`ComfortNoiseEncoder`](crate::ComfortNoiseEncoder).
///
/// # Example
///
/// ```
/// use sonora_cng::EncoderConfig;
/// use sonora_cng::config::{NUM_PARAMS_HIGH, SID_LONG_INTERVAL_MS};
///
/// let config = EncoderConfig {
///     sample_rate_hz: 16_000,
///     sid_interval_ms: SID_LONG_INTERVAL_MS,
///     quality: NUM_PARAMS_HIGH,
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderConfig {
    /// Sample rate of the analysed frames in Hz (default: 8000).
    pub sample_rate_hz: u32,
    /// Time between periodic SIDs in milliseconds (default: 100).
    pub sid_interval_ms: u32,
    /// Number of reflection coefficients per SID, `1..=12` (default: 8).
    pub quality: usize,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: 8000,
            sid_interval_ms: SID_NORMAL_INTERVAL_MS,
            quality: NUM_PARAMS_NORMAL,
        }
    }
}

impl EncoderConfig {
    /// Checks that the configuration can drive an encoder.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_LPC_ORDER).contains(&self.quality) {
            return Err(ConfigError::InvalidQuality {
                quality: self.quality,
            });
        }
        if self.sample_rate_hz == 0 {
            return Err(ConfigError::InvalidSampleRate {
                sample_rate_hz: self.sample_rate_hz,
            });
        }
        Ok(())
    }

    /// Length in bytes of the SIDs produced with this configuration.
    pub fn sid_len(&self) -> usize {
        self.quality + 1
    }
}
