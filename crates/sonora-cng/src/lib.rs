#![doc = include_str!("../README.md")]

#![deny(unsafe_code)]

pub mod config;
pub mod decoder;
pub mod encoder;
mod error;
pub mod sid;
pub(crate) mod tables;

pub use config::{ConfigError, EncoderConfig};
pub use decoder::ComfortNoiseDecoder;
pub use encoder::ComfortNoiseEncoder;
pub use error::Error;

/// Maximum number of reflection coefficients carried in a SID.
pub const MAX_LPC_ORDER: usize = 12;

/// Maximum number of samples per `encode`/`generate` call (10 ms at 64 kHz).
pub const MAX_FRAME_SIZE: usize = 640;
