#![doc = include_str!("../README.md")]

#![deny(unsafe_code)]

pub mod auto_correlation;
pub mod filter_ar;
pub mod hanning;
pub mod levinson_durbin;
pub mod lpc;
pub mod math;
pub mod rand_n;
pub mod vector;

/// Largest positive 16-bit sample value.
pub const WORD16_MAX: i16 = i16::MAX;

/// Largest LPC order supported by [`levinson_durbin::levinson_durbin`].
pub const LEVINSON_MAX_ORDER: usize = 20;

/// Largest order supported by [`lpc::reflection_to_lpc`].
pub const MAX_LPC_ORDER: usize = 14;
