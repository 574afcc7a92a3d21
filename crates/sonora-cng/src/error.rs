use std::fmt;

use crate::MAX_FRAME_SIZE;

/// Error returned by [`ComfortNoiseEncoder::encode`](crate::ComfortNoiseEncoder::encode)
/// and [`ComfortNoiseDecoder::generate`](crate::ComfortNoiseDecoder::generate).
///
/// The instance is left untouched when an error is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The frame holds more samples than the internal buffers.
    FrameTooLarge { num_samples: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::FrameTooLarge { num_samples } => write!(
                f,
                "frame of {num_samples} samples exceeds the maximum of {MAX_FRAME_SIZE}",
            ),
        }
    }
}

impl std::error::Error for Error {}
