//! SID encoder.
//!
//! Each call analyses one frame of background noise: the mean energy and,
//! for frames that are not silent, a set of reflection coefficients from a
//! Hanning-windowed, bandwidth-expanded autocorrelation. Both are smoothed
//! across frames and quantized into a SID whenever the SID interval has
//! elapsed or the caller forces one.

use sonora_spl::WORD16_MAX;
use sonora_spl::auto_correlation::auto_correlation;
use sonora_spl::hanning::get_hanning_window;
use sonora_spl::levinson_durbin::levinson_durbin;
use sonora_spl::math::div_w32_w16;
use sonora_spl::vector::{elementwise_vector_mult, energy};

use crate::config::EncoderConfig;
use crate::sid::{append_data, energy_to_index, quantize_reflection};
use crate::tables::CORR_WINDOW;
use crate::{Error, MAX_FRAME_SIZE, MAX_LPC_ORDER};

/// Seed of the (unused) encoder noise generator after a reset.
const INITIAL_SEED: u32 = 7777;

/// Smoothing weight of the previous reflection coefficients, 0.6 in Q15.
const REFL_BETA: i32 = 19661;
/// Smoothing weight of the new reflection coefficients, 0.4 in Q15.
const REFL_BETA_COMP: i32 = 13107;

/// 1.0 in Q14, the centre sample of odd-length analysis windows.
const WINDOW_CENTRE: i16 = 16384;

/// Comfort noise encoder producing SID payloads.
///
/// # Example
///
/// ```
/// use sonora_cng::{ComfortNoiseEncoder, EncoderConfig};
///
/// let mut encoder = ComfortNoiseEncoder::new(EncoderConfig::default());
/// let mut sid = Vec::new();
/// // 10 ms frames at 8 kHz; the default 100 ms interval emits on the 10th.
/// for _ in 0..9 {
///     assert_eq!(encoder.encode(&[0; 80], false, &mut sid).unwrap(), 0);
/// }
/// assert_eq!(encoder.encode(&[0; 80], false, &mut sid).unwrap(), 9);
/// assert_eq!(sid.len(), 9);
/// ```
#[derive(Debug, Clone)]
pub struct ComfortNoiseEncoder {
    config: EncoderConfig,
    ms_since_sid: u32,
    energy: i32,
    reflection_coefficients: [i16; MAX_LPC_ORDER],
    seed: u32,
}

impl ComfortNoiseEncoder {
    /// Creates an encoder for `config`.
    ///
    /// # Panics
    ///
    /// Panics if `config` fails [`EncoderConfig::validate`].
    pub fn new(config: EncoderConfig) -> Self {
        let mut encoder = Self {
            config,
            ms_since_sid: 0,
            energy: 0,
            reflection_coefficients: [0; MAX_LPC_ORDER],
            seed: INITIAL_SEED,
        };
        encoder.reset(config);
        encoder
    }

    /// Clears all smoothing state and the SID timer, and switches to
    /// `config`.
    ///
    /// # Panics
    ///
    /// Panics if `config` fails [`EncoderConfig::validate`].
    pub fn reset(&mut self, config: EncoderConfig) {
        if let Err(err) = config.validate() {
            panic!("invalid comfort noise encoder configuration: {err}");
        }
        self.config = config;
        self.ms_since_sid = 0;
        self.energy = 0;
        self.reflection_coefficients = [0; MAX_LPC_ORDER];
        self.seed = INITIAL_SEED;
    }

    /// Analyses one frame and appends a SID to `output` when one is due.
    ///
    /// A SID is due once the frames seen since the last one (this frame
    /// included) span the configured SID interval, or whenever `force_sid`
    /// is set. A forced SID describes this frame alone instead of the
    /// smoothed history.
    ///
    /// Returns the number of bytes appended: `quality + 1` when a SID was
    /// emitted, otherwise 0. A frame whose analysis yields an unstable
    /// filter is dropped and leaves the encoder untouched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FrameTooLarge`] for frames longer than
    /// [`MAX_FRAME_SIZE`]; the encoder is left untouched.
    pub fn encode(
        &mut self,
        speech: &[i16],
        force_sid: bool,
        output: &mut Vec<u8>,
    ) -> Result<usize, Error> {
        let num_samples = speech.len();
        if num_samples > MAX_FRAME_SIZE {
            tracing::debug!(num_samples, "rejecting oversized frame");
            return Err(Error::FrameTooLarge { num_samples });
        }
        let order = self.config.quality;

        let mut speech_buf = [0i16; MAX_FRAME_SIZE];
        let speech_buf = &mut speech_buf[..num_samples];
        speech_buf.copy_from_slice(speech);

        let frame_energy = mean_energy(speech_buf);

        let mut refl = [0i16; MAX_LPC_ORDER];
        if frame_energy > 1 {
            apply_analysis_window(speech_buf);

            let mut corr = [0i32; MAX_LPC_ORDER + 1];
            auto_correlation(speech_buf, order, &mut corr);
            if corr[0] == 0 {
                corr[0] = i32::from(WORD16_MAX);
            }
            for (c, &w) in corr[..order].iter_mut().zip(CORR_WINDOW.iter()) {
                *c = bandwidth_expand(*c, w);
            }

            let mut lpc = [0i16; MAX_LPC_ORDER + 1];
            if !levinson_durbin(&corr, &mut lpc, &mut refl, order) {
                tracing::debug!(num_samples, order, "dropping frame with unstable analysis");
                return Ok(0);
            }
        }

        if force_sid {
            self.reflection_coefficients[..order].copy_from_slice(&refl[..order]);
            self.energy = frame_energy;
        } else {
            for (smoothed, &k) in self.reflection_coefficients[..order]
                .iter_mut()
                .zip(&refl[..order])
            {
                let old = ((i32::from(*smoothed) * REFL_BETA) >> 15) as i16;
                let new = ((i32::from(k) * REFL_BETA_COMP) >> 15) as i16;
                *smoothed = old.wrapping_add(new);
            }
            self.energy = (frame_energy >> 2) + (self.energy >> 1) + (self.energy >> 2);
        }
        self.energy = self.energy.max(1);

        let frame_ms = 1000 * num_samples as u64 / u64::from(self.config.sample_rate_hz);
        self.ms_since_sid = self
            .ms_since_sid
            .saturating_add(u32::try_from(frame_ms).unwrap_or(u32::MAX));

        if self.ms_since_sid < self.config.sid_interval_ms && !force_sid {
            return Ok(0);
        }

        let index = energy_to_index(self.energy);
        let coefficients = &self.reflection_coefficients[..order];
        let written = append_data(output, order + 1, |sid| {
            sid[0] = index;
            for (byte, &k) in sid[1..].iter_mut().zip(coefficients) {
                *byte = quantize_reflection(k, order);
            }
            order + 1
        });
        tracing::trace!(
            index,
            energy = self.energy,
            ms_since_sid = self.ms_since_sid,
            force_sid,
            "emitting SID"
        );
        self.ms_since_sid = 0;
        Ok(written)
    }

    /// Number of reflection coefficients per SID.
    pub fn order(&self) -> usize {
        self.config.quality
    }

    /// The active configuration.
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Milliseconds of audio encoded since the last SID.
    pub fn ms_since_sid(&self) -> u32 {
        self.ms_since_sid
    }

    /// Smoothed mean energy per sample that the next SID will describe.
    pub fn smoothed_energy(&self) -> i32 {
        self.energy
    }

    /// Smoothed reflection coefficients (Q15) that the next SID will carry.
    pub fn smoothed_reflection_coefficients(&self) -> &[i16] {
        &self.reflection_coefficients[..self.config.quality]
    }

    /// Seed of the encoder's noise generator, reserved for excitation
    /// on the encoder side.
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

/// Mean energy per sample, trading the energy scaling for a smaller
/// divisor so that at most 5 bits of the divisor are lost.
fn mean_energy(speech: &[i16]) -> i32 {
    if speech.is_empty() {
        return 0;
    }
    let (mut energy, mut shifts) = energy(speech);
    let mut factor = speech.len();
    while shifts > 0 {
        if shifts > 5 {
            energy <<= shifts - 5;
            shifts = 5;
        } else {
            factor /= 2;
            shifts -= 1;
        }
    }
    div_w32_w16(energy, factor as i16)
}

/// Applies a symmetric Hanning window (Q14) in place.
fn apply_analysis_window(speech: &mut [i16]) {
    let len = speech.len();
    let half = len / 2;
    let mut window = [0i16; MAX_FRAME_SIZE];
    let window = &mut window[..len];
    get_hanning_window(&mut window[..half]);
    if len % 2 == 1 {
        window[half] = WINDOW_CENTRE;
    }
    for i in 0..half {
        window[len - 1 - i] = window[i];
    }
    elementwise_vector_mult(speech, window, 14);
}

/// Multiplies a correlation lag by a Q15 lag window weight.
fn bandwidth_expand(corr: i32, weight: i16) -> i32 {
    let scaled = ((i64::from(corr).abs() * i64::from(weight)) >> 15) as i32;
    if corr < 0 { -scaled } else { scaled }
}
