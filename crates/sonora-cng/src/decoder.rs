//! SID decoder and comfort noise synthesis.
//!
//! [`ComfortNoiseDecoder::update_sid`] sets the target spectrum and level;
//! every [`ComfortNoiseDecoder::generate`] call moves the parameters in use
//! a step closer to that target and synthesizes one frame by shaping
//! pseudo-random excitation with the resulting all-pole filter.

use sonora_spl::filter_ar::filter_ar;
use sonora_spl::lpc::reflection_to_lpc;
use sonora_spl::rand_n::rand_n;
use sonora_spl::vector::scale_vector;

use crate::sid::{MAX_SID_LEN, dequantize_reflection, index_to_energy};
use crate::{Error, MAX_FRAME_SIZE, MAX_LPC_ORDER};

const INITIAL_SEED: u32 = 7777;
const INITIAL_ORDER: usize = 5;

/// Interpolation weights (used, target) in Q15 during steady state: 0.8/0.2.
const REFL_BETA_STD: i16 = 26214;
const REFL_BETA_COMP_STD: i16 = 6553;
/// Interpolation weights (used, target) in Q15 for a new noise period: 0.6/0.4.
const REFL_BETA_NEW_PERIOD: i16 = 19661;
const REFL_BETA_COMP_NEW_PERIOD: i16 = 13107;

/// Comfort noise decoder.
///
/// The decoder needs no configuration; the order of each SID is taken from
/// its length.
#[derive(derive_more::Debug, Clone)]
pub struct ComfortNoiseDecoder {
    order: usize,
    target_energy: i32,
    used_energy: i32,
    target_reflection_coefficients: [i16; MAX_LPC_ORDER],
    used_reflection_coefficients: [i16; MAX_LPC_ORDER],
    target_scale_factor: i16,
    used_scale_factor: i16,
    #[debug(skip)]
    filter_state: [i16; MAX_LPC_ORDER],
    #[debug(skip)]
    filter_state_low: [i16; MAX_LPC_ORDER],
    seed: u32,
}

impl Default for ComfortNoiseDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ComfortNoiseDecoder {
    /// Creates a decoder with silent targets.
    pub fn new() -> Self {
        Self {
            order: INITIAL_ORDER,
            target_energy: 0,
            used_energy: 0,
            target_reflection_coefficients: [0; MAX_LPC_ORDER],
            used_reflection_coefficients: [0; MAX_LPC_ORDER],
            target_scale_factor: 0,
            used_scale_factor: 0,
            filter_state: [0; MAX_LPC_ORDER],
            filter_state_low: [0; MAX_LPC_ORDER],
            seed: INITIAL_SEED,
        }
    }

    /// Returns the decoder to its initial state, including the noise seed.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Takes a new SID as the synthesis target.
    ///
    /// Bytes past [`MAX_SID_LEN`] are ignored. An empty payload carries no
    /// energy index and leaves the decoder unchanged.
    pub fn update_sid(&mut self, sid: &[u8]) {
        let Some((&index, coefficients)) = sid.split_first() else {
            tracing::debug!("ignoring empty SID");
            return;
        };
        let coefficients = &coefficients[..coefficients.len().min(MAX_SID_LEN - 1)];
        let order = coefficients.len();
        self.order = order;

        // Target 3/4 of the transmitted energy.
        let energy = index_to_energy(index);
        self.target_energy = (energy >> 1) + (energy >> 2);

        self.target_reflection_coefficients = [0; MAX_LPC_ORDER];
        for (target, &byte) in self
            .target_reflection_coefficients
            .iter_mut()
            .zip(coefficients)
        {
            *target = dequantize_reflection(byte, order);
        }

        tracing::trace!(index, order, target_energy = self.target_energy, "decoded SID");
    }

    /// Synthesizes `out.len()` samples of comfort noise.
    ///
    /// Set `new_period` on the first frame after speech so that the
    /// parameters converge on the latest SID faster.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FrameTooLarge`] when `out` is longer than
    /// [`MAX_FRAME_SIZE`]; the decoder is left untouched.
    pub fn generate(&mut self, out: &mut [i16], new_period: bool) -> Result<(), Error> {
        let num_samples = out.len();
        if num_samples > MAX_FRAME_SIZE {
            tracing::debug!(num_samples, "rejecting oversized frame");
            return Err(Error::FrameTooLarge { num_samples });
        }

        let (beta, beta_comp) = if new_period {
            self.used_scale_factor = self.target_scale_factor;
            (REFL_BETA_NEW_PERIOD, REFL_BETA_COMP_NEW_PERIOD)
        } else {
            (REFL_BETA_STD, REFL_BETA_COMP_STD)
        };

        // Q13 scale factor.
        let used = (i32::from(self.used_scale_factor) * i32::from(beta >> 2)) >> 13;
        let target = (i32::from(self.target_scale_factor) * i32::from(beta_comp >> 2)) >> 13;
        self.used_scale_factor = (used + target) as i16;

        self.used_energy = (self.used_energy >> 1) + (self.target_energy >> 1);

        // Same for the reflection coefficients, in Q15.
        for (used, &target) in self
            .used_reflection_coefficients
            .iter_mut()
            .zip(&self.target_reflection_coefficients)
        {
            let old = ((i32::from(*used) * i32::from(beta)) >> 15) as i16;
            let new = ((i32::from(target) * i32::from(beta_comp)) >> 15) as i16;
            *used = old.wrapping_add(new);
        }

        let mut lp_poly = [0i16; MAX_LPC_ORDER + 1];
        reflection_to_lpc(&self.used_reflection_coefficients, MAX_LPC_ORDER, &mut lp_poly);

        // Prediction gain: En = prod(1 - k^2), Q13.
        let mut en: i16 = 8192;
        for &k in &self.used_reflection_coefficients {
            let k2 = ((i32::from(k) * i32::from(k)) >> 15) as i16;
            let one_minus_k2 = (0x7fff - i32::from(k2)) as i16;
            en = ((i32::from(en) * i32::from(one_minus_k2)) >> 15) as i16;
        }

        let target = (self.used_energy as f32).sqrt() as i32;
        let mut en = i32::from(((f32::from(en).sqrt() as i16 as i32) << 6) as i16);
        // 1.5 approximates sqrt(2).
        en = (en * 3) >> 1;
        self.used_scale_factor = ((en * target) >> 12) as i16;

        // Excitation energy per sample is 2^24 (Q13 N(0, 1)).
        let mut excitation = [0i16; MAX_FRAME_SIZE];
        let excitation = &mut excitation[..num_samples];
        for e in excitation.iter_mut() {
            *e = rand_n(&mut self.seed) >> 1;
        }
        scale_vector(excitation, self.used_scale_factor, 13);

        let mut low = [0i16; MAX_FRAME_SIZE];
        filter_ar(
            &lp_poly,
            excitation,
            &mut self.filter_state,
            &mut self.filter_state_low,
            out,
            &mut low[..num_samples],
        );
        Ok(())
    }

    /// Number of reflection coefficients in the last SID.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Energy described by the last SID, scaled to 3/4.
    pub fn target_energy(&self) -> i32 {
        self.target_energy
    }

    /// Energy driving synthesis, moving towards [`target_energy`](Self::target_energy).
    pub fn used_energy(&self) -> i32 {
        self.used_energy
    }

    /// Excitation gain (Q13) used by the last [`generate`](Self::generate).
    pub fn used_scale_factor(&self) -> i16 {
        self.used_scale_factor
    }

    /// Reflection coefficients (Q15) of the last SID, zero-padded to the
    /// maximum order.
    pub fn target_reflection_coefficients(&self) -> &[i16; MAX_LPC_ORDER] {
        &self.target_reflection_coefficients
    }

    /// Reflection coefficients (Q15) driving synthesis.
    pub fn used_reflection_coefficients(&self) -> &[i16; MAX_LPC_ORDER] {
        &self.used_reflection_coefficients
    }

    /// Current noise generator seed.
    pub fn seed(&self) -> u32 {
        self.seed
    }
}
