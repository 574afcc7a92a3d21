//! Elementwise vector operations on 16-bit samples.

use crate::math::{get_size_in_bits, norm_w32};

/// Returns the largest absolute value in `vector`, saturated to `i16::MAX`.
///
/// Returns 0 for an empty vector.
pub fn max_abs_value_w16(vector: &[i16]) -> i16 {
    let maximum = vector
        .iter()
        .map(|&v| i32::from(v).abs())
        .max()
        .unwrap_or(0);
    // Guard the case for abs(-32768).
    maximum.min(i32::from(i16::MAX)) as i16
}

/// Scales `vector` in place: `vector[i] = (gain * vector[i]) >> right_shifts`.
pub fn scale_vector(vector: &mut [i16], gain: i16, right_shifts: u32) {
    for v in vector.iter_mut() {
        *v = ((i32::from(*v) * i32::from(gain)) >> right_shifts) as i16;
    }
}

/// Multiplies `vector` in place by `window`, elementwise:
/// `vector[i] = (vector[i] * window[i]) >> right_shifts`.
pub fn elementwise_vector_mult(vector: &mut [i16], window: &[i16], right_shifts: u32) {
    debug_assert_eq!(vector.len(), window.len());
    for (v, &w) in vector.iter_mut().zip(window.iter()) {
        *v = ((i32::from(*v) * i32::from(w)) >> right_shifts) as i16;
    }
}

/// Returns the right shift needed so that `times` squared samples of
/// `vector` can be accumulated in 32 bits without overflow.
pub fn get_scaling_square(vector: &[i16], times: usize) -> i16 {
    let nbits = get_size_in_bits(times as u32);
    let smax = vector
        .iter()
        .map(|&s| if s > 0 { s } else { s.wrapping_neg() })
        .fold(-1i16, i16::max);
    if smax == 0 {
        // norm(0) returns 0.
        return 0;
    }
    let t = norm_w32(i32::from(smax) * i32::from(smax));
    if t > nbits { 0 } else { nbits - t }
}

/// Returns the energy of `vector` together with the right shift applied to
/// every squared sample before accumulation.
pub fn energy(vector: &[i16]) -> (i32, i16) {
    let scaling = get_scaling_square(vector, vector.len());
    let en = vector.iter().fold(0i32, |acc, &v| {
        acc.wrapping_add((i32::from(v) * i32::from(v)) >> scaling)
    });
    (en, scaling)
}
