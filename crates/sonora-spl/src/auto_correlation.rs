//! Fixed-point autocorrelation.

use crate::math::{get_size_in_bits, norm_w32};
use crate::vector::max_abs_value_w16;

/// Computes the autocorrelation of `input` for lags `0..=order` into
/// `result[..=order]`.
///
/// Every product is right-shifted by one scale chosen from the peak sample
/// and the input length, so that no lag can overflow 32 bits. Returns that
/// scale. Lags at or beyond the input length are 0.
pub fn auto_correlation(input: &[i16], order: usize, result: &mut [i32]) -> i32 {
    debug_assert!(result.len() > order);

    let smax = max_abs_value_w16(input);

    // Scale the samples so that `input.len() * smax * smax` cannot overflow.
    let scaling = if smax == 0 {
        0
    } else {
        let nbits = i32::from(get_size_in_bits(input.len() as u32));
        let t = i32::from(norm_w32(i32::from(smax) * i32::from(smax)));
        if t > nbits { 0 } else { nbits - t }
    };

    for (lag, r) in result[..=order].iter_mut().enumerate() {
        let n = input.len().saturating_sub(lag);
        *r = input[..n]
            .iter()
            .zip(input[lag..lag + n].iter())
            .fold(0i32, |sum, (&a, &b)| {
                sum.wrapping_add((i32::from(a) * i32::from(b)) >> scaling)
            });
    }

    scaling
}
