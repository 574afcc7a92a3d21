//! Levinson-Durbin recursion in split-precision fixed point.
//!
//! Solves the normal equations for an autocorrelation vector, producing
//! reflection coefficients (Q15) and the LPC polynomial (Q12). All
//! intermediate values are normalized 32-bit quantities kept as [`HiLow`]
//! pairs so that only 16x16->32 multiplies are needed.

use crate::LEVINSON_MAX_ORDER;
use crate::math::{HiLow, div_w32_hi_low, norm_w32};

/// Reflection coefficients with a magnitude above this (Q15) are treated as
/// an unstable filter.
pub const STABILITY_THRESHOLD: i16 = 32750;

/// Runs Levinson-Durbin on `r[..=order]`.
///
/// On success writes the LPC polynomial to `a[..=order]` (Q12, `a[0]` is
/// 1.0) and the reflection coefficients to `k[..order]` (Q15) and returns
/// `true`. Returns `false` as soon as a reflection coefficient exceeds
/// [`STABILITY_THRESHOLD`]; `a` is then left untouched and `k` is only
/// partially written, so neither may be used.
///
/// `r[0]` must be positive and at least as large as every other lag.
pub fn levinson_durbin(r: &[i32], a: &mut [i16], k: &mut [i16], order: usize) -> bool {
    debug_assert!(order <= LEVINSON_MAX_ORDER);
    debug_assert!(r.len() > order && a.len() > order && k.len() >= order);

    if order == 0 {
        a[0] = 4096;
        return true;
    }

    // Autocorrelation and LPC coefficients in high precision.
    let mut r_hl = [HiLow::default(); LEVINSON_MAX_ORDER + 1];
    let mut a_hl = [HiLow::default(); LEVINSON_MAX_ORDER + 1];
    // LPC coefficients for the next iteration.
    let mut a_upd = [HiLow::default(); LEVINSON_MAX_ORDER + 1];

    // Normalize the autocorrelation.
    let norm = norm_w32(r[0]);
    for (dst, &src) in r_hl.iter_mut().zip(&r[..=order]) {
        *dst = HiLow::from_w32(src << norm);
    }

    // K = A[1] = -R[1] / R[0]
    let r1 = r[1] << norm;
    let mut k_w32 = div_w32_hi_low(r1.wrapping_abs(), r_hl[0]);
    if r1 > 0 {
        k_w32 = k_w32.wrapping_neg();
    }
    let k_hl = HiLow::from_w32(k_w32);
    k[0] = k_hl.hi;
    if is_unstable(k_hl.hi, 1) {
        return false;
    }

    // A[1] in Q27.
    a_hl[1] = HiLow::from_w32(k_w32 >> 4);

    // Alpha = R[0] * (1 - K^2)
    let alpha_w32 = r_hl[0].mul_q31(HiLow::from_w32(k_hl.one_minus_square()));
    let mut alpha_exp = norm_w32(alpha_w32);
    let mut alpha = HiLow::from_w32(alpha_w32 << alpha_exp);

    for i in 2..=order {
        // R[i] + sum_{j=1}^{i-1} R[j] * A[i-j], in Q31.
        let mut sum = (1..i).fold(0i32, |acc, j| acc.wrapping_add(r_hl[j].mul_q31(a_hl[i - j])));
        sum = (sum << 4).wrapping_add(r_hl[i].to_w32());

        // K = -sum / Alpha
        let mut k_w32 = div_w32_hi_low(sum.wrapping_abs(), alpha);
        if sum > 0 {
            k_w32 = k_w32.wrapping_neg();
        }

        // De-normalize with the accumulated Alpha shifts, saturating.
        let norm = norm_w32(k_w32);
        k_w32 = if k_w32 == 0 {
            0
        } else if alpha_exp <= norm {
            k_w32 << alpha_exp
        } else if k_w32 > 0 {
            i32::MAX
        } else {
            i32::MIN
        };

        let k_hl = HiLow::from_w32(k_w32);
        k[i - 1] = k_hl.hi;

        if is_unstable(k_hl.hi, i) {
            return false;
        }

        // Anew[j] = A[j] + K * A[i-j] for j = 1..i-1, Anew[i] = K
        for j in 1..i {
            let updated = a_hl[j].to_w32().wrapping_add(k_hl.mul_q31(a_hl[i - j]));
            a_upd[j] = HiLow::from_w32(updated);
        }
        a_upd[i] = HiLow::from_w32(k_w32 >> 4);

        // Alpha = Alpha * (1 - K^2)
        let alpha_w32 = alpha.mul_q31(HiLow::from_w32(k_hl.one_minus_square()));
        let norm = norm_w32(alpha_w32);
        alpha = HiLow::from_w32(alpha_w32 << norm);
        alpha_exp += norm;

        a_hl[1..=i].copy_from_slice(&a_upd[1..=i]);
    }

    // Q27 -> Q12 with rounding.
    a[0] = 4096;
    for (dst, src) in a[1..=order].iter_mut().zip(&a_hl[1..=order]) {
        *dst = (src.to_w32().wrapping_mul(2).wrapping_add(32768) >> 16) as i16;
    }
    true
}

fn is_unstable(k: i16, step: usize) -> bool {
    let unstable = k.unsigned_abs() > STABILITY_THRESHOLD as u16;
    if unstable {
        tracing::trace!(step, k, "unstable reflection coefficient");
    }
    unstable
}
