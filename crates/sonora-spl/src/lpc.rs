//! Reflection coefficients to LPC polynomial conversion.

use crate::MAX_LPC_ORDER;

/// Converts `order` reflection coefficients `k` (Q15) into the LPC
/// polynomial `a[..=order]` (Q12) with the step-up recursion.
///
/// No stability check is made; any coefficient set is accepted, including
/// interpolated ones that never came out of an analysis.
pub fn reflection_to_lpc(k: &[i16], order: usize, a: &mut [i16]) {
    debug_assert!(order <= MAX_LPC_ORDER);
    debug_assert!(k.len() >= order && a.len() > order);

    let mut any = [0i16; MAX_LPC_ORDER + 1];

    // 1.0 in Q12, i.e. (i16::MAX >> 3) + 1.
    a[0] = 4096;
    any[0] = a[0];
    if order == 0 {
        return;
    }
    a[1] = ((i32::from(k[0]) + 4) >> 3) as i16;

    for m in 1..order {
        let km = i32::from(k[m]);
        any[m + 1] = ((km + 4) >> 3) as i16;
        for i in 0..m {
            let step = ((i32::from(a[m - i]) * km + 16384) >> 15) as i16;
            any[i + 1] = (i32::from(a[i + 1]) + i32::from(step)) as i16;
        }
        a[..m + 2].copy_from_slice(&any[..m + 2]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_reflection_gives_unit_polynomial() {
        let mut a = [-1i16; 13];
        reflection_to_lpc(&[0; 12], 12, &mut a);
        assert_eq!(a[0], 4096);
        assert!(a[1..].iter().all(|&v| v == 0));
    }

    #[test]
    fn first_order_is_scaled_copy() {
        let mut a = [0i16; 2];
        reflection_to_lpc(&[-16384], 1, &mut a);
        assert_eq!(a, [4096, -2048]);
    }

    #[test]
    fn second_order_step_up() {
        // k = [0.5, 0.25] -> a1 = k1 + k1*k2 = 0.625, a2 = k2 = 0.25.
        let mut a = [0i16; 3];
        reflection_to_lpc(&[16384, 8192], 2, &mut a);
        assert_eq!(a, [4096, 2560, 1024]);
    }

    #[test]
    fn order_zero_only_sets_leading_one() {
        let mut a = [7i16; 3];
        reflection_to_lpc(&[], 0, &mut a);
        assert_eq!(a, [4096, 7, 7]);
    }
}
