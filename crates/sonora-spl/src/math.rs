//! Scalar fixed-point helpers: bit counting, normalization and division.
//!
//! Everything here mirrors the behaviour of a 16/32-bit DSP: multiplies are
//! 16x16->32, overflow wraps, and division by zero saturates.

/// Returns the number of leading zero bits in `n` (32 for `n == 0`).
#[inline]
pub fn count_leading_zeros32(n: u32) -> i16 {
    n.leading_zeros() as i16
}

/// Returns the number of bits needed to represent `n`.
#[inline]
pub fn get_size_in_bits(n: u32) -> i16 {
    32 - count_leading_zeros32(n)
}

/// Returns the number of steps `a` can be left-shifted without overflow,
/// or 0 if `a == 0`.
#[inline]
pub fn norm_w32(a: i32) -> i16 {
    if a == 0 {
        return 0;
    }
    let magnitude = if a < 0 { !a } else { a };
    count_leading_zeros32(magnitude as u32) - 1
}

/// Divides `num` by `den`, truncating toward zero.
///
/// Returns `i32::MAX` when `den == 0`.
#[inline]
pub fn div_w32_w16(num: i32, den: i16) -> i32 {
    if den != 0 {
        num.wrapping_div(i32::from(den))
    } else {
        i32::MAX
    }
}

/// A normalized 32-bit value stored as a 16-bit high word and a 15-bit low
/// word, so that products can be formed from 16x16->32 multiplies only.
///
/// `low` holds bits 15..1 of the value; bit 0 is dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HiLow {
    pub hi: i16,
    pub low: i16,
}

impl HiLow {
    /// Splits a 32-bit value into its high and low halves.
    #[inline]
    pub const fn from_w32(x: i32) -> Self {
        let hi = (x >> 16) as i16;
        let low = (x.wrapping_sub((hi as i32) << 16) >> 1) as i16;
        Self { hi, low }
    }

    /// Reassembles the 32-bit value (bit 0 is always zero).
    #[inline]
    pub const fn to_w32(self) -> i32 {
        ((self.hi as i32) << 16).wrapping_add((self.low as i32) << 1)
    }

    /// Extended-precision product of two Q31 values, result in Q31.
    ///
    /// The `low * low` term is below the result's precision and is omitted.
    #[inline]
    pub const fn mul_q31(self, other: Self) -> i32 {
        let hi_hi = self.hi as i32 * other.hi as i32;
        let hi_low = (self.hi as i32 * other.low as i32) >> 15;
        let low_hi = (self.low as i32 * other.hi as i32) >> 15;
        hi_hi.wrapping_add(hi_low).wrapping_add(low_hi) << 1
    }

    /// `1 - self^2` in Q31, for a reflection coefficient in Q31.
    #[inline]
    pub const fn one_minus_square(self) -> i32 {
        let hi = self.hi as i32;
        let low = self.low as i32;
        let square = ((hi * low) >> 14).wrapping_add(hi * hi).wrapping_mul(2);
        // Guard against < 0.
        i32::MAX.wrapping_sub(square.wrapping_abs())
    }
}

/// Divides `num` by the hi/low value `den`, with the result in Q31.
///
/// `num` must be non-negative and smaller than `den`; `den` must be
/// normalized so that `den.hi` is at least `0x4000`.
pub fn div_w32_hi_low(num: i32, den: HiLow) -> i32 {
    // 1/den_hi in Q14 (0x1FFFFFFF = 0.5 in Q30).
    let approx = div_w32_w16(0x1FFF_FFFF, den.hi) as i16;
    let approx32 = i32::from(approx);

    // den * approx
    let mut tmp = ((i32::from(den.hi) * approx32) << 1)
        .wrapping_add(((i32::from(den.low) * approx32) >> 15) << 1);

    // 2.0 - den * approx, in Q30.
    tmp = i32::MAX.wrapping_sub(tmp);
    let two_minus = HiLow::from_w32(tmp);

    // 1/den in Q29.
    tmp = (i32::from(two_minus.hi) * approx32)
        .wrapping_add((i32::from(two_minus.low) * approx32) >> 15)
        << 1;
    let inverse = HiLow::from_w32(tmp);

    let num = HiLow::from_w32(num);

    // num * (1/den) in Q28.
    tmp = (i32::from(num.hi) * i32::from(inverse.hi))
        .wrapping_add((i32::from(num.hi) * i32::from(inverse.low)) >> 15)
        .wrapping_add((i32::from(num.low) * i32::from(inverse.hi)) >> 15);

    // Q28 -> Q31.
    tmp << 3
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[test]
    fn leading_zeros_and_size() {
        assert_eq!(count_leading_zeros32(0), 32);
        assert_eq!(count_leading_zeros32(1), 31);
        assert_eq!(count_leading_zeros32(0x8000_0000), 0);
        assert_eq!(get_size_in_bits(0), 0);
        assert_eq!(get_size_in_bits(80), 7);
        assert_eq!(get_size_in_bits(640), 10);
    }

    #[test]
    fn norm_matches_redundant_sign_bits() {
        assert_eq!(norm_w32(0), 0);
        assert_eq!(norm_w32(1), 30);
        assert_eq!(norm_w32(-1), 31);
        assert_eq!(norm_w32(i32::MAX), 0);
        assert_eq!(norm_w32(i32::MIN), 0);
        assert_eq!(norm_w32(0x4000_0000), 0);
        assert_eq!(norm_w32(0x2000_0000), 1);
        assert_eq!(norm_w32(-0x4000_0000), 1);
    }

    #[test]
    fn division_truncates_and_saturates() {
        assert_eq!(div_w32_w16(7, 2), 3);
        assert_eq!(div_w32_w16(-7, 2), -3);
        assert_eq!(div_w32_w16(100, 0), i32::MAX);
        assert_eq!(div_w32_w16(-100, 0), i32::MAX);
    }

    #[test]
    fn hi_low_round_trip_drops_lsb() {
        for x in [0, 1, 2, 0x1234_5678, -0x1234_5678, i32::MAX, i32::MIN] {
            assert_eq!(HiLow::from_w32(x).to_w32(), x & !1, "x = {x:#x}");
        }
    }

    #[test]
    fn hi_low_division_is_close_to_exact() {
        // 0.25 / 0.5 = 0.5 in Q31.
        let den = HiLow::from_w32(0x4000_0000);
        let q = div_w32_hi_low(0x2000_0000, den);
        assert!((q - 0x4000_0000).abs() < 1 << 12, "q = {q:#x}");
    }

    #[proptest]
    fn norm_shift_never_overflows(x: i32) {
        let n = norm_w32(x);
        let shifted = x << n;
        assert_eq!(shifted >> n, x);
        if x != 0 && x != -1 {
            // One more shift must change the sign or lose bits.
            assert_ne!((shifted << 1) >> 1, shifted);
        }
    }

    #[proptest]
    fn hi_low_division_tracks_float(
        #[strategy(0x4000_0000i32..=i32::MAX)] den: i32,
        #[strategy(0i32..0x4000_0000)] num: i32,
    ) {
        let den_hl = HiLow::from_w32(den);
        let q = div_w32_hi_low(num, den_hl) as f64 / 2f64.powi(31);
        let expected = num as f64 / den_hl.to_w32() as f64;
        assert!((q - expected).abs() < 1e-3, "q = {q}, expected = {expected}");
    }
}
