//! All-pole (AR) synthesis filter with extended-precision state.

/// Filters `x` through the all-pole filter `1 / A(z)`.
///
/// `a` is the Q12 polynomial with `a[0]` implied to be 1.0. Each output is
/// produced at 16-bit precision in `filtered` together with the rounding
/// remainder in `filtered_low`, and the remainder is fed back in a parallel
/// accumulation to reduce the quantization noise of the recursion.
///
/// `state` and `state_low` hold the previous outputs (oldest first, newest
/// last) and are used as history for the first `a.len() - 1` samples. On
/// return they hold the newest outputs of this call. Returns the number of
/// filtered samples.
pub fn filter_ar(
    a: &[i16],
    x: &[i16],
    state: &mut [i16],
    state_low: &mut [i16],
    filtered: &mut [i16],
    filtered_low: &mut [i16],
) -> usize {
    let a_len = a.len();
    let state_len = state.len();
    debug_assert!(a_len >= 1 && state_len + 1 >= a_len);
    debug_assert_eq!(state_len, state_low.len());
    debug_assert!(filtered.len() >= x.len() && filtered_low.len() >= x.len());

    for (i, &xi) in x.iter().enumerate() {
        let mut o = i64::from(xi) << 12;
        let mut o_low: i32 = 0;

        // History from this call's outputs.
        let stop = if i < a_len { i + 1 } else { a_len };
        for j in 1..stop {
            let aj = i32::from(a[j]);
            o -= i64::from(aj * i32::from(filtered[i - j]));
            o_low = o_low.wrapping_sub(aj * i32::from(filtered_low[i - j]));
        }
        // History carried over from the previous call.
        for j in (i + 1)..a_len {
            let aj = i32::from(a[j]);
            let s = state_len + i - j;
            o -= i64::from(aj * i32::from(state[s]));
            o_low = o_low.wrapping_sub(aj * i32::from(state_low[s]));
        }

        o += i64::from(o_low >> 12);
        let out = ((o + 2048) >> 12) as i16;
        filtered[i] = out;
        filtered_low[i] = (o - (i64::from(out) << 12)) as i16;
    }

    // Save the filter state.
    let x_len = x.len();
    if x_len >= state_len {
        let n = a_len - 1;
        state[state_len - n..].copy_from_slice(&filtered[x_len - n..x_len]);
        state_low[state_len - n..].copy_from_slice(&filtered_low[x_len - n..x_len]);
    } else {
        state.copy_within(x_len.., 0);
        state_low.copy_within(x_len.., 0);
        state[state_len - x_len..].copy_from_slice(&filtered[..x_len]);
        state_low[state_len - x_len..].copy_from_slice(&filtered_low[..x_len]);
    }

    x_len
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_polynomial_passes_input_through() {
        let mut a = [0i16; 13];
        a[0] = 4096;
        let x: Vec<i16> = (0..80i32).map(|i| (i * 37 % 200 - 100) as i16).collect();
        let mut state = [0i16; 12];
        let mut state_low = [0i16; 12];
        let mut out = vec![0i16; 80];
        let mut low = vec![0i16; 80];
        let n = filter_ar(&a, &x, &mut state, &mut state_low, &mut out, &mut low);
        assert_eq!(n, 80);
        assert_eq!(out, x);
        assert!(low.iter().all(|&v| v == 0));
        assert_eq!(state[..], x[68..]);
    }

    #[test]
    fn one_pole_impulse_response_decays() {
        // y[n] = x[n] + 0.5 * y[n-1]
        let a = [4096i16, -2048];
        let mut x = [0i16; 8];
        x[0] = 1024;
        let mut state = [0i16; 1];
        let mut state_low = [0i16; 1];
        let mut out = [0i16; 8];
        let mut low = [0i16; 8];
        filter_ar(&a, &x, &mut state, &mut state_low, &mut out, &mut low);
        assert_eq!(out, [1024, 512, 256, 128, 64, 32, 16, 8]);
        assert_eq!(state, [8]);
    }

    #[test]
    fn state_continues_across_calls() {
        let a = [4096i16, -2048];
        let x = [1024i16, 0, 0, 0, 0, 0, 0, 0];

        let mut state = [0i16; 1];
        let mut state_low = [0i16; 1];
        let mut whole = [0i16; 8];
        let mut low = [0i16; 8];
        filter_ar(&a, &x, &mut state, &mut state_low, &mut whole, &mut low);

        let mut state = [0i16; 1];
        let mut state_low = [0i16; 1];
        let mut first = [0i16; 4];
        let mut second = [0i16; 4];
        let mut low = [0i16; 4];
        filter_ar(&a, &x[..4], &mut state, &mut state_low, &mut first, &mut low);
        filter_ar(&a, &x[4..], &mut state, &mut state_low, &mut second, &mut low);

        assert_eq!(first[..], whole[..4]);
        assert_eq!(second[..], whole[4..]);
    }

    #[test]
    fn short_frame_slides_state() {
        let mut a = [0i16; 13];
        a[0] = 4096;
        let mut state: [i16; 12] = core::array::from_fn(|i| i as i16);
        let mut state_low = [1i16; 12];
        let x = [100i16, 200, 300];
        let mut out = [0i16; 3];
        let mut low = [0i16; 3];
        filter_ar(&a, &x, &mut state, &mut state_low, &mut out, &mut low);
        assert_eq!(state, [3, 4, 5, 6, 7, 8, 9, 10, 11, 100, 200, 300]);
        assert_eq!(state_low, [1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0]);
    }
}
