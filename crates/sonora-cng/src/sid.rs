//! SID (Silence Insertion Descriptor) wire format.
//!
//! A SID is one energy index byte followed by one byte per reflection
//! coefficient:
//!
//! ```text
//! +--------+--------+--------+-----+--------+
//! | energy |  k[0]  |  k[1]  | ... | k[N-1] |
//! +--------+--------+--------+-----+--------+
//! ```
//!
//! There is no length prefix; the receiver infers `N` from the payload
//! length. Coefficients are stored in Q7. At the maximum order they are
//! stored as two's complement bytes, at any smaller order they are offset
//! by 127. Both sides must apply the same rule.

use crate::MAX_LPC_ORDER;
use crate::tables::DBOV;

/// Maximum SID length in bytes: energy index plus [`MAX_LPC_ORDER`]
/// coefficients. Longer payloads are truncated on receipt.
pub const MAX_SID_LEN: usize = MAX_LPC_ORDER + 1;

/// Index sent when the energy is below every scanned table entry.
pub const SILENCE_INDEX: u8 = 94;

/// Largest index that maps to a table entry.
pub const MAX_ENERGY_INDEX: u8 = 93;

/// Maps a smoothed energy to its SID energy index.
///
/// Returns the first index in `1..=92` whose table energy lies strictly
/// below `energy`, or [`SILENCE_INDEX`] if none does. The scan always
/// rounds towards the louder entry rather than the closest one.
pub fn energy_to_index(energy: i32) -> u8 {
    (1..MAX_ENERGY_INDEX as usize)
        .find(|&i| energy.wrapping_sub(DBOV[i]) > 0)
        .map_or(SILENCE_INDEX, |i| i as u8)
}

/// Maps a SID energy index back to a linear energy, clamping indices past
/// the table to [`MAX_ENERGY_INDEX`].
pub fn index_to_energy(index: u8) -> i32 {
    DBOV[usize::from(index.min(MAX_ENERGY_INDEX))]
}

/// Quantizes a Q15 reflection coefficient to its SID byte for a SID
/// carrying `order` coefficients.
pub fn quantize_reflection(k: i16, order: usize) -> u8 {
    let q7 = (i32::from(k) + 128) >> 8;
    if order == MAX_LPC_ORDER {
        q7 as u8
    } else {
        (127 + q7) as u8
    }
}

/// Expands a SID coefficient byte back to Q15, for a SID carrying `order`
/// coefficients.
pub fn dequantize_reflection(byte: u8, order: usize) -> i16 {
    if order == MAX_LPC_ORDER {
        (i32::from(byte) << 8) as i16
    } else {
        ((i32::from(byte) - 127) << 8) as i16
    }
}

/// Grows `buffer` by up to `max_len` bytes and lets `write` fill them.
///
/// `write` returns how many of the offered bytes it used; the buffer is
/// truncated to that length and the count is returned.
pub fn append_data<F>(buffer: &mut Vec<u8>, max_len: usize, write: F) -> usize
where
    F: FnOnce(&mut [u8]) -> usize,
{
    let start = buffer.len();
    buffer.resize(start + max_len, 0);
    let written = write(&mut buffer[start..]).min(max_len);
    buffer.truncate(start + written);
    written
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[test]
    fn loud_energy_maps_to_first_index() {
        assert_eq!(energy_to_index(i32::MAX), 1);
        assert_eq!(energy_to_index(DBOV[1] + 1), 1);
        assert_eq!(energy_to_index(DBOV[1]), 2);
    }

    #[test]
    fn quiet_energy_maps_to_silence() {
        assert_eq!(energy_to_index(1), SILENCE_INDEX);
        assert_eq!(energy_to_index(DBOV[92]), SILENCE_INDEX);
        // The tail of the table is flat at 1; energy 2 lands on its first entry.
        assert_eq!(energy_to_index(2), 89);
    }

    #[test]
    fn index_lookup_clamps() {
        assert_eq!(index_to_energy(0), DBOV[0]);
        assert_eq!(index_to_energy(SILENCE_INDEX), 1);
        assert_eq!(index_to_energy(u8::MAX), 1);
    }

    #[test]
    fn zero_reflection_encoding() {
        assert_eq!(quantize_reflection(0, MAX_LPC_ORDER), 0);
        assert_eq!(quantize_reflection(0, 8), 127);
        assert_eq!(dequantize_reflection(0, MAX_LPC_ORDER), 0);
        assert_eq!(dequantize_reflection(127, 8), 0);
    }

    #[test]
    fn negative_reflection_encoding() {
        assert_eq!(quantize_reflection(-16384, MAX_LPC_ORDER), 0xc0);
        assert_eq!(dequantize_reflection(0xc0, MAX_LPC_ORDER), -16384);
        assert_eq!(quantize_reflection(-16384, 4), 63);
        assert_eq!(dequantize_reflection(63, 4), -16384);
    }

    #[test]
    fn append_data_truncates_to_written() {
        let mut buffer = vec![1, 2];
        let n = append_data(&mut buffer, 4, |out| {
            out[0] = 9;
            out[1] = 8;
            2
        });
        assert_eq!(n, 2);
        assert_eq!(buffer, [1, 2, 9, 8]);

        let n = append_data(&mut buffer, 3, |_| 0);
        assert_eq!(n, 0);
        assert_eq!(buffer.len(), 4);
    }

    #[proptest]
    fn index_is_monotone_in_energy(#[strategy(1i32..)] a: i32, #[strategy(1i32..)] b: i32) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        assert!(energy_to_index(hi) <= energy_to_index(lo));
    }

    #[proptest]
    fn reflection_round_trip_is_within_one_step(
        #[strategy(-32768i16..32640)] k: i16,
        #[strategy(1usize..=12)] order: usize,
    ) {
        let back = dequantize_reflection(quantize_reflection(k, order), order);
        let diff = (i32::from(k) - i32::from(back)).abs();
        assert!(diff <= 128, "k = {k}, back = {back}");
    }
}
