//! Constant tables for SID quantization and analysis.

/// Energy for each SID energy index, one step per dBov, in linear scale.
pub(crate) const DBOV: [i32; 94] = [
    1081109975, 858756178, 682134279, 541838517, 430397633, 341876992,
    271562548, 215709799, 171344384, 136103682, 108110997, 85875618,
    68213428, 54183852, 43039763, 34187699, 27156255, 21570980,
    17134438, 13610368, 10811100, 8587562, 6821343, 5418385,
    4303976, 3418770, 2715625, 2157098, 1713444, 1361037,
    1081110, 858756, 682134, 541839, 430398, 341877,
    271563, 215710, 171344, 136104, 108111, 85876,
    68213, 54184, 43040, 34188, 27156, 21571,
    17134, 13610, 10811, 8588, 6821, 5418,
    4304, 3419, 2716, 2157, 1713, 1361,
    1081, 859, 682, 542, 430, 342,
    272, 216, 171, 136, 108, 86,
    68, 54, 43, 34, 27, 22,
    17, 14, 11, 9, 7, 5,
    4, 3, 3, 2, 2, 1,
    1, 1, 1, 1,
];

/// Bandwidth expansion lag window in Q15, applied to the autocorrelation.
pub(crate) const CORR_WINDOW: [i16; crate::MAX_LPC_ORDER] = [
    32702, 32636, 32570, 32505, 32439, 32374,
    32309, 32244, 32179, 32114, 32049, 31985,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dbov_is_non_increasing() {
        assert!(DBOV.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(DBOV[93], 1);
    }

    #[test]
    fn corr_window_attenuates_higher_lags() {
        assert!(CORR_WINDOW.windows(2).all(|w| w[0] > w[1]));
        assert!(CORR_WINDOW.iter().all(|&w| w < i16::MAX));
    }
}
