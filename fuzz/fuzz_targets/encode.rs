#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sonora_cng::{ComfortNoiseDecoder, ComfortNoiseEncoder, EncoderConfig, MAX_FRAME_SIZE};

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    /// Sample rate index: 0=8k, 1=16k, 2=32k, 3=48k
    sample_rate_idx: u8,
    /// Number of reflection coefficients (clamped to 1-12)
    quality: u8,
    sid_interval_ms: u16,
    frames: Vec<FuzzFrame>,
}

#[derive(Debug, Arbitrary)]
struct FuzzFrame {
    force_sid: bool,
    samples: Vec<i16>,
}

fn sample_rate(idx: u8) -> u32 {
    match idx % 4 {
        0 => 8000,
        1 => 16000,
        2 => 32000,
        _ => 48000,
    }
}

fuzz_target!(|input: FuzzInput| {
    let config = EncoderConfig {
        sample_rate_hz: sample_rate(input.sample_rate_idx),
        sid_interval_ms: u32::from(input.sid_interval_ms),
        quality: usize::from(input.quality % 12) + 1,
    };
    let mut encoder = ComfortNoiseEncoder::new(config);
    let mut decoder = ComfortNoiseDecoder::new();
    let mut sid = Vec::new();
    let mut out = [0i16; MAX_FRAME_SIZE];

    for frame in &input.frames {
        sid.clear();
        match encoder.encode(&frame.samples, frame.force_sid, &mut sid) {
            Ok(0) => {}
            Ok(len) => {
                assert_eq!(len, config.sid_len());
                assert_eq!(sid.len(), len);
                decoder.update_sid(&sid);
                assert_eq!(decoder.order(), config.quality);
            }
            Err(_) => {
                assert!(frame.samples.len() > MAX_FRAME_SIZE);
                continue;
            }
        }
        decoder
            .generate(&mut out[..frame.samples.len()], frame.force_sid)
            .unwrap();
    }
});
