//! Minimal comfort noise round trip.
//!
//! Encodes 10 ms frames of low-level noise until the encoder emits a
//! periodic SID, forces one more, and synthesizes comfort noise from it.
//!
//! ```sh
//! cargo run -p sonora-cng --example simple
//! ```

use sonora_cng::{ComfortNoiseDecoder, ComfortNoiseEncoder, EncoderConfig};
use sonora_spl::rand_n::rand_n;

fn main() {
    let config = EncoderConfig::default();
    let frame_len = config.sample_rate_hz as usize / 100;
    let mut encoder = ComfortNoiseEncoder::new(config);
    let mut decoder = ComfortNoiseDecoder::new();

    // Background noise about 30 dB below full scale.
    let mut seed = 1;
    let mut frame = vec![0i16; frame_len];
    let mut sid = Vec::new();

    let mut frames = 0;
    while sid.is_empty() {
        for s in &mut frame {
            *s = rand_n(&mut seed) >> 4;
        }
        encoder.encode(&frame, false, &mut sid).unwrap();
        frames += 1;
    }
    println!("periodic SID after {frames} frames: {sid:?}");

    sid.clear();
    encoder.encode(&frame, true, &mut sid).unwrap();
    println!("forced SID: {sid:?}");

    decoder.update_sid(&sid);
    let mut noise = vec![0i16; frame_len];
    decoder.generate(&mut noise, true).unwrap();

    let rms = (noise.iter().map(|&v| f64::from(v).powi(2)).sum::<f64>() / noise.len() as f64).sqrt();
    println!("generated {} samples of comfort noise, rms {rms:.1}", noise.len());
}
