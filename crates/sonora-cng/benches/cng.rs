//! Benchmarks for comfort noise analysis and synthesis.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use sonora_cng::config::{NUM_PARAMS_HIGH, NUM_PARAMS_NORMAL, SID_SHORT_INTERVAL_MS};
use sonora_cng::{ComfortNoiseDecoder, ComfortNoiseEncoder, EncoderConfig};
use sonora_spl::rand_n::rand_n_vector;

fn noise(len: usize) -> Vec<i16> {
    let mut seed = 12345;
    let mut out = vec![0i16; len];
    rand_n_vector(&mut seed, &mut out);
    for v in &mut out {
        *v >>= 2;
    }
    out
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    for (name, sample_rate_hz, quality) in [
        ("8k_q8", 8000, NUM_PARAMS_NORMAL),
        ("16k_q12", 16_000, NUM_PARAMS_HIGH),
        ("48k_q12", 48_000, NUM_PARAMS_HIGH),
    ] {
        let frame = noise(sample_rate_hz as usize / 100);
        let mut encoder = ComfortNoiseEncoder::new(EncoderConfig {
            sample_rate_hz,
            sid_interval_ms: SID_SHORT_INTERVAL_MS,
            quality,
        });
        let mut sid = Vec::with_capacity(16);

        group.bench_function(name, |b| {
            b.iter(|| {
                sid.clear();
                encoder.encode(black_box(&frame), false, &mut sid).unwrap();
            });
        });
    }

    group.finish();
}

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");

    let mut encoder = ComfortNoiseEncoder::new(EncoderConfig {
        sample_rate_hz: 16_000,
        quality: NUM_PARAMS_HIGH,
        ..Default::default()
    });
    let mut sid = Vec::new();
    encoder.encode(&noise(160), true, &mut sid).unwrap();

    for (name, len) in [("80", 80), ("160", 160), ("480", 480)] {
        let mut decoder = ComfortNoiseDecoder::new();
        decoder.update_sid(&sid);
        let mut out = vec![0i16; len];

        group.bench_function(name, |b| {
            b.iter(|| {
                decoder.generate(black_box(&mut out), false).unwrap();
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_encode, bench_generate);
criterion_main!(benches);
