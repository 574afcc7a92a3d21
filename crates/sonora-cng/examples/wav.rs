//! Replace the content of a WAV file with comfort noise.
//!
//! Reads a mono 16-bit WAV file, encodes every 10 ms frame into SIDs and
//! writes the noise a receiver would synthesize from them.
//!
//! ```sh
//! cargo run -p sonora-cng --features examples --example wav -- input.wav --output noise.wav
//! ```

use anyhow::{Context, Result, bail};
use clap::Parser;
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use tracing_subscriber::EnvFilter;

use sonora_cng::config::{NUM_PARAMS_NORMAL, SID_NORMAL_INTERVAL_MS};
use sonora_cng::{ComfortNoiseDecoder, ComfortNoiseEncoder, EncoderConfig, MAX_FRAME_SIZE};

#[derive(Parser, Debug)]
#[command(about = "Encode a WAV file to SIDs and write the decoded comfort noise")]
struct Args {
    /// Mono 16-bit input WAV file.
    input: String,

    /// Path for the generated comfort noise.
    #[arg(short, long, default_value = "noise.wav")]
    output: String,

    /// Interval between periodic SIDs in milliseconds.
    #[arg(long, default_value_t = SID_NORMAL_INTERVAL_MS)]
    interval: u32,

    /// Number of reflection coefficients per SID (1-12).
    #[arg(short, long, default_value_t = NUM_PARAMS_NORMAL)]
    quality: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut reader =
        WavReader::open(&args.input).with_context(|| format!("failed to open {}", args.input))?;
    let spec = reader.spec();
    if spec.channels != 1 || spec.bits_per_sample != 16 || spec.sample_format != SampleFormat::Int {
        bail!("expected mono 16-bit PCM, got {spec:?}");
    }

    let config = EncoderConfig {
        sample_rate_hz: spec.sample_rate,
        sid_interval_ms: args.interval,
        quality: args.quality,
    };
    config.validate()?;

    let frame_len = spec.sample_rate as usize / 100;
    if frame_len == 0 || frame_len > MAX_FRAME_SIZE {
        bail!("unsupported sample rate {} Hz", spec.sample_rate);
    }

    let samples = reader
        .samples::<i16>()
        .collect::<Result<Vec<_>, _>>()
        .context("failed to read samples")?;

    let mut writer = WavWriter::create(
        &args.output,
        WavSpec {
            channels: 1,
            sample_rate: spec.sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        },
    )
    .with_context(|| format!("failed to create {}", args.output))?;

    let mut encoder = ComfortNoiseEncoder::new(config);
    let mut decoder = ComfortNoiseDecoder::new();
    let mut sid = Vec::new();
    let mut noise = vec![0i16; frame_len];
    let mut num_sids = 0;

    for (i, frame) in samples.chunks(frame_len).enumerate() {
        sid.clear();
        if encoder.encode(frame, i == 0, &mut sid)? > 0 {
            decoder.update_sid(&sid);
            num_sids += 1;
        }
        let noise = &mut noise[..frame.len()];
        decoder.generate(noise, i == 0)?;
        for &s in noise.iter() {
            writer.write_sample(s)?;
        }
    }
    writer.finalize()?;

    println!(
        "Wrote {} samples of comfort noise from {num_sids} SIDs to {}",
        samples.len(),
        args.output
    );
    Ok(())
}
