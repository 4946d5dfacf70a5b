//! In-memory WAV decoding and concatenation.

use anyhow::{bail, Context};
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::io::Cursor;

#[derive(Debug, Clone)]
pub struct DecodedClip {
    pub spec: WavSpec,
    pub samples: Vec<i16>,
}

pub fn read_clip(bytes: &[u8]) -> anyhow::Result<DecodedClip> {
    let mut reader = WavReader::new(Cursor::new(bytes)).context("decode wav clip")?;
    let spec = reader.spec();

    if spec.sample_format != SampleFormat::Int || spec.bits_per_sample != 16 {
        bail!(
            "unsupported clip format: {:?} at {} bits",
            spec.sample_format,
            spec.bits_per_sample
        );
    }

    let samples = reader
        .samples::<i16>()
        .collect::<Result<Vec<_>, _>>()
        .context("read clip samples")?;

    Ok(DecodedClip { spec, samples })
}

pub fn silence_samples(spec: &WavSpec, duration_ms: u64) -> usize {
    (spec.sample_rate as u64 * duration_ms / 1000) as usize * spec.channels as usize
}

/// Concatenates clips in order with a fixed silence gap between
/// consecutive clips, returning the combined WAV bytes. All clips must
/// share the first clip's spec; the caller filters mismatches out.
pub fn combine_clips(clips: &[DecodedClip], silence_ms: u64) -> anyhow::Result<Vec<u8>> {
    let first = clips.first().context("no clips to combine")?;
    let spec = first.spec;
    let gap = silence_samples(&spec, silence_ms);

    let mut cursor = Cursor::new(Vec::new());
    let mut writer = WavWriter::new(&mut cursor, spec).context("start combined wav")?;

    for (index, clip) in clips.iter().enumerate() {
        if clip.spec != spec {
            bail!("clip {index} format differs from the first clip");
        }
        if index > 0 {
            for _ in 0..gap {
                writer.write_sample(0i16)?;
            }
        }
        for &sample in &clip.samples {
            writer.write_sample(sample)?;
        }
    }

    writer.finalize().context("finalize combined wav")?;
    Ok(cursor.into_inner())
}
