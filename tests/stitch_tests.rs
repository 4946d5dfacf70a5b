use callsynth::audio::stitch;
use hound::{SampleFormat, WavSpec, WavWriter};
use std::io::Cursor;

fn mono_spec(sample_rate: u32) -> WavSpec {
    WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    }
}

fn clip_bytes(spec: WavSpec, samples: &[i16]) -> Vec<u8> {
    let mut cursor = Cursor::new(Vec::new());
    let mut writer = WavWriter::new(&mut cursor, spec).unwrap();
    for &sample in samples {
        writer.write_sample(sample).unwrap();
    }
    writer.finalize().unwrap();
    cursor.into_inner()
}

#[test]
fn decodes_pcm16_clips() {
    let bytes = clip_bytes(mono_spec(8000), &[1, 2, 3]);
    let clip = stitch::read_clip(&bytes).unwrap();
    assert_eq!(clip.spec, mono_spec(8000));
    assert_eq!(clip.samples, vec![1, 2, 3]);
}

#[test]
fn rejects_float_clips() {
    let spec = WavSpec {
        channels: 1,
        sample_rate: 8000,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };
    let mut cursor = Cursor::new(Vec::new());
    let mut writer = WavWriter::new(&mut cursor, spec).unwrap();
    writer.write_sample(0.5f32).unwrap();
    writer.finalize().unwrap();

    assert!(stitch::read_clip(&cursor.into_inner()).is_err());
}

#[test]
fn silence_scales_with_rate_and_channels() {
    assert_eq!(stitch::silence_samples(&mono_spec(1000), 2000), 2000);
    assert_eq!(stitch::silence_samples(&mono_spec(24000), 500), 12000);

    let stereo = WavSpec {
        channels: 2,
        ..mono_spec(1000)
    };
    assert_eq!(stitch::silence_samples(&stereo, 1000), 2000);
}

#[test]
fn combines_clips_with_gaps_between_but_not_after() {
    let spec = mono_spec(1000);
    let a = stitch::read_clip(&clip_bytes(spec, &[10; 10])).unwrap();
    let b = stitch::read_clip(&clip_bytes(spec, &[20; 5])).unwrap();

    let combined = stitch::combine_clips(&[a, b], 1000).unwrap();
    let decoded = stitch::read_clip(&combined).unwrap();

    // 10 samples + 1 s gap at 1 kHz + 5 samples, no trailing silence.
    assert_eq!(decoded.spec, spec);
    assert_eq!(decoded.samples.len(), 10 + 1000 + 5);
    assert!(decoded.samples[..10].iter().all(|&s| s == 10));
    assert!(decoded.samples[10..1010].iter().all(|&s| s == 0));
    assert!(decoded.samples[1010..].iter().all(|&s| s == 20));
}

#[test]
fn single_clip_has_no_gap() {
    let spec = mono_spec(1000);
    let a = stitch::read_clip(&clip_bytes(spec, &[7; 4])).unwrap();

    let combined = stitch::combine_clips(&[a], 2000).unwrap();
    let decoded = stitch::read_clip(&combined).unwrap();
    assert_eq!(decoded.samples, vec![7; 4]);
}

#[test]
fn refuses_empty_and_mismatched_input() {
    assert!(stitch::combine_clips(&[], 1000).is_err());

    let a = stitch::read_clip(&clip_bytes(mono_spec(1000), &[1; 4])).unwrap();
    let b = stitch::read_clip(&clip_bytes(mono_spec(2000), &[1; 4])).unwrap();
    assert!(stitch::combine_clips(&[a, b], 1000).is_err());
}
