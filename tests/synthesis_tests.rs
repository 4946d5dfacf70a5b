use callsynth::audio::{stitch, SynthesisStage};
use callsynth::config::SynthesisConfig;
use callsynth::dataset::writer::{DatasetWriter, DialogRecord};
use callsynth::tts::provider::SpeechSynthesizer;
use hound::{SampleFormat, WavSpec, WavWriter};
use std::cell::RefCell;
use std::collections::HashSet;
use std::io::Cursor;
use std::path::Path;

const SPEC: WavSpec = WavSpec {
    channels: 1,
    sample_rate: 8000,
    bits_per_sample: 16,
    sample_format: SampleFormat::Int,
};

/// Produces one sample per input character so clip lengths are
/// predictable; utterances in `failing` simulate service errors.
struct FakeSpeech {
    failing: HashSet<String>,
    requests: RefCell<Vec<(String, String)>>,
}

impl FakeSpeech {
    fn new() -> Self {
        Self {
            failing: HashSet::new(),
            requests: RefCell::new(Vec::new()),
        }
    }

    fn failing_on(texts: &[&str]) -> Self {
        Self {
            failing: texts.iter().map(|t| t.to_string()).collect(),
            requests: RefCell::new(Vec::new()),
        }
    }

    fn requests(&self) -> Vec<(String, String)> {
        self.requests.borrow().clone()
    }
}

impl SpeechSynthesizer for FakeSpeech {
    fn name(&self) -> &str {
        "fake"
    }

    fn synthesize(&self, text: &str, voice: &str) -> anyhow::Result<Vec<u8>> {
        self.requests
            .borrow_mut()
            .push((voice.to_string(), text.to_string()));
        if self.failing.contains(text) {
            anyhow::bail!("simulated synthesis failure");
        }

        let mut cursor = Cursor::new(Vec::new());
        let mut writer = WavWriter::new(&mut cursor, SPEC).unwrap();
        for _ in text.chars() {
            writer.write_sample(1i16).unwrap();
        }
        writer.finalize().unwrap();
        Ok(cursor.into_inner())
    }
}

fn test_config() -> SynthesisConfig {
    SynthesisConfig {
        silence_between_clips_ms: 100,
        ..SynthesisConfig::default()
    }
}

fn read_samples(path: &Path) -> Vec<i16> {
    let bytes = std::fs::read(path).unwrap();
    stitch::read_clip(&bytes).unwrap().samples
}

#[test]
fn renders_a_dialogue_to_one_combined_file() {
    let dir = tempfile::tempdir().unwrap();
    let backend = FakeSpeech::new();
    let config = test_config();
    let stage = SynthesisStage::new(&backend, None, &config, dir.path());

    stage.render_dialog(7, "Penipu: Halo\nKorban: Ya").unwrap();

    let out = dir.path().join("dialog_7.wav");
    assert!(out.exists());
    // "Halo" (4) + 100 ms at 8 kHz (800) + "Ya" (2).
    assert_eq!(read_samples(&out).len(), 4 + 800 + 2);

    let requests = backend.requests();
    assert_eq!(requests[0].0, "id-ID-ArdiNeural");
    assert_eq!(requests[1].0, "id-ID-GadisNeural");
}

#[test]
fn skips_empty_utterances_and_non_dialogue_lines() {
    let dir = tempfile::tempdir().unwrap();
    let backend = FakeSpeech::new();
    let config = test_config();
    let stage = SynthesisStage::new(&backend, None, &config, dir.path());

    stage
        .render_dialog(1, "Penipu:\n(tertawa)\nKorban: Ya")
        .unwrap();

    let requests = backend.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].1, "Ya");
}

#[test]
fn unknown_speakers_use_the_default_voice() {
    let dir = tempfile::tempdir().unwrap();
    let backend = FakeSpeech::new();
    let config = test_config();
    let stage = SynthesisStage::new(&backend, None, &config, dir.path());

    stage.render_dialog(2, "Operator: Halo").unwrap();

    let requests = backend.requests();
    assert_eq!(requests[0].0, "id-ID-ArdiNeural");
}

#[test]
fn failed_lines_are_excluded_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let backend = FakeSpeech::failing_on(&["Halo"]);
    let config = test_config();
    let stage = SynthesisStage::new(&backend, None, &config, dir.path());

    stage.render_dialog(3, "Penipu: Halo\nKorban: Ya").unwrap();

    // Only "Ya" survives; no gap is inserted for a single clip.
    assert_eq!(read_samples(&dir.path().join("dialog_3.wav")).len(), 2);
}

#[test]
fn dialogue_fails_only_when_no_line_survives() {
    let dir = tempfile::tempdir().unwrap();
    let backend = FakeSpeech::failing_on(&["Halo", "Ya"]);
    let config = test_config();
    let stage = SynthesisStage::new(&backend, None, &config, dir.path());

    assert!(stage
        .render_dialog(4, "Penipu: Halo\nKorban: Ya")
        .is_err());
    assert!(!dir.path().join("dialog_4.wav").exists());
}

#[test]
fn regenerate_touches_only_missing_and_corrupted_files() {
    let dir = tempfile::tempdir().unwrap();
    let audio_dir = dir.path().join("audio");
    std::fs::create_dir_all(&audio_dir).unwrap();

    let csv_path = dir.path().join("raw.csv");
    let mut writer = DatasetWriter::open(&csv_path).unwrap();
    for id in 1..=3 {
        writer
            .append(&DialogRecord {
                id,
                category: "Penipuan Perbankan".to_string(),
                detail: "X".to_string(),
                label: 1,
                dialog: "Penipu: Halo\nKorban: Ya".to_string(),
            })
            .unwrap();
    }
    drop(writer);

    // id 1 healthy (left untouched), id 2 corrupted, id 3 missing.
    let healthy_marker = vec![0xAAu8; 2048];
    std::fs::write(audio_dir.join("dialog_1.wav"), &healthy_marker).unwrap();
    std::fs::write(audio_dir.join("dialog_2.wav"), vec![0u8; 500]).unwrap();

    let backend = FakeSpeech::new();
    let config = test_config();
    let stage = SynthesisStage::new(&backend, None, &config, &audio_dir);
    let report = stage.regenerate(&csv_path, 1024).unwrap();

    assert_eq!(report.already_good, 1);
    assert_eq!(report.quarantined, 1);
    assert_eq!(report.regenerated, 2);
    assert_eq!(report.failed, 0);

    // The healthy file was not rewritten.
    assert_eq!(
        std::fs::read(audio_dir.join("dialog_1.wav")).unwrap(),
        healthy_marker
    );
    // The corrupted file was quarantined before regeneration.
    assert!(audio_dir
        .join("backup_corrupted")
        .join("dialog_2_backup.wav")
        .exists());
    assert!(audio_dir.join("dialog_2.wav").exists());
    assert!(audio_dir.join("dialog_3.wav").exists());
}

#[test]
fn regenerate_is_idempotent_when_everything_is_healthy() {
    let dir = tempfile::tempdir().unwrap();
    let audio_dir = dir.path().join("audio");
    std::fs::create_dir_all(&audio_dir).unwrap();

    let csv_path = dir.path().join("raw.csv");
    let mut writer = DatasetWriter::open(&csv_path).unwrap();
    writer
        .append(&DialogRecord {
            id: 1,
            category: "Penipuan Perbankan".to_string(),
            detail: "X".to_string(),
            label: 1,
            dialog: "Penipu: Halo".to_string(),
        })
        .unwrap();
    drop(writer);

    std::fs::write(audio_dir.join("dialog_1.wav"), vec![0u8; 4096]).unwrap();

    let backend = FakeSpeech::new();
    let config = test_config();
    let stage = SynthesisStage::new(&backend, None, &config, &audio_dir);
    let report = stage.regenerate(&csv_path, 1024).unwrap();

    assert_eq!(report.already_good, 1);
    assert_eq!(report.regenerated, 0);
    assert!(backend.requests().is_empty());
}
