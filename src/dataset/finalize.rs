//! Raw CSV → final training CSV: flatten transcripts, keep only rows
//! whose combined audio file exists on disk.

use anyhow::Context;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

use crate::audio;

const MISSING_SAMPLE_LIMIT: usize = 5;

#[derive(Debug, Deserialize)]
struct RawRow {
    id: String,
    dialog: String,
    label: u8,
}

#[derive(Debug, Serialize)]
struct FinalRow {
    file: String,
    label: u8,
    transcription: String,
}

#[derive(Debug, Default)]
pub struct FinalizeReport {
    pub written: usize,
    pub skipped_missing: usize,
    pub skipped_invalid: usize,
}

static SPEAKER_LABEL: OnceLock<Regex> = OnceLock::new();
static WHITESPACE: OnceLock<Regex> = OnceLock::new();

fn speaker_label() -> &'static Regex {
    // `\w+:` also eats non-label prefixes such as "3:" in times; the
    // downstream models were trained on text shaped by exactly this
    // transform, so the lenient pattern is kept.
    SPEAKER_LABEL.get_or_init(|| Regex::new(r"\w+:\s*").unwrap())
}

fn whitespace() -> &'static Regex {
    WHITESPACE.get_or_init(|| Regex::new(r"\s+").unwrap())
}

/// Collapses a multi-line `Speaker: utterance` dialogue into one flat
/// transcription line with the speaker labels removed.
pub fn flatten_transcription(dialog: &str) -> String {
    let flat = dialog.replace('\n', " ");
    let flat = speaker_label().replace_all(&flat, "");
    let flat = whitespace().replace_all(&flat, " ");
    flat.trim().to_string()
}

pub fn run(input: &Path, output: &Path, audio_dir: &Path) -> anyhow::Result<FinalizeReport> {
    let mut reader = csv::Reader::from_path(input)
        .with_context(|| format!("open raw dataset {}", input.display()))?;

    let mut report = FinalizeReport::default();
    let mut rows = Vec::new();
    let mut missing = Vec::new();

    for (index, result) in reader.deserialize::<RawRow>().enumerate() {
        let row = match result {
            Ok(row) => row,
            Err(err) => {
                tracing::warn!(row = index + 1, error = ?err, "skipping unparseable row");
                report.skipped_invalid += 1;
                continue;
            }
        };

        let file = audio_dir.join(audio::combined_file_name(&row.id));
        if !file.is_file() {
            missing.push(file.display().to_string());
            continue;
        }

        rows.push(FinalRow {
            file: file.display().to_string(),
            label: row.label,
            transcription: flatten_transcription(&row.dialog),
        });
    }

    if !missing.is_empty() {
        report.skipped_missing = missing.len();
        tracing::warn!(
            count = missing.len(),
            "rows dropped because their audio file was not found"
        );
        for path in missing.iter().take(MISSING_SAMPLE_LIMIT) {
            tracing::warn!("  missing: {path}");
        }
        if missing.len() > MISSING_SAMPLE_LIMIT {
            tracing::warn!("  ... and {} more", missing.len() - MISSING_SAMPLE_LIMIT);
        }
    }

    let mut writer = csv::Writer::from_path(output)
        .with_context(|| format!("create final dataset {}", output.display()))?;
    for row in &rows {
        writer.serialize(row)?;
    }
    writer.flush().context("flush final dataset")?;

    report.written = rows.len();
    Ok(report)
}
