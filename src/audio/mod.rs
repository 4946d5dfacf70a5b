//! Voice synthesis stage: turn cleaned dialogues into one combined
//! WAV per dialogue, and keep the audio directory healthy.

pub mod integrity;
pub mod stitch;

use anyhow::{bail, Context};
use serde::Deserialize;
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::SynthesisConfig;
use crate::speaker::{self, VoiceMap};
use crate::tts::{self, cache::ClipCache, provider::SpeechSynthesizer};

pub fn combined_file_name(id: impl Display) -> String {
    format!("dialog_{id}.wav")
}

#[derive(Debug, Deserialize)]
struct DialogRow {
    id: u64,
    dialog: String,
}

#[derive(Debug, Default)]
pub struct SynthesisReport {
    pub already_good: usize,
    pub quarantined: usize,
    pub regenerated: usize,
    pub failed: usize,
}

pub struct SynthesisStage<'a> {
    backend: &'a dyn SpeechSynthesizer,
    cache: Option<ClipCache>,
    voices: VoiceMap,
    silence_ms: u64,
    output_format: String,
    audio_dir: PathBuf,
}

impl<'a> SynthesisStage<'a> {
    pub fn new(
        backend: &'a dyn SpeechSynthesizer,
        cache: Option<ClipCache>,
        synthesis: &SynthesisConfig,
        audio_dir: &Path,
    ) -> Self {
        Self {
            backend,
            cache,
            voices: VoiceMap::new(&synthesis.voices, &synthesis.default_voice),
            silence_ms: synthesis.silence_between_clips_ms,
            output_format: synthesis.output_format.clone(),
            audio_dir: audio_dir.to_path_buf(),
        }
    }

    /// Synthesizes every parseable line of one dialogue and writes the
    /// stitched result to `dialog_{id}.wav`. Individual line failures
    /// are skipped; the dialogue only fails when no line survives.
    pub fn render_dialog(&self, id: u64, dialog: &str) -> anyhow::Result<()> {
        let mut clips: Vec<stitch::DecodedClip> = Vec::new();

        for (index, line) in dialog.lines().enumerate() {
            let Some(parsed) = speaker::parse_line(line) else {
                continue;
            };
            if parsed.text.is_empty() {
                continue;
            }

            let voice = match self.voices.lookup(&parsed.speaker) {
                Some(voice) => voice,
                None => {
                    tracing::warn!(
                        id,
                        speaker = %parsed.speaker,
                        "no voice mapping for speaker; using default voice"
                    );
                    self.voices.default_voice()
                }
            };

            let bytes = match tts::synthesize_clip(
                self.backend,
                self.cache.as_ref(),
                &parsed.text,
                voice,
                &self.output_format,
            ) {
                Ok(bytes) => bytes,
                Err(err) => {
                    tracing::error!(
                        id,
                        line = index,
                        speaker = %parsed.speaker,
                        error = ?err,
                        "line synthesis failed; excluded from the combined audio"
                    );
                    continue;
                }
            };

            let decoded = match stitch::read_clip(&bytes) {
                Ok(decoded) => decoded,
                Err(err) => {
                    tracing::error!(id, line = index, error = ?err, "undecodable clip; excluded");
                    continue;
                }
            };

            if let Some(first) = clips.first() {
                if decoded.spec != first.spec {
                    tracing::error!(
                        id,
                        line = index,
                        "clip format differs from the first clip; excluded"
                    );
                    continue;
                }
            }

            tracing::debug!(id, line = index, speaker = %parsed.speaker, "line synthesized");
            clips.push(decoded);
        }

        if clips.is_empty() {
            bail!("no lines could be synthesized for dialog {id}");
        }

        let combined = stitch::combine_clips(&clips, self.silence_ms)?;
        let path = self.audio_dir.join(combined_file_name(id));

        // Stage through a temp file so the final name never holds a
        // partially written WAV.
        let mut staged = tempfile::NamedTempFile::new_in(&self.audio_dir)
            .context("create staging file")?;
        std::io::Write::write_all(&mut staged, &combined).context("write staged audio")?;
        staged
            .persist(&path)
            .map_err(|err| err.error)
            .with_context(|| format!("move staged audio to {}", path.display()))?;
        tracing::info!(id, path = %path.display(), "combined dialogue audio written");

        Ok(())
    }

    /// Audits the audio directory against the raw CSV and regenerates
    /// only missing or corrupted dialogues; good files are untouched.
    pub fn regenerate(&self, raw_csv: &Path, min_file_bytes: u64) -> anyhow::Result<SynthesisReport> {
        let rows = load_dialogs(raw_csv)?;
        fs::create_dir_all(&self.audio_dir)
            .with_context(|| format!("create {}", self.audio_dir.display()))?;

        let ids: Vec<u64> = rows.iter().map(|row| row.id).collect();
        tracing::info!(dialogs = ids.len(), "auditing audio files");
        let audit = integrity::audit(&self.audio_dir, &ids, min_file_bytes);

        let mut report = SynthesisReport {
            already_good: audit.good.len(),
            ..Default::default()
        };

        if audit.is_complete() {
            tracing::info!("all audio files present and healthy; nothing to regenerate");
            return Ok(report);
        }

        report.quarantined = integrity::quarantine(&self.audio_dir, &audit.corrupted)?;

        let todo = audit.needs_regeneration();
        tracing::info!(
            missing = audit.missing.len(),
            corrupted = audit.corrupted.len(),
            "regenerating dialogues"
        );

        for row in rows.iter().filter(|row| todo.contains(&row.id)) {
            match self.render_dialog(row.id, &row.dialog) {
                Ok(()) => report.regenerated += 1,
                Err(err) => {
                    tracing::error!(id = row.id, error = ?err, "dialogue failed");
                    report.failed += 1;
                }
            }
        }

        Ok(report)
    }
}

/// Ids present in the raw CSV, in row order. Used by the audit-only
/// `check` command.
pub fn dialog_ids(raw_csv: &Path) -> anyhow::Result<Vec<u64>> {
    Ok(load_dialogs(raw_csv)?.into_iter().map(|row| row.id).collect())
}

fn load_dialogs(raw_csv: &Path) -> anyhow::Result<Vec<DialogRow>> {
    let mut reader = csv::Reader::from_path(raw_csv)
        .with_context(|| format!("open raw dataset {}", raw_csv.display()))?;

    let mut rows = Vec::new();
    for (index, result) in reader.deserialize::<DialogRow>().enumerate() {
        match result {
            Ok(row) => rows.push(row),
            Err(err) => {
                tracing::warn!(row = index + 1, error = ?err, "skipping unparseable row");
            }
        }
    }
    Ok(rows)
}
