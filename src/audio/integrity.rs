//! Audit of the combined-audio directory: which dialogues are missing,
//! which files look too small to be real audio, which are fine.

use anyhow::Context;
use serde::Serialize;
use std::fs;
use std::path::Path;

use super::combined_file_name;

pub const BACKUP_DIR: &str = "backup_corrupted";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    Good,
    Missing,
    Corrupted,
}

pub fn classify(path: &Path, min_bytes: u64) -> FileStatus {
    if !path.exists() {
        return FileStatus::Missing;
    }
    match fs::metadata(path) {
        Ok(meta) if meta.len() >= min_bytes => FileStatus::Good,
        Ok(meta) => {
            tracing::warn!(
                path = %path.display(),
                size = meta.len(),
                "file below minimum size; treating as corrupted"
            );
            FileStatus::Corrupted
        }
        Err(err) => {
            tracing::error!(path = %path.display(), error = ?err, "unreadable file metadata");
            FileStatus::Corrupted
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub struct IntegrityReport {
    pub good: Vec<u64>,
    pub missing: Vec<u64>,
    pub corrupted: Vec<u64>,
}

impl IntegrityReport {
    pub fn needs_regeneration(&self) -> Vec<u64> {
        let mut ids = self.missing.clone();
        ids.extend_from_slice(&self.corrupted);
        ids
    }

    pub fn is_complete(&self) -> bool {
        self.missing.is_empty() && self.corrupted.is_empty()
    }
}

pub fn audit(audio_dir: &Path, ids: &[u64], min_bytes: u64) -> IntegrityReport {
    let mut report = IntegrityReport::default();

    for &id in ids {
        let path = audio_dir.join(combined_file_name(id));
        match classify(&path, min_bytes) {
            FileStatus::Good => report.good.push(id),
            FileStatus::Missing => report.missing.push(id),
            FileStatus::Corrupted => report.corrupted.push(id),
        }
    }

    report
}

/// Moves the listed dialogues' files into the backup folder with a
/// `_backup` suffix. A file that cannot be moved is logged and left in
/// place; regeneration will overwrite it.
pub fn quarantine(audio_dir: &Path, ids: &[u64]) -> anyhow::Result<usize> {
    if ids.is_empty() {
        return Ok(0);
    }

    let backup_dir = audio_dir.join(BACKUP_DIR);
    fs::create_dir_all(&backup_dir)
        .with_context(|| format!("create {}", backup_dir.display()))?;

    let mut moved = 0;
    for &id in ids {
        let original = audio_dir.join(combined_file_name(id));
        if !original.exists() {
            continue;
        }
        let backup = backup_dir.join(format!("dialog_{id}_backup.wav"));
        match fs::rename(&original, &backup) {
            Ok(()) => {
                tracing::info!(id, backup = %backup.display(), "corrupted file quarantined");
                moved += 1;
            }
            Err(err) => {
                tracing::error!(id, error = ?err, "failed to quarantine file");
            }
        }
    }

    Ok(moved)
}
