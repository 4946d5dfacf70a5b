//! Content-addressed cache for synthesized utterance clips.
//!
//! Stock lines ("Halo", "Iya benar, ini siapa ya?") recur across many
//! dialogues; caching per-utterance WAVs keeps regeneration passes
//! from re-billing identical synthesis requests.

use anyhow::Context;
use filetime::{set_file_mtime, FileTime};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ClipCache {
    dir: PathBuf,
    max_size_bytes: u64,
    max_entries: usize,
}

impl ClipCache {
    pub fn new(dir: PathBuf, max_size_bytes: u64, max_entries: usize) -> Self {
        Self {
            dir,
            max_size_bytes,
            max_entries,
        }
    }

    pub fn key(voice: &str, text: &str, output_format: &str) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(voice.as_bytes());
        hasher.update(b"\0");
        hasher.update(text.as_bytes());
        hasher.update(b"\0");
        hasher.update(output_format.as_bytes());
        hasher.finalize().to_hex().to_string()
    }

    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        let path = self.clip_path(key);
        let data = fs::read(&path).ok()?;
        // Touch so LRU pruning sees the hit.
        let _ = set_file_mtime(&path, FileTime::now());
        Some(data)
    }

    pub fn put(&self, key: &str, clip: &[u8]) -> anyhow::Result<()> {
        if clip.is_empty() || clip.len() as u64 > self.max_size_bytes {
            return Ok(());
        }

        fs::create_dir_all(&self.dir).context("create clip cache dir")?;
        let path = self.clip_path(key);
        let tmp = self.dir.join(format!("{key}.tmp"));

        fs::write(&tmp, clip).context("write clip cache temp")?;
        fs::rename(&tmp, &path).context("rename clip cache file")?;

        self.prune()?;
        Ok(())
    }

    fn clip_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.wav"))
    }

    fn prune(&self) -> anyhow::Result<()> {
        if !self.dir.is_dir() {
            return Ok(());
        }

        let mut entries = Vec::new();
        let mut total_size = 0u64;

        for entry in fs::read_dir(&self.dir).context("read clip cache dir")? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("wav") {
                continue;
            }
            let meta = entry.metadata()?;
            total_size += meta.len();
            let mtime = FileTime::from_last_modification_time(&meta);
            entries.push((path, mtime, meta.len()));
        }

        // Oldest first for eviction
        entries.sort_by_key(|(_, mtime, _)| mtime.seconds());

        let mut remaining_entries = entries.len();
        let mut remaining_size = total_size;

        for (path, _mtime, size) in entries {
            if remaining_size <= self.max_size_bytes && remaining_entries <= self.max_entries {
                break;
            }
            let _ = fs::remove_file(&path);
            remaining_size = remaining_size.saturating_sub(size);
            remaining_entries = remaining_entries.saturating_sub(1);
        }

        Ok(())
    }
}
