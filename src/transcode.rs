//! External transcoding via ffmpeg. The fine-tuning stack expects
//! 16 kHz mono PCM input.

use anyhow::{bail, Context};
use std::fs;
use std::path::Path;
use std::process::Command;

pub fn to_16k_mono(input: &Path, output: &Path) -> anyhow::Result<()> {
    let status = Command::new("ffmpeg")
        .arg("-y")
        .arg("-loglevel")
        .arg("error")
        .arg("-i")
        .arg(input)
        .arg("-ar")
        .arg("16000")
        .arg("-ac")
        .arg("1")
        .arg("-c:a")
        .arg("pcm_s16le")
        .arg(output)
        .status()
        .with_context(|| format!("run ffmpeg on {}", input.display()))?;

    if !status.success() {
        bail!("ffmpeg exited with status {status}");
    }

    Ok(())
}

#[derive(Debug, Default)]
pub struct PreprocessReport {
    pub converted: usize,
    pub failed: usize,
}

/// Resamples every `.wav` under `audio_dir` into `out_dir`. Per-file
/// transcode failures are logged and counted, not fatal.
pub fn preprocess_dir(audio_dir: &Path, out_dir: &Path) -> anyhow::Result<PreprocessReport> {
    fs::create_dir_all(out_dir).with_context(|| format!("create {}", out_dir.display()))?;

    let mut report = PreprocessReport::default();

    for entry in fs::read_dir(audio_dir)
        .with_context(|| format!("read audio dir {}", audio_dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("wav") {
            continue;
        }

        let Some(name) = path.file_name() else {
            continue;
        };
        let output = out_dir.join(name);

        match to_16k_mono(&path, &output) {
            Ok(()) => {
                tracing::info!(file = %output.display(), "preprocessed");
                report.converted += 1;
            }
            Err(err) => {
                tracing::error!(file = %path.display(), error = ?err, "transcode failed");
                report.failed += 1;
            }
        }
    }

    Ok(report)
}
