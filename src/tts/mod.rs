pub mod azure;
pub mod cache;
pub mod provider;

use cache::ClipCache;
use provider::SpeechSynthesizer;

/// Synthesizes one utterance, consulting the clip cache first. Cache
/// write failures are demoted to debug noise; the clip itself is what
/// matters.
pub fn synthesize_clip(
    backend: &dyn SpeechSynthesizer,
    cache: Option<&ClipCache>,
    text: &str,
    voice: &str,
    output_format: &str,
) -> anyhow::Result<Vec<u8>> {
    let key = ClipCache::key(voice, text, output_format);

    if let Some(cache) = cache {
        if let Some(clip) = cache.get(&key) {
            tracing::debug!(voice, "clip cache hit");
            return Ok(clip);
        }
    }

    let clip = backend.synthesize(text, voice)?;

    if let Some(cache) = cache {
        if let Err(err) = cache.put(&key, &clip) {
            tracing::debug!(error = ?err, "clip cache write failed");
        }
    }

    Ok(clip)
}
