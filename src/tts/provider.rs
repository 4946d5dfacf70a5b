use anyhow::bail;

use crate::config::Config;

use super::azure::AzureSpeech;

pub trait SpeechSynthesizer {
    fn name(&self) -> &str;
    /// Synthesizes one utterance with the given voice, returning WAV bytes.
    fn synthesize(&self, text: &str, voice: &str) -> anyhow::Result<Vec<u8>>;
}

pub fn select_backend(name: &str, config: &Config) -> anyhow::Result<Box<dyn SpeechSynthesizer>> {
    match name {
        "azure" => Ok(Box::new(AzureSpeech::from_env(&config.synthesis)?)),
        _ => bail!("unknown synthesis backend: {name}"),
    }
}
