use anyhow::bail;

use crate::config::Config;

use super::gemini::GeminiClient;

pub trait TextGenerator {
    fn name(&self) -> &str;
    fn generate(&self, prompt: &str) -> anyhow::Result<String>;
}

pub fn select_backend(name: &str, config: &Config) -> anyhow::Result<Box<dyn TextGenerator>> {
    match name {
        "gemini" => Ok(Box::new(GeminiClient::from_env(&config.generation)?)),
        _ => bail!("unknown generation backend: {name}"),
    }
}
