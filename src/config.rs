use anyhow::{bail, Context};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub synthesis: SynthesisConfig,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default = "default_generation_backend")]
    pub backend: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
    #[serde(default = "default_top_p")]
    pub top_p: f32,
    #[serde(default = "default_top_k")]
    pub top_k: u32,
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,
    #[serde(default = "default_per_scenario")]
    pub per_scenario: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesisConfig {
    #[serde(default = "default_synthesis_backend")]
    pub backend: String,
    #[serde(default = "default_output_format")]
    pub output_format: String,
    #[serde(default = "default_silence_ms")]
    pub silence_between_clips_ms: u64,
    #[serde(default = "default_min_file_bytes")]
    pub min_file_bytes: u64,
    #[serde(default)]
    pub voices: HashMap<String, String>,
    #[serde(default = "default_voice")]
    pub default_voice: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_raw_csv")]
    pub raw_csv: PathBuf,
    #[serde(default = "default_final_csv")]
    pub final_csv: PathBuf,
    #[serde(default = "default_audio_dir")]
    pub audio_dir: PathBuf,
    #[serde(default = "default_preprocessed_dir")]
    pub preprocessed_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub dir: Option<PathBuf>,
    #[serde(default = "default_cache_max_mb")]
    pub max_mb: u64,
    #[serde(default = "default_cache_max_entries")]
    pub max_entries: usize,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        if let Some(path) = Self::project_path() {
            if path.exists() {
                return Self::load_from_path(&path);
            }
        }

        if let Ok(path) = Self::default_path() {
            if path.exists() {
                return Self::load_from_path(&path);
            }
        }

        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config at {}", path.display()))?;
        let mut config: Config = serde_json::from_str(&raw)
            .with_context(|| format!("parse config at {}", path.display()))?;
        config.apply_defaults();
        Ok(config)
    }

    pub fn init_default() -> anyhow::Result<PathBuf> {
        let path = Self::default_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let config = Self::default();
        fs::write(&path, serde_json::to_string_pretty(&config)?)?;
        Ok(path)
    }

    pub fn default_path() -> anyhow::Result<PathBuf> {
        let base = BaseDirs::new().context("unable to resolve home directory")?;
        Ok(base.config_dir().join("callsynth").join("config.json"))
    }

    pub fn default_cache_dir(&self) -> anyhow::Result<PathBuf> {
        if let Some(dir) = &self.cache.dir {
            return Ok(dir.clone());
        }
        let base = BaseDirs::new().context("unable to resolve home directory")?;
        Ok(base.cache_dir().join("callsynth"))
    }

    pub fn cache_limits(&self) -> (u64, usize) {
        (self.cache.max_mb * 1024 * 1024, self.cache.max_entries)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !(0.0..=2.0).contains(&self.generation.temperature) {
            bail!("generation.temperature must be between 0.0 and 2.0");
        }
        if !(0.0..=1.0).contains(&self.generation.top_p) {
            bail!("generation.top_p must be between 0.0 and 1.0");
        }
        if self.generation.max_output_tokens == 0 {
            bail!("generation.max_output_tokens must be greater than 0");
        }
        if self.generation.per_scenario == 0 {
            bail!("generation.per_scenario must be greater than 0");
        }
        if self.generation.backend != "gemini" {
            bail!(
                "unsupported generation backend: {}",
                self.generation.backend
            );
        }

        if self.synthesis.backend != "azure" {
            bail!("unsupported synthesis backend: {}", self.synthesis.backend);
        }
        if self.synthesis.min_file_bytes == 0 {
            bail!("synthesis.min_file_bytes must be greater than 0");
        }
        if self.synthesis.default_voice.trim().is_empty() {
            bail!("synthesis.default_voice must not be empty");
        }
        for (speaker, voice) in &self.synthesis.voices {
            if voice.trim().is_empty() {
                bail!("synthesis.voices entry for '{speaker}' is empty");
            }
        }

        if self.cache.max_mb == 0 {
            bail!("cache.max_mb must be greater than 0");
        }
        if self.cache.max_entries == 0 {
            bail!("cache.max_entries must be greater than 0");
        }

        Ok(())
    }

    fn apply_defaults(&mut self) {
        if self.synthesis.voices.is_empty() {
            self.synthesis.voices = default_voices();
        }
    }

    fn project_path() -> Option<PathBuf> {
        Some(PathBuf::from("callsynth.json"))
    }
}

/// Generative-API key, read from the environment at command start.
/// Missing credentials are fatal for `generate` only.
pub fn gemini_api_key() -> anyhow::Result<String> {
    std::env::var("GEMINI_API_KEY")
        .context("GEMINI_API_KEY is not set; export it before running generate")
}

/// Speech-service credentials; fatal for `synthesize`/`test-voice` only.
pub fn azure_credentials() -> anyhow::Result<(String, String)> {
    let key = std::env::var("AZURE_SPEECH_KEY")
        .context("AZURE_SPEECH_KEY is not set; export it before running synthesize")?;
    let region = std::env::var("AZURE_SPEECH_REGION")
        .context("AZURE_SPEECH_REGION is not set; export it before running synthesize")?;
    Ok((key, region))
}

fn default_voices() -> HashMap<String, String> {
    let mut voices = HashMap::new();
    voices.insert("penipu".to_string(), "id-ID-ArdiNeural".to_string());
    voices.insert("korban".to_string(), "id-ID-GadisNeural".to_string());
    voices.insert("penerima".to_string(), "id-ID-GadisNeural".to_string());
    voices.insert("penelepon".to_string(), "id-ID-ArdiNeural".to_string());
    voices
}

fn default_generation_backend() -> String {
    "gemini".to_string()
}

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_output_tokens() -> u32 {
    2048
}

fn default_top_p() -> f32 {
    1.0
}

fn default_top_k() -> u32 {
    40
}

fn default_request_delay_ms() -> u64 {
    2000
}

fn default_per_scenario() -> u32 {
    12
}

fn default_synthesis_backend() -> String {
    "azure".to_string()
}

fn default_output_format() -> String {
    "riff-24khz-16bit-mono-pcm".to_string()
}

fn default_silence_ms() -> u64 {
    2000
}

fn default_min_file_bytes() -> u64 {
    1024
}

fn default_voice() -> String {
    "id-ID-ArdiNeural".to_string()
}

fn default_raw_csv() -> PathBuf {
    PathBuf::from("synthetic_dialogs_final.csv")
}

fn default_final_csv() -> PathBuf {
    PathBuf::from("dataset.csv")
}

fn default_audio_dir() -> PathBuf {
    PathBuf::from("audio_dataset")
}

fn default_preprocessed_dir() -> PathBuf {
    PathBuf::from("preprocessed")
}

fn default_cache_enabled() -> bool {
    true
}

fn default_cache_max_mb() -> u64 {
    100
}

fn default_cache_max_entries() -> usize {
    1000
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            backend: default_generation_backend(),
            model: default_model(),
            temperature: default_temperature(),
            max_output_tokens: default_max_output_tokens(),
            top_p: default_top_p(),
            top_k: default_top_k(),
            request_delay_ms: default_request_delay_ms(),
            per_scenario: default_per_scenario(),
        }
    }
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            backend: default_synthesis_backend(),
            output_format: default_output_format(),
            silence_between_clips_ms: default_silence_ms(),
            min_file_bytes: default_min_file_bytes(),
            voices: default_voices(),
            default_voice: default_voice(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            raw_csv: default_raw_csv(),
            final_csv: default_final_csv(),
            audio_dir: default_audio_dir(),
            preprocessed_dir: default_preprocessed_dir(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_cache_enabled(),
            dir: None,
            max_mb: default_cache_max_mb(),
            max_entries: default_cache_max_entries(),
        }
    }
}
