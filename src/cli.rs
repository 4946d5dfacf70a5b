use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::speaker::SpeakerRole;

#[derive(Parser, Debug)]
#[command(
    name = "callsynth",
    version,
    about = "Synthetic Indonesian phone-call dataset generator for fraud detection"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Generate(GenerateArgs),
    Synthesize(SynthesizeArgs),
    Check(CheckArgs),
    Finalize(FinalizeArgs),
    Preprocess(PreprocessArgs),
    Catalog(CatalogArgs),
    TestVoice(TestVoiceArgs),
    Config(ConfigArgs),
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    #[arg(long, default_value_t = 1, help = "Resume from this dialogue id")]
    pub start_from_id: u64,

    #[arg(long, help = "Dialogues per scenario (overrides config)")]
    pub per_scenario: Option<u32>,

    #[arg(long, value_name = "PATH", help = "Raw dataset CSV to append to")]
    pub csv: Option<PathBuf>,

    #[arg(long, help = "Override generation backend")]
    pub backend: Option<String>,

    #[arg(long, help = "Delay between API calls in milliseconds")]
    pub delay_ms: Option<u64>,
}

#[derive(Args, Debug)]
pub struct SynthesizeArgs {
    #[arg(long, value_name = "PATH", help = "Raw dataset CSV to read dialogues from")]
    pub csv: Option<PathBuf>,

    #[arg(long, value_name = "DIR", help = "Combined audio output directory")]
    pub audio_dir: Option<PathBuf>,

    #[arg(long, help = "Override synthesis backend")]
    pub backend: Option<String>,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    #[arg(long, value_name = "PATH", help = "Raw dataset CSV to read ids from")]
    pub csv: Option<PathBuf>,

    #[arg(long, value_name = "DIR", help = "Combined audio directory to audit")]
    pub audio_dir: Option<PathBuf>,

    #[arg(long, help = "Output as JSON")]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct FinalizeArgs {
    #[arg(long, value_name = "PATH", help = "Raw dataset CSV")]
    pub input: Option<PathBuf>,

    #[arg(long, value_name = "PATH", help = "Final dataset CSV")]
    pub output: Option<PathBuf>,

    #[arg(long, value_name = "DIR", help = "Combined audio directory")]
    pub audio_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct PreprocessArgs {
    #[arg(long, value_name = "DIR", help = "Combined audio directory to resample")]
    pub audio_dir: Option<PathBuf>,

    #[arg(long, value_name = "DIR", help = "Directory for 16 kHz mono output")]
    pub out_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct CatalogArgs {
    #[arg(long, help = "Output as JSON")]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct TestVoiceArgs {
    #[arg(long, help = "Text to synthesize")]
    pub text: Option<String>,

    #[arg(long, value_enum, help = "Speaker role whose configured voice to use")]
    pub role: Option<SpeakerRole>,

    #[arg(long, help = "Explicit voice name (overrides --role)")]
    pub voice: Option<String>,

    #[arg(long, value_name = "PATH", default_value = "test_voice.wav", help = "Output WAV path")]
    pub output: PathBuf,

    #[arg(long, help = "Override synthesis backend")]
    pub backend: Option<String>,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[arg(long, help = "Show current config as JSON")]
    pub show: bool,

    #[arg(long, help = "Create default config file")]
    pub init: bool,

    #[arg(long, help = "Validate configuration")]
    pub validate: bool,
}
