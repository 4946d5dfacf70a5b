//! Speaker roles and the role → voice mapping.

use clap::ValueEnum;
use regex::Regex;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::OnceLock;
use thiserror::Error;

/// Conversational roles the generation prompt is allowed to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum SpeakerRole {
    Penipu,
    Korban,
    Penerima,
    Penelepon,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown speaker role: {0}")]
pub struct UnknownRole(pub String);

impl SpeakerRole {
    pub fn as_str(self) -> &'static str {
        match self {
            SpeakerRole::Penipu => "penipu",
            SpeakerRole::Korban => "korban",
            SpeakerRole::Penerima => "penerima",
            SpeakerRole::Penelepon => "penelepon",
        }
    }
}

impl FromStr for SpeakerRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "penipu" => Ok(SpeakerRole::Penipu),
            "korban" => Ok(SpeakerRole::Korban),
            "penerima" => Ok(SpeakerRole::Penerima),
            "penelepon" => Ok(SpeakerRole::Penelepon),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}

/// One parsed `Speaker: utterance` line. `role` is `None` when the
/// leading token is not in the known vocabulary; such lines still
/// synthesize with the default voice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueLine {
    pub speaker: String,
    pub role: Option<SpeakerRole>,
    pub text: String,
}

static LINE: OnceLock<Regex> = OnceLock::new();

fn line_pattern() -> &'static Regex {
    LINE.get_or_init(|| Regex::new(r"^\s*(\w+):\s*(.*)$").unwrap())
}

/// Parses a dialogue line into speaker token and utterance text.
/// Lines without the `speaker:` shape return `None`.
pub fn parse_line(line: &str) -> Option<DialogueLine> {
    let caps = line_pattern().captures(line)?;
    let speaker = caps[1].to_lowercase();
    let role = <SpeakerRole as FromStr>::from_str(&speaker).ok();
    Some(DialogueLine {
        speaker,
        role,
        text: caps[2].trim().to_string(),
    })
}

/// Speaker → synthesis voice table with a default for unknown roles.
#[derive(Debug, Clone)]
pub struct VoiceMap {
    voices: HashMap<String, String>,
    default_voice: String,
}

impl VoiceMap {
    pub fn new(voices: &HashMap<String, String>, default_voice: &str) -> Self {
        let voices = voices
            .iter()
            .map(|(speaker, voice)| (speaker.to_lowercase(), voice.clone()))
            .collect();
        Self {
            voices,
            default_voice: default_voice.to_string(),
        }
    }

    pub fn lookup(&self, speaker: &str) -> Option<&str> {
        self.voices.get(&speaker.to_lowercase()).map(String::as_str)
    }

    pub fn default_voice(&self) -> &str {
        &self.default_voice
    }
}
