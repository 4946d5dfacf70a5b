//! Azure Speech REST backend: one SSML request per utterance, WAV
//! bytes in the response body.

use anyhow::{bail, Context};
use std::time::Duration;

use crate::config::{self, SynthesisConfig};

use super::provider::SpeechSynthesizer;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

pub struct AzureSpeech {
    client: reqwest::blocking::Client,
    endpoint: String,
    key: String,
    output_format: String,
}

impl AzureSpeech {
    pub fn from_env(synthesis: &SynthesisConfig) -> anyhow::Result<Self> {
        let (key, region) = config::azure_credentials()?;
        let endpoint = format!("https://{region}.tts.speech.microsoft.com/cognitiveservices/v1");
        Self::new(key, endpoint, synthesis.output_format.clone())
    }

    pub fn new(key: String, endpoint: String, output_format: String) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("build http client")?;

        Ok(Self {
            client,
            endpoint,
            key,
            output_format,
        })
    }

    fn ssml(text: &str, voice: &str) -> String {
        format!(
            "<speak version='1.0' xml:lang='id-ID'><voice name='{}'>{}</voice></speak>",
            escape_xml(voice),
            escape_xml(text)
        )
    }
}

impl SpeechSynthesizer for AzureSpeech {
    fn name(&self) -> &str {
        "azure"
    }

    fn synthesize(&self, text: &str, voice: &str) -> anyhow::Result<Vec<u8>> {
        let body = Self::ssml(text, voice);

        let response = self
            .client
            .post(&self.endpoint)
            .header("Ocp-Apim-Subscription-Key", &self.key)
            .header("X-Microsoft-OutputFormat", &self.output_format)
            .header("Content-Type", "application/ssml+xml")
            .body(body)
            .send()
            .context("call speech service")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            bail!("speech service returned {status}: {body}");
        }

        let bytes = response.bytes().context("read speech response")?.to_vec();
        if bytes.is_empty() {
            bail!("speech service returned an empty body");
        }

        Ok(bytes)
    }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&apos;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ssml_escapes_utterance_text() {
        let body = AzureSpeech::ssml("J&T <resi>", "id-ID-ArdiNeural");
        assert!(body.contains("J&amp;T &lt;resi&gt;"));
        assert!(body.contains("<voice name='id-ID-ArdiNeural'>"));
    }
}
