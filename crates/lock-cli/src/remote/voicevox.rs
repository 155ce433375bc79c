use std::env;
use std::time::Instant;

use tracing::{debug, info};

use lock_core::settings::VoiceSettings;

use super::{agent, is_success, MAX_BODY_BYTES};

/// Overrides `voice.base_url` when set and non-empty.
pub const BASE_URL_ENV: &str = "VOICEVOX_URL";

#[derive(Debug, thiserror::Error)]
pub enum VoiceError {
    #[error("text is empty")]
    EmptyText,
    #[error("{stage}: cannot reach VOICEVOX: {message}")]
    Transport {
        stage: &'static str,
        message: String,
    },
    #[error("{stage}: VOICEVOX returned status {status}: {body}")]
    Status {
        stage: &'static str,
        status: u16,
        body: String,
    },
    #[error("audio_query: response is not a JSON object: {0}")]
    InvalidQuery(String),
}

/// Client for the VOICEVOX engine's two-step synthesis flow:
/// `audio_query` builds an accent/phoneme query from text, `synthesis`
/// renders it to WAV.
pub struct VoicevoxClient {
    agent: ureq::Agent,
    base_url: String,
    speaker: u32,
}

impl VoicevoxClient {
    pub fn new(base_url: &str, speaker: u32, timeout_secs: u64) -> Self {
        Self {
            agent: agent(timeout_secs),
            base_url: base_url.trim_end_matches('/').to_string(),
            speaker,
        }
    }

    pub fn from_settings(s: &VoiceSettings) -> Self {
        let base_url = resolve_base_url(env::var(BASE_URL_ENV).ok(), &s.base_url);
        Self::new(&base_url, s.speaker, s.timeout_secs)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn speaker(&self) -> u32 {
        self.speaker
    }

    /// Synthesize `text` and return the WAV bytes.
    pub fn synthesize(&self, text: &str) -> Result<Vec<u8>, VoiceError> {
        if text.trim().is_empty() {
            return Err(VoiceError::EmptyText);
        }
        let started = Instant::now();
        self.check_connection()?;
        let query = self.audio_query(text)?;
        let wav = self.synthesis(query)?;
        info!(
            bytes = wav.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            speaker = self.speaker,
            "synthesized"
        );
        Ok(wav)
    }

    /// Cheap request that fails fast when the engine is not running.
    fn check_connection(&self) -> Result<(), VoiceError> {
        const STAGE: &str = "speakers";
        let resp = self
            .agent
            .get(format!("{}/speakers", self.base_url))
            .call()
            .map_err(|e| transport(STAGE, e))?;
        let status = resp.status().as_u16();
        if !is_success(status) {
            let body = resp.into_body().read_to_string().unwrap_or_default();
            return Err(VoiceError::Status {
                stage: STAGE,
                status,
                body,
            });
        }
        Ok(())
    }

    fn audio_query(&self, text: &str) -> Result<String, VoiceError> {
        const STAGE: &str = "audio_query";
        let started = Instant::now();
        let resp = self
            .agent
            .post(format!("{}/audio_query", self.base_url))
            .query("text", text)
            .query("speaker", self.speaker.to_string())
            .send_empty()
            .map_err(|e| transport(STAGE, e))?;
        let status = resp.status().as_u16();
        let body = resp
            .into_body()
            .read_to_string()
            .map_err(|e| transport(STAGE, e))?;
        if !is_success(status) {
            return Err(VoiceError::Status {
                stage: STAGE,
                status,
                body,
            });
        }
        validate_query(&body)?;
        debug!(
            bytes = body.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "audio_query"
        );
        Ok(body)
    }

    fn synthesis(&self, query: String) -> Result<Vec<u8>, VoiceError> {
        const STAGE: &str = "synthesis";
        let started = Instant::now();
        let resp = self
            .agent
            .post(format!("{}/synthesis", self.base_url))
            .query("speaker", self.speaker.to_string())
            .header("Content-Type", "application/json")
            .send(query)
            .map_err(|e| transport(STAGE, e))?;
        let status = resp.status().as_u16();
        if !is_success(status) {
            let body = resp.into_body().read_to_string().unwrap_or_default();
            return Err(VoiceError::Status {
                stage: STAGE,
                status,
                body,
            });
        }
        let wav = resp
            .into_body()
            .with_config()
            .limit(MAX_BODY_BYTES)
            .read_to_vec()
            .map_err(|e| transport(STAGE, e))?;
        debug!(
            bytes = wav.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "synthesis"
        );
        Ok(wav)
    }
}

fn transport(stage: &'static str, e: ureq::Error) -> VoiceError {
    VoiceError::Transport {
        stage,
        message: e.to_string(),
    }
}

fn resolve_base_url(from_env: Option<String>, configured: &str) -> String {
    from_env
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| configured.to_string())
}

/// The synthesis endpoint needs the query object back verbatim; reject
/// anything that is not one before sending it.
fn validate_query(body: &str) -> Result<(), VoiceError> {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(v) if v.is_object() => Ok(()),
        Ok(v) => Err(VoiceError::InvalidQuery(format!("expected object, got {v}"))),
        Err(e) => Err(VoiceError::InvalidQuery(e.to_string())),
    }
}
