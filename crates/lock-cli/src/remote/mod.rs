//! Blocking HTTP collaborators: kanji reading and speech synthesis.

pub mod gemini;
pub mod voicevox;

#[cfg(test)]
mod stub_server;

use std::time::Duration;

pub use gemini::GeminiConverter;
pub use voicevox::{VoiceError, VoicevoxClient};

/// Upper bound for downloaded response bodies (synthesized WAV can be large).
const MAX_BODY_BYTES: u64 = 64 * 1024 * 1024;

/// Agent with a global timeout that hands non-2xx responses back to the
/// caller instead of turning them into errors, so their bodies can be reported.
fn agent(timeout_secs: u64) -> ureq::Agent {
    let config = ureq::Agent::config_builder()
        .timeout_global(Some(Duration::from_secs(timeout_secs)))
        .http_status_as_error(false)
        .build();
    ureq::Agent::new_with_config(config)
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}
