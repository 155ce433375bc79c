//! Kanji-to-hiragana collaborator seam.
//!
//! The pipeline only understands kana. Text containing kanji can be handed to a
//! [`KanjiConverter`] first; the concrete implementation (a remote service, a
//! dictionary, a test double) is supplied by the caller.

/// Replaces kanji spans with their hiragana reading, leaving all other
/// characters unchanged.
pub trait KanjiConverter {
    fn to_hiragana(&self, text: &str) -> Result<String, KanjiError>;
}

impl<F> KanjiConverter for F
where
    F: Fn(&str) -> Result<String, KanjiError>,
{
    fn to_hiragana(&self, text: &str) -> Result<String, KanjiError> {
        self(text)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum KanjiError {
    #[error("API key not set (expected in ${0})")]
    MissingApiKey(String),
    #[error("request failed: {0}")]
    Transport(String),
    #[error("service returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed response: {0}")]
    Malformed(String),
}
