use std::env;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use lock_core::settings::KanjiSettings;
use lock_core::unicode::contains_kanji;
use lock_core::{KanjiConverter, KanjiError};

use super::{agent, is_success};

const PROMPT: &str = "次の文章に含まれる漢字をすべてひらがなの読みに置き換えてください。\
漢字以外の文字（ひらがな・カタカナ・記号・英数字・空白）は一切変更しないでください。\
変換後の文章だけを出力し、説明や引用符は付けないでください。\n\n";

/// Kanji reader backed by a generative-language `generateContent` endpoint.
pub struct GeminiConverter {
    agent: ureq::Agent,
    url: String,
    api_key: String,
}

impl GeminiConverter {
    pub fn new(endpoint: &str, model: &str, api_key: String, timeout_secs: u64) -> Self {
        Self {
            agent: agent(timeout_secs),
            url: generate_url(endpoint, model),
            api_key,
        }
    }

    /// Build from settings, reading the API key from the configured
    /// environment variable.
    pub fn from_settings(s: &KanjiSettings) -> Result<Self, KanjiError> {
        let api_key = env::var(&s.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| KanjiError::MissingApiKey(s.api_key_env.clone()))?;
        Ok(Self::new(&s.endpoint, &s.model, api_key, s.timeout_secs))
    }
}

impl KanjiConverter for GeminiConverter {
    fn to_hiragana(&self, text: &str) -> Result<String, KanjiError> {
        if !contains_kanji(text) {
            debug!("no kanji, skipping request");
            return Ok(text.to_string());
        }

        let body = serde_json::to_string(&GenerateRequest::new(text))
            .map_err(|e| KanjiError::Malformed(e.to_string()))?;
        let resp = self
            .agent
            .post(self.url.as_str())
            .header("x-goog-api-key", self.api_key.as_str())
            .header("Content-Type", "application/json")
            .send(body)
            .map_err(|e| KanjiError::Transport(format!("{}: {e}", self.url)))?;
        let status = resp.status().as_u16();
        let body = resp
            .into_body()
            .read_to_string()
            .map_err(|e| KanjiError::Transport(format!("{}: {e}", self.url)))?;

        if !is_success(status) {
            return Err(KanjiError::Status { status, body });
        }
        let converted = parse_response(&body)?;
        info!(chars = converted.chars().count(), "kanji read as hiragana");
        Ok(converted)
    }
}

fn generate_url(endpoint: &str, model: &str) -> String {
    format!(
        "{}/models/{}:generateContent",
        endpoint.trim_end_matches('/'),
        model
    )
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

impl GenerateRequest {
    fn new(text: &str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(format!("{PROMPT}{text}")),
                }],
            }],
            generation_config: GenerationConfig { temperature: 0.0 },
        }
    }
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f64,
}

#[derive(Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

/// Pull the text of the first candidate out of a `generateContent` response.
fn parse_response(body: &str) -> Result<String, KanjiError> {
    let resp: GenerateResponse =
        serde_json::from_str(body).map_err(|e| KanjiError::Malformed(e.to_string()))?;
    let content = resp
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .ok_or_else(|| KanjiError::Malformed("no candidates in response".to_string()))?;
    let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
    let text = text.trim();
    if text.is_empty() {
        return Err(KanjiError::Malformed("empty candidate text".to_string()));
    }
    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::stub_server::{reply, serve};

    #[test]
    fn test_generate_url() {
        assert_eq!(
            generate_url("https://example.com/v1beta/", "m-1"),
            "https://example.com/v1beta/models/m-1:generateContent"
        );
        assert_eq!(
            generate_url("http://localhost:8080", "flash"),
            "http://localhost:8080/models/flash:generateContent"
        );
    }

    #[test]
    fn test_request_shape() {
        let json = serde_json::to_value(GenerateRequest::new("今日")).unwrap();
        let text = json["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(text.starts_with(PROMPT));
        assert!(text.ends_with("今日"));
        assert_eq!(json["generationConfig"]["temperature"], 0.0);
    }

    #[test]
    fn test_parse_response() {
        let body = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "きょうは"}, {"text": "はれ\n"}], "role": "model"}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ],
            "usageMetadata": {"totalTokenCount": 12}
        }"#;
        assert_eq!(parse_response(body).unwrap(), "きょうははれ");
    }

    #[test]
    fn test_parse_response_without_candidates() {
        let err = parse_response(r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#).unwrap_err();
        assert!(matches!(err, KanjiError::Malformed(_)));
    }

    #[test]
    fn test_parse_response_empty_text() {
        let err = parse_response(r#"{"candidates": [{"content": {"parts": [{"text": "  "}]}}]}"#)
            .unwrap_err();
        assert!(err.to_string().contains("empty candidate text"));
    }

    #[test]
    fn test_parse_response_not_json() {
        let err = parse_response("<html>bad gateway</html>").unwrap_err();
        assert!(matches!(err, KanjiError::Malformed(_)));
    }

    #[test]
    fn test_kana_only_text_skips_request() {
        // Unroutable endpoint: any request would fail.
        let conv = GeminiConverter::new("http://127.0.0.1:1", "m", "k".to_string(), 1);
        assert_eq!(conv.to_hiragana("カタカナと、ひらがな").unwrap(), "カタカナと、ひらがな");
    }

    #[test]
    fn test_missing_api_key() {
        let s = KanjiSettings {
            endpoint: "http://127.0.0.1:1".to_string(),
            model: "m".to_string(),
            api_key_env: "LOCKTOOL_TEST_UNSET_KEY_4F2A".to_string(),
            timeout_secs: 1,
        };
        let err = GeminiConverter::from_settings(&s).err().unwrap();
        assert!(matches!(err, KanjiError::MissingApiKey(ref v) if v == "LOCKTOOL_TEST_UNSET_KEY_4F2A"));
    }

    #[test]
    fn test_reads_kanji_through_service() {
        let (base, server) = serve(vec![reply(
            200,
            r#"{"candidates": [{"content": {"parts": [{"text": "きょうはいい"}]}}]}"#,
        )]);
        let conv = GeminiConverter::new(&base, "m-1", "secret".to_string(), 5);
        assert_eq!(conv.to_hiragana("今日はいい").unwrap(), "きょうはいい");

        let seen = server.join().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].line.starts_with("POST /models/m-1:generateContent "));
        assert_eq!(seen[0].header("x-goog-api-key"), Some("secret"));
        let sent: serde_json::Value = serde_json::from_slice(&seen[0].body).unwrap();
        let prompt = sent["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(prompt.ends_with("今日はいい"));
    }

    #[test]
    fn test_non_success_status_keeps_body() {
        let (base, server) = serve(vec![reply(503, "model overloaded")]);
        let conv = GeminiConverter::new(&base, "m-1", "secret".to_string(), 5);
        let err = conv.to_hiragana("漢字").unwrap_err();
        match err {
            KanjiError::Status { status, ref body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "model overloaded");
            }
            other => panic!("expected status error, got {other:?}"),
        }
        server.join().unwrap();
    }
}
