use std::collections::BTreeMap;

use serde::Deserialize;

use crate::unicode::is_hiragana;
use crate::vowel::trailing_vowel;

#[derive(Deserialize)]
struct RomajiConfig {
    mappings: BTreeMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum RomajiConfigError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("[mappings] table is empty")]
    Empty,
    #[error("key is not a single hiragana character: {0}")]
    InvalidKey(String),
    #[error("empty value for key: {0}")]
    EmptyValue(String),
    #[error("value for {key} must be lowercase ASCII: {value}")]
    NonAsciiValue { key: String, value: String },
    #[error("value for {key} does not end in a vowel or n: {value}")]
    NoVowel { key: String, value: String },
    #[error("romaji table already initialized")]
    AlreadyInitialized,
}

/// Parse TOML text into a sorted `BTreeMap<kana, romaji>`.
pub fn parse_romaji_toml(toml_str: &str) -> Result<BTreeMap<String, String>, RomajiConfigError> {
    let config: RomajiConfig =
        toml::from_str(toml_str).map_err(|e| RomajiConfigError::Parse(e.to_string()))?;

    if config.mappings.is_empty() {
        return Err(RomajiConfigError::Empty);
    }

    for (key, value) in &config.mappings {
        let mut chars = key.chars();
        let single_kana = matches!((chars.next(), chars.next()), (Some(c), None) if is_hiragana(c));
        if !single_kana {
            return Err(RomajiConfigError::InvalidKey(key.clone()));
        }
        if value.is_empty() {
            return Err(RomajiConfigError::EmptyValue(key.clone()));
        }
        if !value.bytes().all(|b| b.is_ascii_lowercase()) {
            return Err(RomajiConfigError::NonAsciiValue {
                key: key.clone(),
                value: value.clone(),
            });
        }
        if trailing_vowel(value).is_none() {
            return Err(RomajiConfigError::NoVowel {
                key: key.clone(),
                value: value.clone(),
            });
        }
    }

    Ok(config.mappings)
}
