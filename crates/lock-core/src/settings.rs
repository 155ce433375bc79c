//! Global settings loaded from TOML, following the same OnceLock pattern as the
//! romaji and row tables.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::sync::OnceLock;

use serde::Deserialize;

use crate::rows::RowTable;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub transform: TransformSettings,
    pub kanji: KanjiSettings,
    pub voice: VoiceSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransformSettings {
    pub default_row: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KanjiSettings {
    pub endpoint: String,
    pub model: String,
    pub api_key_env: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VoiceSettings {
    pub base_url: String,
    pub speaker: u32,
    pub timeout_secs: u64,
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings =
        toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_non_empty {
        ($section:ident . $field:ident) => {
            if s.$section.$field.trim().is_empty() {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must not be empty".to_string(),
                });
            }
        };
    }
    macro_rules! check_positive {
        ($section:ident . $field:ident) => {
            if s.$section.$field == 0 {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must be positive".to_string(),
                });
            }
        };
    }

    check_non_empty!(transform.default_row);

    check_non_empty!(kanji.endpoint);
    check_non_empty!(kanji.model);
    check_non_empty!(kanji.api_key_env);
    check_positive!(kanji.timeout_secs);

    check_non_empty!(voice.base_url);
    check_positive!(voice.timeout_secs);

    Ok(())
}

/// `transform.default_row` must name a row of `rows`; otherwise every
/// transformation without an explicit row would come out empty.
pub fn check_default_row(s: &Settings, rows: &RowTable) -> Result<(), SettingsError> {
    let row = &s.transform.default_row;
    if rows.contains(row) {
        return Ok(());
    }
    let known: Vec<&str> = rows.iter().map(|(name, _)| name).collect();
    Err(SettingsError::InvalidValue {
        field: "transform.default_row".to_string(),
        reason: format!("unknown row \"{row}\" (known: {})", known.join(" ")),
    })
}
