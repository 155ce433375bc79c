use std::collections::HashMap;
use std::sync::OnceLock;

use super::config::{parse_romaji_toml, RomajiConfigError};

pub const DEFAULT_TOML: &str = include_str!("default_romaji.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Hiragana → romaji lookup keyed by scalar value.
pub struct RomajiTable {
    map: HashMap<char, String>,
}

impl RomajiTable {
    /// Set custom TOML before first `global()` call.
    pub fn init_custom(toml_content: String) -> Result<(), RomajiConfigError> {
        // Validate eagerly
        parse_romaji_toml(&toml_content)?;
        CUSTOM_TOML
            .set(toml_content)
            .map_err(|_| RomajiConfigError::AlreadyInitialized)
    }

    /// Get or initialize the global singleton.
    pub fn global() -> &'static RomajiTable {
        static INSTANCE: OnceLock<RomajiTable> = OnceLock::new();
        INSTANCE.get_or_init(|| {
            let toml_str = CUSTOM_TOML
                .get()
                .map(|s| s.as_str())
                .unwrap_or(DEFAULT_TOML);
            Self::from_toml(toml_str).expect("romaji TOML must be valid")
        })
    }

    pub fn from_toml(toml_str: &str) -> Result<Self, RomajiConfigError> {
        let map = parse_romaji_toml(toml_str)?
            .into_iter()
            // Keys are validated as exactly one hiragana scalar.
            .filter_map(|(kana, romaji)| kana.chars().next().map(|c| (c, romaji)))
            .collect();
        Ok(Self { map })
    }

    pub fn get(&self, kana: char) -> Option<&str> {
        self.map.get(&kana).map(|s| s.as_str())
    }

    /// Romanize one unit. Units that are not a single mapped kana come back unchanged.
    pub fn romanize<'a>(&'a self, unit: &'a str) -> &'a str {
        let mut chars = unit.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => self.get(c).unwrap_or(unit),
            _ => unit,
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
