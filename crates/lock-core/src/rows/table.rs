use std::collections::BTreeMap;
use std::sync::OnceLock;

use super::config::{parse_rows_toml, RowConfigError};
use super::Row;

pub const DEFAULT_TOML: &str = include_str!("default_rows.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Row name → row, e.g. `"pa"` → ぱ ぴ ぷ ぺ ぽ ん.
pub struct RowTable {
    rows: BTreeMap<String, Row>,
}

impl RowTable {
    /// Set custom TOML before first `global()` call.
    pub fn init_custom(toml_content: String) -> Result<(), RowConfigError> {
        parse_rows_toml(&toml_content)?;
        CUSTOM_TOML
            .set(toml_content)
            .map_err(|_| RowConfigError::AlreadyInitialized)
    }

    /// Get or initialize the global singleton.
    pub fn global() -> &'static RowTable {
        static INSTANCE: OnceLock<RowTable> = OnceLock::new();
        INSTANCE.get_or_init(|| {
            let toml_str = CUSTOM_TOML
                .get()
                .map(|s| s.as_str())
                .unwrap_or(DEFAULT_TOML);
            Self::from_toml(toml_str).expect("rows TOML must be valid")
        })
    }

    pub fn from_toml(toml_str: &str) -> Result<Self, RowConfigError> {
        Ok(Self {
            rows: parse_rows_toml(toml_str)?,
        })
    }

    pub fn get(&self, name: &str) -> Option<&Row> {
        self.rows.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rows.contains_key(name)
    }

    /// Rows in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Row)> {
        self.rows.iter().map(|(name, row)| (name.as_str(), row))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
