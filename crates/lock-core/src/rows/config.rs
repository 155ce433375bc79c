use std::collections::BTreeMap;

use serde::Deserialize;

use super::Row;
use crate::vowel::Vowel;

/// The row-independent moraic nasal every row must map `n` to.
pub const NASAL: &str = "ん";

#[derive(Deserialize)]
struct RowsConfig {
    rows: BTreeMap<String, BTreeMap<String, String>>,
}

#[derive(Debug, thiserror::Error)]
pub enum RowConfigError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("[rows] table is empty")]
    Empty,
    #[error("invalid row name: {0:?}")]
    InvalidName(String),
    #[error("row {row} is missing key {key}")]
    MissingKey { row: String, key: &'static str },
    #[error("row {row} has unknown key {key}")]
    UnknownKey { row: String, key: String },
    #[error("row {row}.{key} must be a single character, got {value:?}")]
    InvalidSyllable {
        row: String,
        key: &'static str,
        value: String,
    },
    #[error("row {row} must map n to ん, got {value:?}")]
    NasalMismatch { row: String, value: String },
    #[error("row table already initialized")]
    AlreadyInitialized,
}

/// Parse TOML text into a sorted `BTreeMap<row name, Row>`.
pub fn parse_rows_toml(toml_str: &str) -> Result<BTreeMap<String, Row>, RowConfigError> {
    let config: RowsConfig =
        toml::from_str(toml_str).map_err(|e| RowConfigError::Parse(e.to_string()))?;

    if config.rows.is_empty() {
        return Err(RowConfigError::Empty);
    }

    let mut rows = BTreeMap::new();
    for (name, entries) in config.rows {
        if name.is_empty() || !name.bytes().all(|b| b.is_ascii_lowercase()) {
            return Err(RowConfigError::InvalidName(name));
        }
        if let Some(key) = entries.keys().find(|k| Vowel::from_unit(k).is_none()) {
            return Err(RowConfigError::UnknownKey {
                row: name,
                key: key.clone(),
            });
        }
        let mut syllables: [String; 6] = Default::default();
        for vowel in Vowel::ALL {
            let key = vowel.as_str();
            let Some(value) = entries.get(key) else {
                return Err(RowConfigError::MissingKey { row: name, key });
            };
            if value.chars().count() != 1 {
                return Err(RowConfigError::InvalidSyllable {
                    row: name,
                    key,
                    value: value.clone(),
                });
            }
            if vowel == Vowel::N && value != NASAL {
                return Err(RowConfigError::NasalMismatch {
                    row: name,
                    value: value.clone(),
                });
            }
            syllables[vowel.index()] = value.clone();
        }
        rows.insert(name, Row { syllables });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PA_ROW: &str = r#"
[rows.pa]
a = "ぱ"
i = "ぴ"
u = "ぷ"
e = "ぺ"
o = "ぽ"
n = "ん"
"#;

    #[test]
    fn parse_valid_toml() {
        let rows = parse_rows_toml(PA_ROW).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows["pa"].get(Vowel::O), "ぽ");
        assert_eq!(rows["pa"].get(Vowel::N), "ん");
    }

    #[test]
    fn parse_default_toml() {
        let rows = parse_rows_toml(super::super::table::DEFAULT_TOML).unwrap();
        let names: Vec<&str> = rows.keys().map(|s| s.as_str()).collect();
        assert_eq!(
            names,
            vec!["a", "ba", "da", "ga", "ha", "ka", "ma", "na", "pa", "ra", "sa", "ta", "ya", "za"]
        );
        for row in rows.values() {
            assert_eq!(row.get(Vowel::N), NASAL);
        }
        assert_eq!(rows["ya"].get(Vowel::I), "い");
        assert_eq!(rows["ya"].get(Vowel::E), "え");
    }

    #[test]
    fn error_empty_rows() {
        let err = parse_rows_toml("[rows]\n").unwrap_err();
        assert!(matches!(err, RowConfigError::Empty));
    }

    #[test]
    fn error_missing_key() {
        let toml = r#"
[rows.wa]
a = "わ"
i = "い"
u = "う"
e = "え"
n = "ん"
"#;
        let err = parse_rows_toml(toml).unwrap_err();
        assert!(matches!(err, RowConfigError::MissingKey { key: "o", .. }));
        assert!(err.to_string().contains("row wa"));
    }

    #[test]
    fn error_unknown_key() {
        let toml = PA_ROW.to_string() + "y = \"ゃ\"\n";
        let err = parse_rows_toml(&toml).unwrap_err();
        assert!(matches!(err, RowConfigError::UnknownKey { .. }));
    }

    #[test]
    fn error_multi_char_syllable() {
        let toml = PA_ROW.replace("\"ぱ\"", "\"ぱぱ\"");
        let err = parse_rows_toml(&toml).unwrap_err();
        assert!(matches!(err, RowConfigError::InvalidSyllable { key: "a", .. }));
    }

    #[test]
    fn error_nasal_mismatch() {
        let toml = PA_ROW.replace("n = \"ん\"", "n = \"む\"");
        let err = parse_rows_toml(&toml).unwrap_err();
        assert!(matches!(err, RowConfigError::NasalMismatch { .. }));
    }

    #[test]
    fn error_invalid_name() {
        let toml = PA_ROW.replace("[rows.pa]", "[rows.\"ぱ\"]");
        let err = parse_rows_toml(&toml).unwrap_err();
        assert!(matches!(err, RowConfigError::InvalidName(_)));
    }

    #[test]
    fn error_invalid_toml() {
        let err = parse_rows_toml("not valid toml {{{").unwrap_err();
        assert!(matches!(err, RowConfigError::Parse(_)));
    }
}
