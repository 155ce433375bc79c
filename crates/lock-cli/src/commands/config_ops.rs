use std::fs;
use std::io;
use std::path::Path;

use lock_core::romaji::{self, RomajiConfigError, RomajiTable};
use lock_core::rows::{self, RowConfigError, RowTable};
use lock_core::settings::{self, Settings, SettingsError};

use super::die;

#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("cannot read {path}: {source}")]
    Read { path: String, source: io::Error },
    #[error("{path}: {source}")]
    Settings {
        path: String,
        source: SettingsError,
    },
    #[error("{path}: {source}")]
    Romaji {
        path: String,
        source: RomajiConfigError,
    },
    #[error("{path}: {source}")]
    Rows {
        path: String,
        source: RowConfigError,
    },
}

fn read(path: &str) -> Result<String, ConfigFileError> {
    fs::read_to_string(Path::new(path)).map_err(|source| ConfigFileError::Read {
        path: path.to_string(),
        source,
    })
}

fn check_default_row(path: &str, s: &Settings) -> Result<(), ConfigFileError> {
    settings::check_default_row(s, RowTable::global()).map_err(|source| {
        ConfigFileError::Settings {
            path: path.to_string(),
            source,
        }
    })
}

/// Install custom settings/romaji/rows TOML before any of them is used, then
/// make sure the default row exists in the row table that ends up active.
pub fn install_custom(
    settings_file: Option<&str>,
    romaji_file: Option<&str>,
    rows_file: Option<&str>,
) -> Result<(), ConfigFileError> {
    if let Some(path) = settings_file {
        settings::init_custom(read(path)?).map_err(|source| ConfigFileError::Settings {
            path: path.to_string(),
            source,
        })?;
    }
    if let Some(path) = romaji_file {
        RomajiTable::init_custom(read(path)?).map_err(|source| ConfigFileError::Romaji {
            path: path.to_string(),
            source,
        })?;
    }
    if let Some(path) = rows_file {
        RowTable::init_custom(read(path)?).map_err(|source| ConfigFileError::Rows {
            path: path.to_string(),
            source,
        })?;
    }
    check_default_row(settings_file.unwrap_or("settings"), settings::settings())
}

pub fn check_settings_file(path: &str) -> Result<String, ConfigFileError> {
    let s = settings::parse_settings_toml(&read(path)?).map_err(|source| {
        ConfigFileError::Settings {
            path: path.to_string(),
            source,
        }
    })?;
    check_default_row(path, &s)?;
    Ok(format!(
        "OK: transform.default_row={}, kanji.model={}, voice.base_url={}, voice.speaker={}",
        s.transform.default_row, s.kanji.model, s.voice.base_url, s.voice.speaker
    ))
}

pub fn check_romaji_file(path: &str) -> Result<String, ConfigFileError> {
    let map = romaji::parse_romaji_toml(&read(path)?).map_err(|source| ConfigFileError::Romaji {
        path: path.to_string(),
        source,
    })?;
    Ok(format!("OK: {} mappings", map.len()))
}

pub fn check_rows_file(path: &str) -> Result<String, ConfigFileError> {
    let rows = rows::parse_rows_toml(&read(path)?).map_err(|source| ConfigFileError::Rows {
        path: path.to_string(),
        source,
    })?;
    let names: Vec<&str> = rows.keys().map(|s| s.as_str()).collect();
    Ok(format!("OK: {} rows ({})", rows.len(), names.join(" ")))
}

pub fn settings_export() {
    print!("{}", settings::default_toml());
}

pub fn settings_validate(file: &str) {
    println!("{}", die!(check_settings_file(file), "Error: {}"));
}

pub fn romaji_export() {
    print!("{}", romaji::default_toml());
}

pub fn romaji_validate(file: &str) {
    println!("{}", die!(check_romaji_file(file), "Error: {}"));
}

pub fn rows_export() {
    print!("{}", rows::default_toml());
}

pub fn rows_validate(file: &str) {
    println!("{}", die!(check_rows_file(file), "Error: {}"));
}
