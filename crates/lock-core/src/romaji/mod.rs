//! Kana-to-romaji lookup used to recover the vowel of each syllable.
//!
//! The table is embedded from `default_romaji.toml` and can be replaced once,
//! before first use, with [`RomajiTable::init_custom`].

mod config;
mod table;

pub use config::{parse_romaji_toml, RomajiConfigError};
pub use table::RomajiTable;

/// Returns the embedded default romaji TOML content.
pub fn default_toml() -> &'static str {
    table::DEFAULT_TOML
}
