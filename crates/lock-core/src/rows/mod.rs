//! Consonant rows: for each row name, the syllable sharing each vowel.

mod config;
mod table;

pub use config::{parse_rows_toml, RowConfigError, NASAL};
pub use table::RowTable;

use crate::vowel::Vowel;

/// One consonant row, indexed by [`Vowel`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    syllables: [String; 6],
}

impl Row {
    pub fn get(&self, vowel: Vowel) -> &str {
        &self.syllables[vowel.index()]
    }

    /// Syllables in a, i, u, e, o, n order.
    pub fn syllables(&self) -> impl Iterator<Item = &str> {
        self.syllables.iter().map(|s| s.as_str())
    }
}

/// Returns the embedded default rows TOML content.
pub fn default_toml() -> &'static str {
    table::DEFAULT_TOML
}
