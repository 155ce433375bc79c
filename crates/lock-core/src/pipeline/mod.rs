//! Consonant-lock transformation: rewrite every syllable into one consonant row
//! while keeping its vowel.
//!
//! normalize → split → romanize → extract vowels → remap to row → join
//!
//! Unit-level pass-through differs between stages. The romanizer and the vowel
//! extractor keep anything they do not recognize; the row remapper blanks it
//! and [`stages::restore_passthrough`] puts the original back before joining.
//! An unknown row name empties the whole result.

mod explain;
pub mod stages;

#[cfg(test)]
mod tests;

use tracing::{debug, debug_span, warn};

use crate::kanji::{KanjiConverter, KanjiError};
use crate::romaji::RomajiTable;
use crate::rows::RowTable;

pub use explain::StageTrace;

#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    #[error("kanji conversion requested but no converter is configured")]
    KanjiConverterMissing,
    #[error("kanji conversion failed: {0}")]
    Kanji(#[from] KanjiError),
}

/// Rewrite `input` into `row` using the global tables. Never fails; an unknown
/// row gives `""`.
pub fn consonant_lock(input: &str, row: &str) -> String {
    Transformer::new().lock(input, row)
}

/// Pipeline bound to a pair of tables and, optionally, a kanji converter.
pub struct Transformer<'a> {
    romaji: &'a RomajiTable,
    rows: &'a RowTable,
    kanji: Option<&'a dyn KanjiConverter>,
}

impl Transformer<'static> {
    /// Transformer over the global tables, without kanji support.
    pub fn new() -> Self {
        Self::with_tables(RomajiTable::global(), RowTable::global())
    }
}

impl Default for Transformer<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Transformer<'a> {
    pub fn with_tables(romaji: &'a RomajiTable, rows: &'a RowTable) -> Self {
        Self {
            romaji,
            rows,
            kanji: None,
        }
    }

    /// Attach the collaborator used when `convert_kanji` is requested.
    pub fn with_kanji(mut self, kanji: &'a dyn KanjiConverter) -> Self {
        self.kanji = Some(kanji);
        self
    }

    /// Full transformation. With `convert_kanji` the input goes through the
    /// kanji converter first and its failure is returned as is.
    pub fn transform(
        &self,
        input: &str,
        row: &str,
        convert_kanji: bool,
    ) -> Result<String, TransformError> {
        let text = self.prepare(input, convert_kanji)?;
        Ok(self.lock(&text, row))
    }

    /// Like [`transform`](Self::transform) but keeps every intermediate stage.
    pub fn explain(
        &self,
        input: &str,
        row: &str,
        convert_kanji: bool,
    ) -> Result<StageTrace, TransformError> {
        let text = self.prepare(input, convert_kanji)?;
        Ok(self.run(&text, row))
    }

    /// The kana-only pipeline.
    pub fn lock(&self, input: &str, row: &str) -> String {
        self.run(input, row).output
    }

    fn prepare(&self, input: &str, convert_kanji: bool) -> Result<String, TransformError> {
        if !convert_kanji {
            return Ok(input.to_string());
        }
        let kanji = self.kanji.ok_or(TransformError::KanjiConverterMissing)?;
        let converted = kanji.to_hiragana(input)?;
        debug!(
            input_chars = input.chars().count(),
            output_chars = converted.chars().count(),
            "kanji converted"
        );
        Ok(converted)
    }

    fn run(&self, input: &str, row: &str) -> StageTrace {
        let _span = debug_span!("consonant_lock", row).entered();

        let normalized = stages::normalize(input);
        let units = stages::split(&normalized);
        let romaji = stages::romanize(&units, self.romaji);
        let vowels = stages::extract_vowels(&romaji);
        let remapped = stages::remap_row(&vowels, row, self.rows);
        let row_known = self.rows.contains(row);
        if !row_known {
            warn!(row, "unknown row, result is empty");
        }
        let output = stages::join(&stages::restore_passthrough(&vowels, remapped.clone()));

        let trace = StageTrace {
            row: row.to_string(),
            row_known,
            input: input.to_string(),
            normalized,
            units,
            romaji,
            vowels,
            remapped,
            output,
        };
        debug!(
            units = trace.units.len(),
            passthrough = trace.passthrough_count(),
            "transformed"
        );
        trace
    }
}
