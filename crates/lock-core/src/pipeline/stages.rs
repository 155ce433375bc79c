//! The individual pipeline stages. Each takes the previous stage's output by
//! reference and returns a fresh sequence.

use crate::romaji::RomajiTable;
use crate::rows::RowTable;
use crate::unicode::{katakana_to_hiragana, split_units};
use crate::vowel::{trailing_vowel, Vowel};

/// Katakana → hiragana; everything else unchanged.
pub fn normalize(input: &str) -> String {
    katakana_to_hiragana(input)
}

/// One unit per Unicode scalar.
pub fn split(text: &str) -> Vec<String> {
    split_units(text)
}

/// Replace every mapped kana with its romaji. Unmapped units pass through.
pub fn romanize(units: &[String], table: &RomajiTable) -> Vec<String> {
    units
        .iter()
        .map(|unit| table.romanize(unit).to_string())
        .collect()
}

/// Reduce each unit to its trailing vowel (or `n`). Units that do not end in
/// one, including the empty string, pass through unchanged.
pub fn extract_vowels(units: &[String]) -> Vec<String> {
    units
        .iter()
        .map(|unit| match trailing_vowel(unit) {
            Some(v) => v.as_str().to_string(),
            None => unit.clone(),
        })
        .collect()
}

/// Map each vowel unit to the syllable of `row`. Non-vowel units become `""`.
///
/// An unknown row yields an empty sequence no matter how many units were given.
pub fn remap_row(units: &[String], row: &str, rows: &RowTable) -> Vec<String> {
    let Some(row) = rows.get(row) else {
        return Vec::new();
    };
    units
        .iter()
        .map(|unit| match Vowel::from_unit(unit) {
            Some(v) => row.get(v).to_string(),
            None => String::new(),
        })
        .collect()
}

/// Put the vowel stage's unit back into every slot `remap_row` left empty, so
/// punctuation and unmapped kana survive. Extra slots on either side are dropped.
pub fn restore_passthrough(vowels: &[String], remapped: Vec<String>) -> Vec<String> {
    remapped
        .into_iter()
        .zip(vowels)
        .map(|(out, original)| if out.is_empty() { original.clone() } else { out })
        .collect()
}

pub fn join(units: &[String]) -> String {
    units.concat()
}
