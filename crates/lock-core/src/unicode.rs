//! Character-level Unicode classification and script normalization for
//! Japanese text.

/// Distance between a katakana letter and its hiragana counterpart.
const KANA_OFFSET: u32 = 0x60;

/// Hiragana block, U+3040..U+309F.
pub fn is_hiragana(c: char) -> bool {
    ('\u{3040}'..='\u{309F}').contains(&c)
}

/// Katakana block, U+30A0..U+30FF, symbols included.
pub fn is_katakana(c: char) -> bool {
    ('\u{30A0}'..='\u{30FF}').contains(&c)
}

pub fn is_kanji(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
        || ('\u{3400}'..='\u{4DBF}').contains(&c)
        || ('\u{20000}'..='\u{2A6DF}').contains(&c)
}

/// Katakana that have a hiragana twin exactly `KANA_OFFSET` below:
/// ァ..ヶ and the iteration marks ヽ ヾ.
///
/// Narrower than the whole katakana block on purpose: ゠, ヷ..ヺ, ・, ー and ヿ
/// would land on unassigned or combining code points (ー → ゜), so they pass
/// through unchanged.
fn has_hiragana_twin(c: char) -> bool {
    is_katakana(c) && !matches!(c, '゠' | 'ヷ'..='ヺ' | '・' | 'ー' | 'ヿ')
}

/// Convert a single katakana letter to hiragana; anything else is returned as is.
pub fn katakana_to_hiragana_char(c: char) -> char {
    if has_hiragana_twin(c) {
        char::from_u32(c as u32 - KANA_OFFSET).unwrap_or(c)
    } else {
        c
    }
}

/// Convert katakana to hiragana.
/// Non-katakana characters (ー, ASCII, kanji, etc.) are passed through unchanged,
/// so the output always has the same number of scalars as the input.
pub fn katakana_to_hiragana(s: &str) -> String {
    s.chars().map(katakana_to_hiragana_char).collect()
}

/// Split a string into one owned unit per Unicode scalar value.
pub fn split_units(s: &str) -> Vec<String> {
    s.chars().map(String::from).collect()
}

/// True if any character of `s` is a kanji.
pub fn contains_kanji(s: &str) -> bool {
    s.chars().any(is_kanji)
}
