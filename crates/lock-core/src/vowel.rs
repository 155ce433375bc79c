use std::fmt;

/// The five vowels plus the moraic nasal, which is the only other sound a
/// romanized syllable can end in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Vowel {
    A,
    I,
    U,
    E,
    O,
    N,
}

impl Vowel {
    pub const ALL: [Vowel; 6] = [Vowel::A, Vowel::I, Vowel::U, Vowel::E, Vowel::O, Vowel::N];

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'a' => Some(Vowel::A),
            'i' => Some(Vowel::I),
            'u' => Some(Vowel::U),
            'e' => Some(Vowel::E),
            'o' => Some(Vowel::O),
            'n' => Some(Vowel::N),
            _ => None,
        }
    }

    /// Parse a whole unit; only the exact one-letter strings match.
    pub fn from_unit(unit: &str) -> Option<Self> {
        let mut chars = unit.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Vowel::A => "a",
            Vowel::I => "i",
            Vowel::U => "u",
            Vowel::E => "e",
            Vowel::O => "o",
            Vowel::N => "n",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Vowel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vowel a romanized unit ends in, if any.
pub fn trailing_vowel(unit: &str) -> Option<Vowel> {
    unit.chars().next_back().and_then(Vowel::from_char)
}
