pub mod kanji;
pub mod pipeline;
pub mod romaji;
pub mod rows;
pub mod settings;
pub mod unicode;
pub mod vowel;

pub use kanji::{KanjiConverter, KanjiError};
pub use pipeline::{consonant_lock, StageTrace, TransformError, Transformer};
