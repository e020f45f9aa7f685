//! Lexer: normalization, word splitting, and per-token analysis.
//!
//! The lexer performs three passes over the input:
//! 1. **Normalize**: Unicode NFC and a single apostrophe code point, so that
//!    "об’єм", "обʼєм" and "об'єм" are the same word
//! 2. **Split**: whitespace split with punctuation stripped from token edges
//!    (inner hyphens, apostrophes and decimal points are kept)
//! 3. **Analyze**: each word is passed through the [`Morphology`]

use unicode_normalization::UnicodeNormalization;

use super::morpho::{Analysis, Morphology, Pos, is_capitalized};

/// A single analyzed word of a question.
#[derive(Debug, Clone)]
pub struct Token {
    /// The word as written, punctuation stripped.
    pub surface: String,
    pub analysis: Analysis,
}

impl Token {
    pub fn lemma(&self) -> &str {
        &self.analysis.lemma
    }

    pub fn pos(&self) -> Pos {
        self.analysis.pos
    }

    /// Whether the surface form starts with an uppercase letter.
    pub fn is_capitalized(&self) -> bool {
        is_capitalized(&self.surface)
    }
}

/// Normalize question text before any matching.
pub fn normalize(text: &str) -> String {
    text.nfc()
        .map(|c| match c {
            '\u{2019}' | '\u{02BC}' | '`' => '\'',
            other => other,
        })
        .collect()
}

/// Strip leading and trailing punctuation from a single word.
pub fn clean_word(word: &str) -> &str {
    word.trim_matches(|c: char| !c.is_alphanumeric())
}

/// Split normalized text into punctuation-free words.
pub fn split_words(text: &str) -> Vec<String> {
    normalize(text)
        .split_whitespace()
        .map(clean_word)
        .filter(|w| !w.is_empty())
        .map(String::from)
        .collect()
}

/// Split and analyze every word of `text`.
pub fn tokenize(text: &str, morph: &dyn Morphology) -> Vec<Token> {
    split_words(text)
        .into_iter()
        .map(|surface| {
            let analysis = morph.analyze(&surface);
            Token { surface, analysis }
        })
        .collect()
}
