//! Morphological analysis interface and casing helpers.
//!
//! The question pipeline never inspects word endings itself. Everything it
//! needs to know about a word (lemma, part of speech, grammatical case and
//! gender) comes from a [`Morphology`] implementation, and every inflected
//! surface form it produces is requested from the same analyzer.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Coarse part-of-speech classes the role tagger distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pos {
    Noun,
    /// Full-form adjective.
    #[serde(rename = "adjf")]
    Adjective,
    /// Comparative adjective or adverb.
    #[serde(rename = "comp")]
    Comparative,
    Verb,
    #[serde(rename = "prep")]
    Preposition,
    /// Word the analyzer has no dictionary entry for.
    #[serde(rename = "unkn")]
    Unknown,
    /// Any other known class (pronouns, adverbs, conjunctions, particles).
    Other,
}

impl Pos {
    /// Adjectives and comparatives behave identically in phrase building.
    pub fn is_adjectival(self) -> bool {
        matches!(self, Self::Adjective | Self::Comparative)
    }
}

/// Grammatical case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Case {
    #[serde(rename = "nomn")]
    Nominative,
    #[serde(rename = "gent")]
    Genitive,
    #[serde(rename = "datv")]
    Dative,
    #[serde(rename = "accs")]
    Accusative,
    #[serde(rename = "ablt")]
    Instrumental,
    #[serde(rename = "loct")]
    Locative,
    #[serde(rename = "voct")]
    Vocative,
}

impl Case {
    /// Cases that mark a noun as the dependent of a preceding head noun.
    pub fn is_oblique(self) -> bool {
        matches!(
            self,
            Self::Genitive | Self::Dative | Self::Accusative | Self::Locative
        )
    }
}

/// Grammatical gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "masc")]
    Masculine,
    #[serde(rename = "femn")]
    Feminine,
    #[serde(rename = "neut")]
    Neuter,
}

/// The analyzer's best reading of a single word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    /// The analyzed word, lowercased.
    pub word: String,
    /// Normal (dictionary) form.
    pub lemma: String,
    pub pos: Pos,
    pub case: Option<Case>,
    pub gender: Option<Gender>,
}

impl Analysis {
    /// A reading for a word the analyzer does not know.
    pub fn unknown(word: &str) -> Self {
        let word = word.to_lowercase();
        Self {
            lemma: word.clone(),
            word,
            pos: Pos::Unknown,
            case: None,
            gender: None,
        }
    }
}

impl fmt::Display for Analysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{:?}", self.lemma, self.pos)
    }
}

/// Target grammatical features for inflection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Features {
    pub case: Option<Case>,
    pub gender: Option<Gender>,
}

impl Features {
    pub fn case(case: Case) -> Self {
        Self {
            case: Some(case),
            gender: None,
        }
    }

    pub fn with_gender(mut self, gender: Option<Gender>) -> Self {
        self.gender = gender;
        self
    }
}

/// A morphological analyzer.
///
/// Implementations must be safe to share between threads: one analyzer is
/// constructed per process and borrowed by every component that needs it.
pub trait Morphology: Send + Sync {
    /// Analyze a single word (no surrounding punctuation).
    fn analyze(&self, word: &str) -> Analysis;

    /// Produce the surface form of `analysis`'s lemma carrying `target`.
    ///
    /// Returns `None` when the analyzer has no such form.
    fn inflect(&self, analysis: &Analysis, target: Features) -> Option<String>;
}

/// Put an adjective into the nominative case of its own gender.
///
/// Words without gender fall back to their lemma, as do forms the analyzer
/// cannot produce. The result is lowercase.
pub fn gender_agree(morph: &dyn Morphology, analysis: &Analysis) -> String {
    let Some(gender) = analysis.gender else {
        return analysis.lemma.clone();
    };
    morph
        .inflect(
            analysis,
            Features::case(Case::Nominative).with_gender(Some(gender)),
        )
        .unwrap_or_else(|| analysis.lemma.clone())
}

/// Inflect every word of a phrase to `case`, keeping each word's gender.
///
/// Words without the requested form are kept unchanged.
pub fn inflect_phrase(morph: &dyn Morphology, phrase: &str, case: Case) -> String {
    phrase
        .split_whitespace()
        .map(|word| {
            let analysis = morph.analyze(word);
            let target = if analysis.pos.is_adjectival() {
                Features::case(case).with_gender(analysis.gender)
            } else {
                Features::case(case)
            };
            morph
                .inflect(&analysis, target)
                .unwrap_or_else(|| word.to_lowercase())
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Capitalize the first letter of a string.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => {
            let upper: String = c.to_uppercase().collect();
            upper + chars.as_str()
        }
    }
}

/// Title-case a phrase: every word (and every hyphen-separated part)
/// starts uppercase, the rest is lowercased.
///
/// - "франція" → "Франція"
/// - "нью-йорк" → "Нью-Йорк"
/// - "чорне МОРЕ" → "Чорне Море"
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_start = true;
    for c in s.chars() {
        if c.is_whitespace() || c == '-' {
            out.push(c);
            at_start = true;
        } else if at_start {
            out.extend(c.to_uppercase());
            at_start = false;
        } else {
            out.extend(c.to_lowercase());
        }
    }
    out
}

/// Whether the first character of `word` is an uppercase letter.
pub fn is_capitalized(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}
