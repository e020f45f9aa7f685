//! Dictionary-backed morphological analyzer.
//!
//! Every known surface form is listed explicitly with its lemma and tags,
//! so analysis is a hash lookup and inflection is a search among the forms
//! that share a lemma. Entry order matters: when a form is ambiguous the
//! first entry is the preferred reading.
//!
//! ```json
//! { "entries": [
//!     { "form": "франції", "lemma": "франція", "pos": "noun", "case": "gent", "gender": "femn" }
//! ] }
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{GrammarError, GrammarResult};
use super::morpho::{Analysis, Case, Features, Gender, Morphology, Pos};

/// The Ukrainian lexicon shipped with the crate.
const BUNDLED_LEXICON: &str = include_str!("../../data/lexicon_uk.json");

/// One surface form in the dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconEntry {
    pub form: String,
    pub lemma: String,
    pub pos: Pos,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case: Option<Case>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
}

#[derive(Debug, Deserialize)]
struct LexiconFile {
    entries: Vec<LexiconEntry>,
}

/// Morphological analyzer over an explicit form dictionary.
#[derive(Debug, Clone, Default)]
pub struct DictionaryMorphology {
    entries: Vec<LexiconEntry>,
    by_form: HashMap<String, Vec<usize>>,
    by_lemma: HashMap<(String, Pos), Vec<usize>>,
}

impl DictionaryMorphology {
    /// Build an analyzer from entries, preserving their order.
    pub fn from_entries(entries: Vec<LexiconEntry>) -> Self {
        let mut by_form: HashMap<String, Vec<usize>> = HashMap::new();
        let mut by_lemma: HashMap<(String, Pos), Vec<usize>> = HashMap::new();
        let entries: Vec<LexiconEntry> = entries
            .into_iter()
            .map(|mut e| {
                e.form = e.form.to_lowercase();
                e.lemma = e.lemma.to_lowercase();
                e
            })
            .collect();
        for (idx, entry) in entries.iter().enumerate() {
            by_form.entry(entry.form.clone()).or_default().push(idx);
            by_lemma
                .entry((entry.lemma.clone(), entry.pos))
                .or_default()
                .push(idx);
        }
        Self {
            entries,
            by_form,
            by_lemma,
        }
    }

    /// Parse a JSON lexicon document.
    pub fn from_json_str(json: &str) -> GrammarResult<Self> {
        let file: LexiconFile =
            serde_json::from_str(json).map_err(|e| GrammarError::LexiconFormat {
                message: e.to_string(),
            })?;
        Ok(Self::from_entries(file.entries))
    }

    /// Load a JSON lexicon from disk.
    pub fn from_path(path: &Path) -> GrammarResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| GrammarError::LexiconIo {
            path: path.display().to_string(),
            source,
        })?;
        let morph = Self::from_json_str(&json)?;
        tracing::info!(
            path = %path.display(),
            forms = morph.len(),
            "loaded morphological lexicon"
        );
        Ok(morph)
    }

    /// The lexicon compiled into the binary.
    pub fn bundled() -> Self {
        Self::from_json_str(BUNDLED_LEXICON).expect("bundled lexicon is valid")
    }

    /// Number of surface forms.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn reading(&self, entry: &LexiconEntry, word: &str) -> Analysis {
        Analysis {
            word: word.to_string(),
            lemma: entry.lemma.clone(),
            pos: entry.pos,
            case: entry.case,
            gender: entry.gender,
        }
    }
}

impl Morphology for DictionaryMorphology {
    fn analyze(&self, word: &str) -> Analysis {
        let lower = word.to_lowercase();
        match self.by_form.get(&lower).and_then(|ids| ids.first()) {
            Some(&idx) => self.reading(&self.entries[idx], &lower),
            None => Analysis::unknown(&lower),
        }
    }

    fn inflect(&self, analysis: &Analysis, target: Features) -> Option<String> {
        let ids = self.by_lemma.get(&(analysis.lemma.clone(), analysis.pos))?;
        ids.iter()
            .map(|&idx| &self.entries[idx])
            .find(|e| {
                target.case.is_none_or(|c| e.case == Some(c))
                    && target.gender.is_none_or(|g| e.gender == Some(g))
            })
            .map(|e| e.form.clone())
    }
}
