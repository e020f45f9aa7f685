//! Bigram role tagger: the fallback parser for questions no trigger covers.
//!
//! The tagger walks the question in overlapping word pairs and, from the
//! parts of speech of both members, assigns discourse roles to content
//! words. It is a partial dependency parse without a parser: a noun
//! following a noun in an oblique case is the entity the first noun is
//! about, an adjective followed by a noun forms a phrase, and so on.
//!
//! Adjective chains span several pairs ("Північного Льодовитого океану"),
//! so agreed adjective forms accumulate in a pending phrase until a noun
//! closes it.

use std::fmt;

use crate::grammar::lexer::{Token, tokenize};
use crate::grammar::morpho::{Case, Morphology, Pos, gender_agree, title_case};

use super::QueryRequest;

/// Lemmas of the interrogatives that open a question.
pub const QUESTION_WORDS: &[&str] = &["що", "коли", "скільки", "де", "хто"];

/// Lemma of the interrogative determiner "which".
pub const WHICH: &str = "який";

/// Discourse role of a tagged word or phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    QuestionWord,
    Which,
    /// The requested property.
    Focus,
    Verb,
    /// The subject the question is about.
    Entity,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::QuestionWord => write!(f, "q_word"),
            Self::Which => write!(f, "which"),
            Self::Focus => write!(f, "focus"),
            Self::Verb => write!(f, "verb"),
            Self::Entity => write!(f, "entity"),
        }
    }
}

/// A lemma or phrase with its role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedToken {
    pub value: String,
    pub role: Role,
}

impl TaggedToken {
    pub fn new(value: impl Into<String>, role: Role) -> Self {
        Self {
            value: value.into(),
            role,
        }
    }
}

/// Pending adjective phrase.
#[derive(Debug, Default)]
enum Phrase {
    #[default]
    Idle,
    /// Agreed adjective forms so far; `tail` is the token index of the
    /// last buffered word.
    Accumulating { words: Vec<String>, tail: usize },
}

/// Mutable state of one left-to-right scan.
struct Scan<'m> {
    morph: &'m dyn Morphology,
    tags: Vec<TaggedToken>,
    phrase: Phrase,
}

impl<'m> Scan<'m> {
    fn new(morph: &'m dyn Morphology) -> Self {
        Self {
            morph,
            tags: Vec::new(),
            phrase: Phrase::Idle,
        }
    }

    fn emit(&mut self, value: impl Into<String>, role: Role) {
        self.tags.push(TaggedToken::new(value, role));
    }

    fn agree(&self, token: &Token) -> String {
        gender_agree(self.morph, &token.analysis)
    }

    /// Buffer the agreed form of the token at `idx` unless it is already
    /// the last buffered word.
    fn buffer(&mut self, idx: usize, token: &Token) {
        let word = self.agree(token);
        match &mut self.phrase {
            Phrase::Accumulating { tail, .. } if *tail == idx => {}
            Phrase::Accumulating { words, tail } => {
                words.push(word);
                *tail = idx;
            }
            Phrase::Idle => {
                self.phrase = Phrase::Accumulating {
                    words: vec![word],
                    tail: idx,
                };
            }
        }
    }

    fn take_phrase(&mut self) -> Option<Vec<String>> {
        match std::mem::take(&mut self.phrase) {
            Phrase::Accumulating { words, .. } => Some(words),
            Phrase::Idle => None,
        }
    }

    /// Apply the first matching rule to the pair starting at `idx`.
    fn pair(&mut self, idx: usize, w1: &Token, w2: &Token) {
        let (p1, p2) = (w1.pos(), w2.pos());

        if w1.lemma() == WHICH {
            self.emit(w1.lemma(), Role::Which);
            if p2 == Pos::Noun {
                self.emit(w2.lemma(), Role::Focus);
            }
        } else if QUESTION_WORDS.contains(&w1.lemma()) {
            self.emit(w1.lemma(), Role::QuestionWord);
            if p2 == Pos::Verb {
                self.emit(w2.lemma(), Role::Verb);
            } else if p2 == Pos::Noun {
                self.emit(w2.lemma(), Role::Focus);
            }
        } else if p1 == Pos::Noun {
            self.emit(w1.lemma(), Role::Focus);
            let oblique = w2.analysis.case.is_some_and(|c| c.is_oblique());
            if p2 == Pos::Noun && (oblique || w2.is_capitalized()) {
                self.emit(w2.lemma(), Role::Entity);
            } else if p2 == Pos::Noun && w2.analysis.case == Some(Case::Nominative) {
                self.emit(w2.lemma(), Role::Focus);
            } else if p2 == Pos::Verb {
                self.emit(w2.lemma(), Role::Verb);
            } else if p2.is_adjectival() {
                self.buffer(idx + 1, w2);
            }
        } else if p1 == Pos::Preposition {
            if p2 == Pos::Noun {
                self.emit(w2.lemma(), Role::Entity);
            }
        } else if p1.is_adjectival() {
            if p2 == Pos::Noun {
                if let Some(words) = self.take_phrase() {
                    self.emit(format!("{} {}", words.join(" "), w2.lemma()), Role::Entity);
                } else {
                    let joined = format!("{} {}", self.agree(w1), w2.lemma());
                    let role = if w2.is_capitalized() || w1.is_capitalized() {
                        Role::Entity
                    } else {
                        Role::Focus
                    };
                    self.emit(joined, role);
                }
            } else if p2.is_adjectival() {
                self.buffer(idx, w1);
                self.buffer(idx + 1, w2);
            }
        } else if p1 == Pos::Verb && p2 == Pos::Noun {
            self.emit(w1.lemma(), Role::Verb);
            let role = if w2.is_capitalized() {
                Role::Entity
            } else {
                Role::Focus
            };
            self.emit(w2.lemma(), role);
        } else if p2 == Pos::Noun && w2.is_capitalized() {
            self.emit(w2.lemma(), Role::Entity);
        }
    }
}

/// Assigns discourse roles to the words of a question.
pub struct RoleTagger<'a> {
    morph: &'a dyn Morphology,
}

impl<'a> RoleTagger<'a> {
    pub fn new(morph: &'a dyn Morphology) -> Self {
        Self { morph }
    }

    /// Tag the question, collapsing adjacent duplicate tags.
    pub fn tag(&self, question: &str) -> Vec<TaggedToken> {
        let tokens = tokenize(question, self.morph);
        let mut scan = Scan::new(self.morph);
        for (idx, pair) in tokens.windows(2).enumerate() {
            scan.pair(idx, &pair[0], &pair[1]);
        }
        let mut tags = scan.tags;
        tags.dedup();
        tags
    }

    /// Pair every focus with the question's single entity.
    ///
    /// Returns `None` when the question names no entity or more than one
    /// distinct entity.
    pub fn parse(&self, question: &str) -> Option<Vec<QueryRequest>> {
        let tags = self.tag(question);
        tracing::debug!(
            tags = %tags.iter().map(|t| format!("{}:{}", t.value, t.role)).collect::<Vec<_>>().join(" "),
            "role tags"
        );
        reduce(&tags)
    }
}

/// Collapse a tag sequence into (focus, entity) requests.
pub fn reduce(tags: &[TaggedToken]) -> Option<Vec<QueryRequest>> {
    let mut entities: Vec<&str> = Vec::new();
    for tag in tags.iter().filter(|t| t.role == Role::Entity) {
        if !entities.contains(&tag.value.as_str()) {
            entities.push(&tag.value);
        }
    }
    let [entity] = entities.as_slice() else {
        return None;
    };
    let entity = title_case(entity);
    Some(
        tags.iter()
            .filter(|t| t.role == Role::Focus && !t.value.is_empty())
            .map(|t| QueryRequest::property(&t.value, &entity))
            .collect(),
    )
}
