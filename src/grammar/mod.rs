//! Word-level language machinery.
//!
//! ## Architecture
//!
//! ```text
//! Question text ──→ lexer (normalize, split) ──→ Token { surface, Analysis }
//!                                                        ↑
//!                                     Morphology (analyze / inflect)
//!                                                        ↑
//!                                         DictionaryMorphology (JSON lexicon)
//! ```
//!
//! The [`Morphology`] trait is the seam to the morphological analyzer. One
//! analyzer is built per process and handed by reference to every component
//! that needs lemmas, tags or inflected forms.

pub mod error;
pub mod lexer;
pub mod lexicon;
pub mod morpho;

pub use error::{GrammarError, GrammarResult};
pub use lexer::Token;
pub use lexicon::{DictionaryMorphology, LexiconEntry};
pub use morpho::{Analysis, Case, Features, Gender, Morphology, Pos};
