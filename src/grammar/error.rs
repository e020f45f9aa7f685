//! Rich diagnostic error types for the grammar subsystem.
//!
//! Follows the crate-wide miette pattern: every error variant carries
//! `#[diagnostic(code(...), help(...))]` so the user knows exactly
//! what went wrong and how to fix it.

use miette::Diagnostic;
use thiserror::Error;

/// Errors produced while setting up morphological analysis.
#[derive(Debug, Error, Diagnostic)]
pub enum GrammarError {
    #[error("cannot read lexicon file \"{path}\"")]
    #[diagnostic(
        code(geo_qa::grammar::lexicon_io),
        help(
            "Check that the lexicon path is correct and readable. \
             Pass it with --lexicon or set [morphology].lexicon in the config file. \
             Omit both to use the bundled Ukrainian lexicon."
        )
    )]
    LexiconIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed lexicon: {message}")]
    #[diagnostic(
        code(geo_qa::grammar::lexicon_format),
        help(
            "The lexicon must be a JSON object with an \"entries\" array. \
             Each entry needs \"form\", \"lemma\" and \"pos\" \
             (noun, adjf, comp, verb, prep, unkn, other); \"case\" \
             (nomn, gent, datv, accs, ablt, loct, voct) and \"gender\" \
             (masc, femn, neut) are optional."
        )
    )]
    LexiconFormat { message: String },
}

/// Result type for grammar operations.
pub type GrammarResult<T> = std::result::Result<T, GrammarError>;
