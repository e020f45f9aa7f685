//! Rich diagnostic error types for geo-qa.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes, help text, and source chains so users know exactly what
//! went wrong and how to fix it.
//!
//! Only loading can fail loudly. Once the knowledge base and lexicon are in
//! memory, every per-question failure degrades to "no answer".

use miette::Diagnostic;
use thiserror::Error;

use crate::grammar::GrammarError;

/// Top-level error type.
///
/// Each variant wraps a subsystem-specific error, preserving the full diagnostic
/// chain (error codes, help text, source spans) through to the user.
#[derive(Debug, Error, Diagnostic)]
pub enum QaError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Grammar(#[from] GrammarError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}

// ---------------------------------------------------------------------------
// Knowledge graph errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum GraphError {
    #[error("cannot read knowledge base \"{path}\"")]
    #[diagnostic(
        code(geo_qa::graph::io),
        help(
            "Check that the knowledge base path exists and is readable. \
             Pass it with --kb or set [knowledge_base].path in the config file."
        )
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot decompress knowledge base \"{path}\"")]
    #[diagnostic(
        code(geo_qa::graph::decompress),
        help(
            "Files ending in .gz are read as gzip streams. \
             Verify the archive with `gzip -t`, or decompress it and point \
             --kb at the plain file."
        )
    )]
    Decompress {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse knowledge base as {format}: {message}")]
    #[diagnostic(
        code(geo_qa::graph::parse),
        help(
            "The file is not valid {format}. Check the serialization format \
             ([knowledge_base].format accepts turtle, ntriples, rdfxml) \
             and the line reported in the message."
        )
    )]
    Parse { format: String, message: String },

    #[error("triple store error: {message}")]
    #[diagnostic(
        code(geo_qa::graph::store),
        help("The in-memory oxigraph store could not be created or read.")
    )]
    Store { message: String },

    #[error("SPARQL query failed: {message}")]
    #[diagnostic(
        code(geo_qa::graph::query),
        help(
            "The generated query was rejected by the store. \
             The question is answered as if no data were found."
        )
    )]
    Query { message: String },

    #[error("query exceeded {timeout_ms} ms")]
    #[diagnostic(
        code(geo_qa::graph::timeout),
        help(
            "Raise [knowledge_base].query_timeout_ms if large result sets \
             are expected for this property."
        )
    )]
    Timeout { timeout_ms: u64 },
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("cannot read config file \"{path}\"")]
    #[diagnostic(
        code(geo_qa::config::io),
        help("Check the path given with --config.")
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file \"{path}\": {message}")]
    #[diagnostic(
        code(geo_qa::config::toml),
        help(
            "The config file must be TOML with optional [knowledge_base], \
             [morphology] and [[patterns]] sections."
        )
    )]
    Toml { path: String, message: String },

    #[error("invalid pattern \"{trigger}\": {message}")]
    #[diagnostic(
        code(geo_qa::config::pattern),
        help(
            "Each [[patterns]] entry needs a non-empty trigger and either a \
             non-empty `properties` list or `coordinates = true`, not both."
        )
    )]
    InvalidPattern { trigger: String, message: String },
}

/// Convenience result type for top-level operations.
pub type QaResult<T> = std::result::Result<T, QaError>;
