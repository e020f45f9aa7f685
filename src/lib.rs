// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # geo-qa
//!
//! Answers geography questions asked in Ukrainian from an RDF knowledge graph.
//!
//! ## Architecture
//!
//! - **Grammar** (`grammar`): tokenizer and a dictionary-backed morphological analyzer
//! - **Knowledge graph** (`graph`): single-pattern lookups over an in-memory oxigraph store
//! - **Question answering** (`qa`): trigger matching, role tagging, query planning
//!   and answer formatting
//! - **Configuration** (`config`): TOML settings for the graph, lexicon and extra triggers
//!
//! ## Library usage
//!
//! ```no_run
//! use geo_qa::config::QaConfig;
//! use geo_qa::qa::{Question, QuestionPipeline};
//!
//! let pipeline = QuestionPipeline::from_config(&QaConfig::default()).unwrap();
//! let reply = pipeline.process(&Question::new("Яка столиця Франції?"));
//! println!("{reply}");
//! ```

pub mod config;
pub mod error;
pub mod grammar;
pub mod graph;
pub mod qa;
