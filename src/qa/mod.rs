//! Question answering: from question text to reply text.
//!
//! A question passes through five stages:
//!
//! 1. [`patterns::PatternMatcher`] looks for known trigger phrases
//! 2. [`tagger::RoleTagger`] parses the question when no trigger matched
//! 3. [`planner::QueryPlanner`] runs the resulting requests against the graph
//! 4. [`answer::AnswerFormatter`] renders answers as Ukrainian sentences
//! 5. [`pipeline::QuestionPipeline`] wires the stages together

pub mod answer;
pub mod patterns;
pub mod pipeline;
pub mod planner;
pub mod tagger;

pub use answer::AnswerFormatter;
pub use patterns::{PatternMatcher, PropertyDirective, TriggerPattern, TriggerTable};
pub use pipeline::{Evaluation, Question, QuestionPipeline};
pub use planner::{AnswerTriple, Answers, QueryPlanner};
pub use tagger::{Role, RoleTagger, TaggedToken};

/// One lookup the knowledge base should perform.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryRequest {
    /// Values of `property` for `entity`.
    Property { property: String, entity: String },
    /// Latitude and longitude of `entity`.
    Coordinates { entity: String },
}

impl QueryRequest {
    pub fn property(property: &str, entity: &str) -> Self {
        Self::Property {
            property: property.into(),
            entity: entity.into(),
        }
    }

    /// The entity phrase this request is about.
    pub fn entity(&self) -> &str {
        match self {
            Self::Property { entity, .. } | Self::Coordinates { entity } => entity,
        }
    }
}

impl std::fmt::Display for QueryRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Property { property, entity } => write!(f, "{entity}.{property}"),
            Self::Coordinates { entity } => write!(f, "{entity}.coordinates"),
        }
    }
}
