//! Knowledge graph access.
//!
//! The question pipeline only ever asks one kind of question of the graph:
//! "which objects does this subject have for this predicate?". That single
//! operation is the [`KnowledgeBase`] trait; [`sparql::OxigraphKnowledgeBase`]
//! answers it from an in-memory oxigraph store loaded once at startup.
//!
//! Identifiers are built from natural-language words:
//!
//! - entity "Чорне море" → resource `ЧорнеМоре`
//! - property "офіційна мова" → `офіційнамова`

pub mod sparql;

use crate::error::GraphError;
use crate::grammar::morpho::title_case;

pub use sparql::OxigraphKnowledgeBase;

/// Result type for knowledge-graph operations.
pub type GraphResult<T> = std::result::Result<T, GraphError>;

/// A read-only single-triple-pattern query executor.
///
/// Implementations must tolerate concurrent readers.
pub trait KnowledgeBase: Send + Sync {
    /// All objects of `(resource, property, ?obj)`.
    ///
    /// `resource` and `property` are local names (see [`resource_id`] and
    /// [`property_id`]). Resource values come back with their namespace
    /// stripped; literals come back as their lexical form. Unknown or
    /// malformed identifiers yield an empty list.
    fn objects(&self, resource: &str, property: &str) -> GraphResult<Vec<String>>;
}

/// Local resource name for an entity phrase.
///
/// Multi-word phrases are title-cased word by word and concatenated;
/// single words are used unchanged.
pub fn resource_id(entity: &str) -> String {
    let words: Vec<&str> = entity.split_whitespace().collect();
    if words.len() > 1 {
        words.iter().map(|w| title_case(w)).collect()
    } else {
        entity.trim().to_string()
    }
}

/// Local property name for a (possibly multi-word) property phrase.
pub fn property_id(property: &str) -> String {
    property.split_whitespace().collect()
}
