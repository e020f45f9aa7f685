//! In-memory SPARQL knowledge base backed by oxigraph.
//!
//! The graph file is read in full, decompressed when gzip-compressed, and
//! parsed into a fresh in-memory store before the first question is served.
//! Loading is all-or-nothing: any I/O, decompression or syntax error aborts.

use std::io::Read;
use std::time::{Duration, Instant};

use flate2::read::GzDecoder;
use oxigraph::io::RdfFormat;
use oxigraph::model::{NamedNode, Term};
use oxigraph::sparql::QueryResults;
use oxigraph::store::Store;

use crate::config::{KbFormat, KnowledgeBaseConfig};
use crate::error::GraphError;

use super::{GraphResult, KnowledgeBase};

/// Read-only knowledge base over an oxigraph store.
#[derive(Clone)]
pub struct OxigraphKnowledgeBase {
    store: Store,
    resource_ns: String,
    property_ns: String,
    timeout: Duration,
}

impl OxigraphKnowledgeBase {
    /// Load the graph file named by `config`.
    pub fn load(config: &KnowledgeBaseConfig) -> GraphResult<Self> {
        let path = config.path.display().to_string();
        let started = Instant::now();
        let raw = std::fs::read(&config.path).map_err(|source| GraphError::Io {
            path: path.clone(),
            source,
        })?;

        let data = if config.is_compressed() {
            let mut decoded = Vec::with_capacity(raw.len() * 4);
            GzDecoder::new(raw.as_slice())
                .read_to_end(&mut decoded)
                .map_err(|source| GraphError::Decompress {
                    path: path.clone(),
                    source,
                })?;
            decoded
        } else {
            raw
        };

        let kb = Self::from_reader(data.as_slice(), config)?;
        tracing::info!(
            path = %path,
            triples = kb.len()?,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "knowledge base loaded"
        );
        Ok(kb)
    }

    /// Parse an uncompressed serialization from any reader.
    pub fn from_reader(reader: impl Read, config: &KnowledgeBaseConfig) -> GraphResult<Self> {
        let store = Store::new().map_err(|e| GraphError::Store {
            message: format!("failed to create oxigraph store: {e}"),
        })?;
        store
            .load_from_reader(rdf_format(config.format), reader)
            .map_err(|e| GraphError::Parse {
                format: config.format.to_string(),
                message: e.to_string(),
            })?;
        Ok(Self {
            store,
            resource_ns: config.resource_namespace.clone(),
            property_ns: config.property_namespace.clone(),
            timeout: config.query_timeout(),
        })
    }

    /// Number of triples in the store.
    pub fn len(&self) -> GraphResult<usize> {
        self.store.len().map_err(|e| GraphError::Store {
            message: format!("failed to count triples: {e}"),
        })
    }

    /// Whether the store holds no triples.
    pub fn is_empty(&self) -> GraphResult<bool> {
        self.len().map(|n| n == 0)
    }

    fn iri(namespace: &str, local: &str) -> Option<NamedNode> {
        NamedNode::new(format!("{namespace}{local}")).ok()
    }

    /// Render an object term, stripping the resource namespace.
    fn object_value(&self, term: &Term) -> String {
        match term {
            Term::NamedNode(node) => {
                let iri = node.as_str();
                iri.strip_prefix(self.resource_ns.as_str())
                    .unwrap_or(iri)
                    .to_string()
            }
            Term::Literal(literal) => literal.value().to_string(),
            other => other.to_string(),
        }
    }
}

impl KnowledgeBase for OxigraphKnowledgeBase {
    fn objects(&self, resource: &str, property: &str) -> GraphResult<Vec<String>> {
        let (Some(subject), Some(predicate)) = (
            Self::iri(&self.resource_ns, resource),
            Self::iri(&self.property_ns, property),
        ) else {
            tracing::debug!(resource, property, "identifier is not a valid IRI, skipping");
            return Ok(Vec::new());
        };

        let deadline = Instant::now() + self.timeout;
        let sparql = format!("SELECT DISTINCT ?obj WHERE {{ {subject} {predicate} ?obj }}");
        let results = self.store.query(sparql.as_str()).map_err(|e| GraphError::Query {
            message: e.to_string(),
        })?;

        let QueryResults::Solutions(solutions) = results else {
            return Err(GraphError::Query {
                message: "expected solutions from SELECT query".into(),
            });
        };

        let mut values = Vec::new();
        for solution in solutions {
            if Instant::now() > deadline {
                return Err(GraphError::Timeout {
                    timeout_ms: self.timeout.as_millis() as u64,
                });
            }
            let solution = solution.map_err(|e| GraphError::Query {
                message: format!("solution error: {e}"),
            })?;
            if let Some(term) = solution.get("obj") {
                let value = self.object_value(term);
                if !value.is_empty() {
                    values.push(value);
                }
            }
        }
        Ok(values)
    }
}

impl std::fmt::Debug for OxigraphKnowledgeBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OxigraphKnowledgeBase")
            .field("resource_ns", &self.resource_ns)
            .field("property_ns", &self.property_ns)
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn rdf_format(format: KbFormat) -> RdfFormat {
    match format {
        KbFormat::Turtle => RdfFormat::Turtle,
        KbFormat::NTriples => RdfFormat::NTriples,
        KbFormat::RdfXml => RdfFormat::RdfXml,
    }
}
