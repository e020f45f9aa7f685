//! Query planning and execution against the knowledge base.

use crate::graph::{KnowledgeBase, property_id, resource_id};

use super::QueryRequest;

/// Latitude property synonyms, most specific first.
pub const LATITUDE_PROPERTIES: &[&str] = &["latDeg", "latd", "широта"];

/// Longitude property synonyms, most specific first.
pub const LONGITUDE_PROPERTIES: &[&str] = &["lonDeg", "lond", "довгота"];

/// A single fact returned for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerTriple {
    pub property: String,
    pub entity: String,
    pub value: String,
}

impl AnswerTriple {
    pub fn new(property: &str, entity: &str, value: &str) -> Self {
        Self {
            property: property.into(),
            entity: entity.into(),
            value: value.into(),
        }
    }
}

/// Everything the knowledge base returned for one question.
///
/// Coordinates are all-or-nothing and exclude ordinary facts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answers {
    Coordinates {
        entity: String,
        latitude: String,
        longitude: String,
    },
    Facts(Vec<AnswerTriple>),
}

impl Answers {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Facts(facts) if facts.is_empty())
    }

    /// Flatten into triples; coordinates become `latd` then `lond`.
    pub fn triples(&self) -> Vec<AnswerTriple> {
        match self {
            Self::Coordinates {
                entity,
                latitude,
                longitude,
            } => vec![
                AnswerTriple::new("latd", entity, latitude),
                AnswerTriple::new("lond", entity, longitude),
            ],
            Self::Facts(facts) => facts.clone(),
        }
    }
}

/// Drop repeated requests, keeping first occurrences in order.
pub fn canonicalize(requests: Vec<QueryRequest>) -> Vec<QueryRequest> {
    let mut out: Vec<QueryRequest> = Vec::with_capacity(requests.len());
    for request in requests {
        if !out.contains(&request) {
            out.push(request);
        }
    }
    out
}

/// Runs query requests against a knowledge base.
pub struct QueryPlanner<'a> {
    kb: &'a dyn KnowledgeBase,
}

impl<'a> QueryPlanner<'a> {
    pub fn new(kb: &'a dyn KnowledgeBase) -> Self {
        Self { kb }
    }

    /// Execute `requests` in order.
    ///
    /// The first coordinate request that finds both latitude and longitude
    /// ends the batch. Requests with no data are skipped.
    pub fn run(&self, requests: Vec<QueryRequest>) -> Answers {
        let mut facts = Vec::new();
        for request in canonicalize(requests) {
            match request {
                QueryRequest::Coordinates { entity } => {
                    if let Some((latitude, longitude)) = self.coordinates(&entity) {
                        return Answers::Coordinates {
                            entity,
                            latitude,
                            longitude,
                        };
                    }
                }
                QueryRequest::Property { property, entity } => {
                    facts.extend(
                        self.lookup(&property, &entity)
                            .into_iter()
                            .map(|value| AnswerTriple {
                                property: property.clone(),
                                entity: entity.clone(),
                                value,
                            }),
                    );
                }
            }
        }
        Answers::Facts(facts)
    }

    /// All values of `property` for `entity`; failures count as no data.
    fn lookup(&self, property: &str, entity: &str) -> Vec<String> {
        let (resource, predicate) = (resource_id(entity), property_id(property));
        match self.kb.objects(&resource, &predicate) {
            Ok(values) => {
                tracing::debug!(%resource, %predicate, hits = values.len(), "lookup");
                values
            }
            Err(e) => {
                tracing::warn!(%resource, %predicate, error = %e, "lookup failed, skipping");
                Vec::new()
            }
        }
    }

    fn first_of(&self, synonyms: &[&str], entity: &str) -> Option<String> {
        synonyms
            .iter()
            .find_map(|prop| self.lookup(prop, entity).into_iter().next())
    }

    fn coordinates(&self, entity: &str) -> Option<(String, String)> {
        let latitude = self.first_of(LATITUDE_PROPERTIES, entity);
        let longitude = self.first_of(LONGITUDE_PROPERTIES, entity);
        latitude.zip(longitude)
    }
}
