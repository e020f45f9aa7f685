//! Trigger-phrase intent matching and entity extraction.
//!
//! A question like "Яка столиця Франції?" is answered without any parsing:
//! the trigger "яка столиця" selects the candidate properties `capital` and
//! `столиця`, and the first capitalized content word after the question's
//! opening word supplies the entity ("Франції" → "Франція").

use crate::grammar::lexer::{clean_word, normalize};
use crate::grammar::morpho::{Morphology, Pos, gender_agree, is_capitalized, title_case};

use super::QueryRequest;

/// What a trigger asks the knowledge base for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyDirective {
    /// Candidate property identifiers, tried in order.
    Properties(Vec<String>),
    /// Fetch latitude and longitude instead of a single property.
    Coordinates,
}

/// One row of the trigger table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerPattern {
    /// Lowercased trigger phrase.
    pub trigger: String,
    pub directive: PropertyDirective,
}

impl TriggerPattern {
    pub fn new(trigger: &str, directive: PropertyDirective) -> Self {
        Self {
            trigger: normalize(trigger).trim().to_lowercase(),
            directive,
        }
    }

    fn properties(trigger: &str, properties: &[&str]) -> Self {
        Self::new(
            trigger,
            PropertyDirective::Properties(properties.iter().map(|p| p.to_string()).collect()),
        )
    }
}

/// Ordered, duplicate-free table of trigger patterns.
#[derive(Debug, Clone, Default)]
pub struct TriggerTable {
    patterns: Vec<TriggerPattern>,
}

impl TriggerTable {
    /// Build a table, merging rows that share a trigger.
    ///
    /// A merged row keeps the position of its first occurrence. Property
    /// lists are unioned in declaration order; a coordinate directive wins
    /// over properties.
    pub fn new(patterns: impl IntoIterator<Item = TriggerPattern>) -> Self {
        let mut table = Self::default();
        table.extend(patterns);
        table
    }

    /// Add rows, merging duplicates into existing ones.
    pub fn extend(&mut self, patterns: impl IntoIterator<Item = TriggerPattern>) {
        for pattern in patterns {
            let Some(existing) = self
                .patterns
                .iter_mut()
                .find(|p| p.trigger == pattern.trigger)
            else {
                self.patterns.push(pattern);
                continue;
            };
            tracing::warn!(trigger = %pattern.trigger, "duplicate trigger merged");
            match (&mut existing.directive, pattern.directive) {
                (PropertyDirective::Properties(have), PropertyDirective::Properties(new)) => {
                    for prop in new {
                        if !have.contains(&prop) {
                            have.push(prop);
                        }
                    }
                }
                (directive, PropertyDirective::Coordinates) => {
                    *directive = PropertyDirective::Coordinates;
                }
                (PropertyDirective::Coordinates, PropertyDirective::Properties(_)) => {}
            }
        }
    }

    /// The built-in Ukrainian geography table.
    pub fn builtin() -> Self {
        use PropertyDirective::Coordinates;
        let p = TriggerPattern::properties;
        Self::new([
            p("яка столиця", &["capital", "столиця"]),
            p("яка форма правління", &["governmentType"]),
            p("яка валюта", &["currency", "валюта"]),
            p("яка площа", &["area", "площа"]),
            p("яке населення", &["population", "populationEstimate", "населення"]),
            p("скільки людей", &["population", "populationEstimate", "населення"]),
            TriggerPattern::new("де знаходиться", Coordinates),
            TriggerPattern::new("де розташовується", Coordinates),
            p("який гімн", &["nationalAnthem"]),
            p("офіційні мови", &["officialLanguages"]),
            p("державна мова", &["officialLanguages"]),
            p("державні мови", &["officialLanguages"]),
            p("офіційна мова", &["officialLanguages"]),
            p("якими мовами говорять", &["officialLanguages"]),
            p("якими мовами розмовляють", &["officialLanguages"]),
            p("найбільше місто", &["largestCity"]),
            p("який президент", &["leaderName1"]),
            p("хто президент", &["leaderName1"]),
            p("хто голова держави", &["leaderName1"]),
            p("яка густота населення", &["populationDensity", "густота"]),
            p("ВВП на душу", &["gdpPppPerCapita", "gdpNominalPerCapita"]),
            p("який ВВП", &["gdpPpp", "gdpNominal"]),
            p("ВВП", &["gdpPpp", "gdpNominal"]),
            p("індекс розвитку", &["hdi"]),
            p("код валюти", &["currencyCode", "кодВалюти"]),
            p("домен", &["cctld"]),
            p("телефонний код", &["callingCode", "кодКраїни"]),
            p("який код", &["callingCode", "кодКраїни"]),
            p("коли засновано", &["establishedDate1", "засноване"]),
            p("який часовий пояс", &["timeZone", "utcOffset"]),
            p("у якій країні", &["країна", "country"]),
            p("у якому регіоні", &["регіон", "region"]),
            p("девіз", &["nationalMotto", "девіз"]),
            p("яке населення агломерації", &["агломерація"]),
            p("яка площа міста", &["area", "площа"]),
            p("яка висота над рівнем моря", &["висотаНадРівнемМоря", "elevationM"]),
            p("який поділ міста", &["поділМіста"]),
            p("яка довжина", &["length", "totalLength", "partLength", "довжина"]),
            p("глибина", &["depth", "maxDepth", "глибина", "найбільшаГлибина"]),
            p("яка ширина", &["width", "ширина"]),
            p("довжина берегу", &["довжинаБереговоїЛінії"]),
            p("довжина берегової лінії", &["довжинаБереговоїЛінії"]),
            p("об'єм", &["volume"]),
            p("який регіон", &["регіон", "region"]),
            p("яке розташування", &["location", "розташування"]),
            p("яка гірська система", &["range"]),
            p("яка висота", &["elevation", "elevationM"]),
            p("яка площа басейну", &["площаБасейну", "areaWaterKm"]),
            p("яке гирло", &["гирло"]),
            p("куди впадає", &["басейн", "гирло"]),
            p("який тип озера", &["тип"]),
            p("який витік", &["витік"]),
            p("звідки витікає", &["витік", "витікКоорд"]),
            p("які прирічкові країни", &["прирічковіКраїни"]),
            p("серередньорічний стік", &["стік"]),
            p("який стік", &["стік"]),
            p("назва країни", &["commonName"]),
        ])
    }

    pub fn patterns(&self) -> &[TriggerPattern] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Rows whose trigger occurs in `question`, in table order.
    pub fn matching<'t>(&'t self, question: &str) -> impl Iterator<Item = &'t TriggerPattern> {
        let lower = normalize(question).to_lowercase();
        self.patterns
            .iter()
            .filter(move |p| lower.contains(p.trigger.as_str()))
    }
}

/// Maps trigger phrases in a question to candidate query requests.
pub struct PatternMatcher<'a> {
    table: &'a TriggerTable,
    morph: &'a dyn Morphology,
}

impl<'a> PatternMatcher<'a> {
    pub fn new(table: &'a TriggerTable, morph: &'a dyn Morphology) -> Self {
        Self { table, morph }
    }

    /// Requests for every matching trigger that has an entity to ask about.
    pub fn match_question(&self, question: &str) -> Vec<QueryRequest> {
        let mut requests = Vec::new();
        let mut entity: Option<Option<String>> = None;
        for pattern in self.table.matching(question) {
            let Some(found) = entity
                .get_or_insert_with(|| self.extract_entity(question))
                .clone()
            else {
                continue;
            };
            tracing::debug!(trigger = %pattern.trigger, entity = %found, "trigger matched");
            match &pattern.directive {
                PropertyDirective::Coordinates => {
                    requests.push(QueryRequest::Coordinates { entity: found });
                }
                PropertyDirective::Properties(props) => {
                    requests.extend(props.iter().map(|prop| QueryRequest::Property {
                        property: prop.clone(),
                        entity: found.clone(),
                    }));
                }
            }
        }
        requests
    }

    /// The first capitalized noun, adjective or unknown word after the
    /// question's opening word, in nominative form and title case.
    ///
    /// An adjective takes the following word with it: "Чорного моря" →
    /// "Чорне море".
    pub fn extract_entity(&self, question: &str) -> Option<String> {
        let normalized = normalize(question);
        let words: Vec<&str> = normalized
            .split_whitespace()
            .map(clean_word)
            .filter(|w| !w.is_empty())
            .collect();

        for (idx, word) in words.iter().enumerate().skip(1) {
            if !is_capitalized(word) {
                continue;
            }
            let analysis = self.morph.analyze(word);
            match analysis.pos {
                Pos::Adjective => {
                    let adjective = title_case(&gender_agree(self.morph, &analysis));
                    return Some(match words.get(idx + 1) {
                        Some(next) => format!("{adjective} {}", self.morph.analyze(next).lemma),
                        None => adjective,
                    });
                }
                Pos::Noun | Pos::Unknown => return Some(title_case(&analysis.lemma)),
                _ => continue,
            }
        }
        None
    }
}
