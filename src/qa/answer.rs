//! Rendering query answers as Ukrainian sentences.
//!
//! Property identifiers in the knowledge base mix English camelCase
//! (`populationEstimate`) and Ukrainian (`площаБасейну`). Display labels and
//! unit suffixes are looked up by exact identifier first and then by a
//! normalized key (snake_case, lowercase), so `populationEstimate` and
//! `population_estimate` find the same row.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::grammar::morpho::{Case, Morphology, capitalize, inflect_phrase, title_case};

use super::planner::{AnswerTriple, Answers};

/// Shown when a question produced no sentences.
pub const APOLOGY: &str = "Вибачте, відповідь на запитання не знайшлась!";

/// Precedes the primary answer.
pub const ANSWER_HEADER: &str = "Відповідь на запитання:\n";

/// Precedes any further answers.
pub const ALTERNATIVES_HEADER: &str = "\nТакож можливі такі відповіді:\n";

/// Ukrainian display labels for property identifiers.
const LABELS: &[(&str, &str)] = &[
    ("capital", "столиця"),
    ("area", "площа"),
    ("national_anthem", "гімн"),
    ("national_motto", "девіз"),
    ("largest_city", "найбільше місто"),
    ("common_name", "назва"),
    ("official_languages", "офіційні мови"),
    ("population_estimate", "населення"),
    ("population_density", "густота населення"),
    ("population", "населення"),
    ("GDP_PPP", "ВВП"),
    ("GDP_PPP_per_capita", "ВВП на душу населення"),
    ("HDI", "індекс людського розвитку"),
    ("government_type", "форма правління"),
    ("established_date1", "дата заснування"),
    ("currency", "валюта"),
    ("currency_code", "код валюти"),
    ("leader_name1", "голова держави"),
    ("time_zone", "часовий пояс"),
    ("cctld", "домен"),
    ("calling_code", "телефонний код"),
    ("elevationM", "висота"),
    ("elevation", "висота"),
    ("length", "довжина"),
    ("partLength", "довжина"),
    ("totalLength", "повна довжина"),
    ("depth", "глибина"),
    ("maxDepth", "максимальна глибина"),
    ("width", "ширина"),
    ("volume", "об'єм"),
    ("location", "розташування"),
    ("region", "регіон"),
    ("areaWaterKm", "площа басейну"),
    ("range", "гірська система"),
];

/// Measurement units appended to values.
const UNITS: &[(&str, &str)] = &[
    ("area", "км²"),
    ("площа", "км²"),
    ("population_estimate", "людей"),
    ("GDP_PPP", "доларів"),
    ("GDP_PPP_per_capita", "доларів"),
    ("population_density", "людей на км²"),
    ("length", "кілометрів"),
    ("довжина", "кілометрів"),
    ("depth", "метрів"),
    ("width", "кілометрів"),
    ("volume", "кубічних метрів"),
    ("areaWaterKm", "км²"),
    ("площаБасейну", "км²"),
];

static CAMEL_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([\p{Ll}\p{N}])(\p{Lu})").unwrap());

/// Lookup table keyed by both the exact and the normalized identifier.
struct PropertyTable {
    exact: HashMap<&'static str, &'static str>,
    normalized: HashMap<String, &'static str>,
}

impl PropertyTable {
    fn new(rows: &'static [(&'static str, &'static str)]) -> Self {
        let mut normalized = HashMap::new();
        for &(key, value) in rows {
            normalized.entry(table_key(key)).or_insert(value);
        }
        Self {
            exact: rows.iter().copied().collect(),
            normalized,
        }
    }

    fn get(&self, property: &str) -> Option<&'static str> {
        self.exact
            .get(property)
            .or_else(|| self.normalized.get(&table_key(property)))
            .copied()
    }
}

static LABEL_TABLE: LazyLock<PropertyTable> = LazyLock::new(|| PropertyTable::new(LABELS));
static UNIT_TABLE: LazyLock<PropertyTable> = LazyLock::new(|| PropertyTable::new(UNITS));

/// `populationEstimate` → `population_estimate`, `GDP_PPP` → `gdp_ppp`.
pub fn table_key(property: &str) -> String {
    CAMEL_BOUNDARY
        .replace_all(property, "${1}_${2}")
        .to_lowercase()
}

/// Display label for a property, falling back to the identifier itself.
pub fn property_label(property: &str) -> &str {
    LABEL_TABLE.get(property).unwrap_or(property)
}

/// Unit suffix for a property, if it has one.
pub fn property_unit(property: &str) -> Option<&'static str> {
    UNIT_TABLE.get(property)
}

/// Turns answers into sentences and sentences into the reply text.
pub struct AnswerFormatter<'a> {
    morph: &'a dyn Morphology,
}

impl<'a> AnswerFormatter<'a> {
    pub fn new(morph: &'a dyn Morphology) -> Self {
        Self { morph }
    }

    /// One sentence per fact, or a single sentence for coordinates.
    pub fn render(&self, answers: &Answers) -> Vec<String> {
        match answers {
            Answers::Coordinates {
                entity,
                latitude,
                longitude,
            } => vec![format!(
                "Координати {} - {latitude} широти і {longitude} довготи",
                self.genitive(entity)
            )],
            Answers::Facts(facts) => facts.iter().map(|t| self.sentence(t)).collect(),
        }
    }

    /// `<Property> <Entity.gen> - <value>[ <unit>]`
    pub fn sentence(&self, triple: &AnswerTriple) -> String {
        let label = capitalize(property_label(&triple.property));
        let unit = property_unit(&triple.property)
            .map(|u| format!(" {u}"))
            .unwrap_or_default();
        format!(
            "{label} {} - {}{unit}",
            self.genitive(&triple.entity),
            triple.value.replace('_', " ")
        )
    }

    fn genitive(&self, entity: &str) -> String {
        title_case(&inflect_phrase(self.morph, entity, Case::Genitive))
    }

    /// The reply text for a list of sentences.
    pub fn present(sentences: &[String]) -> String {
        let Some((first, rest)) = sentences.split_first() else {
            return APOLOGY.to_string();
        };
        let mut text = format!("{ANSWER_HEADER}{first}\n");
        if !rest.is_empty() {
            text.push_str(ALTERNATIVES_HEADER);
            for sentence in rest {
                text.push_str(sentence);
                text.push('\n');
            }
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::lexicon::DictionaryMorphology;

    fn render(answers: &Answers) -> Vec<String> {
        let morph = DictionaryMorphology::bundled();
        AnswerFormatter::new(&morph).render(answers)
    }

    #[test]
    fn keys_normalize_camel_and_snake() {
        assert_eq!(table_key("populationEstimate"), "population_estimate");
        assert_eq!(table_key("GDP_PPP"), "gdp_ppp");
        assert_eq!(table_key("leaderName1"), "leader_name1");
        assert_eq!(table_key("площаБасейну"), "площа_басейну");
    }

    #[test]
    fn labels_found_by_either_spelling() {
        assert_eq!(property_label("capital"), "столиця");
        assert_eq!(property_label("nationalAnthem"), "гімн");
        assert_eq!(property_label("gdpPppPerCapita"), "ВВП на душу населення");
        assert_eq!(property_label("maxDepth"), "максимальна глибина");
        assert_eq!(property_label("столиця"), "столиця");
        assert_eq!(property_label("unknownThing"), "unknownThing");
    }

    #[test]
    fn units_found_by_either_spelling() {
        assert_eq!(property_unit("area"), Some("км²"));
        assert_eq!(property_unit("populationEstimate"), Some("людей"));
        assert_eq!(property_unit("площаБасейну"), Some("км²"));
        assert_eq!(property_unit("capital"), None);
    }

    #[test]
    fn fact_sentence_inflects_entity() {
        let sentences = render(&Answers::Facts(vec![AnswerTriple::new(
            "capital", "Франція", "Париж",
        )]));
        assert_eq!(sentences, vec!["Столиця Франції - Париж"]);
    }

    #[test]
    fn fact_sentence_with_unit_and_underscores() {
        let sentences = render(&Answers::Facts(vec![
            AnswerTriple::new("area", "Франція", "643801"),
            AnswerTriple::new("officialLanguages", "Франція", "Французька_мова"),
        ]));
        assert_eq!(
            sentences,
            vec![
                "Площа Франції - 643801 км²",
                "Офіційні мови Франції - Французька мова",
            ]
        );
    }

    #[test]
    fn multi_word_entity_is_inflected_per_word() {
        let sentences = render(&Answers::Facts(vec![AnswerTriple::new(
            "maxDepth",
            "Чорне Море",
            "2212",
        )]));
        assert_eq!(sentences, vec!["Максимальна глибина Чорного Моря - 2212"]);
    }

    #[test]
    fn unknown_entity_keeps_its_form() {
        let sentences = render(&Answers::Facts(vec![AnswerTriple::new(
            "capital",
            "Атлантида",
            "Посейдонія",
        )]));
        assert_eq!(sentences, vec!["Столиця Атлантида - Посейдонія"]);
    }

    #[test]
    fn coordinates_render_one_sentence() {
        let sentences = render(&Answers::Coordinates {
            entity: "Київ".into(),
            latitude: "50.45".into(),
            longitude: "30.52".into(),
        });
        assert_eq!(
            sentences,
            vec!["Координати Києва - 50.45 широти і 30.52 довготи"]
        );
    }

    #[test]
    fn present_empty_is_apology() {
        assert_eq!(AnswerFormatter::present(&[]), APOLOGY);
    }

    #[test]
    fn present_single_answer() {
        let text = AnswerFormatter::present(&["Столиця Франції - Париж".to_string()]);
        assert_eq!(text, "Відповідь на запитання:\nСтолиця Франції - Париж\n");
    }

    #[test]
    fn present_alternatives() {
        let text = AnswerFormatter::present(&[
            "Столиця Франції - Париж".to_string(),
            "Столиця Франції - Париж".to_string(),
        ]);
        assert_eq!(
            text,
            "Відповідь на запитання:\nСтолиця Франції - Париж\n\
             \nТакож можливі такі відповіді:\nСтолиця Франції - Париж\n"
        );
    }
}
