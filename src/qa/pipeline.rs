//! End-to-end question processing.

use std::fmt;
use std::sync::Arc;

use rayon::prelude::*;
use serde::Serialize;

use crate::config::QaConfig;
use crate::error::QaResult;
use crate::grammar::lexicon::DictionaryMorphology;
use crate::grammar::morpho::Morphology;
use crate::graph::{KnowledgeBase, OxigraphKnowledgeBase};

use super::QueryRequest;
use super::answer::{AnswerFormatter, APOLOGY};
use super::patterns::{PatternMatcher, TriggerTable};
use super::planner::QueryPlanner;
use super::tagger::RoleTagger;

/// A question as the user typed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    text: String,
}

impl Question {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Outcome of one question in a batch evaluation.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluatedQuestion {
    pub question: String,
    pub answered: bool,
    pub reply: String,
}

/// Summary of a batch evaluation.
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub total: usize,
    pub answered: usize,
    /// `answered / total`, or 0 for an empty batch.
    pub accuracy: f64,
    pub results: Vec<EvaluatedQuestion>,
}

/// Matcher, tagger, planner and formatter over shared read-only state.
///
/// Cheap to share between threads; every call is independent.
pub struct QuestionPipeline {
    table: TriggerTable,
    morph: Arc<dyn Morphology>,
    kb: Arc<dyn KnowledgeBase>,
}

impl QuestionPipeline {
    pub fn new(
        table: TriggerTable,
        morph: Arc<dyn Morphology>,
        kb: Arc<dyn KnowledgeBase>,
    ) -> Self {
        Self { table, morph, kb }
    }

    /// Build the pipeline described by `config`, loading the lexicon and the
    /// knowledge base.
    pub fn from_config(config: &QaConfig) -> QaResult<Self> {
        let mut table = TriggerTable::builtin();
        table.extend(config.extra_patterns()?);

        let morph: Arc<dyn Morphology> = match &config.morphology.lexicon {
            Some(path) => Arc::new(DictionaryMorphology::from_path(path)?),
            None => Arc::new(DictionaryMorphology::bundled()),
        };
        let kb = Arc::new(OxigraphKnowledgeBase::load(&config.knowledge_base)?);

        tracing::info!(triggers = table.len(), "question pipeline ready");
        Ok(Self::new(table, morph, kb))
    }

    pub fn table(&self) -> &TriggerTable {
        &self.table
    }

    /// Query requests for a question: trigger matches, else the tagger's parse.
    pub fn requests(&self, question: &Question) -> Vec<QueryRequest> {
        let matched =
            PatternMatcher::new(&self.table, self.morph.as_ref()).match_question(question.text());
        if !matched.is_empty() {
            return matched;
        }
        tracing::debug!(%question, "no trigger matched, falling back to role tagger");
        RoleTagger::new(self.morph.as_ref())
            .parse(question.text())
            .unwrap_or_default()
    }

    /// Rendered answer sentences, primary first. Empty when unanswerable.
    pub fn answer(&self, question: &Question) -> Vec<String> {
        let requests = self.requests(question);
        if requests.is_empty() {
            return Vec::new();
        }
        tracing::debug!(
            %question,
            requests = %requests.iter().map(ToString::to_string).collect::<Vec<_>>().join(", "),
            "planned"
        );
        let answers = QueryPlanner::new(self.kb.as_ref()).run(requests);
        AnswerFormatter::new(self.morph.as_ref()).render(&answers)
    }

    /// The reply text shown to the user.
    pub fn process(&self, question: &Question) -> String {
        AnswerFormatter::present(&self.answer(question))
    }

    /// Answer every question in parallel and count the answered ones.
    pub fn evaluate(&self, questions: &[String]) -> Evaluation {
        let results: Vec<EvaluatedQuestion> = questions
            .par_iter()
            .map(|text| {
                let reply = self.process(&Question::new(text.as_str()));
                EvaluatedQuestion {
                    question: text.clone(),
                    answered: reply != APOLOGY,
                    reply,
                }
            })
            .collect();

        let answered = results.iter().filter(|r| r.answered).count();
        let accuracy = if results.is_empty() {
            0.0
        } else {
            answered as f64 / results.len() as f64
        };
        tracing::info!(total = results.len(), answered, accuracy, "evaluation finished");
        Evaluation {
            total: results.len(),
            answered,
            accuracy,
            results,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::graph::GraphResult;

    struct MapKb(HashMap<(&'static str, &'static str), Vec<&'static str>>);

    impl KnowledgeBase for MapKb {
        fn objects(&self, resource: &str, property: &str) -> GraphResult<Vec<String>> {
            Ok(self
                .0
                .iter()
                .find(|((r, p), _)| *r == resource && *p == property)
                .map(|(_, values)| values.iter().map(|v| v.to_string()).collect())
                .unwrap_or_default())
        }
    }

    fn pipeline() -> QuestionPipeline {
        let kb = MapKb(HashMap::from([
            (("Франція", "capital"), vec!["Париж"]),
            (("Франція", "столиця"), vec!["Париж"]),
            (("Франція", "площа"), vec!["643801"]),
            (("Київ", "latDeg"), vec!["50.45"]),
            (("Київ", "lonDeg"), vec!["30.52"]),
        ]));
        QuestionPipeline::new(
            TriggerTable::builtin(),
            Arc::new(DictionaryMorphology::bundled()),
            Arc::new(kb),
        )
    }

    #[test]
    fn trigger_question_is_answered_with_alternatives() {
        let text = pipeline().process(&Question::new("Яка столиця Франції?"));
        assert_eq!(
            text,
            "Відповідь на запитання:\nСтолиця Франції - Париж\n\
             \nТакож можливі такі відповіді:\nСтолиця Франції - Париж\n"
        );
    }

    #[test]
    fn tagger_handles_untriggered_question() {
        let question = Question::new("Площа Франції");
        let pipeline = pipeline();
        assert_eq!(
            pipeline.requests(&question),
            vec![QueryRequest::property("площа", "Франція")]
        );
        assert_eq!(
            pipeline.answer(&question),
            vec!["Площа Франції - 643801 км²"]
        );
    }

    #[test]
    fn coordinates_are_one_sentence() {
        let answers = pipeline().answer(&Question::new("Де знаходиться Київ?"));
        assert_eq!(
            answers,
            vec!["Координати Києва - 50.45 широти і 30.52 довготи"]
        );
    }

    #[test]
    fn unanswerable_questions_apologize() {
        let pipeline = pipeline();
        assert_eq!(pipeline.process(&Question::new("Яка столиця Атлантиди?")), APOLOGY);
        assert_eq!(pipeline.process(&Question::new("Привіт")), APOLOGY);
        assert_eq!(pipeline.process(&Question::new("")), APOLOGY);
    }

    #[test]
    fn evaluation_counts_answered() {
        let eval = pipeline().evaluate(&[
            "Яка столиця Франції?".to_string(),
            "Яка столиця Атлантиди?".to_string(),
        ]);
        assert_eq!(eval.total, 2);
        assert_eq!(eval.answered, 1);
        assert!((eval.accuracy - 0.5).abs() < f64::EPSILON);
        assert_eq!(eval.results[0].question, "Яка столиця Франції?");
        assert!(eval.results[0].answered);
        assert!(!eval.results[1].answered);
    }

    #[test]
    fn empty_evaluation_has_zero_accuracy() {
        let eval = pipeline().evaluate(&[]);
        assert_eq!(eval.total, 0);
        assert_eq!(eval.accuracy, 0.0);
    }
}
