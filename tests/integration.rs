//! End-to-end integration tests for the geo-qa pipeline.
//!
//! These tests load the sample knowledge base shipped in `data/` through
//! oxigraph and check the reply text the user would see, from question
//! through trigger matching or role tagging to formatted answers.

use std::io::Write;
use std::path::PathBuf;

use flate2::Compression;
use flate2::write::GzEncoder;

use geo_qa::config::{KnowledgeBaseConfig, QaConfig};
use geo_qa::error::{GraphError, QaError};
use geo_qa::qa::answer::APOLOGY;
use geo_qa::qa::{AnswerFormatter, Question, QuestionPipeline};

fn data_file(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data").join(name)
}

fn sample_config() -> QaConfig {
    QaConfig {
        knowledge_base: KnowledgeBaseConfig {
            path: data_file("geo_sample.ttl"),
            ..Default::default()
        },
        ..Default::default()
    }
}

fn pipeline() -> QuestionPipeline {
    QuestionPipeline::from_config(&sample_config()).unwrap()
}

fn ask(pipeline: &QuestionPipeline, text: &str) -> String {
    pipeline.process(&Question::new(text))
}

#[test]
fn capital_question_names_the_capital() {
    let reply = ask(&pipeline(), "Яка столиця Франції?");
    assert_eq!(reply, "Відповідь на запитання:\nСтолиця Франції - Париж\n");
}

#[test]
fn location_question_gives_one_coordinate_sentence() {
    let reply = ask(&pipeline(), "Де знаходиться Київ?");
    assert_eq!(
        reply,
        "Відповідь на запитання:\nКоординати Києва - 50.45 широти і 30.5233 довготи\n"
    );
}

#[test]
fn unknown_entity_gets_apology() {
    let pipeline = pipeline();
    assert_eq!(ask(&pipeline, "Яка столиця Атлантиди?"), APOLOGY);
    assert_eq!(ask(&pipeline, "Де знаходиться Атлантида?"), APOLOGY);
    assert_eq!(ask(&pipeline, "Площа Атлантиди"), APOLOGY);
}

#[test]
fn later_candidate_answers_when_earlier_is_missing() {
    // `population` has no value for Україна; `populationEstimate` does.
    let reply = ask(&pipeline(), "Яке населення України?");
    assert_eq!(
        reply,
        "Відповідь на запитання:\nНаселення України - 41732779 людей\n"
    );
}

#[test]
fn two_entities_are_unanswerable() {
    assert_eq!(ask(&pipeline(), "Столиця Франції та Німеччини"), APOLOGY);
}

#[test]
fn half_coordinates_are_unanswerable() {
    // Львів has a latitude but no longitude.
    assert_eq!(ask(&pipeline(), "Де знаходиться Львів?"), APOLOGY);
}

#[test]
fn ukrainian_property_names_are_queried() {
    let pipeline = pipeline();
    assert_eq!(
        ask(&pipeline, "Яка столиця Польщі?"),
        "Відповідь на запитання:\nСтолиця Польщі - Варшава\n"
    );
    assert_eq!(
        ask(&pipeline, "Скільки людей живе у Києві?"),
        "Відповідь на запитання:\nНаселення Києва - 2952301\n"
    );
}

#[test]
fn adjective_entity_resolves_to_joined_resource() {
    assert_eq!(
        ask(&pipeline(), "Яка глибина Чорного моря?"),
        "Відповідь на запитання:\nМаксимальна глибина Чорного Моря - 2212\n"
    );
}

#[test]
fn tagger_answers_untriggered_question() {
    assert_eq!(
        ask(&pipeline(), "Площа Північного Льодовитого океану"),
        "Відповідь на запитання:\nПлоща Північного Льодовитого Океану - 14750000 км²\n"
    );
}

#[test]
fn resource_values_read_as_words() {
    let sentences = pipeline().answer(&Question::new("Яка валюта України?"));
    assert_eq!(sentences, vec!["Валюта України - Українська гривня"]);
}

#[test]
fn replies_are_deterministic() {
    let pipeline = pipeline();
    for text in [
        "Яка столиця Франції?",
        "Де знаходиться Київ?",
        "Яка площа України?",
        "Столиця Франції та Німеччини",
    ] {
        assert_eq!(ask(&pipeline, text), ask(&pipeline, text));
    }
    assert_eq!(
        ask(&pipeline, "Яка площа України?"),
        ask(&self::pipeline(), "Яка площа України?")
    );
}

#[test]
fn present_of_nothing_is_apology() {
    assert_eq!(AnswerFormatter::present(&[]), APOLOGY);
}

#[test]
fn sample_questions_evaluate_in_parallel() {
    let content = std::fs::read_to_string(data_file("questions_uk.txt")).unwrap();
    let questions: Vec<String> = content.lines().map(String::from).collect();
    let evaluation = pipeline().evaluate(&questions);

    assert_eq!(evaluation.total, questions.len());
    assert!(evaluation.answered > 0);
    assert!(evaluation.answered < evaluation.total);
    for (result, question) in evaluation.results.iter().zip(&questions) {
        assert_eq!(&result.question, question);
        assert_eq!(result.answered, result.reply != APOLOGY);
    }
    let json = serde_json::to_value(&evaluation).unwrap();
    assert_eq!(json["total"], questions.len());
}

#[test]
fn gzip_knowledge_base_loads() {
    let ttl = std::fs::read(data_file("geo_sample.ttl")).unwrap();
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("geo.ttl.gz");
    let mut encoder = GzEncoder::new(std::fs::File::create(&path).unwrap(), Compression::default());
    encoder.write_all(&ttl).unwrap();
    encoder.finish().unwrap();

    let config = QaConfig {
        knowledge_base: KnowledgeBaseConfig {
            path,
            ..Default::default()
        },
        ..Default::default()
    };
    let pipeline = QuestionPipeline::from_config(&config).unwrap();
    assert_eq!(
        ask(&pipeline, "Яка столиця Франції?"),
        "Відповідь на запитання:\nСтолиця Франції - Париж\n"
    );
}

#[test]
fn missing_knowledge_base_is_fatal() {
    let config = QaConfig {
        knowledge_base: KnowledgeBaseConfig {
            path: "/nonexistent/geo.ttl".into(),
            ..Default::default()
        },
        ..Default::default()
    };
    let err = QuestionPipeline::from_config(&config).err().unwrap();
    assert!(matches!(err, QaError::Graph(GraphError::Io { .. })));
}

#[test]
fn config_file_adds_triggers() {
    let dir = tempfile::TempDir::new().unwrap();
    let config_path = dir.path().join("qa.toml");
    std::fs::write(
        &config_path,
        format!(
            r#"
[knowledge_base]
path = "{}"

[morphology]
lexicon = "{}"

[[patterns]]
trigger = "головне місто"
properties = ["capital"]
"#,
            data_file("geo_sample.ttl").display(),
            data_file("lexicon_uk.json").display()
        ),
    )
    .unwrap();

    let config = QaConfig::load(&config_path).unwrap();
    let pipeline = QuestionPipeline::from_config(&config).unwrap();
    assert_eq!(
        ask(&pipeline, "Головне місто України"),
        "Відповідь на запитання:\nСтолиця України - Київ\n"
    );
}
