//! End-to-end advice tests.
//!
//! These drive the public engine API the way the CLI does: build an engine,
//! validate a request, advise. The generator is either absent or a local
//! mock of the Gemini REST endpoint.

use std::sync::Arc;
use std::time::Duration;

use cyclewise_core::{
    AdviceEngine, AdviceRequest, AdviceSource, FallbackPolicy, FallbackStrategy, GeminiGenerator,
    KnowledgeBase, Locale, Phase, Verdict,
};
use mockito::Matcher;
use proptest::prelude::*;

fn offline_engine() -> AdviceEngine {
    AdviceEngine::new(Arc::new(KnowledgeBase::builtin()))
}

fn request(task: &str, phase: &str) -> AdviceRequest {
    AdviceRequest::new(task, phase, "en").unwrap()
}

fn gemini_body(text: &str) -> String {
    serde_json::json!({
        "candidates": [{"content": {"role": "model", "parts": [{"text": text}]}}]
    })
    .to_string()
}

#[tokio::test]
async fn test_ovulation_presentation_is_good_offline() {
    let advice = offline_engine()
        .advise(&request("schedule an important client presentation", "ovulation"))
        .await;
    assert_eq!(advice.verdict, Verdict::Good);
    assert_eq!(advice.source, AdviceSource::Fallback);
    assert!(!advice.reason.is_empty());
    assert!((0.0..=1.0).contains(&advice.confidence));
}

#[tokio::test]
async fn test_menstruation_analysis_is_avoid_offline() {
    let advice = offline_engine()
        .advise(&request("complex data analysis work", "menstruation"))
        .await;
    assert_eq!(advice.verdict, Verdict::Avoid);
}

#[tokio::test]
async fn test_luteal_new_project_is_avoid_offline() {
    let advice = offline_engine()
        .advise(&request("kick off a new project", "luteal"))
        .await;
    assert_eq!(advice.verdict, Verdict::Avoid);
}

#[tokio::test]
async fn test_unrecognized_phase_is_neutral() {
    let advice = offline_engine()
        .advise(&request("schedule an important client presentation", "phase7"))
        .await;
    assert_eq!(advice.verdict, Verdict::Ok);
    assert_eq!(advice.reason, "insufficient data");
    assert_eq!(advice.suggestion, "go by how you feel");
    assert_eq!(advice.source, AdviceSource::Fallback);

    // the unknown profile's own tips must not leak into the answer
    let advice = offline_engine().advise(&request("how do I feel today", "phase7")).await;
    assert_eq!(advice.reason, "insufficient data");
    assert_eq!(advice.suggestion, "go by how you feel");
}

#[tokio::test]
async fn test_keywords_do_not_match_inside_other_words() {
    let engine = offline_engine();
    let advice = engine
        .advise(&request("prepare an interesting presentation", "menstruation"))
        .await;
    assert_eq!(advice.verdict, Verdict::Avoid);
    let advice = engine
        .advise(&request("restructure the complex analysis", "menstruation"))
        .await;
    assert_eq!(advice.verdict, Verdict::Avoid);
}

#[tokio::test]
async fn test_every_phase_answers_without_generator() {
    let engine = offline_engine();
    for phase in Phase::ALL {
        let advice = engine.advise(&request("write a report", phase.as_str())).await;
        assert_eq!(advice.source, AdviceSource::Fallback, "phase {phase}");
        assert!(!advice.suggestion.is_empty(), "phase {phase}");
    }
}

#[tokio::test]
async fn test_static_table_strategy_ignores_task() {
    let engine = offline_engine().with_fallback(FallbackPolicy::new(FallbackStrategy::StaticTable));
    let a = engine.advise(&request("rest and reflect", "menstruation")).await;
    let b = engine.advise(&request("give a keynote", "menstruation")).await;
    assert_eq!(a, b);
    assert_eq!(a.verdict, Verdict::Avoid);
}

#[tokio::test]
async fn test_russian_locale_fallback() {
    let req = AdviceRequest::new("Подготовить важные презентации", "menstruation", "ru").unwrap();
    assert_eq!(req.locale(), Locale::Ru);
    let advice = offline_engine().advise(&req).await;
    assert_eq!(advice.verdict, Verdict::Avoid);
    assert!(advice.suggestion.starts_with("Учитывая фазу menstruation"));
}

#[tokio::test]
async fn test_gemini_answer_flows_through() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", Matcher::Regex(r"^/models/gemini-1\.5-flash:generateContent".into()))
        .match_query(Matcher::UrlEncoded("key".into(), "e2e-key".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(gemini_body(
            "Sure!\n```json\n{\"verdict\":\"good\",\"reason\":\"peak verbal skills\",\"suggestion\":\"book it mid-cycle\",\"confidence\":0.85}\n```",
        ))
        .create_async()
        .await;

    let gemini = GeminiGenerator::new("e2e-key", "gemini-1.5-flash").with_base_url(server.url());
    let engine = offline_engine().with_generator(Arc::new(gemini));

    let advice = engine
        .advise(&request("schedule an important client presentation", "ovulation"))
        .await;
    assert_eq!(advice.source, AdviceSource::Generated);
    assert_eq!(advice.verdict, Verdict::Good);
    assert_eq!(advice.reason, "peak verbal skills");
    assert_eq!(advice.suggestion, "book it mid-cycle");
    assert_eq!(advice.confidence, 0.85);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_gemini_server_error_falls_back() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", Matcher::Any)
        .with_status(503)
        .with_body("overloaded")
        .create_async()
        .await;

    let gemini = GeminiGenerator::new("e2e-key", "gemini-1.5-flash").with_base_url(server.url());
    let engine = offline_engine().with_generator(Arc::new(gemini));

    let advice = engine
        .advise(&request("complex data analysis work", "menstruation"))
        .await;
    assert_eq!(advice.source, AdviceSource::Fallback);
    assert_eq!(advice.verdict, Verdict::Avoid);
}

#[tokio::test]
async fn test_gemini_prose_answer_falls_back() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(gemini_body("I would say go for it."))
        .create_async()
        .await;

    let gemini = GeminiGenerator::new("e2e-key", "gemini-1.5-flash").with_base_url(server.url());
    let engine = offline_engine()
        .with_generator(Arc::new(gemini))
        .with_timeout(Duration::from_secs(5));

    let advice = engine.advise(&request("kick off a new project", "luteal")).await;
    assert_eq!(advice.source, AdviceSource::Fallback);
    assert_eq!(advice.verdict, Verdict::Avoid);
}

#[test]
fn test_knowledge_file_replaces_builtin() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("knowledge.toml");
    let profile = |name: &str, avoid: &str| {
        format!(
            "[{name}]\ndays = \"x\"\ndescription = \"{name}\"\n\n[{name}.task_recommendations]\navoid = [\"{avoid}\"]\n\n"
        )
    };
    let content = [
        profile("menstruation", "gardening"),
        profile("follicular", "gardening"),
        profile("ovulation", "gardening"),
        profile("luteal", "gardening"),
    ]
    .concat();
    std::fs::write(&path, content).unwrap();

    let kb = KnowledgeBase::load(&path).unwrap();
    assert_eq!(kb.profile(Phase::Ovulation).description, "ovulation");
    // unknown table omitted: built-in guidance is used
    assert!(!kb.unknown().productivity_tips.is_empty());

    let rt = tokio::runtime::Runtime::new().unwrap();
    let advice = rt.block_on(
        AdviceEngine::new(Arc::new(kb)).advise(&request("weekend gardening", "ovulation")),
    );
    assert_eq!(advice.verdict, Verdict::Avoid);
}

#[test]
fn test_knowledge_file_missing_phase_fails() {
    let err = KnowledgeBase::from_toml_str("[ovulation]\ndays = \"11-15\"\n");
    assert!(err.is_err());
}

#[test]
fn test_blank_task_is_rejected() {
    assert!(AdviceRequest::new("", "luteal", "en").is_err());
    assert!(AdviceRequest::new(" \t\n", "luteal", "en").is_err());
}

proptest! {
    #[test]
    fn advise_is_total(task in "[a-zA-Zа-я ]{1,40}", phase in "[a-z0-9]{0,12}", locale in "[a-z]{0,3}") {
        prop_assume!(!task.trim().is_empty());
        let req = AdviceRequest::new(task, &phase, &locale).unwrap();
        let rt = tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap();
        let advice = rt.block_on(offline_engine().advise(&req));
        prop_assert!(Verdict::ALL.contains(&advice.verdict));
        prop_assert!((0.0..=1.0).contains(&advice.confidence));
        prop_assert_eq!(advice.source, AdviceSource::Fallback);
    }
}
