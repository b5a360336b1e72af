use httpmock::prelude::*;
use peersight::llm::{LlmConfig, LlmService};
use peersight::report::{ReportFormat, ReportGenerator};
use peersight::{Review, ReviewError, ReviewPipeline};
use serde_json::json;
use tempfile::TempDir;

const MODEL_OUTPUT: &str = "<think>
Okay, the paper proposes a benchmark. I should be fair but critical.
</think>

Sure, here is the structured review:

## Summary
The paper introduces a benchmark for long-context retrieval and evaluates six models.

## Strengths
- Careful dataset construction
- Open-source release

## Weaknesses / Areas for Improvement
- No human baseline
- Limited analysis of failure modes

## Recommendation
Minor Revision";

fn service_for(server: &MockServer) -> LlmService {
    LlmService::new(LlmConfig {
        api_url: server.url("/api/generate"),
        model: "qwen3:8b".to_string(),
        temperature: Some(0.2),
        ..Default::default()
    })
    .unwrap()
}

#[tokio::test]
async fn test_end_to_end_review_to_json_file() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/generate")
            .json_body_partial(r#"{"model": "qwen3:8b", "stream": false, "options": {"temperature": 0.2}}"#)
            .body_contains("--- START PAPER ---")
            .body_contains("Long-context retrieval is hard.");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({"model": "qwen3:8b", "response": MODEL_OUTPUT, "done": true}));
    });

    let service = service_for(&server);
    let pipeline = ReviewPipeline::new(&service, 15_000);
    let review = pipeline.run("Long-context retrieval is hard.").await.unwrap();
    api_mock.assert();

    assert_eq!(
        review.summary,
        "The paper introduces a benchmark for long-context retrieval and evaluates six models."
    );
    assert_eq!(review.strengths, "- Careful dataset construction\n- Open-source release");
    assert_eq!(review.weaknesses, "- No human baseline\n- Limited analysis of failure modes");
    assert_eq!(review.recommendation, "Minor Revision");

    let temp_dir = TempDir::new().unwrap();
    let json_path = temp_dir.path().join("reviews").join("paper.json");
    ReportFormat::Json.generator().save_report(&review, &json_path).unwrap();
    let saved: Review = serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(saved, review);

    let text_path = temp_dir.path().join("paper.md");
    ReportFormat::Text.generator().save_report(&review, &text_path).unwrap();
    let text = std::fs::read_to_string(&text_path).unwrap();
    assert!(text.starts_with("## Summary\n"));
    assert!(!text.contains("think"));
    assert!(!text.contains("Sure, here is"));
}

#[tokio::test]
async fn test_server_error_fails_review() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/generate");
        then.status(500).body("model runner crashed");
    });

    let service = service_for(&server);
    let err = ReviewPipeline::new(&service, 15_000).run("Paper").await.unwrap_err();

    assert!(matches!(err, ReviewError::Llm(_)));
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn test_partial_review_keeps_empty_fields() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/generate");
        then.status(200)
            .json_body(json!({"response": "## Summary\nOnly a summary.\n\n## Recommendation\nReject"}));
    });

    let service = service_for(&server);
    let review = ReviewPipeline::new(&service, 15_000).run("Paper").await.unwrap();

    assert_eq!(review.summary, "Only a summary.");
    assert_eq!(review.strengths, "");
    assert_eq!(review.weaknesses, "");
    assert_eq!(review.recommendation, "Reject");

    let json: serde_json::Value =
        serde_json::from_str(&ReportFormat::Json.generator().render(&review).unwrap()).unwrap();
    assert_eq!(json["strengths"], "");
}
