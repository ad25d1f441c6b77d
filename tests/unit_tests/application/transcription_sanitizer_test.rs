use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use serde_json::{Map, Value, json};

use clearance_gateway::application::ports::{ProviderAdapter, ProviderError};
use clearance_gateway::application::services::{
    FallbackOrchestrator, GatewayError, TranscriptionSanitizer, build_correction_prompt,
    summarize_knowledge,
};
use clearance_gateway::domain::{
    KnowledgeEntry, KnowledgeSnapshot, TranscriptionRequest, enforce_pipework_sizes,
    nearest_pipe_size,
};
use clearance_gateway::infrastructure::llm::MockProviderAdapter;

const PREFERRED: &str = "November 2025";

fn request(transcript: &str) -> TranscriptionRequest {
    let mut context = Map::new();
    context.insert("location".to_string(), Value::from("loft"));
    TranscriptionRequest {
        transcript: transcript.to_string(),
        context,
        knowledge_categories: vec!["pricebook".to_string()],
    }
}

fn sanitizer(providers: Vec<Arc<MockProviderAdapter>>) -> TranscriptionSanitizer {
    let mut chain: Vec<Arc<dyn ProviderAdapter>> = providers
        .into_iter()
        .map(|p| p as Arc<dyn ProviderAdapter>)
        .collect();
    let primary = if chain.is_empty() {
        None
    } else {
        Some(chain.remove(0))
    };
    let orchestrator = FallbackOrchestrator::new(primary, chain, Duration::from_secs(5));
    TranscriptionSanitizer::new(Arc::new(orchestrator), PREFERRED)
}

fn snapshot(version: Option<&str>) -> KnowledgeSnapshot {
    let mut snapshot = KnowledgeSnapshot::new();
    snapshot.insert(
        "pricebook".to_string(),
        KnowledgeEntry::new(
            "pricebook",
            "Boiler swap: 1450 GBP",
            version.map(str::to_string),
            NaiveDate::from_ymd_opt(2025, 11, 1),
        ),
    );
    snapshot
}

#[test]
fn given_off_list_sizes_when_snapping_then_nearest_allowed_size_is_used() {
    assert_eq!(nearest_pipe_size(12.0), 10);
    assert_eq!(nearest_pipe_size(32.0), 35);
    assert_eq!(nearest_pipe_size(22.0), 22);
    assert_eq!(nearest_pipe_size(60.0), 35);
}

#[test]
fn given_equidistant_size_when_snapping_then_smaller_size_wins() {
    assert_eq!(nearest_pipe_size(9.0), 8);
    assert_eq!(nearest_pipe_size(25.0), 22);
}

#[test]
fn given_millimetre_tokens_when_enforcing_then_every_token_is_snapped() {
    let text = enforce_pipework_sizes("Run 12mm and 32 mm pipe, then 9.5MM tail to the 15mm tee");
    assert_eq!(text, "Run 10mm and 35mm pipe, then 10mm tail to the 15mm tee");
}

#[test]
fn given_text_without_millimetre_tokens_when_enforcing_then_text_is_unchanged() {
    let text = "Fit a 24kW combi and 3 radiators";
    assert_eq!(enforce_pipework_sizes(text), text);
}

#[test]
fn given_mismatched_version_when_summarizing_then_latest_check_note_is_added() {
    let summary = summarize_knowledge(&snapshot(Some("August 2025")), PREFERRED);

    assert!(summary.contains("Category: pricebook"));
    assert!(summary.contains("Version: August 2025 (not November 2025, check for latest)"));
    assert!(summary.contains("Boiler swap: 1450 GBP"));
}

#[test]
fn given_matching_version_when_summarizing_then_no_note_is_added() {
    let summary = summarize_knowledge(&snapshot(Some("November 2025")), PREFERRED);

    assert!(summary.contains("Version: November 2025"));
    assert!(!summary.contains("check for latest"));
}

#[test]
fn given_request_when_building_prompt_then_all_sections_are_present() {
    let prompt = build_correction_prompt(
        &request("price look says ten mil"),
        &KnowledgeSnapshot::new(),
        PREFERRED,
    );

    assert!(prompt.contains("RAW TRANSCRIPTION:\nprice look says ten mil"));
    assert!(prompt.contains("\"location\": \"loft\""));
    assert!(prompt.contains("REFERENCE KNOWLEDGE (latest-first):\nNone available"));
    assert!(prompt.contains("8mm, 10mm, 15mm, 22mm, 28mm, 35mm"));
    assert!(prompt.contains("sanitizedTranscript"));
}

#[tokio::test]
async fn given_provider_leaves_bad_size_when_sanitizing_then_post_pass_fixes_it() {
    let provider = Arc::new(MockProviderAdapter::new("openai").with_completion_reply(
        r#"```json
{"sanitizedTranscript": "Replace 12mm feed", "corrections": [], "notes": "checked"}
```"#,
    ));

    let result = sanitizer(vec![provider.clone()])
        .sanitize(&request("replace twelve mil feed"), snapshot(Some(PREFERRED)))
        .await
        .unwrap();

    assert_eq!(result.text, "Replace 10mm feed");
    assert_eq!(result.notes, "checked");
    assert!(result.corrections.is_empty());
    assert!(result.knowledge_used.contains_key("pricebook"));
    assert!(provider.last_prompt().unwrap().contains("Boiler swap: 1450 GBP"));
}

#[tokio::test]
async fn given_reply_without_transcript_when_sanitizing_then_raw_transcript_is_used() {
    let provider = Arc::new(
        MockProviderAdapter::new("openai").with_completion_reply(r#"{"notes": "nothing to fix"}"#),
    );

    let result = sanitizer(vec![provider])
        .sanitize(&request("add 9mm flexi"), KnowledgeSnapshot::new())
        .await
        .unwrap();

    assert_eq!(result.text, "add 8mm flexi");
    assert_eq!(result.notes, "nothing to fix");
}

#[tokio::test]
async fn given_blank_transcript_in_reply_when_sanitizing_then_raw_transcript_is_used() {
    let provider = Arc::new(MockProviderAdapter::new("openai").with_completion_reply(
        r#"{"sanitizedTranscript": "  ", "corrections": [], "notes": "unclear audio"}"#,
    ));

    let result = sanitizer(vec![provider])
        .sanitize(&request("run 12mm pipe to the loft"), KnowledgeSnapshot::new())
        .await
        .unwrap();

    assert_eq!(result.text, "run 10mm pipe to the loft");
    assert_eq!(result.notes, "unclear audio");
}

#[tokio::test]
async fn given_primary_fails_when_sanitizing_then_secondary_reply_is_used() {
    let primary = Arc::new(
        MockProviderAdapter::new("openai")
            .with_completion_error(ProviderError::Unavailable("503".to_string())),
    );
    let secondary = Arc::new(MockProviderAdapter::new("claude").with_completion_reply(
        r#"{"sanitizedTranscript": "22mm flow", "corrections": [{"issue": "twenty two mil", "fix": "22mm"}]}"#,
    ));

    let result = sanitizer(vec![primary, secondary.clone()])
        .sanitize(&request("twenty two mil flow"), KnowledgeSnapshot::new())
        .await
        .unwrap();

    assert_eq!(result.text, "22mm flow");
    assert_eq!(result.corrections.len(), 1);
    assert_eq!(secondary.completion_calls(), 1);
}

#[tokio::test]
async fn given_no_providers_when_sanitizing_then_returns_configuration_error() {
    let error = sanitizer(Vec::new())
        .sanitize(&request("anything"), KnowledgeSnapshot::new())
        .await
        .unwrap_err();

    assert!(matches!(error, GatewayError::Configuration(_)));
}

#[tokio::test]
async fn given_context_object_when_sanitizing_then_it_reaches_the_prompt_verbatim() {
    let provider = Arc::new(MockProviderAdapter::new("openai").with_completion_reply("{}"));
    let mut request = request("boiler in loft");
    request.context = json!({"appliance": "combi", "floors": 2})
        .as_object()
        .cloned()
        .unwrap();

    sanitizer(vec![provider.clone()])
        .sanitize(&request, KnowledgeSnapshot::new())
        .await
        .unwrap();

    let prompt = provider.last_prompt().unwrap();
    assert!(prompt.contains("\"appliance\": \"combi\""));
    assert!(prompt.contains("\"floors\": 2"));
}
