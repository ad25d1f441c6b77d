use clearance_gateway::application::ports::ProviderError;
use clearance_gateway::application::services::{
    ReplyParseError, parse_completion_reply, parse_detection_reply, unwrap_fences,
};
use clearance_gateway::domain::BrickOrientation;

const DETECTION_JSON: &str = r#"{
  "objects": [
    {"type": "boiler", "confidence": 0.92, "bounds": {"x": 10, "y": 20, "width": 30, "height": 40}}
  ],
  "creditCard": {"detected": true, "confidence": 0.8, "bounds": {"x": 1, "y": 2, "width": 3, "height": 4}},
  "brick": {"detected": false, "confidence": 0, "bounds": {"x": 0, "y": 0, "width": 0, "height": 0}}
}"#;

#[test]
fn given_json_fence_when_unwrapping_then_returns_inner_payload() {
    let reply = "```json\n{\"objects\": []}\n```";
    assert_eq!(unwrap_fences(reply), "{\"objects\": []}");
}

#[test]
fn given_bare_fence_when_unwrapping_then_returns_inner_payload() {
    let reply = "  ```\n{\"notes\": \"ok\"}\n```  ";
    assert_eq!(unwrap_fences(reply), "{\"notes\": \"ok\"}");
}

#[test]
fn given_unfenced_reply_when_unwrapping_then_returns_trimmed_text() {
    assert_eq!(unwrap_fences("  {\"a\": 1}\n"), "{\"a\": 1}");
}

#[test]
fn given_fenced_detection_reply_when_parsing_then_matches_unfenced_parse() {
    let fenced = format!("```json\n{DETECTION_JSON}\n```");

    let plain = parse_detection_reply(DETECTION_JSON).unwrap();
    let unwrapped = parse_detection_reply(&fenced).unwrap();

    assert_eq!(plain, unwrapped);
}

#[test]
fn given_detection_reply_when_parsing_then_reads_objects_and_calibration() {
    let reply = parse_detection_reply(DETECTION_JSON).unwrap();

    assert_eq!(reply.objects.len(), 1);
    assert_eq!(reply.objects[0].category, "boiler");
    assert_eq!(reply.objects[0].bounds.width, 30.0);

    let card = reply.credit_card.unwrap();
    assert_eq!(card.confidence, 0.8);
    assert!(reply.brick.is_none());
}

#[test]
fn given_reply_without_objects_when_parsing_then_objects_are_empty() {
    let reply = parse_detection_reply(r#"{"creditCard": null, "brick": null}"#).unwrap();

    assert!(reply.objects.is_empty());
    assert!(reply.credit_card.is_none());
}

#[test]
fn given_brick_with_orientation_when_parsing_then_orientation_is_kept() {
    let reply = parse_detection_reply(
        r#"{"objects": [], "brick": {"detected": true, "confidence": 0.7, "orientation": "vertical",
            "bounds": {"x": 1, "y": 1, "width": 2, "height": 6}}}"#,
    )
    .unwrap();

    assert_eq!(
        reply.brick.unwrap().orientation,
        Some(BrickOrientation::Vertical)
    );
}

#[test]
fn given_brick_with_unknown_orientation_when_parsing_then_orientation_is_none() {
    let reply = parse_detection_reply(
        r#"{"objects": [], "brick": {"detected": true, "confidence": 0.7, "orientation": "diagonal",
            "bounds": {"x": 1, "y": 1, "width": 6, "height": 2}}}"#,
    )
    .unwrap();

    assert_eq!(reply.brick.unwrap().orientation, None);
}

#[test]
fn given_non_json_reply_when_parsing_then_returns_schema_violation() {
    let result = parse_detection_reply("I could not see anything useful in this image.");
    assert!(matches!(result, Err(ReplyParseError::SchemaViolation(_))));
}

#[test]
fn given_object_without_bounds_when_parsing_then_returns_schema_violation() {
    let result = parse_detection_reply(r#"{"objects": [{"type": "boiler", "confidence": 0.9}]}"#);
    assert!(matches!(result, Err(ReplyParseError::SchemaViolation(_))));
}

#[test]
fn given_detected_card_without_bounds_when_parsing_then_returns_schema_violation() {
    let reply = r#"{"objects": [], "creditCard": {"detected": true, "confidence": 1}}"#;
    let result = parse_detection_reply(reply);
    assert!(matches!(result, Err(ReplyParseError::SchemaViolation(_))));
}

#[test]
fn given_empty_reply_when_parsing_then_returns_schema_violation() {
    let result = parse_completion_reply("```json\n```");
    assert!(matches!(result, Err(ReplyParseError::SchemaViolation(_))));
}

#[test]
fn given_schema_violation_when_converted_then_becomes_malformed_reply() {
    let error: ProviderError = ReplyParseError::SchemaViolation("bad".to_string()).into();
    assert!(matches!(error, ProviderError::MalformedReply(_)));
}

#[test]
fn given_completion_reply_when_parsing_then_reads_all_fields() {
    let reply = parse_completion_reply(
        r#"{"sanitizedTranscript": "Fit 15mm pipe", "corrections": [{"issue": "fifteen mil", "fix": "15mm"}], "notes": "clear"}"#,
    )
    .unwrap();

    assert_eq!(reply.sanitized_transcript.as_deref(), Some("Fit 15mm pipe"));
    assert_eq!(reply.corrections.len(), 1);
    assert_eq!(reply.corrections[0].fix, "15mm");
    assert_eq!(reply.notes, "clear");
}

#[test]
fn given_sparse_completion_reply_when_parsing_then_defaults_apply() {
    let reply = parse_completion_reply("{}").unwrap();

    assert!(reply.sanitized_transcript.is_none());
    assert!(reply.corrections.is_empty());
    assert_eq!(reply.notes, "");
}
