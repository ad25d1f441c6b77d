use clearance_gateway::infrastructure::observability::sanitize_prompt;

#[test]
fn given_empty_prompt_when_sanitizing_then_returns_empty_marker() {
    assert_eq!(sanitize_prompt(""), "[EMPTY]");
    assert_eq!(sanitize_prompt("   "), "[EMPTY]");
}

#[test]
fn given_short_transcript_when_sanitizing_then_returns_unchanged() {
    let transcript = "Boiler in the loft, 15mm feed";
    assert_eq!(sanitize_prompt(transcript), transcript);
}

#[test]
fn given_long_transcript_when_sanitizing_then_truncates_with_length() {
    let transcript = "a".repeat(150);
    let result = sanitize_prompt(&transcript);
    assert!(result.contains("... (150 chars total)"));
    assert!(result.starts_with(&"a".repeat(100)));
}

#[test]
fn given_multibyte_transcript_when_truncating_then_does_not_split_characters() {
    let transcript = "é".repeat(120);
    let result = sanitize_prompt(&transcript);
    assert!(result.starts_with(&"é".repeat(100)));
    assert!(result.contains("(120 chars total)"));
}

#[test]
fn given_bearer_token_when_sanitizing_then_redacts_token() {
    let result = sanitize_prompt("Authorization: Bearer sk-abc123xyz");
    assert!(result.contains("Bearer [REDACTED]"));
    assert!(!result.contains("sk-abc123xyz"));
}

#[test]
fn given_repeated_secrets_when_sanitizing_then_every_occurrence_is_redacted() {
    let result = sanitize_prompt("api_key=first then api_key=second");
    assert!(!result.contains("first"));
    assert!(!result.contains("second"));
    assert_eq!(result.matches("api_key=[REDACTED]").count(), 2);
}

#[test]
fn given_password_when_sanitizing_then_redacts_password() {
    let result = sanitize_prompt("the wifi password=hunter2 is on the router");
    assert!(result.contains("password=[REDACTED]"));
    assert!(!result.contains("hunter2"));
    assert!(result.ends_with("is on the router"));
}
