use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{ProviderAdapter, ProviderError};
use crate::domain::{
    ALLOWED_PIPE_SIZES_MM, KnowledgeSnapshot, SanitizedTranscript, TranscriptionRequest,
    enforce_pipework_sizes,
};

use super::fallback_orchestrator::{FallbackOrchestrator, ProviderTask};
use super::gateway_error::GatewayError;
use super::reply_parser::{CompletionReply, parse_completion_reply};

const REPLY_SHAPE: &str = r#"{
  "sanitizedTranscript": "corrected text",
  "corrections": [
    { "issue": "what was wrong", "fix": "how it was corrected" }
  ],
  "notes": "any additional notes about confidence or assumptions"
}"#;

struct CompletionTask<'a> {
    prompt: &'a str,
}

#[async_trait]
impl<'a> ProviderTask for CompletionTask<'a> {
    type Output = CompletionReply;

    fn kind(&self) -> &'static str {
        "completion"
    }

    async fn attempt(
        &self,
        provider: &dyn ProviderAdapter,
    ) -> Result<CompletionReply, ProviderError> {
        let reply = provider.invoke_completion(self.prompt).await?;
        Ok(parse_completion_reply(reply.as_str())?)
    }
}

/// Summary of the retrieved knowledge, one block per category. Versions that
/// do not carry the preferred marker are flagged for the model.
pub fn summarize_knowledge(knowledge: &KnowledgeSnapshot, preferred_version: &str) -> String {
    knowledge
        .iter()
        .map(|(category, entry)| {
            let version_note = match &entry.version {
                Some(version) if entry.matches_version_marker(preferred_version) => {
                    format!("Version: {version}")
                }
                Some(version) => {
                    format!("Version: {version} (not {preferred_version}, check for latest)")
                }
                None => "Version unknown".to_string(),
            };
            format!("Category: {category}\n{version_note}\n{}", entry.content)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn sanity_rules(preferred_version: &str) -> String {
    let sizes = ALLOWED_PIPE_SIZES_MM
        .iter()
        .map(|size| format!("{size}mm"))
        .collect::<Vec<_>>()
        .join(", ");

    [
        format!("- Pipework sizes must be one of: {sizes}."),
        "- If a size is ambiguous (e.g., 9mm), round to the nearest valid size and note the \
         correction."
            .to_string(),
        "- Use provided job context (location, appliance type, materials) to resolve unclear words."
            .to_string(),
        format!(
            "- If pricebook details are mentioned, prefer the latest available version \
             (aim for {preferred_version})."
        ),
        "- Correct obvious ASR mistakes (\"price look\" -> \"pricebook\", \"ten mil\" -> \"10mm\", \
         etc.)."
            .to_string(),
    ]
    .join("\n")
}

pub fn build_correction_prompt(
    request: &TranscriptionRequest,
    knowledge: &KnowledgeSnapshot,
    preferred_version: &str,
) -> String {
    let context = serde_json::to_string_pretty(&request.context).unwrap_or_else(|_| "{}".into());
    let summary = summarize_knowledge(knowledge, preferred_version);
    let summary = if summary.is_empty() {
        "None available".to_string()
    } else {
        summary
    };

    format!(
        "You are a heating industry transcription QA assistant. Clean up the provided raw \
         transcription, applying domain sanity checks and contextual corrections.\n\n\
         RAW TRANSCRIPTION:\n{transcript}\n\n\
         CONTEXT:\n{context}\n\n\
         REFERENCE KNOWLEDGE (latest-first):\n{summary}\n\n\
         SANITY RULES:\n{rules}\n\n\
         Return ONLY JSON with this shape:\n{REPLY_SHAPE}",
        transcript = request.transcript,
        rules = sanity_rules(preferred_version),
    )
}

pub struct TranscriptionSanitizer {
    orchestrator: Arc<FallbackOrchestrator>,
    preferred_version: String,
}

impl TranscriptionSanitizer {
    pub fn new(
        orchestrator: Arc<FallbackOrchestrator>,
        preferred_version: impl Into<String>,
    ) -> Self {
        Self {
            orchestrator,
            preferred_version: preferred_version.into(),
        }
    }

    /// Transcription needs at least one configured provider.
    pub fn ensure_configured(&self) -> Result<(), GatewayError> {
        if self.orchestrator.has_any() {
            Ok(())
        } else {
            Err(GatewayError::Configuration(
                "AI API key not configured".to_string(),
            ))
        }
    }

    #[tracing::instrument(skip_all, fields(knowledge_categories = knowledge.len()))]
    pub async fn sanitize(
        &self,
        request: &TranscriptionRequest,
        knowledge: KnowledgeSnapshot,
    ) -> Result<SanitizedTranscript, GatewayError> {
        self.ensure_configured()?;

        let prompt = build_correction_prompt(request, &knowledge, &self.preferred_version);
        let accepted = self.orchestrator.run(&CompletionTask { prompt: &prompt }).await?;
        let reply = accepted.value;

        // A blank transcript from the provider counts as no transcript. The
        // size pass runs even when the provider already corrected the sizes.
        let text = enforce_pipework_sizes(
            reply
                .sanitized_transcript
                .as_deref()
                .filter(|t| !t.trim().is_empty())
                .unwrap_or(&request.transcript),
        );

        tracing::info!(
            provider = accepted.provider,
            corrections = reply.corrections.len(),
            "Transcript sanitized"
        );

        Ok(SanitizedTranscript {
            text,
            corrections: reply.corrections,
            notes: reply.notes,
            knowledge_used: knowledge,
        })
    }
}
