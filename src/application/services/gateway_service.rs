use crate::domain::{DetectionResult, SanitizedTranscript};

use super::detection_service::DetectionService;
use super::gateway_error::GatewayError;
use super::knowledge_retriever::KnowledgeRetriever;
use super::request_router::{InboundRequest, RequestRoute, RouteLimits, classify};
use super::transcription_sanitizer::TranscriptionSanitizer;

#[derive(Debug, Clone, PartialEq)]
pub enum GatewayOutcome {
    Detection(DetectionResult),
    Transcription(SanitizedTranscript),
}

/// Single entry point behind the HTTP handler: classifies a request and runs
/// the detection or transcription path.
pub struct GatewayService {
    detection: DetectionService,
    knowledge: KnowledgeRetriever,
    sanitizer: TranscriptionSanitizer,
    limits: RouteLimits,
    default_knowledge_categories: Vec<String>,
}

impl GatewayService {
    pub fn new(
        detection: DetectionService,
        knowledge: KnowledgeRetriever,
        sanitizer: TranscriptionSanitizer,
        limits: RouteLimits,
        default_knowledge_categories: Vec<String>,
    ) -> Self {
        Self {
            detection,
            knowledge,
            sanitizer,
            limits,
            default_knowledge_categories,
        }
    }

    pub async fn handle(&self, request: InboundRequest) -> Result<GatewayOutcome, GatewayError> {
        match classify(request, self.limits, &self.default_knowledge_categories) {
            RequestRoute::Invalid(reason) => {
                tracing::warn!(reason = %reason, "Rejected invalid gateway request");
                Err(GatewayError::Validation(reason))
            }
            RequestRoute::Detection(request) => self
                .detection
                .detect(&request)
                .await
                .map(GatewayOutcome::Detection),
            RequestRoute::Transcription(request) => {
                self.sanitizer.ensure_configured()?;
                let knowledge = self.knowledge.retrieve(&request.knowledge_categories).await;
                self.sanitizer
                    .sanitize(&request, knowledge)
                    .await
                    .map(GatewayOutcome::Transcription)
            }
        }
    }
}
