mod detection_normalizer;
mod detection_service;
mod fallback_orchestrator;
mod gateway_error;
mod gateway_service;
mod knowledge_retriever;
mod reply_parser;
mod request_router;
mod transcription_sanitizer;

pub use detection_normalizer::{DetectionNormalizer, NormalizedDetections, REFERENCE_SCALE};
pub use detection_service::DetectionService;
pub use fallback_orchestrator::{Accepted, FallbackOrchestrator, ProviderTask};
pub use gateway_error::{GatewayError, ProviderFailure};
pub use gateway_service::{GatewayOutcome, GatewayService};
pub use knowledge_retriever::{KnowledgeRetriever, select_entry};
pub use reply_parser::{
    CompletionReply, DetectionReply, ParsedBrick, ParsedCalibration, ParsedDetection,
    ReplyParseError, parse_completion_reply, parse_detection_reply, unwrap_fences,
};
pub use request_router::{
    InboundRequest, MISSING_DETECTION_FIELDS, RequestRoute, RouteLimits, classify,
};
pub use transcription_sanitizer::{
    TranscriptionSanitizer, build_correction_prompt, sanity_rules, summarize_knowledge,
};
