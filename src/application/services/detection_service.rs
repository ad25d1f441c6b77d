use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{ProviderAdapter, ProviderError};
use crate::domain::{DetectionRequest, DetectionResult};

use super::detection_normalizer::{DetectionNormalizer, NormalizedDetections};
use super::fallback_orchestrator::{FallbackOrchestrator, ProviderTask};
use super::gateway_error::GatewayError;
use super::reply_parser::parse_detection_reply;

struct DetectionTask<'a> {
    request: &'a DetectionRequest,
    normalizer: &'a DetectionNormalizer,
}

#[async_trait]
impl<'a> ProviderTask for DetectionTask<'a> {
    type Output = NormalizedDetections;

    fn kind(&self) -> &'static str {
        "detection"
    }

    async fn attempt(
        &self,
        provider: &dyn ProviderAdapter,
    ) -> Result<NormalizedDetections, ProviderError> {
        let reply = provider
            .invoke_detection(
                &self.request.image,
                &self.request.equipment_type,
                &self.request.target_categories,
                self.request.user_context.as_deref(),
            )
            .await?;

        let parsed = parse_detection_reply(reply.as_str())?;
        Ok(self.normalizer.normalize(parsed, self.request))
    }

    // Providers are sometimes reachable but overly conservative.
    fn falls_back_on_empty(&self) -> bool {
        true
    }

    fn is_empty(&self, output: &NormalizedDetections) -> bool {
        output.objects.is_empty()
    }
}

pub struct DetectionService {
    orchestrator: Arc<FallbackOrchestrator>,
    normalizer: DetectionNormalizer,
}

impl DetectionService {
    pub fn new(orchestrator: Arc<FallbackOrchestrator>) -> Self {
        Self {
            orchestrator,
            normalizer: DetectionNormalizer::new(),
        }
    }

    #[tracing::instrument(
        skip(self, request),
        fields(
            equipment_type = %request.equipment_type,
            categories = request.target_categories.len()
        )
    )]
    pub async fn detect(
        &self,
        request: &DetectionRequest,
    ) -> Result<DetectionResult, GatewayError> {
        if !self.orchestrator.has_primary() {
            return Err(GatewayError::Configuration(
                "Primary AI provider API key not configured".to_string(),
            ));
        }

        let task = DetectionTask {
            request,
            normalizer: &self.normalizer,
        };
        let accepted = self.orchestrator.run(&task).await?;

        tracing::info!(
            provider = accepted.provider,
            objects = accepted.value.objects.len(),
            credit_card = accepted.value.calibration.credit_card.is_some(),
            brick = accepted.value.calibration.brick.is_some(),
            "Detection completed"
        );

        Ok(DetectionResult {
            objects: accepted.value.objects,
            calibration: accepted.value.calibration,
            provider: accepted.provider.to_string(),
        })
    }
}
