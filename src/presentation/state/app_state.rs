use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::KnowledgeStore;
use crate::application::services::{
    DetectionService, FallbackOrchestrator, GatewayService, KnowledgeRetriever, RouteLimits,
    TranscriptionSanitizer,
};
use crate::infrastructure::llm::ProviderAdapterFactory;
use crate::presentation::config::Settings;

/// Everything a handler needs, assembled once at startup.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<GatewayService>,
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Builds the provider chain from `settings`. Providers without a key are
    /// skipped; `knowledge_store` is optional.
    pub fn from_settings(
        settings: Settings,
        knowledge_store: Option<Arc<dyn KnowledgeStore>>,
    ) -> Self {
        let orchestrator = ProviderAdapterFactory::orchestrator(&settings.providers);
        Self::with_orchestrator(settings, orchestrator, knowledge_store)
    }

    pub fn with_orchestrator(
        settings: Settings,
        orchestrator: FallbackOrchestrator,
        knowledge_store: Option<Arc<dyn KnowledgeStore>>,
    ) -> Self {
        let orchestrator = Arc::new(orchestrator);
        let knowledge = &settings.knowledge;

        let gateway = GatewayService::new(
            DetectionService::new(Arc::clone(&orchestrator)),
            KnowledgeRetriever::new(
                knowledge_store,
                knowledge.preferred_version.clone(),
                Duration::from_secs(knowledge.timeout_secs),
            ),
            TranscriptionSanitizer::new(orchestrator, knowledge.preferred_version.clone()),
            RouteLimits {
                max_image_bytes: settings.limits.max_image_bytes,
            },
            knowledge.default_categories.clone(),
        );

        Self {
            gateway: Arc::new(gateway),
            settings: Arc::new(settings),
        }
    }
}
