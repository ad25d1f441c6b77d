use serde_json::{Map, Value};

use crate::domain::{DetectionRequest, ImagePayload, TranscriptionRequest};

pub const MISSING_DETECTION_FIELDS: &str =
    "Missing required fields: image, equipmentType, or detectObjects";

/// Request fields as received, before any validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InboundRequest {
    pub image: Option<String>,
    pub equipment_type: Option<String>,
    pub detect_objects: Option<Vec<String>>,
    pub user_message: Option<String>,
    pub transcription: Option<String>,
    pub transcription_context: Option<Map<String, Value>>,
    pub knowledge_categories: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteLimits {
    pub max_image_bytes: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestRoute {
    Transcription(TranscriptionRequest),
    Detection(DetectionRequest),
    Invalid(String),
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Decides which path a request takes. A transcript wins outright and skips
/// every detection check; otherwise all detection fields must be present.
pub fn classify(
    request: InboundRequest,
    limits: RouteLimits,
    default_categories: &[String],
) -> RequestRoute {
    if let Some(transcript) = non_blank(request.transcription) {
        let knowledge_categories = request
            .knowledge_categories
            .unwrap_or_else(|| default_categories.to_vec());

        return RequestRoute::Transcription(TranscriptionRequest {
            transcript,
            context: request.transcription_context.unwrap_or_default(),
            knowledge_categories,
        });
    }

    let (Some(image), Some(equipment_type), Some(categories)) = (
        non_blank(request.image),
        non_blank(request.equipment_type),
        request.detect_objects,
    ) else {
        return RequestRoute::Invalid(MISSING_DETECTION_FIELDS.to_string());
    };

    let target_categories: Vec<String> = categories
        .into_iter()
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect();

    if target_categories.is_empty() {
        return RequestRoute::Invalid(
            "detectObjects must list at least one object category".to_string(),
        );
    }

    let image = ImagePayload::new(image);
    if image.encoded_len() > limits.max_image_bytes {
        return RequestRoute::Invalid(format!(
            "Image too large. Maximum size is {}MB.",
            limits.max_image_bytes / (1024 * 1024)
        ));
    }

    RequestRoute::Detection(DetectionRequest {
        image,
        equipment_type: equipment_type.trim().to_string(),
        target_categories,
        user_context: non_blank(request.user_message).map(|m| m.trim().to_string()),
    })
}
