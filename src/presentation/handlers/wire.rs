use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::application::services::InboundRequest;
use crate::domain::{
    BrickCalibration, CalibrationObject, CalibrationReference, Correction, DetectionResult,
    KnowledgeEntry, ObjectDetection, PixelBounds, SanitizedTranscript,
};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayRequest {
    pub image: Option<String>,
    pub equipment_type: Option<String>,
    pub detect_objects: Option<Vec<String>>,
    pub user_message: Option<String>,
    pub transcription: Option<String>,
    pub transcription_context: Option<Map<String, Value>>,
    pub knowledge_categories: Option<Vec<String>>,
}

impl From<GatewayRequest> for InboundRequest {
    fn from(request: GatewayRequest) -> Self {
        InboundRequest {
            image: request.image,
            equipment_type: request.equipment_type,
            detect_objects: request.detect_objects,
            user_message: request.user_message,
            transcription: request.transcription,
            transcription_context: request.transcription_context,
            knowledge_categories: request.knowledge_categories,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FailureResponse {
    pub success: bool,
    pub error: String,
    pub objects: Vec<Value>,
}

impl FailureResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            objects: Vec::new(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BoundsBody {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl From<PixelBounds> for BoundsBody {
    fn from(bounds: PixelBounds) -> Self {
        Self {
            x: bounds.x,
            y: bounds.y,
            width: bounds.width,
            height: bounds.height,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ObjectBody {
    #[serde(rename = "type")]
    pub category: String,
    pub label: String,
    pub bounds: BoundsBody,
    pub confidence: f64,
    pub enabled: bool,
}

impl From<ObjectDetection> for ObjectBody {
    fn from(object: ObjectDetection) -> Self {
        Self {
            category: object.category,
            label: object.label,
            bounds: object.bounds.into(),
            confidence: object.confidence,
            enabled: object.enabled,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreditCardBody {
    pub confidence: f64,
    pub bounds: BoundsBody,
}

impl From<CalibrationObject> for CreditCardBody {
    fn from(card: CalibrationObject) -> Self {
        Self {
            confidence: card.confidence,
            bounds: card.bounds.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BrickBody {
    pub confidence: f64,
    pub orientation: &'static str,
    pub bounds: BoundsBody,
}

impl From<BrickCalibration> for BrickBody {
    fn from(brick: BrickCalibration) -> Self {
        Self {
            confidence: brick.confidence,
            orientation: brick.orientation.as_str(),
            bounds: brick.bounds.into(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalibrationBody {
    pub credit_card_detected: bool,
    pub credit_card_bounds: Option<CreditCardBody>,
    pub brick_detected: bool,
    pub brick_bounds: Option<BrickBody>,
    #[serde(rename = "pixelsPerMM")]
    pub pixels_per_mm: Option<f64>,
}

impl From<CalibrationReference> for CalibrationBody {
    fn from(calibration: CalibrationReference) -> Self {
        Self {
            credit_card_detected: calibration.credit_card.is_some(),
            credit_card_bounds: calibration.credit_card.map(Into::into),
            brick_detected: calibration.brick.is_some(),
            brick_bounds: calibration.brick.map(Into::into),
            pixels_per_mm: None,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionResponse {
    pub success: bool,
    pub objects: Vec<ObjectBody>,
    pub calibration: CalibrationBody,
    pub ai_service_used: String,
}

impl From<DetectionResult> for DetectionResponse {
    fn from(result: DetectionResult) -> Self {
        Self {
            success: true,
            objects: result.objects.into_iter().map(Into::into).collect(),
            calibration: result.calibration.into(),
            ai_service_used: result.provider,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CorrectionBody {
    pub issue: String,
    pub fix: String,
}

impl From<Correction> for CorrectionBody {
    fn from(correction: Correction) -> Self {
        Self {
            issue: correction.issue,
            fix: correction.fix,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeBody {
    pub content: String,
    pub version: String,
    pub effective_date: Option<String>,
}

impl From<KnowledgeEntry> for KnowledgeBody {
    fn from(entry: KnowledgeEntry) -> Self {
        Self {
            version: entry.version_label().to_string(),
            effective_date: entry
                .effective_date
                .map(|date| date.format("%Y-%m-%d").to_string()),
            content: entry.content,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptionResponse {
    pub success: bool,
    pub mode: &'static str,
    pub sanitized_transcript: String,
    pub corrections: Vec<CorrectionBody>,
    pub notes: String,
    pub knowledge_used: BTreeMap<String, KnowledgeBody>,
}

impl From<SanitizedTranscript> for TranscriptionResponse {
    fn from(transcript: SanitizedTranscript) -> Self {
        Self {
            success: true,
            mode: "transcription",
            sanitized_transcript: transcript.text,
            corrections: transcript.corrections.into_iter().map(Into::into).collect(),
            notes: transcript.notes,
            knowledge_used: transcript
                .knowledge_used
                .into_iter()
                .map(|(category, entry)| (category, entry.into()))
                .collect(),
        }
    }
}
