use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::application::ports::ProviderError;
use crate::domain::{BrickOrientation, Correction, PercentBounds};

const FENCE: &str = "```";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReplyParseError {
    #[error("schema violation: {0}")]
    SchemaViolation(String),
}

impl From<ReplyParseError> for ProviderError {
    fn from(err: ReplyParseError) -> Self {
        ProviderError::MalformedReply(err.to_string())
    }
}

/// Strips a surrounding markdown code fence (```` ``` ```` or ```` ```json ````)
/// from a model reply. Text without a leading fence is returned trimmed.
pub fn unwrap_fences(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(after_open) = trimmed.strip_prefix(FENCE) else {
        return trimmed;
    };

    // The info string (e.g. `json`) runs to the end of the opening line.
    let body = match after_open.find('\n') {
        Some(newline) => &after_open[newline + 1..],
        None => after_open.trim_start_matches(|c: char| c.is_ascii_alphanumeric()),
    };

    body.trim_end()
        .strip_suffix(FENCE)
        .unwrap_or(body)
        .trim()
}

/// Parsed detection reply, still in the provider's percentage frame.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionReply {
    pub objects: Vec<ParsedDetection>,
    pub credit_card: Option<ParsedCalibration>,
    pub brick: Option<ParsedBrick>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDetection {
    pub category: String,
    pub confidence: f64,
    pub bounds: PercentBounds,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedCalibration {
    pub confidence: f64,
    pub bounds: PercentBounds,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedBrick {
    pub confidence: f64,
    pub bounds: PercentBounds,
    pub orientation: Option<BrickOrientation>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionReply {
    pub sanitized_transcript: Option<String>,
    pub corrections: Vec<Correction>,
    pub notes: String,
}

#[derive(Deserialize)]
struct WireBounds {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl From<WireBounds> for PercentBounds {
    fn from(b: WireBounds) -> Self {
        PercentBounds::new(b.x, b.y, b.width, b.height)
    }
}

#[derive(Deserialize)]
struct WireDetectionReply {
    #[serde(default)]
    objects: Option<Vec<WireDetection>>,
    #[serde(default, rename = "creditCard")]
    credit_card: Option<WireCalibration>,
    #[serde(default)]
    brick: Option<WireCalibration>,
}

#[derive(Deserialize)]
struct WireDetection {
    #[serde(rename = "type")]
    category: String,
    confidence: f64,
    bounds: WireBounds,
}

#[derive(Deserialize)]
struct WireCalibration {
    #[serde(default)]
    detected: bool,
    confidence: Option<f64>,
    bounds: Option<WireBounds>,
    orientation: Option<String>,
}

#[derive(Deserialize)]
struct WireCompletionReply {
    #[serde(default, rename = "sanitizedTranscript")]
    sanitized_transcript: Option<String>,
    #[serde(default)]
    corrections: Option<Vec<WireCorrection>>,
    #[serde(default)]
    notes: Option<String>,
}

#[derive(Deserialize)]
struct WireCorrection {
    issue: String,
    fix: String,
}

fn parse_structured<T: DeserializeOwned>(reply: &str) -> Result<T, ReplyParseError> {
    let payload = unwrap_fences(reply);
    if payload.is_empty() {
        return Err(ReplyParseError::SchemaViolation(
            "reply contained no payload".to_string(),
        ));
    }
    serde_json::from_str(payload).map_err(|e| ReplyParseError::SchemaViolation(e.to_string()))
}

/// Returns `None` for an absent or `detected: false` calibration object.
fn detected_calibration(
    name: &str,
    calibration: Option<WireCalibration>,
) -> Result<Option<(f64, PercentBounds, Option<String>)>, ReplyParseError> {
    let Some(calibration) = calibration.filter(|c| c.detected) else {
        return Ok(None);
    };

    let bounds = calibration.bounds.ok_or_else(|| {
        ReplyParseError::SchemaViolation(format!("{name} detected without bounds"))
    })?;
    let confidence = calibration.confidence.ok_or_else(|| {
        ReplyParseError::SchemaViolation(format!("{name} detected without confidence"))
    })?;

    Ok(Some((confidence, bounds.into(), calibration.orientation)))
}

pub fn parse_detection_reply(reply: &str) -> Result<DetectionReply, ReplyParseError> {
    let wire: WireDetectionReply = parse_structured(reply)?;

    let objects = wire
        .objects
        .unwrap_or_default()
        .into_iter()
        .map(|d| ParsedDetection {
            category: d.category,
            confidence: d.confidence,
            bounds: d.bounds.into(),
        })
        .collect();

    let credit_card = detected_calibration("creditCard", wire.credit_card)?
        .map(|(confidence, bounds, _)| ParsedCalibration { confidence, bounds });

    let brick = detected_calibration("brick", wire.brick)?.map(
        |(confidence, bounds, orientation)| ParsedBrick {
            confidence,
            bounds,
            // Unrecognised labels are re-derived from the bounds downstream.
            orientation: orientation.and_then(|o| o.parse().ok()),
        },
    );

    Ok(DetectionReply {
        objects,
        credit_card,
        brick,
    })
}

pub fn parse_completion_reply(reply: &str) -> Result<CompletionReply, ReplyParseError> {
    let wire: WireCompletionReply = parse_structured(reply)?;

    Ok(CompletionReply {
        sanitized_transcript: wire.sanitized_transcript,
        corrections: wire
            .corrections
            .unwrap_or_default()
            .into_iter()
            .map(|c| Correction::new(c.issue, c.fix))
            .collect(),
        notes: wire.notes.unwrap_or_default(),
    })
}
