use crate::domain::{
    BrickCalibration, BrickOrientation, CalibrationObject, CalibrationReference, DetectionRequest,
    ObjectDetection, PercentBounds, PixelBounds,
};

use super::reply_parser::DetectionReply;

/// Percentages (0-100) map onto the 0-1000 reference frame.
pub const REFERENCE_SCALE: f64 = 10.0;

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedDetections {
    pub objects: Vec<ObjectDetection>,
    pub calibration: CalibrationReference,
}

/// Moves a parsed provider reply onto the client reference frame and drops
/// anything the caller did not ask for.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetectionNormalizer;

impl DetectionNormalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn scale_bounds(&self, bounds: &PercentBounds) -> PixelBounds {
        PixelBounds::new(
            to_reference_frame(bounds.x),
            to_reference_frame(bounds.y),
            to_reference_frame(bounds.width),
            to_reference_frame(bounds.height),
        )
    }

    pub fn normalize(
        &self,
        reply: DetectionReply,
        request: &DetectionRequest,
    ) -> NormalizedDetections {
        let reported = reply.objects.len();

        let objects: Vec<ObjectDetection> = reply
            .objects
            .into_iter()
            .filter(|d| {
                let wanted = request.targets(&d.category);
                if !wanted {
                    tracing::debug!(
                        category = %d.category,
                        "Dropping detection outside requested categories"
                    );
                }
                wanted
            })
            .map(|d| ObjectDetection::new(d.category, d.confidence, self.scale_bounds(&d.bounds)))
            .collect();

        if objects.len() < reported {
            tracing::info!(
                reported,
                kept = objects.len(),
                "Filtered provider detections to requested categories"
            );
        }

        let credit_card = reply.credit_card.map(|card| CalibrationObject {
            confidence: card.confidence,
            bounds: self.scale_bounds(&card.bounds),
        });

        let brick = reply.brick.map(|brick| {
            let bounds = self.scale_bounds(&brick.bounds);
            BrickCalibration {
                confidence: brick.confidence,
                orientation: brick
                    .orientation
                    .unwrap_or_else(|| BrickOrientation::from_bounds(&bounds)),
                bounds,
            }
        });

        NormalizedDetections {
            objects,
            calibration: CalibrationReference { credit_card, brick },
        }
    }
}

fn to_reference_frame(percent: f64) -> i64 {
    (percent * REFERENCE_SCALE).round() as i64
}
