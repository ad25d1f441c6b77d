use std::fmt;
use std::str::FromStr;

use super::bounds::PixelBounds;
use super::image::ImagePayload;

/// A validated detection request. Construction goes through the request
/// router, which enforces the size limit and the non-empty category list.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionRequest {
    pub image: ImagePayload,
    pub equipment_type: String,
    pub target_categories: Vec<String>,
    pub user_context: Option<String>,
}

impl DetectionRequest {
    pub fn targets(&self, category: &str) -> bool {
        self.target_categories.iter().any(|c| c == category)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectDetection {
    pub category: String,
    pub label: String,
    pub confidence: f64,
    pub bounds: PixelBounds,
    pub enabled: bool,
}

impl ObjectDetection {
    pub fn new(category: String, confidence: f64, bounds: PixelBounds) -> Self {
        let label = display_label(&category);
        Self {
            category,
            label,
            confidence: confidence.clamp(0.0, 1.0),
            bounds,
            enabled: true,
        }
    }
}

/// `opening_window` -> `OPENING WINDOW`.
pub fn display_label(category: &str) -> String {
    category.to_uppercase().replace('_', " ")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrickOrientation {
    Horizontal,
    Vertical,
}

impl BrickOrientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            BrickOrientation::Horizontal => "horizontal",
            BrickOrientation::Vertical => "vertical",
        }
    }

    pub fn from_bounds(bounds: &PixelBounds) -> Self {
        if bounds.is_wider_than_tall() {
            BrickOrientation::Horizontal
        } else {
            BrickOrientation::Vertical
        }
    }
}

impl FromStr for BrickOrientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "horizontal" => Ok(BrickOrientation::Horizontal),
            "vertical" => Ok(BrickOrientation::Vertical),
            other => Err(format!("Invalid brick orientation: {}", other)),
        }
    }
}

impl fmt::Display for BrickOrientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationObject {
    pub confidence: f64,
    pub bounds: PixelBounds,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrickCalibration {
    pub confidence: f64,
    pub orientation: BrickOrientation,
    pub bounds: PixelBounds,
}

/// Objects of known physical size the client uses to derive a mm/pixel
/// scale. Either may be absent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CalibrationReference {
    pub credit_card: Option<CalibrationObject>,
    pub brick: Option<BrickCalibration>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetectionResult {
    pub objects: Vec<ObjectDetection>,
    pub calibration: CalibrationReference,
    pub provider: String,
}
