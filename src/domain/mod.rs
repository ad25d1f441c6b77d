mod bounds;
mod detection;
mod image;
mod knowledge;
mod pipework;
mod transcript;

pub use bounds::{PercentBounds, PixelBounds};
pub use detection::{
    BrickCalibration, BrickOrientation, CalibrationObject, CalibrationReference, DetectionRequest,
    DetectionResult, ObjectDetection, display_label,
};
pub use image::ImagePayload;
pub use knowledge::{KnowledgeEntry, KnowledgeSnapshot, UNSPECIFIED_VERSION};
pub use pipework::{ALLOWED_PIPE_SIZES_MM, enforce_pipework_sizes, nearest_pipe_size};
pub use transcript::{Correction, SanitizedTranscript, TranscriptionRequest};
