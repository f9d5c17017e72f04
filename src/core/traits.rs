//! Recognizer contract for the classification engine.
//!
//! This module defines the narrow boundary the engine consumes signal
//! sources through: the `Recognizer` trait and the tagged output types it
//! produces. Recognizers are black boxes (an ONNX detector, a platform
//! vision API, an OCR backend); the engine only cares that each one turns
//! an image into zero or more candidate strings.

use crate::core::VisionResult;
use crate::domain::orientation::CanonicalOrientation;
use image::RgbImage;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Identifies which signal source produced a candidate.
///
/// Provenance is preserved from the recognizer call all the way into the
/// selection engine, where it participates in tie-breaking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalKind {
    /// Object detection - localized object labels with confidence scores
    ObjectDetection,
    /// Generic image classification - whole-image labels with confidence scores
    Classification,
    /// Text recognition (OCR) - recognized strings without native confidence
    TextRecognition,
}

impl SignalKind {
    /// Returns a human-readable name for the signal kind.
    pub fn name(&self) -> &'static str {
        match self {
            SignalKind::ObjectDetection => "object_detection",
            SignalKind::Classification => "classification",
            SignalKind::TextRecognition => "text_recognition",
        }
    }
}

impl std::fmt::Display for SignalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A single labeled candidate from a visual recognizer.
///
/// Confidence is a normalized score in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelScore {
    /// The candidate label string.
    pub label: String,
    /// Normalized confidence score in `[0, 1]`.
    pub confidence: f32,
}

impl LabelScore {
    /// Creates a new labeled candidate.
    pub fn new(label: impl Into<String>, confidence: f32) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }
}

/// Output of one recognizer invocation, tagged by shape.
///
/// Visual recognizers report scored labels; text recognition reports plain
/// strings with no native confidence. Keeping the two shapes in distinct
/// variants means an OCR string never has to masquerade as a confidence
/// value to be routed through the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum SignalOutput {
    /// Scored labels from object detection or classification.
    Visual(Vec<LabelScore>),
    /// Recognized text strings, in recognizer-reported order.
    Text(Vec<String>),
}

impl SignalOutput {
    /// Returns true if this output carries no candidates at all.
    pub fn is_empty(&self) -> bool {
        match self {
            SignalOutput::Visual(labels) => labels.is_empty(),
            SignalOutput::Text(texts) => texts.is_empty(),
        }
    }
}

/// Core trait for recognizer capabilities.
///
/// Implementations wrap concrete inference backends and conform to a single
/// `detect` contract. A call either yields candidates or a failure; failures
/// are contained by the scheduler and never affect sibling recognizers.
///
/// `detect` is a synchronous, CPU-bound call; the scheduler runs it on the
/// blocking pool. Handles are long-lived, constructed once at startup, and
/// must be safely shareable across concurrent requests (`Send + Sync`, no
/// per-request mutation).
pub trait Recognizer: Send + Sync + Debug {
    /// Returns the kind of signal this recognizer produces.
    fn kind(&self) -> SignalKind;

    /// Runs recognition against a decoded image.
    ///
    /// # Arguments
    ///
    /// * `image` - The decoded bitmap to analyze
    /// * `orientation` - The canonical orientation of the bitmap's content
    ///
    /// # Returns
    ///
    /// The tagged candidate output, or an error describing this call's
    /// failure. An empty candidate list is a success, not a failure.
    fn detect(
        &self,
        image: &RgbImage,
        orientation: CanonicalOrientation,
    ) -> VisionResult<SignalOutput>;
}
