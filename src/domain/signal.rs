//! Request-scoped data model of the fusion pipeline.
//!
//! Every type in this module is created and dropped within the bounds of a
//! single classification request; nothing here persists or is shared across
//! requests. The flow is: recognizer outputs become `RecognitionOutcome`s,
//! outcomes merge into `AggregatedSignals`, and the selection engine emits
//! one immutable `ClassificationResult`.

use crate::core::errors::VisionError;
use crate::core::traits::{SignalKind, SignalOutput};
use crate::domain::orientation::StoredOrientation;
use image::RgbImage;
use serde::Serialize;

/// A candidate string from a visual recognizer, with provenance.
///
/// Confidence is the recognizer's normalized score in `[0, 1]`. Textual
/// candidates are never represented this way; they travel through
/// [`AggregatedSignals::texts`] without a synthetic score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    /// The candidate text.
    pub text: String,
    /// Normalized confidence score in `[0, 1]`.
    pub confidence: f32,
    /// Which signal produced this candidate.
    pub source: SignalKind,
}

impl ScoredCandidate {
    /// Creates a new scored candidate.
    pub fn new(text: impl Into<String>, confidence: f32, source: SignalKind) -> Self {
        Self {
            text: text.into(),
            confidence,
            source,
        }
    }
}

/// Terminal result of one recognizer invocation.
///
/// Either a candidate list or a failure reason, never both. Produced once
/// per recognizer task by the scheduler, consumed exactly once by the
/// aggregator, then discarded.
#[derive(Debug)]
pub struct RecognitionOutcome {
    /// The signal kind of the recognizer that produced this outcome.
    pub kind: SignalKind,
    /// The tagged candidates, or the contained failure.
    pub outcome: Result<SignalOutput, VisionError>,
}

impl RecognitionOutcome {
    /// Creates a successful outcome.
    pub fn success(kind: SignalKind, output: SignalOutput) -> Self {
        Self {
            kind,
            outcome: Ok(output),
        }
    }

    /// Creates a failed outcome.
    pub fn failure(kind: SignalKind, error: VisionError) -> Self {
        Self {
            kind,
            outcome: Err(error),
        }
    }

    /// Returns true if the recognizer terminated successfully (an empty
    /// candidate list still counts as success).
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Union of all successful outcomes for one request, partitioned by kind.
///
/// Aggregation preserves each candidate's original source and confidence;
/// no re-scoring or filtering happens before the selection engine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregatedSignals {
    /// Candidates from object detection, in recognizer-reported order.
    pub detections: Vec<ScoredCandidate>,
    /// Candidates from image classification, in recognizer-reported order.
    pub classifications: Vec<ScoredCandidate>,
    /// Recognized text strings, in recognizer-reported order.
    pub texts: Vec<String>,
}

impl AggregatedSignals {
    /// Returns true if no signal of any kind is present.
    pub fn is_empty(&self) -> bool {
        self.detections.is_empty() && self.classifications.is_empty() && self.texts.is_empty()
    }

    /// Iterates all visual candidates, detections first.
    ///
    /// The iteration order is the stable tie-break baseline for the
    /// selection engine's confidence sort: detector candidates precede
    /// classifier candidates, each in its recognizer's own order.
    pub fn visual_candidates(&self) -> impl Iterator<Item = &ScoredCandidate> {
        self.detections.iter().chain(self.classifications.iter())
    }
}

/// The final classification artifact handed to the caller.
///
/// Immutable once constructed. Tags are bounded, case-insensitively unique,
/// and ordered by descending source confidence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationResult {
    /// The best-guess item name.
    pub name: String,
    /// Descriptive tags, most confident first.
    pub tags: Vec<String>,
}

/// A decoded bitmap plus the orientation tag its source reported.
///
/// This is the engine's input type: the image is already decoded, and the
/// orientation still follows the source's convention (camera, photo
/// library, or disk) until the normalizer maps it.
#[derive(Debug, Clone)]
pub struct OrientedImage {
    /// The decoded bitmap.
    pub image: RgbImage,
    /// Orientation metadata in the source's convention.
    pub orientation: StoredOrientation,
}

impl OrientedImage {
    /// Creates an input from a bitmap and its stored orientation.
    pub fn new(image: RgbImage, orientation: StoredOrientation) -> Self {
        Self { image, orientation }
    }

    /// Creates an input for a bitmap that is already upright.
    pub fn upright(image: RgbImage) -> Self {
        Self {
            image,
            orientation: StoredOrientation::Up,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::traits::LabelScore;

    #[test]
    fn test_outcome_success_and_failure_are_exclusive() {
        let ok = RecognitionOutcome::success(
            SignalKind::Classification,
            SignalOutput::Visual(vec![LabelScore::new("hammer", 0.8)]),
        );
        assert!(ok.is_success());

        let failed = RecognitionOutcome::failure(
            SignalKind::TextRecognition,
            VisionError::Timeout {
                kind: SignalKind::TextRecognition,
                elapsed_ms: 100,
            },
        );
        assert!(!failed.is_success());
    }

    #[test]
    fn test_empty_visual_output_is_still_success() {
        let outcome =
            RecognitionOutcome::success(SignalKind::ObjectDetection, SignalOutput::Visual(vec![]));
        assert!(outcome.is_success());
    }

    #[test]
    fn test_visual_candidates_order_is_detections_first() {
        let signals = AggregatedSignals {
            detections: vec![ScoredCandidate::new(
                "drill",
                0.5,
                SignalKind::ObjectDetection,
            )],
            classifications: vec![ScoredCandidate::new(
                "power tool",
                0.9,
                SignalKind::Classification,
            )],
            texts: vec![],
        };
        let order: Vec<&str> = signals
            .visual_candidates()
            .map(|c| c.text.as_str())
            .collect();
        assert_eq!(order, vec!["drill", "power tool"]);
    }

    #[test]
    fn test_aggregated_signals_is_empty() {
        assert!(AggregatedSignals::default().is_empty());
        let signals = AggregatedSignals {
            texts: vec!["label".to_string()],
            ..Default::default()
        };
        assert!(!signals.is_empty());
    }
}
