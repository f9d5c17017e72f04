//! Domain-level structures shared across the classification pipeline.
//!
//! This module groups the request-scoped data model (candidates, outcomes,
//! aggregated signals, results) and the orientation helpers that bridge
//! source image metadata to the convention recognizers expect.

pub mod orientation;
pub mod signal;

pub use orientation::{CanonicalOrientation, StoredOrientation, apply_orientation, normalize};
pub use signal::{
    AggregatedSignals, ClassificationResult, OrientedImage, RecognitionOutcome, ScoredCandidate,
};
