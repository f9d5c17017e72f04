//! Signal aggregation.
//!
//! The aggregator is a pure merge step: successful recognizer outcomes are
//! partitioned by signal kind into one `AggregatedSignals` value, failed
//! outcomes are logged and discarded, and nothing is ranked, filtered, or
//! re-scored. Keeping this step trivial makes it order-independent by
//! construction: the concurrent completion order of recognizer tasks never
//! affects the aggregate.

use crate::core::traits::{SignalKind, SignalOutput};
use crate::domain::signal::{AggregatedSignals, RecognitionOutcome, ScoredCandidate};
use tracing::{debug, warn};

/// Merges recognizer outcomes into one aggregated signal set.
///
/// Candidates keep their original confidence and gain provenance; textual
/// candidates stay in a separate field instead of being forced onto the
/// visual confidence scale.
pub fn aggregate(outcomes: Vec<RecognitionOutcome>) -> AggregatedSignals {
    let mut signals = AggregatedSignals::default();

    for outcome in outcomes {
        let kind = outcome.kind;
        match outcome.outcome {
            Ok(SignalOutput::Visual(labels)) => {
                let candidates = labels
                    .into_iter()
                    .map(|l| ScoredCandidate::new(l.label, l.confidence, kind));
                match kind {
                    SignalKind::ObjectDetection => signals.detections.extend(candidates),
                    SignalKind::Classification => signals.classifications.extend(candidates),
                    SignalKind::TextRecognition => {
                        warn!("text recognizer reported visual candidates, ignoring");
                    }
                }
            }
            Ok(SignalOutput::Text(texts)) => match kind {
                SignalKind::TextRecognition => signals.texts.extend(texts),
                _ => warn!("{} recognizer reported text candidates, ignoring", kind),
            },
            Err(error) => {
                // Already surfaced by the scheduler at warn level.
                debug!("discarding failed {} outcome: {}", kind, error);
            }
        }
    }

    signals
}
