//! Fan-out scheduler for concurrent recognizer execution.
//!
//! The scheduler launches one task per available recognizer against a
//! shared read-only image, isolates each task's failure, and joins on all
//! of them before handing the outcomes to the aggregator. There is no
//! early exit on first success: later, slower signals (text recognition in
//! particular) materially change the final decision.
//!
//! Each task races the synchronous `detect` call (on the blocking pool)
//! against its own deadline and the request's cancellation token. A lost
//! race is recorded as a per-task failure outcome; sibling tasks and the
//! overall request are unaffected. The blocking call itself cannot be
//! preempted mid-inference, so a timed-out or cancelled recognizer may
//! still burn CPU briefly, but its result is never observed.

use crate::core::errors::VisionError;
use crate::core::traits::Recognizer;
use crate::domain::orientation::CanonicalOrientation;
use crate::domain::signal::RecognitionOutcome;
use image::RgbImage;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Runs every available recognizer against one image and waits for all of
/// them to reach a terminal state.
///
/// # Arguments
///
/// * `recognizers` - The available recognizer handles (unavailable ones are
///   simply absent from the slice)
/// * `image` - The decoded bitmap, shared read-only across tasks
/// * `orientation` - Canonical orientation of the bitmap's content
/// * `deadline` - Independent per-recognizer deadline
/// * `cancel` - Cancellation token for the whole request
///
/// # Returns
///
/// One terminal `RecognitionOutcome` per launched recognizer, in launch
/// order. Failures (inference errors, deadlines, cancellation) are captured
/// as outcomes, never propagated.
pub(crate) async fn run(
    recognizers: Vec<Arc<dyn Recognizer>>,
    image: Arc<RgbImage>,
    orientation: CanonicalOrientation,
    deadline: Duration,
    cancel: CancellationToken,
) -> Vec<RecognitionOutcome> {
    let mut handles = Vec::with_capacity(recognizers.len());
    for recognizer in recognizers {
        let kind = recognizer.kind();
        let task = run_one(
            recognizer,
            Arc::clone(&image),
            orientation,
            deadline,
            cancel.clone(),
        );
        handles.push((kind, tokio::spawn(task)));
    }

    // Join point: the request suspends here until every task is terminal.
    let mut outcomes = Vec::with_capacity(handles.len());
    for (kind, handle) in handles {
        match handle.await {
            Ok(outcome) => outcomes.push(outcome),
            Err(join_error) => {
                warn!("{} recognizer task aborted: {}", kind, join_error);
                outcomes.push(RecognitionOutcome::failure(
                    kind,
                    VisionError::recognition(kind, "recognizer task aborted", join_error),
                ));
            }
        }
    }
    outcomes
}

/// Executes a single recognizer with an isolated failure domain.
async fn run_one(
    recognizer: Arc<dyn Recognizer>,
    image: Arc<RgbImage>,
    orientation: CanonicalOrientation,
    deadline: Duration,
    cancel: CancellationToken,
) -> RecognitionOutcome {
    let kind = recognizer.kind();
    let inference =
        tokio::task::spawn_blocking(move || recognizer.detect(image.as_ref(), orientation));

    let outcome = tokio::select! {
        _ = cancel.cancelled() => Err(VisionError::Cancelled),
        joined = timeout(deadline, inference) => match joined {
            Err(_) => Err(VisionError::Timeout {
                kind,
                elapsed_ms: deadline.as_millis() as u64,
            }),
            Ok(Err(join_error)) => {
                Err(VisionError::recognition(kind, "recognizer panicked", join_error))
            }
            Ok(Ok(result)) => result,
        },
    };

    match &outcome {
        Ok(output) => debug!("{} recognizer terminated, empty={}", kind, output.is_empty()),
        Err(error) => warn!("{} recognizer contributed no candidates: {}", kind, error),
    }
    RecognitionOutcome { kind, outcome }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::traits::{LabelScore, SignalKind, SignalOutput};
    use crate::core::{VisionError, VisionResult};

    #[derive(Debug)]
    struct FixedRecognizer {
        kind: SignalKind,
        output: SignalOutput,
    }

    impl Recognizer for FixedRecognizer {
        fn kind(&self) -> SignalKind {
            self.kind
        }

        fn detect(
            &self,
            _image: &RgbImage,
            _orientation: CanonicalOrientation,
        ) -> VisionResult<SignalOutput> {
            Ok(self.output.clone())
        }
    }

    #[derive(Debug)]
    struct FailingRecognizer {
        kind: SignalKind,
    }

    impl Recognizer for FailingRecognizer {
        fn kind(&self) -> SignalKind {
            self.kind
        }

        fn detect(
            &self,
            _image: &RgbImage,
            _orientation: CanonicalOrientation,
        ) -> VisionResult<SignalOutput> {
            Err(VisionError::recognition(
                self.kind,
                "inference error",
                std::io::Error::other("model exploded"),
            ))
        }
    }

    #[derive(Debug)]
    struct SlowRecognizer {
        kind: SignalKind,
        delay: Duration,
    }

    impl Recognizer for SlowRecognizer {
        fn kind(&self) -> SignalKind {
            self.kind
        }

        fn detect(
            &self,
            _image: &RgbImage,
            _orientation: CanonicalOrientation,
        ) -> VisionResult<SignalOutput> {
            std::thread::sleep(self.delay);
            Ok(SignalOutput::Visual(vec![LabelScore::new("late", 0.9)]))
        }
    }

    fn test_image() -> Arc<RgbImage> {
        Arc::new(RgbImage::new(4, 4))
    }

    #[tokio::test]
    async fn test_failure_does_not_abort_siblings() {
        let recognizers: Vec<Arc<dyn Recognizer>> = vec![
            Arc::new(FailingRecognizer {
                kind: SignalKind::ObjectDetection,
            }),
            Arc::new(FixedRecognizer {
                kind: SignalKind::Classification,
                output: SignalOutput::Visual(vec![LabelScore::new("hammer", 0.8)]),
            }),
        ];

        let outcomes = run(
            recognizers,
            test_image(),
            CanonicalOrientation::Up,
            Duration::from_secs(5),
            CancellationToken::new(),
        )
        .await;

        assert_eq!(outcomes.len(), 2);
        assert!(!outcomes[0].is_success());
        assert!(outcomes[1].is_success());
    }

    #[tokio::test]
    async fn test_deadline_is_per_recognizer() {
        let recognizers: Vec<Arc<dyn Recognizer>> = vec![
            Arc::new(SlowRecognizer {
                kind: SignalKind::ObjectDetection,
                delay: Duration::from_millis(400),
            }),
            Arc::new(FixedRecognizer {
                kind: SignalKind::TextRecognition,
                output: SignalOutput::Text(vec!["Cordless Drill".to_string()]),
            }),
        ];

        let outcomes = run(
            recognizers,
            test_image(),
            CanonicalOrientation::Up,
            Duration::from_millis(50),
            CancellationToken::new(),
        )
        .await;

        assert!(matches!(
            outcomes[0].outcome,
            Err(VisionError::Timeout { .. })
        ));
        assert!(outcomes[1].is_success());
    }

    #[tokio::test]
    async fn test_cancellation_resolves_in_flight_tasks() {
        let recognizers: Vec<Arc<dyn Recognizer>> = vec![Arc::new(SlowRecognizer {
            kind: SignalKind::Classification,
            delay: Duration::from_millis(400),
        })];
        let cancel = CancellationToken::new();
        cancel.cancel();

        let outcomes = run(
            recognizers,
            test_image(),
            CanonicalOrientation::Up,
            Duration::from_secs(30),
            cancel,
        )
        .await;

        assert!(matches!(outcomes[0].outcome, Err(VisionError::Cancelled)));
    }

    #[tokio::test]
    async fn test_empty_recognizer_set_yields_no_outcomes() {
        let outcomes = run(
            Vec::new(),
            test_image(),
            CanonicalOrientation::Up,
            Duration::from_secs(1),
            CancellationToken::new(),
        )
        .await;
        assert!(outcomes.is_empty());
    }
}
