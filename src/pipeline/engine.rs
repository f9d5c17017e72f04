//! The classification engine facade.
//!
//! `VisionEngine` wires the pipeline stages together: it validates the
//! input, normalizes the stored orientation, fans out to the configured
//! recognizers through the scheduler, and funnels the outcomes through the
//! aggregator and the selection engine. One engine instance serves many
//! requests; per-request state lives on the stack of each `classify` call.
//!
//! Cancellation is cooperative and caller-driven. Each request carries a
//! [`CancellationToken`]; `ClassificationSlot` layers a supersede policy on
//! top for callers that want at most one request in flight per UI context.

use crate::core::config::EngineConfig;
use crate::core::errors::{VisionError, VisionResult};
use crate::core::traits::{Recognizer, SignalKind};
use crate::domain::orientation;
use crate::domain::signal::{ClassificationResult, OrientedImage};
use crate::pipeline::{aggregator, scheduler, selection};
use std::sync::{Arc, Mutex, PoisonError};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Concurrent multi-signal image classification engine.
///
/// Holds up to three recognizer handles (object detection, image
/// classification, text recognition) plus the engine configuration. Any
/// subset of recognizers may be absent; absent ones simply contribute no
/// signal. The engine is `Send + Sync` and cheap to share behind an `Arc`.
#[derive(Debug)]
pub struct VisionEngine {
    object_detector: Option<Arc<dyn Recognizer>>,
    image_classifier: Option<Arc<dyn Recognizer>>,
    text_recognizer: Option<Arc<dyn Recognizer>>,
    config: EngineConfig,
}

impl VisionEngine {
    /// Starts building an engine.
    pub fn builder() -> VisionEngineBuilder {
        VisionEngineBuilder::default()
    }

    /// The engine's configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Classifies one image with a fresh, never-cancelled token.
    ///
    /// # Arguments
    ///
    /// * `input` - The decoded bitmap and its stored orientation
    ///
    /// # Returns
    ///
    /// The selected name and tags, or an error if the input is unusable
    /// or no recognizer produced a usable signal.
    pub async fn classify(&self, input: OrientedImage) -> VisionResult<ClassificationResult> {
        self.classify_with_cancellation(input, CancellationToken::new())
            .await
    }

    /// Classifies one image under a caller-supplied cancellation token.
    ///
    /// If the token is cancelled at any point before the result is
    /// delivered, the call resolves to [`VisionError::Cancelled`] and no
    /// partial result escapes. In-flight recognizer work is abandoned, not
    /// preempted.
    ///
    /// # Errors
    ///
    /// * [`VisionError::InvalidInput`] - the bitmap has a zero dimension
    /// * [`VisionError::Cancelled`] - the token fired before delivery
    /// * [`VisionError::AnalysisFailed`] - no recognizer was available, or
    ///   every launched one failed
    pub async fn classify_with_cancellation(
        &self,
        input: OrientedImage,
        cancel: CancellationToken,
    ) -> VisionResult<ClassificationResult> {
        let (width, height) = input.image.dimensions();
        if width == 0 || height == 0 {
            return Err(VisionError::invalid_input(format!(
                "image has a zero dimension ({width}x{height})"
            )));
        }

        let canonical = orientation::normalize(input.orientation);
        let image = Arc::new(input.image);
        let recognizers: Vec<Arc<dyn Recognizer>> = [
            self.object_detector.as_ref(),
            self.image_classifier.as_ref(),
            self.text_recognizer.as_ref(),
        ]
        .into_iter()
        .flatten()
        .map(Arc::clone)
        .collect();
        debug!(
            "classifying {}x{} image with {} recognizers",
            width,
            height,
            recognizers.len()
        );

        let outcomes = scheduler::run(
            recognizers,
            image,
            canonical,
            self.config.recognizer_timeout(),
            cancel.clone(),
        )
        .await;

        // A cancelled request never delivers, even if every recognizer
        // finished before the token fired.
        if cancel.is_cancelled() {
            return Err(VisionError::Cancelled);
        }
        // Total failure: no recognizer produced a signal, whether because
        // every call failed or because none were available to launch.
        if outcomes.iter().all(|o| !o.is_success()) {
            return Err(VisionError::AnalysisFailed);
        }

        let signals = aggregator::aggregate(outcomes);
        Ok(selection::select(&signals, &self.config))
    }

    /// Classifies one image in a slot, superseding the slot's previous
    /// request.
    ///
    /// The slot's in-flight request (if any) is cancelled before this one
    /// launches, so at most one request per slot can ever deliver.
    pub async fn classify_in_slot(
        &self,
        input: OrientedImage,
        slot: &ClassificationSlot,
    ) -> VisionResult<ClassificationResult> {
        let cancel = slot.begin();
        self.classify_with_cancellation(input, cancel).await
    }
}

/// Builder for [`VisionEngine`].
///
/// Each recognizer slot is validated on `build`: a handle whose reported
/// kind does not match its slot is a wiring bug and is rejected early.
#[derive(Debug, Default)]
pub struct VisionEngineBuilder {
    object_detector: Option<Arc<dyn Recognizer>>,
    image_classifier: Option<Arc<dyn Recognizer>>,
    text_recognizer: Option<Arc<dyn Recognizer>>,
    config: Option<EngineConfig>,
}

impl VisionEngineBuilder {
    /// Set the object detection recognizer.
    pub fn with_object_detector(mut self, recognizer: Arc<dyn Recognizer>) -> Self {
        self.object_detector = Some(recognizer);
        self
    }

    /// Set the image classification recognizer.
    pub fn with_image_classifier(mut self, recognizer: Arc<dyn Recognizer>) -> Self {
        self.image_classifier = Some(recognizer);
        self
    }

    /// Set the text recognition recognizer.
    pub fn with_text_recognizer(mut self, recognizer: Arc<dyn Recognizer>) -> Self {
        self.text_recognizer = Some(recognizer);
        self
    }

    /// Set the engine configuration (defaults are used otherwise).
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Builds the engine.
    ///
    /// # Errors
    ///
    /// Returns [`VisionError::ConfigError`] if a recognizer's reported kind
    /// does not match the slot it was assigned to.
    pub fn build(self) -> VisionResult<VisionEngine> {
        check_slot(&self.object_detector, SignalKind::ObjectDetection)?;
        check_slot(&self.image_classifier, SignalKind::Classification)?;
        check_slot(&self.text_recognizer, SignalKind::TextRecognition)?;

        if self.object_detector.is_none()
            && self.image_classifier.is_none()
            && self.text_recognizer.is_none()
        {
            warn!("engine built with no recognizers, every classify call will fail");
        }

        Ok(VisionEngine {
            object_detector: self.object_detector,
            image_classifier: self.image_classifier,
            text_recognizer: self.text_recognizer,
            config: self.config.unwrap_or_default(),
        })
    }
}

fn check_slot(slot: &Option<Arc<dyn Recognizer>>, expected: SignalKind) -> VisionResult<()> {
    match slot {
        Some(recognizer) if recognizer.kind() != expected => Err(VisionError::config_error(
            format!("{} slot wired to a {} recognizer", expected, recognizer.kind()),
        )),
        _ => Ok(()),
    }
}

/// At-most-one-in-flight request slot.
///
/// A slot models one UI context (a capture screen, say) whose user can
/// retake the photo while the previous classification is still running.
/// `begin` cancels the predecessor and installs a fresh token; the
/// superseded request resolves to [`VisionError::Cancelled`].
#[derive(Debug, Default)]
pub struct ClassificationSlot {
    current: Mutex<Option<CancellationToken>>,
}

impl ClassificationSlot {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels the slot's in-flight request (if any) and returns a fresh
    /// token for the next one.
    pub fn begin(&self) -> CancellationToken {
        let token = CancellationToken::new();
        let mut current = self
            .current
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = current.replace(token.clone()) {
            previous.cancel();
        }
        token
    }

    /// Cancels the slot's in-flight request, if any. Idempotent.
    pub fn cancel(&self) {
        let current = self
            .current
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(token) = current.as_ref() {
            token.cancel();
        }
    }
}
