//! Error types for the classification engine.
//!
//! This module defines the error taxonomy of the fusion pipeline. The
//! guiding policy is containment: per-recognizer failures (inference
//! errors, deadlines, cancellation) are captured at the adapter boundary
//! and converted to "absence of signal" as early as possible. Only
//! whole-request failures propagate to the caller, so the caller observes
//! either a populated classification result or a single analysis error,
//! never a partial state.

use crate::core::traits::SignalKind;
use thiserror::Error;

/// Enum representing the errors that can occur in the classification engine.
#[derive(Error, Debug)]
pub enum VisionError {
    /// The input image cannot be processed (e.g., zero pixel area).
    ///
    /// Surfaced immediately; no recognizers are invoked.
    #[error("invalid input: {message}")]
    InvalidInput {
        /// A message describing the invalid input.
        message: String,
    },

    /// A recognizer call failed for one request.
    ///
    /// Contained by the scheduler: the recognizer contributes zero
    /// candidates and sibling recognizers are unaffected.
    #[error("{kind} recognizer failed: {context}")]
    Recognition {
        /// The signal kind of the recognizer that failed.
        kind: SignalKind,
        /// Additional context about the failure.
        context: String,
        /// The underlying error that caused this failure.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A recognizer exceeded its per-call deadline.
    ///
    /// Treated identically to a recognizer call failure.
    #[error("{kind} recognizer timed out after {elapsed_ms} ms")]
    Timeout {
        /// The signal kind of the recognizer that timed out.
        kind: SignalKind,
        /// The deadline that was exceeded, in milliseconds.
        elapsed_ms: u64,
    },

    /// The classification request was cancelled by its caller.
    #[error("classification request cancelled")]
    Cancelled,

    /// Every recognizer was unavailable or failed for this request.
    ///
    /// The only per-request error surfaced once scheduling has started.
    #[error("analysis failed: no recognizer produced a usable signal")]
    AnalysisFailed,

    /// Error occurred while loading an image.
    #[error("image load")]
    ImageLoad(#[source] image::ImageError),

    /// Error occurred while encoding an image.
    #[error("image encode")]
    ImageEncode(#[source] image::ImageError),

    /// Error indicating a configuration problem.
    #[error("configuration: {message}")]
    ConfigError {
        /// A message describing the configuration error.
        message: String,
    },

    /// IO error.
    #[error("io")]
    Io(#[from] std::io::Error),
}

/// Implementation of VisionError with utility functions for creating errors.
impl VisionError {
    /// Creates a VisionError for invalid input.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Creates a VisionError for a contained per-recognizer failure.
    ///
    /// # Arguments
    ///
    /// * `kind` - The signal kind of the failing recognizer.
    /// * `context` - Additional context about the failure.
    /// * `error` - The underlying error that caused the failure.
    pub fn recognition(
        kind: SignalKind,
        context: &str,
        error: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Recognition {
            kind,
            context: context.to_string(),
            source: Box::new(error),
        }
    }

    /// Creates a VisionError for a configuration problem.
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Returns true if this error is contained at the recognizer boundary
    /// rather than surfaced to the caller of `classify`.
    pub fn is_contained(&self) -> bool {
        matches!(
            self,
            VisionError::Recognition { .. } | VisionError::Timeout { .. }
        )
    }
}

/// Convenient result alias for classification operations.
pub type VisionResult<T> = Result<T, VisionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognition_error_message_carries_kind_and_context() {
        let error = VisionError::recognition(
            SignalKind::ObjectDetection,
            "inference rejected input tensor",
            std::io::Error::new(std::io::ErrorKind::InvalidData, "bad shape"),
        );
        let message = error.to_string();
        assert!(message.contains("object_detection"));
        assert!(message.contains("inference rejected input tensor"));
    }

    #[test]
    fn test_timeout_error_message() {
        let error = VisionError::Timeout {
            kind: SignalKind::TextRecognition,
            elapsed_ms: 1500,
        };
        assert_eq!(
            error.to_string(),
            "text_recognition recognizer timed out after 1500 ms"
        );
    }

    #[test]
    fn test_containment_classification() {
        assert!(
            VisionError::recognition(
                SignalKind::Classification,
                "model error",
                std::io::Error::other("boom"),
            )
            .is_contained()
        );
        assert!(
            VisionError::Timeout {
                kind: SignalKind::Classification,
                elapsed_ms: 10,
            }
            .is_contained()
        );
        assert!(!VisionError::AnalysisFailed.is_contained());
        assert!(!VisionError::invalid_input("empty image").is_contained());
        assert!(!VisionError::Cancelled.is_contained());
    }
}
