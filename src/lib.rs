//! # ItemSight
//!
//! A multi-signal image classification fusion engine. Given a decoded
//! photograph, ItemSight runs several independent recognizers concurrently
//! (object detection, generic classification, text recognition), tolerates
//! any subset of them failing, and fuses whatever signals arrive into a
//! single best-guess item name plus a small ranked set of descriptive tags.
//!
//! ## Features
//!
//! - Fan-out/fan-in scheduling with isolated per-recognizer failure domains
//! - Cross-validation of recognized text against visual candidates
//! - Deterministic ranking, tie-breaking, and case-insensitive deduplication
//! - Per-recognizer deadlines and explicit request cancellation
//! - Dependency-injected recognizer handles, shared read-only across requests
//!
//! ## Components
//!
//! - **Recognizer contract**: the narrow `detect` boundary every signal
//!   source implements
//! - **Fan-Out Scheduler**: runs all available recognizers against one image
//!   and waits for every task to reach a terminal state
//! - **Signal Aggregator**: merges heterogeneous outputs into one uniform
//!   candidate representation with provenance
//! - **Selection Engine**: validates, ranks, and picks the final name and tags
//! - **Orientation Normalizer**: maps source orientation metadata to the
//!   canonical convention recognizers expect
//!
//! ## Modules
//!
//! * [`core`] - Recognizer traits, error handling, and configuration
//! * [`domain`] - Request-scoped data model and orientation helpers
//! * [`pipeline`] - Scheduler, aggregator, selection engine, and the
//!   `VisionEngine` facade
//! * [`utils`] - Image loading and capture post-processing utilities
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use itemsight::prelude::*;
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! # #[derive(Debug)] struct MyDetector;
//! # impl Recognizer for MyDetector {
//! #     fn kind(&self) -> SignalKind { SignalKind::ObjectDetection }
//! #     fn detect(
//! #         &self,
//! #         _image: &image::RgbImage,
//! #         _orientation: itemsight::domain::orientation::CanonicalOrientation,
//! #     ) -> VisionResult<SignalOutput> {
//! #         Ok(SignalOutput::Visual(vec![]))
//! #     }
//! # }
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Build the engine once at startup; handles are shared across requests.
//! let engine = VisionEngine::builder()
//!     .with_object_detector(Arc::new(MyDetector))
//!     .with_config(EngineConfig::default())
//!     .build()?;
//!
//! // Classify a captured photograph.
//! let image = load_image(Path::new("capture.jpg"))?;
//! let result = engine.classify(OrientedImage::upright(image)).await?;
//! println!("{} {:?}", result.name, result.tags);
//! # Ok(())
//! # }
//! ```

// Core modules
pub mod core;
pub mod domain;
pub mod pipeline;
pub mod utils;

/// Prelude module for convenient imports.
///
/// Bring the essentials into scope with a single use statement:
///
/// ```rust
/// use itemsight::prelude::*;
/// ```
///
/// Included items focus on the most common tasks:
/// - The engine facade (`VisionEngine`, `VisionEngineBuilder`,
///   `ClassificationSlot`)
/// - The recognizer contract (`Recognizer`, `SignalKind`, `SignalOutput`,
///   `LabelScore`)
/// - Request inputs and outputs (`OrientedImage`, `ClassificationResult`)
/// - Essential error and config types (`VisionError`, `VisionResult`,
///   `EngineConfig`)
/// - Basic image loading (`load_image`)
///
/// For advanced customization (orientation handling, direct access to the
/// scheduler or selection engine), import directly from the respective
/// modules (e.g., `itemsight::domain::orientation`, `itemsight::pipeline`).
pub mod prelude {
    // Engine facade (essential)
    pub use crate::pipeline::{ClassificationSlot, VisionEngine, VisionEngineBuilder};

    // Recognizer contract (essential)
    pub use crate::core::traits::{LabelScore, Recognizer, SignalKind, SignalOutput};

    // Inputs and outputs (essential)
    pub use crate::domain::signal::{ClassificationResult, OrientedImage};

    // Error handling and configuration (essential)
    pub use crate::core::{EngineConfig, VisionError, VisionResult};

    // Image utility (minimal)
    pub use crate::utils::load_image;
}
