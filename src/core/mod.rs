//! The core module of the classification engine.
//!
//! This module contains the fundamental components of the fusion engine,
//! including:
//! - Configuration management
//! - Error handling
//! - Traits defining the recognizer contract
//!
//! It also provides re-exports of commonly used types for convenience.

pub mod config;
pub mod errors;
pub mod traits;

pub use config::EngineConfig;
pub use errors::{VisionError, VisionResult};
pub use traits::{LabelScore, Recognizer, SignalKind, SignalOutput};
