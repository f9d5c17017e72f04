//! The classification pipeline.
//!
//! One image enters the fan-out scheduler, each recognizer runs
//! independently, outcomes merge in the aggregator, and the selection
//! engine emits the final `(name, tags)` result. The `VisionEngine` facade
//! wires the stages together and owns the shared recognizer handles.

pub mod aggregator;
pub mod engine;
pub mod scheduler;
pub mod selection;

pub use aggregator::aggregate;
pub use engine::{ClassificationSlot, VisionEngine, VisionEngineBuilder};
pub use selection::select;
