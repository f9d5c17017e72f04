//! Shared utilities.
//!
//! Image loading and resizing helpers used by callers feeding the engine,
//! plus tracing initialization for binaries and tests.

pub mod image;

pub use image::{
    DEFAULT_JPEG_QUALITY, DEFAULT_MAX_DIMENSION, downscale_to_fit, encode_jpeg, load_image,
};

/// Initializes the tracing subscriber for logging.
///
/// Sets up the tracing subscriber with an environment filter and a
/// formatting layer. Typically called once at application start.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();
}
