//! Turning a content record into written slide files.

/// Carousel assembly, slide naming and failure cleanup.
pub mod carousel;
