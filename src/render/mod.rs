//! Rasterizing cards into frames.

/// Drawing primitives over the CPU raster backend.
pub mod canvas;
/// The card layout engine.
pub mod engine;
/// Frame buffers and PNG encoding.
pub mod frame;
/// Renderer traits the assembler is generic over.
pub mod renderer;
