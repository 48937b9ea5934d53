//! Fonts, shaping, word wrap and code highlighting.

/// Font sources and the loaded regular/bold/mono faces.
pub mod fonts;
/// Token coloring for code cards.
pub mod highlight;
/// Parley shaping and measurement.
pub mod shaper;
/// Greedy word wrap.
pub mod wrap;
