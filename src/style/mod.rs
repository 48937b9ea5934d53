//! Theme constants and branding strings.

/// Canvas, palette, typography and branding definitions.
pub mod theme;
