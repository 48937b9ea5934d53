//! Content records consumed by the storyboard builder.

/// The featured-library record.
pub mod record;
