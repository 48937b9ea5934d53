/// Canvas dimensions and colors.
pub mod core;
/// Error types.
pub mod error;
