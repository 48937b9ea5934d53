//! Cards, storyboards and the record-to-storyboard builder.

/// Storyboard construction from a content record.
pub mod builder;
/// Card and storyboard types.
pub mod card;
/// URL to install-command strategies.
pub mod install;
