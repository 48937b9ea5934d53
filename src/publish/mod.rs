//! Hand-off of written slides to a remote carousel publisher.

/// Publisher interface and the upload/container/publish call order.
pub mod carousel;
