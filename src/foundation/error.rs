use std::path::PathBuf;

/// Convenience result type used across cardcast.
pub type CarouselResult<T> = Result<T, CarouselError>;

/// Stage of the remote publish sequence that failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PublishStage {
    /// Uploading or registering one carousel item.
    Upload,
    /// Creating the container that references every uploaded item.
    Container,
    /// Publishing the container.
    Publish,
}

impl std::fmt::Display for PublishStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Upload => "upload",
            Self::Container => "container",
            Self::Publish => "publish",
        })
    }
}

/// Top-level error taxonomy used by the pipeline APIs.
///
/// Each pipeline stage fails with its own variant so callers can branch on the variant instead of
/// the message text.
#[derive(thiserror::Error, Debug)]
pub enum CarouselError {
    /// A required typeface could not be located or parsed. Fatal to the engine.
    #[error("font load error: {face}: {reason}")]
    FontLoad {
        /// Which face failed (`regular`, `bold` or `mono`).
        face: String,
        /// Human readable cause.
        reason: String,
    },

    /// The output directory could not be created.
    #[error("directory error: '{}': {source}", path.display())]
    Directory {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// A rendered slide could not be persisted.
    #[error("write error: '{}': {source}", path.display())]
    Write {
        /// Destination path of the failed write.
        path: PathBuf,
        /// Underlying encoder/IO error.
        source: image::ImageError,
    },

    /// A card could not be rendered.
    #[error("render error: card {card}: {reason}")]
    Render {
        /// 1-based index of the failing card (0 when not yet paginated).
        card: u32,
        /// Human readable cause.
        reason: String,
    },

    /// Invalid configuration values or unreadable configuration files.
    #[error("config error: {0}")]
    Config(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// The remote publish collaborator rejected one stage of the carousel protocol.
    #[error("publish error: {stage}: {reason}")]
    Publish {
        /// Stage that failed.
        stage: PublishStage,
        /// Human readable cause.
        reason: String,
    },

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CarouselError {
    /// Build a [`CarouselError::FontLoad`] value.
    pub fn font_load(face: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::FontLoad {
            face: face.into(),
            reason: reason.into(),
        }
    }

    /// Build a [`CarouselError::Directory`] value.
    pub fn directory(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Directory {
            path: path.into(),
            source,
        }
    }

    /// Build a [`CarouselError::Write`] value.
    pub fn write(path: impl Into<PathBuf>, source: image::ImageError) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    /// Build a [`CarouselError::Render`] value.
    pub fn render(card: u32, reason: impl Into<String>) -> Self {
        Self::Render {
            card,
            reason: reason.into(),
        }
    }

    /// Build a [`CarouselError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`CarouselError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build a [`CarouselError::Publish`] value.
    pub fn publish(stage: PublishStage, reason: impl Into<String>) -> Self {
        Self::Publish {
            stage,
            reason: reason.into(),
        }
    }

    /// Attach a 1-based card index to a render error raised before pagination was known.
    pub fn with_card(self, card: u32) -> Self {
        match self {
            Self::Render { reason, .. } => Self::Render { card, reason },
            other => other,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
