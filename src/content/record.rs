use std::collections::BTreeSet;
use std::path::Path;

use crate::foundation::error::{CarouselError, CarouselResult};

/// Input record describing the library featured by one carousel.
///
/// Immutable once loaded. Tags form a set; they are kept sorted so every derived string is
/// deterministic regardless of the order they were supplied in.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ContentRecord {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stars: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl ContentRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Popularity count, treating an absent value as zero.
    pub fn star_count(&self) -> u64 {
        self.stars.unwrap_or(0)
    }

    /// Author name, treating an absent or blank value as missing.
    pub fn author_name(&self) -> Option<&str> {
        self.author.as_deref().filter(|a| !a.trim().is_empty())
    }

    pub fn from_json_str(s: &str) -> CarouselResult<Self> {
        serde_json::from_str(s).map_err(|e| CarouselError::serde(format!("content record: {e}")))
    }

    pub fn from_json_file(path: &Path) -> CarouselResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            CarouselError::config(format!("read content record '{}': {e}", path.display()))
        })?;
        Self::from_json_str(&text)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/content/record.rs"]
mod tests;
