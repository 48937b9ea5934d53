use crate::text::highlight::Language;

/// Maps a reference URL to an install command for the "Installation" card.
///
/// Strategies are consulted in order by the storyboard builder; the first one that recognizes the
/// URL wins. A URL that no strategy recognizes produces no code card at all.
pub trait InstallStrategy: std::fmt::Debug + Send + Sync {
    /// Install command for `url`, or `None` when the URL is not recognized.
    fn install_command(&self, url: &str) -> Option<String>;

    /// Highlighting language of the generated command.
    fn language(&self) -> Language {
        Language::Shell
    }
}

/// Recognizes URLs containing one of a set of hosting markers and formats
/// `<command> <url without scheme>`.
///
/// This is string formatting only: the URL is never parsed.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ModuleFetchStrategy {
    /// Substrings that mark a recognized host, e.g. `github.com`.
    pub host_markers: Vec<String>,
    /// Command prefix, e.g. `go get`.
    pub command: String,
    /// Highlighting hint for the command, e.g. `shell` or `go`.
    pub language: String,
}

impl Default for ModuleFetchStrategy {
    fn default() -> Self {
        Self {
            host_markers: vec!["github.com".to_string()],
            command: "go get".to_string(),
            language: "shell".to_string(),
        }
    }
}

impl ModuleFetchStrategy {
    pub fn new(command: impl Into<String>, host_markers: &[&str]) -> Self {
        Self {
            host_markers: host_markers.iter().map(|m| m.to_string()).collect(),
            command: command.into(),
            ..Self::default()
        }
    }

    pub fn with_language(mut self, hint: impl Into<String>) -> Self {
        self.language = hint.into();
        self
    }

    pub fn recognizes(&self, url: &str) -> bool {
        self.host_markers
            .iter()
            .any(|m| !m.is_empty() && url.contains(m.as_str()))
    }
}

impl InstallStrategy for ModuleFetchStrategy {
    fn install_command(&self, url: &str) -> Option<String> {
        if !self.recognizes(url) {
            return None;
        }
        Some(format!("{} {}", self.command, strip_scheme(url)))
    }

    fn language(&self) -> Language {
        Language::from_hint(&self.language)
    }
}

/// Drop a leading `https://` or `http://`.
pub fn strip_scheme(url: &str) -> &str {
    url.strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url)
}

#[cfg(test)]
#[path = "../../tests/unit/story/install.rs"]
mod tests;
