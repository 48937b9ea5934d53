//! JSON configuration for a carousel run.

use std::path::{Path, PathBuf};

use crate::assemble::carousel::AssembleOpts;
use crate::foundation::error::{CarouselError, CarouselResult};
use crate::logging::LoggingConfig;
use crate::render::engine::Engine;
use crate::story::builder::StoryboardBuilder;
use crate::story::install::{InstallStrategy, ModuleFetchStrategy};
use crate::style::theme::{Branding, Theme};
use crate::text::fonts::FontConfig;

/// Everything tunable about a run. Every field falls back to the built-in defaults.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// Base directory slides are written under.
    pub output_dir: PathBuf,
    pub fonts: FontConfig,
    pub theme: Theme,
    pub branding: Branding,
    /// Installation-card rule.
    pub install: ModuleFetchStrategy,
    pub render: AssembleOpts,
    pub logging: LoggingConfig,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            fonts: FontConfig::default(),
            theme: Theme::default(),
            branding: Branding::default(),
            install: ModuleFetchStrategy::default(),
            render: AssembleOpts::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl CarouselConfig {
    /// Read a JSON config file. A missing or unreadable file is a [`CarouselError::Config`].
    pub fn load(path: &Path) -> CarouselResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            CarouselError::config(format!("read config '{}': {e}", path.display()))
        })?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(s: &str) -> CarouselResult<Self> {
        serde_json::from_str(s).map_err(|e| CarouselError::config(format!("parse config: {e}")))
    }

    pub fn to_json_pretty(&self) -> CarouselResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| CarouselError::serde(e.to_string()))
    }

    pub fn storyboard_builder(&self) -> StoryboardBuilder {
        let install: Box<dyn InstallStrategy> = Box::new(self.install.clone());
        StoryboardBuilder::new(self.branding.clone()).with_strategies(vec![install])
    }

    /// Load fonts and build the rendering engine.
    pub fn engine(&self) -> CarouselResult<Engine> {
        Engine::from_config(&self.fonts, self.theme.clone(), self.branding.clone())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config/config.rs"]
mod tests;
