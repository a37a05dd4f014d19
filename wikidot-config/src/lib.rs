//! Shared configuration loader for the wikidot toolchain.
//!
//! `defaults/wikidot.default.toml` is embedded into every binary so that docs
//! and runtime behavior stay in sync. Applications layer user-specific files
//! on top of those defaults via [`Loader`] before deserializing into
//! [`WikidotConfig`], then build the library's [`RenderingState`] from it.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;
use wikidot_babel::{City, RenderingState, Theme, ThemeKind};

const DEFAULT_TOML: &str = include_str!("../defaults/wikidot.default.toml");

/// Name of the optional per-directory configuration file.
pub const LOCAL_CONFIG_FILE: &str = "wikidot.toml";

/// Top-level configuration consumed by wikidot applications.
#[derive(Debug, Clone, Deserialize)]
pub struct WikidotConfig {
    pub export: ExportConfig,
    pub theme: ThemeConfig,
    pub import: ImportConfig,
    pub inspect: InspectConfig,
}

impl WikidotConfig {
    /// The rendering state described by this configuration.
    pub fn rendering_state(&self) -> Result<RenderingState, ConfigError> {
        Ok(RenderingState::new(
            self.theme.to_theme()?,
            self.export.better_footnotes,
        ))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    pub better_footnotes: bool,
}

/// Theme selection with the options of every theme.
#[derive(Debug, Clone, Deserialize)]
pub struct ThemeConfig {
    pub name: String,
    pub city: String,
    pub basalt: BasaltConfig,
    pub black_highlighter: BlackHighlighterConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BasaltConfig {
    pub dark_mode: bool,
    pub wide: bool,
    pub hide_title: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlackHighlighterConfig {
    pub dark_sidebar: bool,
    pub collapsible_sidebar: bool,
    pub toggle_sidebar: bool,
    pub centered_header: bool,
    pub offices: bool,
}

impl ThemeConfig {
    /// Resolves the configured name and options. Only the options of the
    /// selected theme are read.
    pub fn to_theme(&self) -> Result<Theme, ConfigError> {
        let kind = ThemeKind::from_name(&self.name)
            .ok_or_else(|| ConfigError::Message(format!("unknown theme '{}'", self.name)))?;
        Ok(match kind {
            ThemeKind::None => Theme::None,
            ThemeKind::Basalt => Theme::Basalt {
                dark_mode: self.basalt.dark_mode,
                wide: self.basalt.wide,
                hide_title: self.basalt.hide_title,
            },
            ThemeKind::ShiveringNight => {
                let city = match self.city.trim() {
                    "" => None,
                    name => Some(City::from_name(name).ok_or_else(|| {
                        ConfigError::Message(format!("unknown city '{name}'"))
                    })?),
                };
                Theme::ShiveringNight { city }
            }
            ThemeKind::BlackHighlighter => {
                let bhl = &self.black_highlighter;
                Theme::BlackHighlighter {
                    dark_sidebar: bhl.dark_sidebar,
                    collapsible_sidebar: bhl.collapsible_sidebar,
                    toggle_sidebar: bhl.toggle_sidebar,
                    centered_header: bhl.centered_header,
                    offices: bhl.offices,
                }
            }
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImportConfig {
    pub use_page_metadata: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InspectConfig {
    pub show_attributes: bool,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<WikidotConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<WikidotConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert!(!config.export.better_footnotes);
        assert!(config.import.use_page_metadata);
        assert!(!config.inspect.show_attributes);
        assert_eq!(
            config.rendering_state().expect("state"),
            RenderingState::default()
        );
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("theme.name", "basalt")
            .expect("override to apply")
            .set_override("theme.basalt.wide", true)
            .expect("override to apply")
            .set_override("export.better_footnotes", true)
            .expect("override to apply")
            .build()
            .expect("config to build");
        let state = config.rendering_state().expect("state");
        assert!(state.better_footnotes);
        assert_eq!(
            state.theme,
            Theme::Basalt {
                dark_mode: false,
                wide: true,
                hide_title: false
            }
        );
    }

    #[test]
    fn shivering_city_is_resolved() {
        let config = Loader::new()
            .set_override("theme.name", "shivering-night")
            .expect("override to apply")
            .set_override("theme.city", "dub")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(
            config.theme.to_theme().expect("theme"),
            Theme::ShiveringNight {
                city: Some(City::Dublin)
            }
        );
    }

    #[test]
    fn unknown_theme_is_an_error() {
        let config = Loader::new()
            .set_override("theme.name", "sepia")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert!(config.rendering_state().is_err());
    }

    #[test]
    fn missing_required_file_fails() {
        let result = Loader::new().with_file("/nonexistent/wikidot.toml").build();
        assert!(result.is_err());
    }
}
