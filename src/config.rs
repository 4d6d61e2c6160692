//! Settings file support
//!
//! Settings come from an optional TOML file layered over built-in defaults.
//! Every key is optional; a missing table keeps its defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::renderer::RendererConfig;

/// File picked up from the working directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "autolyrics.toml";

/// Errors that can occur when loading or parsing settings
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Built-in settings, matching the file names the slides were designed with
const DEFAULT_SETTINGS: &str = r#"
[templates]
# Background plate with the lyric line slots
words = "basebackground.svg"
# Opening slide with title, author and CCLI fields
title = "introslide.svg"

[input]
directory = "."
extension = "txt"

[output]
directory = "."

[renderer]
backend = "inkscape"
width = 1920
inkscape_cli = "modern"
"#;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TemplatePaths {
    pub words: PathBuf,
    pub title: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InputSettings {
    /// Where lyric files are discovered
    pub directory: PathBuf,
    /// Extension of lyric files, without the dot
    pub extension: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OutputSettings {
    /// Parent of the per-song output directories
    pub directory: PathBuf,
}

/// Complete settings for a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub templates: TemplatePaths,
    pub input: InputSettings,
    pub output: OutputSettings,
    pub renderer: RendererConfig,
}

/// TOML structure for deserializing settings; absent tables keep defaults
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlSettings {
    templates: Option<TomlTemplates>,
    input: Option<TomlInput>,
    output: Option<TomlOutput>,
    renderer: Option<RendererConfig>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlTemplates {
    words: Option<PathBuf>,
    title: Option<PathBuf>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlInput {
    directory: Option<PathBuf>,
    extension: Option<String>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlOutput {
    directory: Option<PathBuf>,
}

impl Settings {
    /// Load settings from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut settings = Self::from_str(&content)?;
        settings.relative_to(path.parent().unwrap_or(Path::new("")));
        Ok(settings)
    }

    /// Load settings from a TOML string, filling gaps from the defaults
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let parsed: TomlSettings = toml::from_str(content)?;
        let mut settings = Self::builtin()?;

        if let Some(templates) = parsed.templates {
            if let Some(words) = templates.words {
                settings.templates.words = words;
            }
            if let Some(title) = templates.title {
                settings.templates.title = title;
            }
        }
        if let Some(input) = parsed.input {
            if let Some(directory) = input.directory {
                settings.input.directory = directory;
            }
            if let Some(extension) = input.extension {
                settings.input.extension = extension;
            }
        }
        if let Some(output) = parsed.output {
            if let Some(directory) = output.directory {
                settings.output.directory = directory;
            }
        }
        if let Some(renderer) = parsed.renderer {
            settings.renderer = renderer;
        }
        Ok(settings)
    }

    fn builtin() -> Result<Self, ConfigError> {
        let parsed: TomlSettings = toml::from_str(DEFAULT_SETTINGS)?;
        let templates = parsed.templates.unwrap_or(TomlTemplates {
            words: None,
            title: None,
        });
        let input = parsed.input.unwrap_or(TomlInput {
            directory: None,
            extension: None,
        });
        let output = parsed.output.unwrap_or(TomlOutput { directory: None });
        Ok(Settings {
            templates: TemplatePaths {
                words: templates.words.unwrap_or_default(),
                title: templates.title.unwrap_or_default(),
            },
            input: InputSettings {
                directory: input.directory.unwrap_or_default(),
                extension: input.extension.unwrap_or_default(),
            },
            output: OutputSettings {
                directory: output.directory.unwrap_or_default(),
            },
            renderer: parsed.renderer.unwrap_or_default(),
        })
    }

    /// Resolve relative paths against the directory the settings file lives in
    fn relative_to(&mut self, base: &Path) {
        for path in [
            &mut self.templates.words,
            &mut self.templates.title,
            &mut self.input.directory,
            &mut self.output.directory,
        ] {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }

    /// Set the word template path
    pub fn with_words_template(mut self, path: impl Into<PathBuf>) -> Self {
        self.templates.words = path.into();
        self
    }

    /// Set the title template path
    pub fn with_title_template(mut self, path: impl Into<PathBuf>) -> Self {
        self.templates.title = path.into();
        self
    }

    /// Set the directory lyric files are discovered in
    pub fn with_input_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.input.directory = path.into();
        self
    }

    /// Set the output root directory
    pub fn with_output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output.directory = path.into();
        self
    }

    /// Set the renderer configuration
    pub fn with_renderer(mut self, renderer: RendererConfig) -> Self {
        self.renderer = renderer;
        self
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::builtin().expect("Default settings should be valid TOML")
    }
}
