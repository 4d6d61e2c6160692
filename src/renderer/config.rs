//! Configuration for slide rasterization

use std::path::PathBuf;

use serde::Deserialize;

/// Output width of every slide, in pixels
pub const DEFAULT_WIDTH: u32 = 1920;

/// Which renderer turns SVG into PNG
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// External Inkscape process
    #[default]
    Inkscape,
    /// In-process resvg rasterizer
    Resvg,
}

/// Command-line dialect of the Inkscape binary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InkscapeCli {
    /// Inkscape 1.x: `-C -o out.png -w W input.svg`
    #[default]
    Modern,
    /// Inkscape 0.92: `-z -C -e=out.png -f=input.svg -w=W`
    Legacy,
}

/// Configuration options for rendering
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    pub backend: Backend,
    /// Output width in pixels; height follows the template's aspect ratio
    pub width: u32,
    /// Inkscape executable
    pub inkscape: PathBuf,
    pub inkscape_cli: InkscapeCli,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            width: DEFAULT_WIDTH,
            inkscape: default_inkscape(),
            inkscape_cli: InkscapeCli::default(),
        }
    }
}

fn default_inkscape() -> PathBuf {
    if cfg!(windows) {
        PathBuf::from(r"C:\Program Files\Inkscape\bin\inkscape.exe")
    } else {
        PathBuf::from("inkscape")
    }
}

impl RendererConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rendering backend
    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    /// Set the output width
    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    /// Set the Inkscape executable
    pub fn with_inkscape(mut self, path: impl Into<PathBuf>) -> Self {
        self.inkscape = path.into();
        self
    }

    /// Set the Inkscape command-line dialect
    pub fn with_inkscape_cli(mut self, cli: InkscapeCli) -> Self {
        self.inkscape_cli = cli;
        self
    }
}
