//! Rasterizing filled SVG documents into PNG slides
//!
//! The pipeline only sees the [`Renderer`] trait. Adapters shell out to
//! Inkscape, rasterize in-process with resvg, or merely record requests.

pub mod config;
pub mod dry_run;
pub mod inkscape;
pub mod raster;

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use thiserror::Error;

pub use config::{Backend, InkscapeCli, RendererConfig};
pub use dry_run::{DryRunRenderer, RenderRequest};
pub use inkscape::InkscapeRenderer;
pub use raster::ResvgRenderer;

/// Errors raised while rendering a single plate
#[derive(Debug, Error)]
pub enum RenderError {
    /// The external renderer could not be started
    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    /// The external renderer ran but reported failure
    #[error("{program} failed ({status}) writing {}: {stderr}", output.display())]
    Failed {
        program: String,
        status: ExitStatus,
        output: PathBuf,
        stderr: String,
    },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot parse SVG {}: {message}", path.display())]
    Svg { path: PathBuf, message: String },

    #[error("cannot rasterize {}: {message}", path.display())]
    Raster { path: PathBuf, message: String },
}

/// Turns an SVG document on disk into `{output_stem}.png`
pub trait Renderer {
    /// Render `document` and return the path of the written image
    fn render(&self, document: &Path, output_stem: &Path) -> Result<PathBuf, RenderError>;
}

impl<R: Renderer + ?Sized> Renderer for &R {
    fn render(&self, document: &Path, output_stem: &Path) -> Result<PathBuf, RenderError> {
        (**self).render(document, output_stem)
    }
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn render(&self, document: &Path, output_stem: &Path) -> Result<PathBuf, RenderError> {
        (**self).render(document, output_stem)
    }
}

/// `{stem}.png`, keeping any dots already in the stem
pub fn png_path(stem: &Path) -> PathBuf {
    let mut name = OsString::from(stem.as_os_str());
    name.push(".png");
    PathBuf::from(name)
}

/// Build the renderer selected in the configuration.
///
/// `font_dir` is searched for extra fonts by the in-process backend;
/// Inkscape resolves fonts on its own.
pub fn from_config(config: &RendererConfig, font_dir: Option<&Path>) -> Box<dyn Renderer> {
    match config.backend {
        Backend::Inkscape => Box::new(InkscapeRenderer::new(
            config.inkscape.clone(),
            config.inkscape_cli,
            config.width,
        )),
        Backend::Resvg => {
            let renderer = ResvgRenderer::new(config.width);
            Box::new(match font_dir {
                Some(dir) => renderer.with_font_dir(dir),
                None => renderer,
            })
        }
    }
}
