//! Rendering every plate of one song into its output directory

use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::error::ParseError;
use crate::parser::ParsedSong;
use crate::plate::{plan_song, Plate};
use crate::renderer::{RenderError, Renderer};
use crate::template::PlateTemplates;

/// Characters that cannot appear in a song directory name
const RESERVED_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Errors that stop one lyric file from producing slides
#[derive(Debug, Error)]
pub enum SongError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{}: {error}", path.display())]
    Parse {
        path: PathBuf,
        /// The file contents, kept for diagnostics
        text: String,
        #[source]
        error: ParseError,
    },

    #[error("cannot create output directory {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl SongError {
    /// A human-readable report, with source context for parse errors
    pub fn report(&self) -> String {
        match self {
            SongError::Parse { path, text, error } => {
                error.format(text, &path.display().to_string())
            }
            other => other.to_string(),
        }
    }
}

/// A plate that could not be rendered
#[derive(Debug)]
pub struct PlateFailure {
    pub stem: String,
    pub error: RenderError,
}

/// What happened to one song
#[derive(Debug)]
pub struct SongReport {
    pub title: String,
    pub directory: PathBuf,
    /// Images written, in plate order
    pub rendered: Vec<PathBuf>,
    pub failures: Vec<PlateFailure>,
}

impl SongReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Fills templates for each plate of a song and hands them to a renderer
pub struct SlideGenerator<'a> {
    templates: &'a PlateTemplates,
    renderer: &'a dyn Renderer,
    output_root: PathBuf,
}

impl<'a> SlideGenerator<'a> {
    pub fn new(
        templates: &'a PlateTemplates,
        renderer: &'a dyn Renderer,
        output_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            templates,
            renderer,
            output_root: output_root.into(),
        }
    }

    pub fn templates(&self) -> &PlateTemplates {
        self.templates
    }

    /// Directory a song's slides are written to
    pub fn song_directory(&self, song: &ParsedSong) -> PathBuf {
        self.output_root.join(song_dir_name(song.title()))
    }

    /// Render every plate of a song.
    ///
    /// A plate that fails to render is recorded in the report and the
    /// remaining plates are still attempted.
    pub fn generate(&self, song: &ParsedSong) -> Result<SongReport, SongError> {
        let directory = self.song_directory(song);
        std::fs::create_dir_all(&directory).map_err(|e| SongError::OutputDir {
            path: directory.clone(),
            source: e,
        })?;

        let plates = plan_song(song, self.templates.slot_capacity());
        debug!(title = song.title(), plates = plates.len(), "planned song");

        let mut report = SongReport {
            title: song.title().to_string(),
            directory,
            rendered: Vec::with_capacity(plates.len()),
            failures: Vec::new(),
        };

        for plate in &plates {
            match self.render_plate(plate, &report.directory) {
                Ok(path) => report.rendered.push(path),
                Err(error) => {
                    warn!(stem = plate.stem(), %error, "plate failed");
                    report.failures.push(PlateFailure {
                        stem: plate.stem().to_string(),
                        error,
                    });
                }
            }
        }

        info!(
            title = %report.title,
            rendered = report.rendered.len(),
            failed = report.failures.len(),
            "song done"
        );
        Ok(report)
    }

    fn render_plate(&self, plate: &Plate, directory: &Path) -> Result<PathBuf, RenderError> {
        let template = self.templates.template_for(plate);
        let svg = template.fill(&plate.substitutions());

        // Next to the template so relative hrefs in it still resolve
        let scratch_dir = template
            .resources_dir()
            .map(Path::to_path_buf)
            .unwrap_or_else(std::env::temp_dir);
        let io_error = |source: std::io::Error| RenderError::Io {
            path: scratch_dir.clone(),
            source,
        };

        let mut document = tempfile::Builder::new()
            .prefix(".autolyrics-")
            .suffix(".svg")
            .tempfile_in(&scratch_dir)
            .map_err(io_error)?;
        document
            .write_all(svg.as_bytes())
            .and_then(|()| document.flush())
            .map_err(io_error)?;

        self.renderer
            .render(document.path(), &directory.join(plate.stem()))
    }
}

/// A song title made safe to use as a single directory name
pub fn song_dir_name(title: &str) -> String {
    let name: String = title
        .chars()
        .map(|c| {
            if RESERVED_CHARS.contains(&c) || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();
    let name = name.trim().trim_end_matches('.').to_string();
    if name.is_empty() {
        "untitled".to_string()
    } else {
        name
    }
}
