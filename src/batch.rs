//! Processing many lyric files, each in isolation

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::generate::{SlideGenerator, SongError, SongReport};
use crate::parser::{parse, ParsedSong};

/// Lyric files in `dir` with the given extension, sorted by path
pub fn discover(dir: &Path, extension: &str) -> std::io::Result<Vec<PathBuf>> {
    let wanted = extension.trim_start_matches('.');
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(wanted));
        if matches {
            files.push(path);
        }
    }
    files.sort();
    debug!(dir = %dir.display(), count = files.len(), "discovered lyric files");
    Ok(files)
}

/// Read and parse one lyric file
pub fn parse_file(path: &Path) -> Result<ParsedSong, SongError> {
    let text = std::fs::read_to_string(path).map_err(|e| SongError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    match parse(&text) {
        Ok(song) => Ok(song),
        Err(error) => Err(SongError::Parse {
            path: path.to_path_buf(),
            text,
            error,
        }),
    }
}

/// Read, parse and render one lyric file
pub fn process_file(generator: &SlideGenerator<'_>, path: &Path) -> Result<SongReport, SongError> {
    let song = parse_file(path)?;
    generator.generate(&song)
}

/// Result of one file in a batch
#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub result: Result<SongReport, SongError>,
}

/// Results of a whole batch, in input order
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<FileOutcome>,
}

impl BatchReport {
    /// Songs that produced a report, even if some plates failed
    pub fn songs(&self) -> impl Iterator<Item = &SongReport> {
        self.outcomes.iter().filter_map(|o| o.result.as_ref().ok())
    }

    /// Files that produced no slides at all
    pub fn failed_files(&self) -> impl Iterator<Item = (&Path, &SongError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.path.as_path(), e)))
    }

    pub fn rendered_count(&self) -> usize {
        self.songs().map(|s| s.rendered.len()).sum()
    }

    pub fn failed_plate_count(&self) -> usize {
        self.songs().map(|s| s.failures.len()).sum()
    }

    /// True when every file parsed and every plate rendered
    pub fn is_success(&self) -> bool {
        self.failed_files().next().is_none() && self.failed_plate_count() == 0
    }
}

/// Process each file independently; a failing file never stops the others
pub fn run_batch(generator: &SlideGenerator<'_>, files: &[PathBuf]) -> BatchReport {
    let mut report = BatchReport::default();
    for path in files {
        let result = process_file(generator, path);
        if let Err(error) = &result {
            warn!(file = %path.display(), %error, "skipping file");
        }
        report.outcomes.push(FileOutcome {
            path: path.clone(),
            result,
        });
    }
    report
}
