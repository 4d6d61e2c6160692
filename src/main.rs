//! Auto Lyrics CLI
//!
//! Usage:
//!   auto-lyrics [OPTIONS] [FILES]...
//!
//! With no files, every lyric file in the input directory is processed.
//! Settings are read from `autolyrics.toml` when present; flags override them.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use auto_lyrics::config::DEFAULT_CONFIG_FILE;
use auto_lyrics::renderer::{self, Backend, DryRunRenderer, InkscapeCli, Renderer};
use auto_lyrics::{discover, run_batch, BatchReport, PlateTemplates, Settings, SlideGenerator};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BackendArg {
    /// Shell out to Inkscape
    Inkscape,
    /// Rasterize in-process
    Resvg,
}

impl From<BackendArg> for Backend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Inkscape => Backend::Inkscape,
            BackendArg::Resvg => Backend::Resvg,
        }
    }
}

#[derive(Parser)]
#[command(name = "auto-lyrics")]
#[command(about = "Turn lyric text files into presentation slides")]
#[command(version)]
struct Cli {
    /// Lyric files (defaults to every matching file in the input directory)
    files: Vec<PathBuf>,

    /// Settings file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// SVG template for lyric plates
    #[arg(long)]
    words_template: Option<PathBuf>,

    /// SVG template for the title slide
    #[arg(long)]
    title_template: Option<PathBuf>,

    /// Directory that receives one folder per song
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory searched for lyric files
    #[arg(long)]
    input_dir: Option<PathBuf>,

    /// Extension of lyric files
    #[arg(long)]
    extension: Option<String>,

    /// Rasterizer used for the slides
    #[arg(long, value_enum)]
    backend: Option<BackendArg>,

    /// Slide width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Path to the Inkscape executable
    #[arg(long)]
    inkscape: Option<PathBuf>,

    /// Use the Inkscape 0.9x command line
    #[arg(long)]
    legacy_inkscape: bool,

    /// Fill templates but write no images
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Show debug output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set up logging")?;

    let settings = apply_flags(load_settings(cli.config.as_deref())?, &cli);
    debug!(?settings, "effective settings");

    let templates = PlateTemplates::load(&settings.templates.words, &settings.templates.title)
        .context("Failed to load slide templates")?;

    let files = if cli.files.is_empty() {
        discover(&settings.input.directory, &settings.input.extension).with_context(|| {
            format!(
                "Failed to list lyric files in '{}'",
                settings.input.directory.display()
            )
        })?
    } else {
        cli.files.clone()
    };
    if files.is_empty() {
        info!(
            "No .{} files found in {}",
            settings.input.extension.trim_start_matches('.'),
            settings.input.directory.display()
        );
        return Ok(ExitCode::SUCCESS);
    }

    let renderer: Box<dyn Renderer> = if cli.dry_run {
        Box::new(DryRunRenderer::new())
    } else {
        let font_dir = settings.templates.words.parent();
        renderer::from_config(&settings.renderer, font_dir)
    };
    let generator = SlideGenerator::new(&templates, renderer.as_ref(), &settings.output.directory);
    let report = run_batch(&generator, &files);

    print_failures(&report);
    println!(
        "{} song(s), {} slide(s) written, {} slide(s) failed, {} file(s) skipped",
        report.songs().count(),
        report.rendered_count(),
        report.failed_plate_count(),
        report.failed_files().count()
    );

    Ok(if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn load_settings(explicit: Option<&Path>) -> Result<Settings> {
    match explicit {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("Error loading config '{}'", path.display())),
        None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
            Settings::from_file(Path::new(DEFAULT_CONFIG_FILE))
                .with_context(|| format!("Error loading config '{}'", DEFAULT_CONFIG_FILE))
        }
        None => Ok(Settings::default()),
    }
}

fn apply_flags(mut settings: Settings, cli: &Cli) -> Settings {
    if let Some(path) = &cli.words_template {
        settings = settings.with_words_template(path);
    }
    if let Some(path) = &cli.title_template {
        settings = settings.with_title_template(path);
    }
    if let Some(dir) = &cli.input_dir {
        settings = settings.with_input_dir(dir);
    }
    if let Some(dir) = &cli.output {
        settings = settings.with_output_dir(dir);
    }
    if let Some(extension) = &cli.extension {
        settings.input.extension = extension.clone();
    }

    let mut renderer = settings.renderer.clone();
    if let Some(backend) = cli.backend {
        renderer = renderer.with_backend(backend.into());
    }
    if let Some(width) = cli.width {
        renderer = renderer.with_width(width);
    }
    if let Some(path) = &cli.inkscape {
        renderer = renderer.with_inkscape(path);
    }
    if cli.legacy_inkscape {
        renderer = renderer.with_inkscape_cli(InkscapeCli::Legacy);
    }
    settings.with_renderer(renderer)
}

fn print_failures(report: &BatchReport) {
    for (_, error) in report.failed_files() {
        eprintln!("{}", error.report());
    }
    for song in report.songs() {
        for failure in &song.failures {
            eprintln!("{}: {}: {}", song.title, failure.stem, failure.error);
        }
    }
}
