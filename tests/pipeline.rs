//! End-to-end tests: lyric file in, one render request per plate out

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use auto_lyrics::batch::process_file;
use auto_lyrics::plate::TITLE_STEM;
use auto_lyrics::renderer::{png_path, DryRunRenderer, RenderError};
use auto_lyrics::{run_batch, PlateTemplates, Renderer, SlideGenerator, SongError};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const WORDS_2: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="1920" height="1080">
  <rect width="1920" height="1080" fill="#102040"/>
  <text id="words" x="960" y="480" font-size="72" fill="white">
    <tspan x="960" dy="0">Line one</tspan>
    <tspan x="960" dy="90">Line two</tspan>
  </text>
</svg>
"##;

const WORDS_3: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="1920" height="1080">
  <text id="words">
    <tspan id="l1">one</tspan>
    <tspan id="l2">two</tspan>
    <tspan id="l3">three</tspan>
  </text>
</svg>
"##;

const TITLE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="1920" height="1080">
  <text id="SongTitle">Song Title</text>
  <text id="SongAuthor">Song Author</text>
  <text id="CCLIsong">CCLI Song # 0</text>
  <text>Licence &lt;CCLIlicence&gt; on file</text>
</svg>
"##;

const HELLO_WORLD: &str =
    "Verse 1\nHello\nWorld\n\nCCLI Song # 123\nJohn Doe|Jane Roe\nCCLI Licence No. 456\n";

const GRACE: &str = "\
Amazing Grace

Verse 1
Amazing grace how sweet the sound
That saved a wretch like me
I once was lost but now am found

Chorus
My chains are gone

CCLI Song # 4768151
John Newton | Chris Tomlin
CCLI Licence No. 11223344
";

/// Templates and lyric files in one scratch directory, output in another
struct Workspace {
    templates_dir: TempDir,
    output_dir: TempDir,
    templates: PlateTemplates,
}

impl Workspace {
    fn new(words: &str) -> Self {
        let templates_dir = tempfile::tempdir().unwrap();
        let words_path = templates_dir.path().join("basebackground.svg");
        let title_path = templates_dir.path().join("introslide.svg");
        std::fs::write(&words_path, words).unwrap();
        std::fs::write(&title_path, TITLE).unwrap();
        let templates = PlateTemplates::load(&words_path, &title_path).unwrap();
        Self {
            templates_dir,
            output_dir: tempfile::tempdir().unwrap(),
            templates,
        }
    }

    fn lyric_file(&self, name: &str, text: &str) -> PathBuf {
        let path = self.templates_dir.path().join(name);
        std::fs::write(&path, text).unwrap();
        path
    }

    fn generator<'a>(&'a self, renderer: &'a dyn Renderer) -> SlideGenerator<'a> {
        SlideGenerator::new(&self.templates, renderer, self.output_dir.path())
    }
}

/// Writes a placeholder PNG for every request and remembers the stems
#[derive(Default)]
struct RecordingRenderer {
    stems: RefCell<Vec<PathBuf>>,
}

impl Renderer for RecordingRenderer {
    fn render(&self, document: &Path, output_stem: &Path) -> Result<PathBuf, RenderError> {
        assert!(document.is_file(), "document must exist while rendering");
        let output = png_path(output_stem);
        std::fs::write(&output, b"\x89PNG").map_err(|e| RenderError::Io {
            path: output.clone(),
            source: e,
        })?;
        self.stems.borrow_mut().push(output_stem.to_path_buf());
        Ok(output)
    }
}

/// Fails every plate whose stem starts with the given prefix
struct FailingRenderer {
    prefix: &'static str,
    inner: RecordingRenderer,
}

impl Renderer for FailingRenderer {
    fn render(&self, document: &Path, output_stem: &Path) -> Result<PathBuf, RenderError> {
        let name = output_stem.file_name().unwrap().to_string_lossy();
        if name.starts_with(self.prefix) {
            return Err(RenderError::Raster {
                path: document.to_path_buf(),
                message: "simulated failure".to_string(),
            });
        }
        self.inner.render(document, output_stem)
    }
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_two_slot_song_without_title() {
    let ws = Workspace::new(WORDS_2);
    let path = ws.lyric_file("hello.txt", HELLO_WORLD);
    let renderer = DryRunRenderer::new();

    let report = process_file(&ws.generator(&renderer), &path).expect("Should render");
    assert!(report.is_success());
    assert_eq!(report.directory, ws.output_dir.path().join("untitled"));

    let requests = renderer.requests();
    let stems: Vec<_> = requests
        .iter()
        .map(|r| r.output_stem.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(stems, vec!["V1-01-HelloWorld", TITLE_STEM]);

    let words = &requests[0].svg;
    assert!(words.contains(r#"<tspan x="960" dy="0">Hello</tspan>"#));
    assert!(words.contains(r#"<tspan x="960" dy="90">World</tspan>"#));
    assert!(!words.contains("Line one"));

    let title = &requests[1].svg;
    assert!(title.contains(r#"<text id="SongAuthor">John Doe/Jane Roe</text>"#));
    assert!(title.contains(r#"<text id="CCLIsong">CCLI Song # 123</text>"#));
    assert!(title.contains("<text>Licence 456 on file</text>"));
    assert!(title.contains(r#"<text id="SongTitle">""</text>"#));
}

#[test]
fn test_slashed_section_name_renders_inside_song_directory() {
    let ws = Workspace::new(WORDS_2);
    let path = ws.lyric_file("song.txt", "Song\nVerse 3 / Chorus\nHello\nCCLI Song # 1\nA\n");
    let renderer = RecordingRenderer::default();

    let report = process_file(&ws.generator(&renderer), &path).unwrap();
    assert!(report.is_success());
    assert_eq!(
        file_names(&ws.output_dir.path().join("Song")),
        vec!["V3C-01-Hello.png", "titleslide.png"]
    );
}

#[test]
fn test_short_section_is_centered_on_three_slots() {
    let ws = Workspace::new(WORDS_3);
    let path = ws.lyric_file("one.txt", "One Line\nChorus\nHello\nCCLI Song # 1\nAnon\n");
    let renderer = DryRunRenderer::new();

    process_file(&ws.generator(&renderer), &path).unwrap();
    let svg = &renderer.requests()[0].svg;
    assert!(svg.contains(r#"<tspan id="l1"></tspan>"#));
    assert!(svg.contains(r#"<tspan id="l2">Hello</tspan>"#));
    assert!(svg.contains(r#"<tspan id="l3"></tspan>"#));
}

#[test]
fn test_plates_do_not_leak_text_into_each_other() {
    let ws = Workspace::new(WORDS_2);
    let path = ws.lyric_file("grace.txt", GRACE);
    let renderer = DryRunRenderer::new();

    process_file(&ws.generator(&renderer), &path).unwrap();
    let requests = renderer.requests();
    assert_eq!(requests.len(), 4);

    // Second verse plate has one line and one pad, never the previous chunk's text
    let second = &requests[1].svg;
    assert!(second.contains("I once was lost but now am found"));
    assert!(!second.contains("That saved a wretch like me"));
    assert!(!second.contains("Line two"));
}

#[test]
fn test_one_title_slide_per_song_and_images_in_song_directory() {
    let ws = Workspace::new(WORDS_2);
    let path = ws.lyric_file("grace.txt", GRACE);
    let renderer = RecordingRenderer::default();

    let report = process_file(&ws.generator(&renderer), &path).unwrap();
    let song_dir = ws.output_dir.path().join("Amazing Grace");
    assert_eq!(report.directory, song_dir);
    assert_eq!(
        file_names(&song_dir),
        vec![
            "C-01-Mychainsaregone.png",
            "V1-01-Amazinggracehow.png",
            "V1-02-Ioncewaslostbut.png",
            "titleslide.png",
        ]
    );
    assert_eq!(
        renderer
            .stems
            .borrow()
            .iter()
            .filter(|s| s.ends_with(TITLE_STEM))
            .count(),
        1
    );
}

#[test]
fn test_no_intermediate_documents_are_left_behind() {
    let ws = Workspace::new(WORDS_2);
    let path = ws.lyric_file("grace.txt", GRACE);
    let renderer = RecordingRenderer::default();

    process_file(&ws.generator(&renderer), &path).unwrap();

    let song_dir = ws.output_dir.path().join("Amazing Grace");
    assert!(file_names(&song_dir).iter().all(|n| n.ends_with(".png")));
    assert!(!file_names(ws.templates_dir.path())
        .iter()
        .any(|n| n.starts_with(".autolyrics-")));
}

#[test]
fn test_failed_plate_does_not_stop_the_song() {
    let ws = Workspace::new(WORDS_2);
    let path = ws.lyric_file("grace.txt", GRACE);
    let renderer = FailingRenderer {
        prefix: "V1-",
        inner: RecordingRenderer::default(),
    };

    let report = process_file(&ws.generator(&renderer), &path).unwrap();
    assert!(!report.is_success());
    let failed: Vec<_> = report.failures.iter().map(|f| f.stem.as_str()).collect();
    assert_eq!(failed, vec!["V1-01-Amazinggracehow", "V1-02-Ioncewaslostbut"]);
    assert_eq!(report.rendered.len(), 2);
    assert!(report.rendered.iter().any(|p| p.ends_with("titleslide.png")));
}

#[test]
fn test_batch_continues_past_malformed_file() {
    let ws = Workspace::new(WORDS_2);
    let files = vec![
        ws.lyric_file("a-broken.txt", "Broken\nVerse 1\nno ccli here\n"),
        ws.lyric_file("b-grace.txt", GRACE),
        ws.templates_dir.path().join("c-missing.txt"),
    ];
    let renderer = DryRunRenderer::new();

    let report = run_batch(&ws.generator(&renderer), &files);
    assert!(!report.is_success());
    assert_eq!(report.songs().count(), 1);
    assert_eq!(report.rendered_count(), 4);

    let failed: Vec<_> = report.failed_files().collect();
    assert_eq!(failed.len(), 2);
    assert!(matches!(failed[0].1, SongError::Parse { .. }));
    assert!(matches!(failed[1].1, SongError::Read { .. }));
    assert!(failed[0].1.report().contains("missing trailing CCLI block"));
}

#[test]
fn test_successful_batch_reports_success() {
    let ws = Workspace::new(WORDS_2);
    let files = vec![
        ws.lyric_file("grace.txt", GRACE),
        ws.lyric_file("hello.txt", HELLO_WORLD),
    ];
    let renderer = DryRunRenderer::new();

    let report = run_batch(&ws.generator(&renderer), &files);
    assert!(report.is_success());
    assert_eq!(report.rendered_count(), 6);
    assert_eq!(report.failed_plate_count(), 0);
}
