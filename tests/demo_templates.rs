//! The sample templates and song shipped in `demos/`

use std::path::{Path, PathBuf};

use auto_lyrics::parse_file;
use auto_lyrics::plate::plan_song;
use auto_lyrics::renderer::DryRunRenderer;
use auto_lyrics::template::Placeholder;
use auto_lyrics::{Plate, PlateTemplates, SlideGenerator};

fn demo(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos").join(name)
}

fn templates() -> PlateTemplates {
    PlateTemplates::load(&demo("basebackground.svg"), &demo("introslide.svg"))
        .expect("demo templates should load")
}

#[test]
fn test_demo_templates_expose_expected_placeholders() {
    let templates = templates();
    assert_eq!(templates.slot_capacity(), 4);
    assert_eq!(
        templates.title().placeholders(),
        vec![
            Placeholder::Title,
            Placeholder::Author,
            Placeholder::CcliSong,
            Placeholder::CcliLicence,
        ]
    );
}

#[test]
fn test_demo_song_plan() {
    let song = parse_file(&demo("amazing-grace.txt")).unwrap();
    let stems: Vec<String> = plan_song(&song, templates().slot_capacity())
        .iter()
        .map(|p| p.stem().to_string())
        .collect();
    assert_eq!(
        stems,
        vec![
            "V1-01-Amazinggracehow",
            "V2-01-Twasgracethatta",
            "C-01-Mychainsaregone",
            "C-02-Unendingloveama",
            "E-01-Theearthshallso",
            "titleslide",
        ]
    );
}

#[test]
fn test_demo_title_slide_text() {
    let templates = templates();
    let song = parse_file(&demo("amazing-grace.txt")).unwrap();
    let title = plan_song(&song, templates.slot_capacity())
        .into_iter()
        .find(|p| matches!(p, Plate::Title(_)))
        .unwrap();

    let svg = templates.fill(&title);
    let texts: Vec<&str> = svg
        .lines()
        .map(str::trim)
        .filter(|l| l.starts_with("<text"))
        .collect();
    insta::assert_snapshot!(texts.join("\n"), @r#"
    <text id="SongTitle" x="960" y="440" font-size="110">"Amazing Grace (My Chains Are Gone)"</text>
    <text id="SongAuthor" x="960" y="560" font-size="56">John Newton / Chris Tomlin / Louie Giglio</text>
    <text id="CCLIsong" x="960" y="940" font-size="32">CCLI Song # 4768151</text>
    <text x="960" y="990" font-size="32">CCLI Licence # 1234567</text>
    "#);
}

#[test]
fn test_relative_template_paths_keep_scratch_documents_beside_them() {
    // Test binaries run from the package root
    let templates = PlateTemplates::load(
        Path::new("demos/basebackground.svg"),
        Path::new("demos/introslide.svg"),
    )
    .unwrap();
    let song = parse_file(&demo("amazing-grace.txt")).unwrap();
    let output = tempfile::tempdir().unwrap();
    let renderer = DryRunRenderer::new();

    SlideGenerator::new(&templates, &renderer, output.path())
        .generate(&song)
        .unwrap();

    let requests = renderer.requests();
    assert_eq!(requests.len(), 6);
    for request in &requests {
        assert_eq!(request.document.parent(), Some(Path::new("demos")));
        assert!(!request.svg.is_empty());
    }
}
