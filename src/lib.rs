//! Auto Lyrics - Turn plain-text lyric files into presentation slides
//!
//! This library parses lyric files, paginates their sections onto SVG
//! templates and hands each filled plate to a rasterizer.
//!
//! # Example
//!
//! ```rust
//! use auto_lyrics::{plan, PlateTemplates, SvgTemplate, TemplateKind};
//!
//! let words = SvgTemplate::parse(
//!     "words.svg",
//!     r#"<svg xmlns="http://www.w3.org/2000/svg"><text id="words"><tspan>a</tspan><tspan>b</tspan></text></svg>"#,
//!     TemplateKind::Words,
//! ).unwrap();
//! let title = SvgTemplate::parse(
//!     "title.svg",
//!     r#"<svg xmlns="http://www.w3.org/2000/svg"><text id="SongTitle">t</text><text id="SongAuthor">a</text></svg>"#,
//!     TemplateKind::Title,
//! ).unwrap();
//! let templates = PlateTemplates::new(words, title).unwrap();
//!
//! let plates = plan("Amazing Grace\nVerse 1\nAmazing grace\nCCLI Song # 22025\nJohn Newton\n", &templates).unwrap();
//! let stems: Vec<_> = plates.iter().map(|p| p.stem()).collect();
//! assert_eq!(stems, ["V1-01-Amazinggrace", "titleslide"]);
//! ```

pub mod batch;
pub mod config;
pub mod error;
pub mod generate;
pub mod parser;
pub mod plate;
pub mod renderer;
pub mod template;

pub use batch::{discover, parse_file, run_batch, BatchReport};
pub use config::{ConfigError, Settings};
pub use error::ParseError;
pub use generate::{SlideGenerator, SongError, SongReport};
pub use parser::{parse, ParsedSong};
pub use plate::{Plate, TitlePlate, WordPlate};
pub use renderer::{RenderError, Renderer, RendererConfig};
pub use template::{PlateTemplates, SvgTemplate, TemplateError, TemplateKind};

/// Parse lyric source and lay it out on the given templates
///
/// Returns the plates in render order without touching the filesystem.
///
/// # Example
///
/// ```rust
/// use auto_lyrics::{plan, PlateTemplates, SvgTemplate, TemplateKind};
///
/// # let words = SvgTemplate::parse("w", r#"<svg><text id="words"><tspan/><tspan/></text></svg>"#, TemplateKind::Words).unwrap();
/// # let title = SvgTemplate::parse("t", r#"<svg><text id="SongTitle"/><text id="SongAuthor"/></svg>"#, TemplateKind::Title).unwrap();
/// # let templates = PlateTemplates::new(words, title).unwrap();
/// let err = plan("Just a title\nVerse 1\nno licence block\n", &templates).unwrap_err();
/// assert!(err.to_string().contains("CCLI"));
/// ```
pub fn plan(source: &str, templates: &PlateTemplates) -> Result<Vec<Plate>, ParseError> {
    let song = parse(source)?;
    Ok(plate::plan_song(&song, templates.slot_capacity()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::{Placeholder, Substitution};

    const WORDS: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="1920" height="1080">
  <text id="words">
    <tspan>line one</tspan>
    <tspan>line two</tspan>
  </text>
</svg>"#;

    const TITLE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="1920" height="1080">
  <text id="SongTitle">Title</text>
  <text id="SongAuthor">Author</text>
  <text>&lt;CCLIsong&gt;</text>
</svg>"#;

    fn templates() -> PlateTemplates {
        PlateTemplates::new(
            SvgTemplate::parse("words.svg", WORDS, TemplateKind::Words).unwrap(),
            SvgTemplate::parse("title.svg", TITLE, TemplateKind::Title).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_plan_simple_song() {
        let source = "Song\nChorus\nHello\nWorld\nAgain\nCCLI Song # 7\nJane Roe\n";
        let plates = plan(source, &templates()).unwrap();
        let stems: Vec<_> = plates.iter().map(Plate::stem).collect();
        assert_eq!(stems, ["C-01-HelloWorld", "C-02-Again", "titleslide"]);
    }

    #[test]
    fn test_plan_rejects_missing_ccli() {
        let err = plan("Song\nVerse 1\nla la\n", &templates()).unwrap_err();
        assert!(matches!(err, ParseError::MissingCcliBlock { .. }));
    }

    #[test]
    fn test_title_plate_fills_token_site() {
        let plates = plan("Song\nVerse\nx\nCCLI Song # 99\nA\n", &templates()).unwrap();
        let title = plates.last().unwrap();
        let svg = templates().fill(title);
        assert!(svg.contains(">99<"));
        assert!(svg.contains("\"Song\""));
        assert!(!svg.contains("&lt;CCLIsong&gt;"));
    }

    #[test]
    fn test_substitution_reexports() {
        let sub = Substitution::new(Placeholder::Words(0), "x");
        assert_eq!(sub.placeholder, Placeholder::Words(0));
    }
}
