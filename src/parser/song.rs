//! Structured representation of a parsed lyric file

use super::marker::is_ccli_key;

/// A block of lyric lines under one section marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// The literal marker line, e.g. "Verse 1" or "CCLI Song # 22025"
    pub name: String,
    pub lines: Vec<String>,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lines: Vec::new(),
        }
    }

    pub fn is_ccli(&self) -> bool {
        is_ccli_key(&self.name)
    }
}

/// A lyric file segmented into title, sections and their display order.
///
/// Only the parser builds these, so a value always ended its marker
/// sequence with a CCLI block. The title may be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSong {
    pub(crate) title_lines: Vec<String>,
    pub(crate) sections: Vec<Section>,
    pub(crate) order: Vec<String>,
}

impl ParsedSong {
    /// The canonical song title (first line before any marker)
    pub fn title(&self) -> &str {
        self.title_lines
            .first()
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Every line that appeared before the first marker
    pub fn title_lines(&self) -> &[String] {
        &self.title_lines
    }

    /// Section names in the order they were encountered, without the trailing CCLI block
    pub fn order(&self) -> &[String] {
        &self.order
    }

    /// All sections, CCLI ones included, in first-appearance order
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Sections that produce word slides
    pub fn lyric_sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter().filter(|s| !s.is_ccli())
    }

    /// Sections holding CCLI metadata
    pub fn ccli_sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter().filter(|s| s.is_ccli())
    }

    /// Get or create the entry for a marker; a repeated marker keeps adding to its entry
    pub(crate) fn open_section(&mut self, name: &str) -> usize {
        match self.sections.iter().position(|s| s.name == name) {
            Some(index) => index,
            None => {
                self.sections.push(Section::new(name));
                self.sections.len() - 1
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song() -> ParsedSong {
        ParsedSong {
            title_lines: vec!["Amazing Grace".to_string(), "Traditional".to_string()],
            sections: vec![
                Section {
                    name: "Verse 1".to_string(),
                    lines: vec!["Amazing grace".to_string()],
                },
                Section {
                    name: "CCLI Song # 22025".to_string(),
                    lines: vec!["John Newton".to_string()],
                },
            ],
            order: vec!["Verse 1".to_string()],
        }
    }

    #[test]
    fn test_title_is_first_title_line() {
        assert_eq!(song().title(), "Amazing Grace");
        assert_eq!(song().title_lines().len(), 2);
    }

    #[test]
    fn test_lyric_and_ccli_sections_partition() {
        let song = song();
        let lyric: Vec<_> = song.lyric_sections().map(|s| s.name.as_str()).collect();
        let ccli: Vec<_> = song.ccli_sections().map(|s| s.name.as_str()).collect();
        assert_eq!(lyric, vec!["Verse 1"]);
        assert_eq!(ccli, vec!["CCLI Song # 22025"]);
    }

    #[test]
    fn test_open_section_reuses_existing_key() {
        let mut song = song();
        let index = song.open_section("Verse 1");
        assert_eq!(index, 0);
        assert_eq!(song.sections()[0].lines, vec!["Amazing grace".to_string()]);
        assert_eq!(song.sections().len(), 2);

        let index = song.open_section("Chorus");
        assert_eq!(index, 2);
        assert_eq!(song.section("Chorus").map(|s| s.lines.len()), Some(0));
    }
}
