//! Splitting lyric sections into fixed-capacity word plates

use crate::parser::{ParsedSong, Section};

use super::types::WordPlate;

/// Maximum number of lyric characters kept in a file name stem
pub const STEM_TEXT_LEN: usize = 15;

/// Characters removed from lyric text before it becomes part of a file name
const STRIPPED_CHARS: &[char] = &['\'', '\u{2019}', '/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Split every lyric section of a song into word plates.
///
/// Sections are visited in first-appearance order and CCLI blocks are skipped.
/// Each chunk holds at most `slot_capacity` lines and short chunks are padded
/// with blank lines so every plate fills every slot.
pub fn paginate(song: &ParsedSong, slot_capacity: usize) -> Vec<WordPlate> {
    if slot_capacity == 0 {
        return Vec::new();
    }
    song.lyric_sections()
        .flat_map(|section| paginate_section(section, slot_capacity))
        .collect()
}

/// Split one section into word plates, numbering chunks from 1
pub fn paginate_section(section: &Section, slot_capacity: usize) -> Vec<WordPlate> {
    if slot_capacity == 0 {
        return Vec::new();
    }
    let initials = section_initials(&section.name);
    section
        .lines
        .chunks(slot_capacity)
        .enumerate()
        .map(|(i, chunk)| {
            let index = i + 1;
            let lines = pad_chunk(chunk, slot_capacity);
            WordPlate {
                section: section.name.clone(),
                index,
                stem: plate_stem(&initials, index, &lines),
                lines,
            }
        })
        .collect()
}

/// Center a short chunk by adding blank lines at both ends.
///
/// Of a deficit `d`, `d / 2` blanks go before the lines and the rest after.
pub fn pad_chunk(chunk: &[String], slot_capacity: usize) -> Vec<String> {
    let deficit = slot_capacity.saturating_sub(chunk.len());
    let leading = deficit / 2;
    let trailing = deficit - leading;

    let mut lines = Vec::with_capacity(chunk.len().max(slot_capacity));
    lines.extend(std::iter::repeat(String::new()).take(leading));
    lines.extend(chunk.iter().cloned());
    lines.extend(std::iter::repeat(String::new()).take(trailing));
    lines
}

/// First character of each word of a section name.
///
/// Words are split on whitespace and hyphens, so "Pre-Chorus 2" becomes "PC2".
/// Initials that cannot appear in a file name are dropped.
pub fn section_initials(name: &str) -> String {
    name.split(|c: char| c.is_whitespace() || c == '-')
        .filter_map(|word| word.chars().next())
        .filter(|c| !STRIPPED_CHARS.contains(c))
        .collect()
}

/// Lyric text squeezed into a short file-name-safe fragment
pub fn compact_text<S: AsRef<str>>(lines: &[S]) -> String {
    lines
        .iter()
        .flat_map(|line| line.as_ref().chars())
        .filter(|c| !c.is_whitespace() && !STRIPPED_CHARS.contains(c))
        .take(STEM_TEXT_LEN)
        .collect()
}

/// `{initials}-{index:02}-{compact text}`
pub fn plate_stem<S: AsRef<str>>(initials: &str, index: usize, lines: &[S]) -> String {
    format!("{}-{:02}-{}", initials, index, compact_text(lines))
}
