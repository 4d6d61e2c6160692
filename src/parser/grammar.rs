//! Line-oriented parser for lyric files

use crate::error::{ParseError, Span};

use super::marker::{is_ccli_key, SectionMarker};
use super::song::ParsedSong;

/// Where new content lines go
enum Block {
    Title,
    Section(usize),
}

/// Parse a lyric file held in memory
pub fn parse(source: &str) -> Result<ParsedSong, ParseError> {
    let mut offset = 0;
    let lines = source.split_inclusive('\n').map(|raw| {
        let start = offset;
        offset += raw.len();
        (start, raw)
    });
    parse_spanned(lines)
}

/// Parse a sequence of lines, as if they were joined with `\n`
pub fn parse_lines<I, S>(lines: I) -> Result<ParsedSong, ParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let owned: Vec<S> = lines.into_iter().collect();
    let mut offset = 0;
    let spanned = owned.iter().map(|line| {
        let line = line.as_ref();
        let start = offset;
        offset += line.len() + 1;
        (start, line)
    });
    parse_spanned(spanned)
}

fn parse_spanned<'a>(lines: impl Iterator<Item = (usize, &'a str)>) -> Result<ParsedSong, ParseError> {
    let mut song = ParsedSong {
        title_lines: Vec::new(),
        sections: Vec::new(),
        order: Vec::new(),
    };
    let mut current = Block::Title;
    let mut last_span: Option<Span> = None;

    for (start, raw) in lines {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let lead = raw.len() - raw.trim_start().len();
        let span = start + lead..start + lead + line.len();

        if SectionMarker::detect(line).is_some() {
            current = Block::Section(song.open_section(line));
            song.order.push(line.to_string());
            last_span = Some(span);
            continue;
        }

        match current {
            Block::Title => song.title_lines.push(line.to_string()),
            Block::Section(index) => song.sections[index].lines.push(line.to_string()),
        }
    }

    match song.order.last() {
        Some(name) if is_ccli_key(name) => {
            song.order.pop();
        }
        last => {
            return Err(ParseError::MissingCcliBlock {
                span: last_span,
                last_marker: last.cloned(),
            });
        }
    }

    Ok(song)
}
