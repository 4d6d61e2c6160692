//! Title slide construction from song title and CCLI metadata

use crate::parser::ParsedSong;

use super::types::TitlePlate;

/// Content-line prefixes that carry the CCLI licence number
const LICENCE_PREFIXES: [&str; 2] = ["CCLI Licence", "CCLI License"];

/// Build the title slide for a song.
///
/// Every CCLI block is scanned in order and later blocks overwrite earlier ones.
pub fn build_title_plate(song: &ParsedSong) -> TitlePlate {
    let mut plate = TitlePlate {
        title: song.title().to_string(),
        ..TitlePlate::default()
    };

    for section in song.ccli_sections() {
        plate.author = section
            .lines
            .first()
            .map(|line| line.replace('|', "/"))
            .unwrap_or_default();

        if let Some(number) = ccli_song_number(&section.name) {
            plate.ccli_song = Some(number.to_string());
        }

        for line in &section.lines {
            if let Some(number) = ccli_licence_number(line) {
                plate.ccli_licence = Some(number.to_string());
            }
        }
    }

    plate
}

/// Text after the first `#` of a CCLI header, e.g. "123" from "CCLI Song # 123"
pub fn ccli_song_number(header: &str) -> Option<&str> {
    header.split_once('#').map(|(_, rest)| rest.trim())
}

/// Text after `No.` of a licence line, e.g. "456" from "CCLI Licence No. 456"
pub fn ccli_licence_number(line: &str) -> Option<&str> {
    if !LICENCE_PREFIXES.iter().any(|p| line.starts_with(p)) {
        return None;
    }
    line.split_once("No.").map(|(_, rest)| rest.trim())
}
