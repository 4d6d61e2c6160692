//! Parser for plain-text lyric files

mod grammar;
pub mod marker;
pub mod song;

pub use grammar::{parse, parse_lines};
pub use marker::{is_ccli_key, SectionMarker, CCLI_PREFIX};
pub use song::{ParsedSong, Section};
