//! Section markers recognized at the start of a lyric line

/// Prefix shared by every CCLI metadata section
pub const CCLI_PREFIX: &str = "CCLI";

/// Header prefixes that start a new lyric block.
///
/// Variants are checked in declaration order and the first match wins, so
/// more specific prefixes are listed before the ones they contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionMarker {
    PreChorus,
    Verse,
    Chorus,
    Bridge,
    Tag,
    Interlude,
    Ending,
    CcliSong,
}

impl SectionMarker {
    /// All markers in matching order
    pub const ALL: [SectionMarker; 8] = [
        SectionMarker::PreChorus,
        SectionMarker::Verse,
        SectionMarker::Chorus,
        SectionMarker::Bridge,
        SectionMarker::Tag,
        SectionMarker::Interlude,
        SectionMarker::Ending,
        SectionMarker::CcliSong,
    ];

    /// The literal line prefix for this marker
    pub fn prefix(self) -> &'static str {
        match self {
            SectionMarker::PreChorus => "Pre-Chorus",
            SectionMarker::Verse => "Verse",
            SectionMarker::Chorus => "Chorus",
            SectionMarker::Bridge => "Bridge",
            SectionMarker::Tag => "Tag",
            SectionMarker::Interlude => "Interlude",
            SectionMarker::Ending => "Ending",
            SectionMarker::CcliSong => "CCLI Song #",
        }
    }

    /// Classify a trimmed line, returning the first marker whose prefix it starts with
    pub fn detect(line: &str) -> Option<SectionMarker> {
        Self::ALL
            .into_iter()
            .find(|marker| line.starts_with(marker.prefix()))
    }

    pub fn is_ccli(self) -> bool {
        self == SectionMarker::CcliSong
    }
}

/// Whether a section key names CCLI metadata rather than displayable lyrics
pub fn is_ccli_key(name: &str) -> bool {
    name.starts_with(CCLI_PREFIX)
}
