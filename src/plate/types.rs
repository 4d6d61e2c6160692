//! Plate types: renderable units of one song

use crate::template::{Placeholder, Substitution};

/// Output stem of the title slide within a song directory
pub const TITLE_STEM: &str = "titleslide";

/// One chunk of a lyric section, padded to the word template's slot count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordPlate {
    /// Section the chunk came from
    pub section: String,
    /// 1-based chunk counter within the section
    pub index: usize,
    /// Output file name without extension
    pub stem: String,
    /// One entry per template slot, blank entries are padding
    pub lines: Vec<String>,
}

impl WordPlate {
    pub fn substitutions(&self) -> Vec<Substitution> {
        self.lines
            .iter()
            .enumerate()
            .map(|(slot, line)| Substitution::new(Placeholder::Words(slot), line.clone()))
            .collect()
    }
}

/// The title slide of a song
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TitlePlate {
    pub title: String,
    pub author: String,
    pub ccli_song: Option<String>,
    pub ccli_licence: Option<String>,
}

impl TitlePlate {
    pub fn stem(&self) -> &str {
        TITLE_STEM
    }

    pub fn substitutions(&self) -> Vec<Substitution> {
        let mut subs = vec![
            Substitution::new(Placeholder::Title, self.title.clone()),
            Substitution::new(Placeholder::Author, self.author.clone()),
        ];
        if let Some(song) = &self.ccli_song {
            subs.push(Substitution::new(Placeholder::CcliSong, song.clone()));
        }
        if let Some(licence) = &self.ccli_licence {
            subs.push(Substitution::new(Placeholder::CcliLicence, licence.clone()));
        }
        subs
    }
}

/// A filled-in template ready for rasterization
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plate {
    Words(WordPlate),
    Title(TitlePlate),
}

impl Plate {
    /// Output path within the song directory, without extension
    pub fn stem(&self) -> &str {
        match self {
            Plate::Words(plate) => &plate.stem,
            Plate::Title(plate) => plate.stem(),
        }
    }

    pub fn substitutions(&self) -> Vec<Substitution> {
        match self {
            Plate::Words(plate) => plate.substitutions(),
            Plate::Title(plate) => plate.substitutions(),
        }
    }
}

impl From<WordPlate> for Plate {
    fn from(plate: WordPlate) -> Self {
        Plate::Words(plate)
    }
}

impl From<TitlePlate> for Plate {
    fn from(plate: TitlePlate) -> Self {
        Plate::Title(plate)
    }
}
