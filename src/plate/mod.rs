//! Plate generation: pagination of lyric sections and the title slide
//!
//! A plate is one renderable unit: an output stem plus the text assigned to
//! each placeholder of a template.

pub mod paginate;
pub mod title;
pub mod types;

pub use paginate::{pad_chunk, paginate, paginate_section, plate_stem, section_initials};
pub use title::build_title_plate;
pub use types::{Plate, TitlePlate, WordPlate, TITLE_STEM};

use crate::parser::ParsedSong;

/// Every plate of a song: word plates in section order, then the title slide
pub fn plan_song(song: &ParsedSong, slot_capacity: usize) -> Vec<Plate> {
    let mut plates: Vec<Plate> = paginate(song, slot_capacity)
        .into_iter()
        .map(Plate::from)
        .collect();
    plates.push(build_title_plate(song).into());
    plates
}
