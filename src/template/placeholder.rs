//! Placeholder identities shared by templates and plates

use std::fmt;

/// Attribute value that marks the word-slot container in a word template
pub const WORDS_ID: &str = "words";

/// A substitution target inside a template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Placeholder {
    /// One line slot of the word template, numbered in document order
    Words(usize),
    Title,
    Author,
    CcliSong,
    CcliLicence,
}

/// How a text site in the template was marked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marking {
    /// Element carrying a sentinel `id`; its text is replaced wholesale
    Attribute,
    /// Literal sentinel token inside the text; only the token is replaced
    Token,
}

impl Placeholder {
    /// Placeholders of the title template, in the order they are reported
    pub const TITLE_SLOTS: [Placeholder; 4] = [
        Placeholder::Title,
        Placeholder::Author,
        Placeholder::CcliSong,
        Placeholder::CcliLicence,
    ];

    /// Sentinel `id` attribute value for title placeholders
    pub fn sentinel_id(self) -> Option<&'static str> {
        match self {
            Placeholder::Words(_) => None,
            Placeholder::Title => Some("SongTitle"),
            Placeholder::Author => Some("SongAuthor"),
            Placeholder::CcliSong => Some("CCLIsong"),
            Placeholder::CcliLicence => Some("CCLIlicense"),
        }
    }

    /// Sentinel token embedded in template text
    pub fn token(self) -> &'static str {
        match self {
            Placeholder::Words(_) => "<WORDS>",
            Placeholder::Title => "<TITLE>",
            Placeholder::Author => "<AUTHOR>",
            Placeholder::CcliSong => "<CCLIsong>",
            Placeholder::CcliLicence => "<CCLIlicence>",
        }
    }

    /// Whether a title template must contain this placeholder
    pub fn is_required(self) -> bool {
        matches!(self, Placeholder::Title | Placeholder::Author)
    }

    /// Title placeholder marked by the given `id`, if any
    pub fn from_sentinel_id(id: &str) -> Option<Placeholder> {
        Self::TITLE_SLOTS
            .into_iter()
            .find(|p| p.sentinel_id() == Some(id))
    }

    /// Text written into the document for a value.
    ///
    /// Attribute-marked sites own their whole text, so title values carry
    /// their label; token sites keep the surrounding template text instead.
    pub fn decorate(self, value: &str, marking: Marking) -> String {
        match (marking, self) {
            (Marking::Token, _) => value.to_string(),
            (Marking::Attribute, Placeholder::Title) => format!("\"{}\"", value),
            (Marking::Attribute, Placeholder::CcliSong) => format!("CCLI Song # {}", value),
            (Marking::Attribute, Placeholder::CcliLicence) => format!("CCLI Licence # {}", value),
            (Marking::Attribute, _) => value.to_string(),
        }
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Placeholder::Words(index) => write!(f, "words[{}]", index),
            other => {
                let id = other.sentinel_id().unwrap_or_default();
                write!(f, "{} (id=\"{}\" or {})", id, id, other.token())
            }
        }
    }
}

/// A literal text assigned to one placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    pub placeholder: Placeholder,
    pub text: String,
}

impl Substitution {
    pub fn new(placeholder: Placeholder, text: impl Into<String>) -> Self {
        Self {
            placeholder,
            text: text.into(),
        }
    }
}
