//! The pair of templates every song is rendered against

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::plate::Plate;

use super::placeholder::Placeholder;
use super::svg::{SvgTemplate, TemplateKind};

/// Errors that can occur while loading or validating templates
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Error reading template file
    #[error("error reading template file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Invalid SVG content
    #[error("invalid SVG content in template {template}: {message}")]
    InvalidSvg { template: String, message: String },

    /// A placeholder the title slide cannot do without
    #[error("template {template} is missing required placeholder {placeholder}")]
    MissingPlaceholder {
        template: String,
        placeholder: Placeholder,
    },

    /// The word template has nowhere to put lyric lines
    #[error("template {template} has no word slots (id=\"words\" or <WORDS>)")]
    NoWordSlots { template: String },
}

/// Word and title templates, loaded once and validated up front
#[derive(Debug, Clone)]
pub struct PlateTemplates {
    words: SvgTemplate,
    title: SvgTemplate,
}

impl PlateTemplates {
    /// Load both templates from disk
    pub fn load(words: &Path, title: &Path) -> Result<Self, TemplateError> {
        let words = SvgTemplate::from_file(words, TemplateKind::Words)?;
        let title = SvgTemplate::from_file(title, TemplateKind::Title)?;
        Self::new(words, title)
    }

    /// Pair two already parsed templates, checking their placeholders
    pub fn new(words: SvgTemplate, title: SvgTemplate) -> Result<Self, TemplateError> {
        if words.slot_count() == 0 {
            return Err(TemplateError::NoWordSlots {
                template: words.name().to_string(),
            });
        }
        for placeholder in Placeholder::TITLE_SLOTS {
            if placeholder.is_required() && !title.has_placeholder(placeholder) {
                return Err(TemplateError::MissingPlaceholder {
                    template: title.name().to_string(),
                    placeholder,
                });
            }
        }
        debug!(
            slots = words.slot_count(),
            title_fields = title.placeholders().len(),
            "templates ready"
        );
        Ok(Self { words, title })
    }

    /// Number of lyric lines one word plate holds
    pub fn slot_capacity(&self) -> usize {
        self.words.slot_count()
    }

    pub fn words(&self) -> &SvgTemplate {
        &self.words
    }

    pub fn title(&self) -> &SvgTemplate {
        &self.title
    }

    /// The template a plate is drawn on
    pub fn template_for(&self, plate: &Plate) -> &SvgTemplate {
        match plate {
            Plate::Words(_) => &self.words,
            Plate::Title(_) => &self.title,
        }
    }

    /// A fresh SVG document for one plate
    pub fn fill(&self, plate: &Plate) -> String {
        self.template_for(plate).fill(&plate.substitutions())
    }
}
