//! Error types for lyric file parsing

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The last section marker in the file is not a CCLI block
    #[error("malformed lyric file: missing trailing CCLI block")]
    MissingCcliBlock {
        /// Span of the last marker seen, if any marker was seen at all
        span: Option<Span>,
        last_marker: Option<String>,
    },
}

impl ParseError {
    /// Source span the error points at
    pub fn span(&self) -> Span {
        match self {
            ParseError::MissingCcliBlock { span, .. } => span.clone().unwrap_or(0..0),
        }
    }

    fn hint(&self) -> String {
        match self {
            ParseError::MissingCcliBlock {
                last_marker: Some(marker),
                ..
            } => format!(
                "last section is '{}'; a 'CCLI Song #' block must come last",
                marker
            ),
            ParseError::MissingCcliBlock {
                last_marker: None, ..
            } => "no section markers found; a 'CCLI Song #' block must come last".to_string(),
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let mut buf = Vec::new();
        let span = self.span();
        let written = Report::build(ReportKind::Error, filename, span.start)
            .with_message(self.to_string())
            .with_label(
                Label::new((filename, span))
                    .with_message(self.hint())
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => format!("{}: {}", filename, self),
        }
    }
}
