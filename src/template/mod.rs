//! SVG templates that plates are drawn on
//!
//! Templates mark the text they expect to receive in one of two ways:
//!
//! ```text
//! <!-- sentinel id: the element's whole text is replaced -->
//! <text id="words"><tspan>line 1</tspan><tspan>line 2</tspan></text>
//! <text id="SongTitle">Title</text>
//!
//! <!-- sentinel token: only the token is replaced -->
//! <text>Song by &lt;AUTHOR&gt;</text>
//! ```

mod placeholder;
mod registry;
mod svg;

pub use placeholder::{Marking, Placeholder, Substitution, WORDS_ID};
pub use registry::{PlateTemplates, TemplateError};
pub use svg::{SvgTemplate, TemplateKind};
