//! A renderer that only records what it was asked to do

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::{png_path, RenderError, Renderer};

/// One render call as seen by [`DryRunRenderer`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    pub document: PathBuf,
    pub output_stem: PathBuf,
    /// Contents of the document at the time of the call
    pub svg: String,
}

/// Records requests without writing any image
#[derive(Debug, Default)]
pub struct DryRunRenderer {
    requests: RefCell<Vec<RenderRequest>>,
}

impl DryRunRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests seen so far, in call order
    pub fn requests(&self) -> Vec<RenderRequest> {
        self.requests.borrow().clone()
    }
}

impl Renderer for DryRunRenderer {
    fn render(&self, document: &Path, output_stem: &Path) -> Result<PathBuf, RenderError> {
        let output = png_path(output_stem);
        info!("Would write {}", output.display());

        // The document is a temporary file, so capture it while it exists
        let svg = match std::fs::read_to_string(document) {
            Ok(svg) => svg,
            Err(error) => {
                warn!(document = %document.display(), %error, "cannot read document");
                String::new()
            }
        };
        self.requests.borrow_mut().push(RenderRequest {
            document: document.to_path_buf(),
            output_stem: output_stem.to_path_buf(),
            svg,
        });
        Ok(output)
    }
}
