//! Rendering through an external Inkscape process

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info};

use super::config::InkscapeCli;
use super::{png_path, RenderError, Renderer};

/// Runs Inkscape once per plate and waits for it
#[derive(Debug, Clone)]
pub struct InkscapeRenderer {
    binary: PathBuf,
    cli: InkscapeCli,
    width: u32,
}

impl InkscapeRenderer {
    pub fn new(binary: impl Into<PathBuf>, cli: InkscapeCli, width: u32) -> Self {
        Self {
            binary: binary.into(),
            cli,
            width,
        }
    }

    /// Arguments for exporting `document` to `output` at the configured width
    pub fn args(&self, document: &Path, output: &Path) -> Vec<OsString> {
        match self.cli {
            InkscapeCli::Modern => vec![
                "-C".into(),
                "-o".into(),
                output.as_os_str().to_owned(),
                "-w".into(),
                self.width.to_string().into(),
                document.as_os_str().to_owned(),
            ],
            InkscapeCli::Legacy => vec![
                "-z".into(),
                "-C".into(),
                prefixed("-e=", output),
                prefixed("-f=", document),
                format!("-w={}", self.width).into(),
            ],
        }
    }
}

fn prefixed(flag: &str, path: &Path) -> OsString {
    let mut arg = OsString::from(flag);
    arg.push(path.as_os_str());
    arg
}

impl Renderer for InkscapeRenderer {
    fn render(&self, document: &Path, output_stem: &Path) -> Result<PathBuf, RenderError> {
        let output = png_path(output_stem);
        info!("Writing {}", output.display());

        let args = self.args(document, &output);
        debug!(program = %self.binary.display(), ?args, "running inkscape");
        let program = self.binary.display().to_string();

        let result = Command::new(&self.binary)
            .args(&args)
            .output()
            .map_err(|e| RenderError::Spawn {
                program: program.clone(),
                source: e,
            })?;

        if !result.status.success() {
            return Err(RenderError::Failed {
                program,
                status: result.status,
                output,
                stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
            });
        }
        Ok(output)
    }
}
