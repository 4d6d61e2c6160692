//! In-process rendering with usvg and resvg

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use super::{png_path, RenderError, Renderer};

/// Largest slide dimension accepted, in pixels
const MAX_DIM: u32 = 16_384;

/// Rasterizes plates without any external program
pub struct ResvgRenderer {
    width: u32,
    fontdb: Arc<usvg::fontdb::Database>,
}

impl ResvgRenderer {
    /// Renderer using the system fonts
    pub fn new(width: u32) -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        Self {
            width,
            fontdb: Arc::new(db),
        }
    }

    /// Also load `.ttf`/`.otf`/`.ttc` files found directly in `dir`
    pub fn with_font_dir(mut self, dir: &Path) -> Self {
        let db = Arc::make_mut(&mut self.fontdb);
        load_fonts_from_dir(db, dir);
        self
    }

    fn parse(&self, document: &Path) -> Result<usvg::Tree, RenderError> {
        let data = std::fs::read(document).map_err(|e| RenderError::Io {
            path: document.to_path_buf(),
            source: e,
        })?;
        let opts = usvg::Options {
            resources_dir: document.parent().map(Path::to_path_buf),
            fontdb: Arc::clone(&self.fontdb),
            ..Default::default()
        };
        usvg::Tree::from_data(&data, &opts).map_err(|e| RenderError::Svg {
            path: document.to_path_buf(),
            message: e.to_string(),
        })
    }
}

impl Renderer for ResvgRenderer {
    fn render(&self, document: &Path, output_stem: &Path) -> Result<PathBuf, RenderError> {
        let output = png_path(output_stem);
        info!("Writing {}", output.display());

        let raster_error = |message: String| RenderError::Raster {
            path: document.to_path_buf(),
            message,
        };

        let tree = self.parse(document)?;
        let size = tree.size();
        if self.width == 0 || size.width() <= 0.0 || size.height() <= 0.0 {
            return Err(raster_error(format!(
                "invalid size {}x{} at width {}",
                size.width(),
                size.height(),
                self.width
            )));
        }

        let scale = self.width as f32 / size.width();
        let height = (size.height() * scale).ceil().max(1.0) as u32;
        if self.width > MAX_DIM || height > MAX_DIM {
            return Err(raster_error(format!(
                "raster size too large: {}x{} (max {MAX_DIM}x{MAX_DIM})",
                self.width, height
            )));
        }

        let mut pixmap = resvg::tiny_skia::Pixmap::new(self.width, height)
            .ok_or_else(|| raster_error("failed to allocate pixmap".to_string()))?;
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::from_scale(scale, scale),
            &mut pixmap.as_mut(),
        );

        pixmap
            .save_png(&output)
            .map_err(|e| raster_error(e.to_string()))?;
        Ok(output)
    }
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        let _ = db.load_font_file(&path);
    }
}
