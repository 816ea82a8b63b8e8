// PNG export of the visible canvas.

use crate::error::ExportError;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbaImage};
use std::path::PathBuf;

/// Encode the canvas as PNG bytes.
pub fn encode_png(canvas: &RgbaImage) -> Result<Vec<u8>, ExportError> {
    let mut out = Vec::new();
    PngEncoder::new(&mut out)
        .write_image(canvas.as_raw(), canvas.width(), canvas.height(), ExtendedColorType::Rgba8)
        .map_err(|e| ExportError::Encode(e.to_string()))?;
    if out.is_empty() {
        return Err(ExportError::Encode("encoder produced no data".into()));
    }
    Ok(out)
}

/// Where exported bytes end up.
pub trait SaveSink {
    /// Store `bytes` under the suggested file name. `Ok(None)` means the user
    /// backed out; `Ok(Some(path))` is where the file was written.
    fn save(&mut self, suggested_name: &str, bytes: &[u8]) -> Result<Option<PathBuf>, ExportError>;
}

/// Asks with a native save dialog, pre-filled with the suggested name.
#[derive(Default)]
pub struct DialogSink;

impl SaveSink for DialogSink {
    fn save(&mut self, suggested_name: &str, bytes: &[u8]) -> Result<Option<PathBuf>, ExportError> {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG", &["png"])
            .set_file_name(suggested_name)
            .save_file()
        else {
            return Ok(None);
        };
        std::fs::write(&path, bytes)?;
        Ok(Some(path))
    }
}

/// Writes to a fixed path; the headless renderer uses this.
pub struct PathSink {
    pub path: PathBuf,
}

impl SaveSink for PathSink {
    fn save(&mut self, _suggested_name: &str, bytes: &[u8]) -> Result<Option<PathBuf>, ExportError> {
        std::fs::write(&self.path, bytes)?;
        Ok(Some(self.path.clone()))
    }
}
