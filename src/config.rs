// Fixed settings for one editor session.

use std::path::PathBuf;

/// The bundled watermark, looked up relative to the working directory.
pub const STAMP_FILE: &str = "förslag 112.png";
/// Name offered for every export.
pub const EXPORT_FILE_NAME: &str = "redigerad-bild.png";

/// Canvas size before any photo is loaded.
pub const INITIAL_CANVAS_WIDTH: u32 = 1000;
pub const INITIAL_CANVAS_HEIGHT: u32 = 620;

/// Strip above the canvas holding the action button and the status text.
pub const TOOLBAR_HEIGHT: usize = 48;

#[derive(Clone, Debug)]
pub struct Config {
    pub title: String,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub toolbar_height: usize,
    pub stamp_path: PathBuf,
    pub export_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "Gråskala & märke".to_string(),
            canvas_width: INITIAL_CANVAS_WIDTH,
            canvas_height: INITIAL_CANVAS_HEIGHT,
            toolbar_height: TOOLBAR_HEIGHT,
            stamp_path: PathBuf::from(STAMP_FILE),
            export_name: EXPORT_FILE_NAME.to_string(),
        }
    }
}

impl Config {
    /// Window size: the initial canvas plus the toolbar.
    pub fn window_size(&self) -> (usize, usize) {
        (self.canvas_width as usize, self.canvas_height as usize + self.toolbar_height)
    }
}
