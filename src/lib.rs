//! Grayscale photo editor with a draggable watermark.
//!
//! Open a photo, see it in grayscale with the watermark in the bottom-right
//! corner, drag the watermark anywhere, export the result as PNG.

pub mod app;
pub mod blob;
pub mod config;
pub mod drag;
pub mod draw;
pub mod editor;
pub mod error;
pub mod export;
pub mod grayscale;
pub mod loader;
pub mod render;
pub mod stamp;
pub mod types;
pub mod window;

pub use config::Config;
pub use editor::{Action, Editor, ExportOutcome};
pub use error::{Error, ExportError, LoadError, Result};
