// Turning files into pixels: the uploaded photo and the fixed watermark.
// Both loads run on worker threads and report back over a channel; the UI
// loop drains finished loads each frame, so the last one to finish wins.

use crate::blob::BlobStore;
use crate::error::LoadError;
use image::RgbaImage;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;

/// Read `path` into a temporary handle and decode it. `None` means the picker
/// came back empty.
#[tracing::instrument(skip(blobs))]
pub fn load_photo(path: Option<&Path>, blobs: &BlobStore) -> Result<RgbaImage, LoadError> {
    let path = path.ok_or(LoadError::NoFileSelected)?;
    let bytes = std::fs::read(path).map_err(|e| LoadError::decode(format!("{}: {e}", path.display())))?;

    // Released when it goes out of scope, whether decoding worked or not.
    let blob = blobs.acquire(bytes);
    let image = decode_image(blob.bytes())?;
    tracing::info!(url = %blob.url(), width = image.width(), height = image.height(), "photo decoded");
    Ok(image)
}

/// Load the bundled watermark. Any failure names the expected file.
#[tracing::instrument]
pub fn load_stamp(path: &Path) -> Result<RgbaImage, LoadError> {
    let stamp_err = |reason: String| LoadError::StampLoad { path: path.to_path_buf(), reason };
    let bytes = std::fs::read(path).map_err(|e| stamp_err(e.to_string()))?;
    let image = decode_image(&bytes).map_err(|e| stamp_err(e.to_string()))?;
    if image.width() == 0 || image.height() == 0 {
        return Err(stamp_err("empty image".into()));
    }
    tracing::info!(width = image.width(), height = image.height(), "stamp loaded");
    Ok(image)
}

/// Decode any format `image` recognises from its content, as RGBA8.
pub fn decode_image(bytes: &[u8]) -> Result<RgbaImage, LoadError> {
    let img = image::load_from_memory(bytes).map_err(|e| LoadError::decode(e.to_string()))?;
    Ok(img.to_rgba8())
}

/// A finished load, in completion order.
#[derive(Debug)]
pub enum LoadEvent {
    Photo(Result<RgbaImage, LoadError>),
    Stamp(Result<RgbaImage, LoadError>),
}

/// Runs loads in the background. No cancellation: every spawned load
/// eventually delivers its event.
pub struct Loader {
    sender: mpsc::Sender<LoadEvent>,
    receiver: mpsc::Receiver<LoadEvent>,
    blobs: BlobStore,
}

impl Loader {
    pub fn new(blobs: BlobStore) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self { sender, receiver, blobs }
    }

    pub fn spawn_photo(&self, path: Option<PathBuf>) {
        let sender = self.sender.clone();
        let blobs = self.blobs.clone();
        thread::spawn(move || {
            let result = load_photo(path.as_deref(), &blobs);
            // The receiver only goes away when the app is shutting down.
            let _ = sender.send(LoadEvent::Photo(result));
        });
    }

    pub fn spawn_stamp(&self, path: PathBuf) {
        let sender = self.sender.clone();
        thread::spawn(move || {
            let _ = sender.send(LoadEvent::Stamp(load_stamp(&path)));
        });
    }

    /// Loads finished since the last call, oldest first. Never blocks.
    pub fn poll(&self) -> Vec<LoadEvent> {
        self.receiver.try_iter().collect()
    }

    /// Block until the next load finishes.
    #[cfg(test)]
    pub fn wait(&self) -> Option<LoadEvent> {
        self.receiver.recv().ok()
    }
}
