// The interactive loop and the headless one-shot renderer.
//
// Each frame:
//   1) apply finished loads (photo / stamp) to the editor,
//   2) turn mouse edges into button clicks and pointer events,
//   3) draw the toolbar, blit the canvas into its viewport, present.

use crate::blob::BlobStore;
use crate::config::Config;
use crate::editor::{Action, Editor, ExportOutcome};
use crate::error::{Error, ExportError, Result};
use crate::export::{DialogSink, PathSink};
use crate::loader::{LoadEvent, Loader, load_photo, load_stamp};
use crate::render::blit_canvas;
use crate::types::{FrameBuffer, Point, PointerId};
use crate::window::{Drawer, Layout};
use std::path::{Path, PathBuf};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp", "tif", "tiff", "tga", "ico"];

pub fn run(config: Config, initial_photo: Option<PathBuf>) -> Result<()> {
    let (w, h) = config.window_size();
    let layout = Layout::new(w, h, config.toolbar_height);
    let mut drawer = Drawer::new(&config.title, w, h)?;
    let mut screen = FrameBuffer::new(w, h);

    let blobs = BlobStore::new();
    let loader = Loader::new(blobs.clone());
    loader.spawn_stamp(config.stamp_path.clone());
    if let Some(path) = initial_photo {
        loader.spawn_photo(Some(path));
    }

    let mut editor = Editor::new(config);
    let mut was_down = false;
    let mut last_mouse: Option<Point> = None;

    while drawer.is_open() && !drawer.esc_pressed() {
        for event in loader.poll() {
            match event {
                LoadEvent::Photo(result) => editor.apply_photo(result),
                LoadEvent::Stamp(result) => editor.apply_stamp(result),
            }
        }

        let viewport = layout.viewport(editor.canvas_size());
        let mouse = drawer.mouse_pos();
        let down = drawer.left_mouse_down();

        match mouse {
            Some(client) => {
                let p = viewport.to_canvas(client, editor.canvas_size());
                if down && !was_down {
                    if layout.button(editor.button_label()).contains(client) {
                        click(&mut editor, &loader, &blobs);
                    } else if viewport.contains(client) {
                        editor.pointer_down(PointerId::MOUSE, p);
                    }
                } else if down && editor.drag_state().is_dragging() {
                    if last_mouse != Some(client) {
                        editor.pointer_move(PointerId::MOUSE, p);
                    }
                    if !viewport.contains(client) {
                        release(editor.pointer_leave(PointerId::MOUSE));
                    }
                }
            }
            None if editor.drag_state().is_dragging() => release(editor.pointer_leave(PointerId::MOUSE)),
            None => {}
        }
        if was_down && !down {
            release(editor.pointer_up(PointerId::MOUSE));
        }
        was_down = down;
        last_mouse = mouse;

        layout.draw_chrome(&mut screen, editor.button_label(), editor.status(), mouse);
        blit_canvas(&mut screen, editor.canvas(), viewport.rect);
        drawer.present(&screen)?;
    }

    Ok(())
}

fn release(capture: Option<PointerId>) {
    if let Some(id) = capture {
        tracing::trace!(?id, "pointer capture released");
    }
}

/// The action button: pick a photo when none is loaded, otherwise export.
fn click(editor: &mut Editor, loader: &Loader, blobs: &BlobStore) {
    match editor.click_action() {
        Action::OpenPicker => {
            let picked = rfd::FileDialog::new()
                .add_filter("Bilder", IMAGE_EXTENSIONS)
                .pick_file();
            loader.spawn_photo(picked);
        }
        Action::Export => {
            report_export(editor.export(&mut DialogSink, blobs));
        }
    }
}

/// Log how a dialog export ended; returns where the file went, if anywhere.
fn report_export(result: std::result::Result<ExportOutcome, ExportError>) -> Option<PathBuf> {
    match result {
        Ok(ExportOutcome::Saved(path)) => {
            tracing::info!(path = %path.display(), "saved from dialog");
            Some(path)
        }
        Ok(ExportOutcome::Cancelled) => {
            tracing::debug!("save dialog cancelled");
            None
        }
        Ok(ExportOutcome::NothingToExport) => None,
        // Already shown in the status text by the editor.
        Err(err) => {
            tracing::debug!(%err, "export from dialog failed");
            None
        }
    }
}

/// Load the stamp and `photo`, optionally move the stamp, write the PNG to
/// `out`. A missing stamp is logged and the photo is exported without it.
pub fn render_once(config: Config, photo: &Path, out: &Path, position: Option<Point>) -> Result<ExportOutcome> {
    let blobs = BlobStore::new();
    let mut editor = Editor::new(config);

    let stamp = load_stamp(&editor.config().stamp_path);
    if let Err(err) = &stamp {
        tracing::warn!(%err, "exporting without stamp");
    }
    editor.apply_stamp(stamp);
    editor.apply_photo(Ok(load_photo(Some(photo), &blobs)?));
    if let Some(p) = position {
        editor.move_stamp_to(p);
    }

    let mut sink = PathSink { path: out.to_path_buf() };
    editor.export(&mut sink, &blobs).map_err(Error::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("gray-stamp-app-{}-{name}", std::process::id()))
    }

    #[test]
    fn render_once_writes_grayscale_with_stamp() {
        let photo = temp_path("photo.png");
        let stamp = temp_path("stamp.png");
        let out = temp_path("out.png");
        RgbaImage::from_pixel(500, 400, Rgba([200, 40, 40, 255]))
            .save_with_format(&photo, ImageFormat::Png)
            .unwrap();
        RgbaImage::from_pixel(200, 100, Rgba([0, 0, 255, 255]))
            .save_with_format(&stamp, ImageFormat::Png)
            .unwrap();

        let config = Config { stamp_path: stamp.clone(), ..Config::default() };
        let outcome = render_once(config, &photo, &out, Some(Point::new(0.0, 0.0))).unwrap();
        assert_eq!(outcome, ExportOutcome::Saved(out.clone()));

        let result = image::open(&out).unwrap().to_rgba8();
        assert_eq!(result.dimensions(), (500, 400));
        // Stamp is 120x60 at the top-left corner.
        assert_eq!(result.get_pixel(5, 5).0, [0, 0, 255, 255]);
        let gray = result.get_pixel(300, 300);
        assert!(gray[0] == gray[1] && gray[1] == gray[2]);

        for p in [photo, stamp, out] {
            let _ = std::fs::remove_file(p);
        }
    }

    #[test]
    fn render_once_without_stamp_still_exports() {
        let photo = temp_path("nostamp.png");
        let out = temp_path("nostamp-out.png");
        RgbaImage::from_pixel(30, 20, Rgba([9, 99, 199, 255]))
            .save_with_format(&photo, ImageFormat::Png)
            .unwrap();
        let config = Config { stamp_path: temp_path("absent.png"), ..Config::default() };
        let outcome = render_once(config, &photo, &out, None).unwrap();
        assert!(matches!(outcome, ExportOutcome::Saved(_)));
        let _ = std::fs::remove_file(photo);
        let _ = std::fs::remove_file(out);
    }

    #[test]
    fn dialog_outcomes_are_reported() {
        let saved = PathBuf::from("redigerad-bild.png");
        assert_eq!(report_export(Ok(ExportOutcome::Saved(saved.clone()))), Some(saved));
        assert_eq!(report_export(Ok(ExportOutcome::Cancelled)), None);
        assert_eq!(report_export(Ok(ExportOutcome::NothingToExport)), None);
        let err = ExportError::Write(std::io::Error::other("denied"));
        assert_eq!(report_export(Err(err)), None);
    }

    #[test]
    fn render_once_rejects_unreadable_photo() {
        let photo = temp_path("broken.png");
        std::fs::write(&photo, b"nope").unwrap();
        let err = render_once(Config::default(), &photo, &temp_path("never.png"), None).unwrap_err();
        assert!(matches!(err, Error::Load(_)));
        let _ = std::fs::remove_file(photo);
    }
}
