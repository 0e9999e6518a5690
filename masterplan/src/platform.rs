//! Platform services the board needs beyond input and drawing
//!
//! Input arrives through `FrameInput` and drawing through `egui::Painter`.
//! Everything else the board asks of the host (text metrics, decoding an
//! image into a texture, the native open dialog, resizing the window) goes
//! through the [`Platform`] trait so the board can run against a test double.

use egui::{ColorImage, TextureHandle, TextureOptions, Vec2, ViewportCommand};
use plancore::TextMeasure;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImageLoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("decode error: {0}")]
    Decode(#[from] image::ImageError),
}

pub trait Platform: TextMeasure {
    /// Decode the image at `path` into a nearest-filtered texture.
    /// Failures are logged and yield `None`.
    fn load_texture(&mut self, path: &Path) -> Option<TextureHandle>;

    /// Blocking native "open file" dialog filtered to PNG images.
    fn pick_png(&mut self) -> Option<PathBuf>;

    /// Resize the window, in window coordinates.
    fn resize_window(&mut self, size: Vec2);
}

/// Decode an image file into RGBA pixels.
pub fn decode_image(path: &Path) -> Result<ColorImage, ImageLoadError> {
    let img = image::ImageReader::open(path)?.with_guessed_format()?.decode()?;
    let rgba = img.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}

pub struct EguiPlatform {
    ctx: egui::Context,
}

impl EguiPlatform {
    pub fn new(ctx: &egui::Context) -> Self {
        Self { ctx: ctx.clone() }
    }
}

impl TextMeasure for EguiPlatform {
    fn measure_text(&self, text: &str) -> Vec2 {
        self.ctx.measure_text(text)
    }
}

impl Platform for EguiPlatform {
    fn load_texture(&mut self, path: &Path) -> Option<TextureHandle> {
        match decode_image(path) {
            Ok(img) => Some(self.ctx.load_texture(
                path.display().to_string(),
                img,
                TextureOptions::NEAREST,
            )),
            Err(e) => {
                log::warn!("could not load image {}: {}", path.display(), e);
                None
            }
        }
    }

    fn pick_png(&mut self) -> Option<PathBuf> {
        rfd::FileDialog::new()
            .set_title("Load image")
            .add_filter("PNG image", &["png"])
            .pick_file()
    }

    fn resize_window(&mut self, size: Vec2) {
        // viewport sizes are in points, which the board's zoom factor scales
        let points = size / self.ctx.zoom_factor();
        self.ctx.send_viewport_cmd(ViewportCommand::InnerSize(points));
    }
}
