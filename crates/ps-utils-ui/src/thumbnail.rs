//! Image thumbnails for drag-and-drop previews.

use std::path::Path;

use egui::load::SizedTexture;
use egui::{ColorImage, Context, TextureHandle, TextureOptions, Ui};
use image::{DynamicImage, RgbaImage};
use ps_utils_core::{PsUtilsError, Result};

/// Default bound on either side of a thumbnail preview, in points.
pub const DEFAULT_MAX_PREVIEW_SIZE: usize = 250;

/// Aspect-preserving preview size `[h, w]` of an `h × w` image, bounded by
/// `max_h × max_w`.
pub fn preview_size(h: usize, w: usize, max_h: usize, max_w: usize) -> [usize; 2] {
    if h == 0 || w == 0 {
        return [0, 0];
    }
    let aspect = h as f64 / w as f64;
    let clipped_h = h.min(max_h) as f64;
    let clipped_w = w.min(max_w) as f64;
    [
        clipped_h.min(clipped_w * aspect) as usize,
        clipped_w.min(clipped_h / aspect) as usize,
    ]
}

/// A loaded image with its egui texture and preview size.
pub struct Thumbnail {
    image: RgbaImage,
    texture: TextureHandle,
    preview_size: [usize; 2],
}

impl Thumbnail {
    /// Uploads `image` as texture `name`. RGB images get an opaque alpha channel.
    pub fn from_image(
        ctx: &Context,
        name: &str,
        image: &DynamicImage,
        max_h: usize,
        max_w: usize,
    ) -> Self {
        let image = image.to_rgba8();
        let (w, h) = (image.width() as usize, image.height() as usize);
        let color_image = ColorImage::from_rgba_unmultiplied([w, h], image.as_raw());
        let texture =
            ctx.load_texture(format!("{name}_buffer"), color_image, TextureOptions::LINEAR);

        Self {
            preview_size: preview_size(h, w, max_h, max_w),
            image,
            texture,
        }
    }

    /// Opens the image at `path`, bounded by [`DEFAULT_MAX_PREVIEW_SIZE`].
    pub fn from_path(ctx: &Context, name: &str, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let image = image::open(path).map_err(|e| {
            PsUtilsError::ImageError(format!("failed to open '{}': {e}", path.display()))
        })?;
        log::info!(
            "Loaded thumbnail '{name}' ({}x{}) from {}",
            image.width(),
            image.height(),
            path.display()
        );
        Ok(Self::from_image(
            ctx,
            name,
            &image,
            DEFAULT_MAX_PREVIEW_SIZE,
            DEFAULT_MAX_PREVIEW_SIZE,
        ))
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Preview size as `[h, w]`.
    pub fn preview_size(&self) -> [usize; 2] {
        self.preview_size
    }

    pub fn show(&self, ui: &mut Ui) -> egui::Response {
        let [h, w] = self.preview_size;
        ui.image(SizedTexture::new(self.texture.id(), [w as f32, h as f32]))
    }
}
