//! Fixed-size RGBA buffer displayed as an egui texture.

use egui::load::SizedTexture;
use egui::{Color32, ColorImage, Context, TextureHandle, TextureOptions, Ui, Vec2};
use glam::Vec4;
use ps_utils_core::{PsUtilsError, Result};

/// Quantizes a `[0, 1]` RGBA colour to 8 bits per channel.
pub fn to_rgba8(color: Vec4) -> [u8; 4] {
    let c = (color.clamp(Vec4::ZERO, Vec4::ONE) * 255.0).round();
    [c.x as u8, c.y as u8, c.z as u8, c.w as u8]
}

/// Converts a `[0, 1]` RGBA colour to an egui colour.
pub fn to_color32(color: Vec4) -> Color32 {
    let [r, g, b, a] = to_rgba8(color);
    Color32::from_rgba_unmultiplied(r, g, b, a)
}

/// A `width × height` image that is overwritten wholesale from host data,
/// typically once per frame from a viewer's `draw` hook.
pub struct RenderBuffer {
    name: String,
    width: usize,
    height: usize,
    texture: Option<TextureHandle>,
}

impl RenderBuffer {
    pub fn new(name: impl Into<String>, width: usize, height: usize) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            texture: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of pixels the buffer expects.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether any data has been uploaded yet.
    pub fn has_data(&self) -> bool {
        self.texture.is_some()
    }

    /// Replaces the contents with row-major `pixels`, top row first.
    pub fn update_from_host(&mut self, ctx: &Context, pixels: &[Vec4]) -> Result<()> {
        if pixels.len() != self.len() {
            return Err(PsUtilsError::SizeMismatch {
                expected: self.len(),
                actual: pixels.len(),
            });
        }

        let bytes: Vec<u8> = pixels.iter().copied().flat_map(to_rgba8).collect();
        let image = ColorImage::from_rgba_unmultiplied([self.width, self.height], &bytes);
        match &mut self.texture {
            Some(texture) => texture.set(image, TextureOptions::NEAREST),
            None => {
                self.texture = Some(ctx.load_texture(&self.name, image, TextureOptions::NEAREST));
            }
        }
        Ok(())
    }

    /// Largest size with the buffer's aspect ratio that fits in `available`.
    pub fn fit_size(&self, available: Vec2) -> Vec2 {
        if self.is_empty() {
            return Vec2::ZERO;
        }
        let scale = (available.x / self.width as f32).min(available.y / self.height as f32);
        Vec2::new(self.width as f32, self.height as f32) * scale.max(0.0)
    }

    /// Draws the buffer scaled to fit the available space, centred.
    pub fn show(&self, ui: &mut Ui) {
        let Some(texture) = &self.texture else {
            return;
        };
        let size = self.fit_size(ui.available_size());
        ui.centered_and_justified(|ui| {
            ui.image(SizedTexture::new(texture.id(), size));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_rgba8() {
        assert_eq!(to_rgba8(Vec4::new(0.5, 0.0, 1.0, 1.0)), [128, 0, 255, 255]);
    }

    #[test]
    fn test_to_color32() {
        assert_eq!(to_color32(Vec4::ONE), Color32::WHITE);
        assert_eq!(
            to_color32(Vec4::new(2.0, -1.0, 0.0, 1.0)),
            Color32::from_rgb(255, 0, 0)
        );
    }

    #[test]
    fn test_update_validates_length() {
        let ctx = Context::default();
        let mut buffer = RenderBuffer::new("render_buffer", 4, 3);
        assert!(!buffer.has_data());

        let err = buffer.update_from_host(&ctx, &[Vec4::ONE; 11]).unwrap_err();
        assert!(matches!(
            err,
            PsUtilsError::SizeMismatch {
                expected: 12,
                actual: 11
            }
        ));
        assert!(!buffer.has_data());

        buffer.update_from_host(&ctx, &[Vec4::ONE; 12]).unwrap();
        buffer.update_from_host(&ctx, &[Vec4::ZERO; 12]).unwrap();
        assert!(buffer.has_data());
    }

    #[test]
    fn test_fit_size_keeps_aspect() {
        let buffer = RenderBuffer::new("b", 200, 100);
        assert_eq!(buffer.fit_size(Vec2::new(400.0, 400.0)), Vec2::new(400.0, 200.0));
        assert_eq!(buffer.fit_size(Vec2::new(100.0, 400.0)), Vec2::new(100.0, 50.0));
        assert_eq!(RenderBuffer::new("e", 0, 5).fit_size(Vec2::splat(10.0)), Vec2::ZERO);
    }
}
