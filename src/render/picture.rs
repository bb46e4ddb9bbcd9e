//! The bundled picture and its cell-based renderings

use image::{imageops::FilterType, DynamicImage, ImageFormat, RgbaImage};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};
use thiserror::Error;

use super::RenderMode;

/// Picture shipped inside the binary
const BUNDLED_PICTURE: &[u8] = include_bytes!("../../assets/banner.ppm");

/// Characters from dark to light for ASCII rendering
const SHADES: &[u8] = b" .:-=+*#%@";

/// Errors loading image assets
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to decode bundled picture: {0}")]
    Decode(#[from] image::ImageError),
}

/// A decoded picture
#[derive(Debug, Clone)]
pub struct Picture {
    image: DynamicImage,
}

impl Picture {
    /// Decode the picture bundled with the binary
    pub fn bundled() -> Result<Self, AssetError> {
        let image = image::load_from_memory_with_format(BUNDLED_PICTURE, ImageFormat::Pnm)?;
        Ok(Self { image })
    }

    /// Plain green picture used when decoding fails
    pub fn placeholder() -> Self {
        let mut img = RgbaImage::new(4, 3);
        for pixel in img.pixels_mut() {
            *pixel = image::Rgba([40, 140, 50, 255]);
        }
        Self {
            image: DynamicImage::ImageRgba8(img),
        }
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.image.width(), self.image.height())
    }

    /// Scale to exactly `width` x `height` pixels
    fn scaled(&self, width: u32, height: u32) -> RgbaImage {
        self.image
            .resize_exact(width.max(1), height.max(1), FilterType::Triangle)
            .to_rgba8()
    }
}

/// Cells needed for a logical image size
///
/// `cell_aspect` is the height of one cell divided by its width; the result
/// is clamped to `bounds`.
pub fn fit_cells(width: f32, height: f32, cell_aspect: f32, bounds: Rect) -> (u16, u16) {
    let aspect = if cell_aspect > 0.0 { cell_aspect } else { 1.0 };
    let cols = width.round().clamp(0.0, f32::from(bounds.width)) as u16;
    let rows = (height / aspect).round().clamp(0.0, f32::from(bounds.height)) as u16;
    (cols, rows)
}

/// Draws a [`Picture`] into cells
pub struct PictureWidget<'a> {
    picture: &'a Picture,
    mode: RenderMode,
}

impl<'a> PictureWidget<'a> {
    pub fn new(picture: &'a Picture, mode: RenderMode) -> Self {
        Self { picture, mode }
    }

    fn render_half_blocks(&self, area: Rect, buf: &mut Buffer) {
        let scaled = self.picture.scaled(u32::from(area.width), u32::from(area.height) * 2);

        for row in 0..area.height {
            for col in 0..area.width {
                let top = scaled.get_pixel(u32::from(col), u32::from(row) * 2);
                let bottom = scaled.get_pixel(u32::from(col), u32::from(row) * 2 + 1);
                let style = Style::default()
                    .fg(Color::Rgb(top[0], top[1], top[2]))
                    .bg(Color::Rgb(bottom[0], bottom[1], bottom[2]));
                buf.set_string(area.x + col, area.y + row, "▀", style);
            }
        }
    }

    fn render_ascii(&self, area: Rect, buf: &mut Buffer) {
        let scaled = self.picture.scaled(u32::from(area.width), u32::from(area.height));

        for row in 0..area.height {
            for col in 0..area.width {
                let p = scaled.get_pixel(u32::from(col), u32::from(row));
                let luma = (u32::from(p[0]) * 299 + u32::from(p[1]) * 587 + u32::from(p[2]) * 114) / 1000;
                let index = (luma as usize * (SHADES.len() - 1)) / 255;
                let shade = char::from(SHADES[index]);
                buf.set_string(area.x + col, area.y + row, shade.to_string(), Style::default());
            }
        }
    }
}

impl Widget for PictureWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        match self.mode {
            RenderMode::HalfBlock => self.render_half_blocks(area, buf),
            RenderMode::Ascii => self.render_ascii(area, buf),
            // Kitty images are placed over the cells after the frame is drawn
            RenderMode::Kitty | RenderMode::Off => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_picture_decodes() {
        let picture = Picture::bundled().unwrap();
        assert_eq!(picture.dimensions(), (32, 24));
    }

    #[test]
    fn test_fit_cells() {
        let bounds = Rect::new(0, 0, 100, 50);
        // 80 x 60 logical units, two units per row
        assert_eq!(fit_cells(80.0, 60.0, 2.0, bounds), (80, 30));
        // Clamped to the available space
        assert_eq!(fit_cells(400.0, 300.0, 2.0, bounds), (100, 50));
    }

    #[test]
    fn test_half_block_render() {
        let picture = Picture::placeholder();
        let area = Rect::new(0, 0, 4, 2);
        let mut buf = Buffer::empty(area);

        PictureWidget::new(&picture, RenderMode::HalfBlock).render(area, &mut buf);

        let cell = &buf[(1, 1)];
        assert_eq!(cell.symbol(), "▀");
        assert_eq!(cell.fg, Color::Rgb(40, 140, 50));
        assert_eq!(cell.bg, Color::Rgb(40, 140, 50));
    }

    #[test]
    fn test_off_leaves_area_blank() {
        let picture = Picture::placeholder();
        let area = Rect::new(0, 0, 4, 2);
        let mut buf = Buffer::empty(area);

        PictureWidget::new(&picture, RenderMode::Off).render(area, &mut buf);
        assert_eq!(buf, Buffer::empty(area));
    }
}
