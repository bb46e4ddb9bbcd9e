//! Kitty Graphics Protocol implementation
//!
//! Shows the bundled picture as a real image in supporting terminals.
//! Supported by: Ghostty, Kitty, WezTerm, iTerm2
//!
//! Protocol documentation: https://sw.kovidgoyal.net/kitty/graphics-protocol/

use std::collections::HashMap;
use std::io::{self, Write};

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use image::{DynamicImage, RgbaImage};
use ratatui::layout::Rect;

/// Kitty limits the payload of one escape sequence
const CHUNK_SIZE: usize = 4096;

/// Kitty Graphics Protocol handler
pub struct KittyGraphics {
    /// Uploaded image IDs mapped to their pixel dimensions
    uploaded_images: HashMap<u32, (u32, u32)>,
    /// Where each image is currently placed
    placements: HashMap<u32, Rect>,
    /// Next available image ID
    next_id: u32,
    /// Whether to suppress terminal responses
    quiet: bool,
}

impl KittyGraphics {
    pub fn new() -> Self {
        Self {
            uploaded_images: HashMap::new(),
            placements: HashMap::new(),
            next_id: 1,
            quiet: true,
        }
    }

    fn quiet_flag(&self) -> u8 {
        if self.quiet { 2 } else { 0 }
    }

    /// Upload an image once and get an ID for placing it
    pub fn upload_image(&mut self, out: &mut impl Write, image: &DynamicImage) -> io::Result<u32> {
        let id = self.next_id;
        self.next_id += 1;

        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();

        // PNG keeps the payload small
        let png_data = encode_png(&rgba)?;
        let encoded = BASE64.encode(&png_data);

        // a=t (transmit), t=d (direct), f=100 (PNG format), i=ID, q=quiet
        let chunks: Vec<&[u8]> = encoded.as_bytes().chunks(CHUNK_SIZE).collect();
        for (i, chunk) in chunks.iter().enumerate() {
            let more = if i + 1 == chunks.len() { 0 } else { 1 };

            if i == 0 {
                write!(out, "\x1b_Ga=t,t=d,f=100,i={},q={},m={};", id, self.quiet_flag(), more)?;
            } else {
                write!(out, "\x1b_Gm={};", more)?;
            }
            out.write_all(chunk)?;
            write!(out, "\x1b\\")?;
        }
        out.flush()?;

        self.uploaded_images.insert(id, (width, height));
        log::debug!("Uploaded image {} ({}x{})", id, width, height);
        Ok(id)
    }

    /// Place an uploaded image over a cell rectangle
    ///
    /// Does nothing when the image already sits in that rectangle; an image
    /// that moved has its old placement removed first.
    pub fn place(&mut self, out: &mut impl Write, image_id: u32, area: Rect) -> io::Result<()> {
        if self.placements.get(&image_id) == Some(&area) {
            return Ok(());
        }
        if self.placements.contains_key(&image_id) {
            self.remove_placements(out, image_id)?;
        }
        if area.width == 0 || area.height == 0 {
            return Ok(());
        }

        // Move the cursor, then a=p (put), c=columns, r=rows, C=1 keeps the cursor still
        write!(out, "\x1b7\x1b[{};{}H", area.y + 1, area.x + 1)?;
        write!(
            out,
            "\x1b_Ga=p,i={},c={},r={},C=1,q={}\x1b\\\x1b8",
            image_id,
            area.width,
            area.height,
            self.quiet_flag()
        )?;
        out.flush()?;

        self.placements.insert(image_id, area);
        Ok(())
    }

    /// Remove the placements of an image but keep its data uploaded
    pub fn remove_placements(&mut self, out: &mut impl Write, image_id: u32) -> io::Result<()> {
        // d=i (lowercase) keeps the image data
        write!(out, "\x1b_Ga=d,d=i,i={},q={}\x1b\\", image_id, self.quiet_flag())?;
        out.flush()?;
        self.placements.remove(&image_id);
        Ok(())
    }

    /// Delete all uploaded images
    pub fn clear_all(&mut self, out: &mut impl Write) -> io::Result<()> {
        // a=d, d=A (delete all, freeing data)
        write!(out, "\x1b_Ga=d,d=A,q={}\x1b\\", self.quiet_flag())?;
        out.flush()?;

        self.uploaded_images.clear();
        self.placements.clear();
        Ok(())
    }

    /// Check if an image is uploaded
    pub fn is_uploaded(&self, image_id: u32) -> bool {
        self.uploaded_images.contains_key(&image_id)
    }

    /// Current placement of an image
    pub fn placement(&self, image_id: u32) -> Option<Rect> {
        self.placements.get(&image_id).copied()
    }
}

impl Default for KittyGraphics {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode an RGBA image as PNG bytes
fn encode_png(image: &RgbaImage) -> io::Result<Vec<u8>> {
    use std::io::Cursor;
    use image::ImageEncoder;

    let mut buffer = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(Cursor::new(&mut buffer));

    encoder
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            image::ExtendedColorType::Rgba8,
        )
        .map_err(io::Error::other)?;

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> DynamicImage {
        let mut img = RgbaImage::new(4, 4);
        for pixel in img.pixels_mut() {
            *pixel = image::Rgba([10, 200, 10, 255]);
        }
        DynamicImage::ImageRgba8(img)
    }

    #[test]
    fn test_upload_writes_png_payload() {
        let mut kitty = KittyGraphics::new();
        let mut out = Vec::new();

        let id = kitty.upload_image(&mut out, &square()).unwrap();
        assert!(kitty.is_uploaded(id));

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("\x1b_Ga=t,t=d,f=100,i=1,q=2,m=0;"));
        assert!(text.ends_with("\x1b\\"));
    }

    #[test]
    fn test_place_is_idempotent() {
        let mut kitty = KittyGraphics::new();
        let mut sink = Vec::new();
        let id = kitty.upload_image(&mut sink, &square()).unwrap();
        let area = Rect::new(2, 3, 10, 5);

        let mut out = Vec::new();
        kitty.place(&mut out, id, area).unwrap();
        assert!(String::from_utf8_lossy(&out).contains("a=p,i=1,c=10,r=5"));
        assert_eq!(kitty.placement(id), Some(area));

        let mut again = Vec::new();
        kitty.place(&mut again, id, area).unwrap();
        assert!(again.is_empty());
    }

    #[test]
    fn test_moving_removes_old_placement() {
        let mut kitty = KittyGraphics::new();
        let mut sink = Vec::new();
        let id = kitty.upload_image(&mut sink, &square()).unwrap();
        kitty.place(&mut sink, id, Rect::new(0, 0, 4, 2)).unwrap();

        let mut out = Vec::new();
        kitty.place(&mut out, id, Rect::new(0, 5, 8, 4)).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.starts_with("\x1b_Ga=d,d=i,i=1"));
        assert!(text.contains("c=8,r=4"));
    }

    #[test]
    fn test_clear_all() {
        let mut kitty = KittyGraphics::new();
        let mut sink = Vec::new();
        let id = kitty.upload_image(&mut sink, &square()).unwrap();
        kitty.clear_all(&mut sink).unwrap();
        assert!(!kitty.is_uploaded(id));
        assert_eq!(kitty.placement(id), None);
    }
}
