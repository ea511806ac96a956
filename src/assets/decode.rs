use std::sync::Arc;

use anyhow::Context;

use crate::foundation::error::{StripFxError, StripFxResult};

/// A decoded source image, ready for the backend to upload.
///
/// The pipeline itself only consumes the aspect ratio; the pixels ride along
/// so the host can hand them to its texture upload path.
#[derive(Clone, Debug)]
pub struct SourceImage {
    pub width: u32,
    pub height: u32,
    pub rgba8: Arc<Vec<u8>>,
}

impl SourceImage {
    pub fn aspect(&self) -> f64 {
        if self.height == 0 {
            return 1.0;
        }
        f64::from(self.width) / f64::from(self.height)
    }
}

/// Decode encoded image bytes into RGBA8.
pub fn decode_image(bytes: &[u8]) -> StripFxResult<SourceImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(StripFxError::asset("decoded image has a zero dimension"));
    }
    Ok(SourceImage {
        width,
        height,
        rgba8: Arc::new(rgba.into_raw()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_png(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([10, 20, 30, 255]));
        let mut out = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut std::io::Cursor::new(&mut out), image::ImageFormat::Png)
            .unwrap();
        out
    }

    #[test]
    fn decodes_png_and_reports_aspect() {
        let bytes = encode_png(16, 9);
        let img = decode_image(&bytes).unwrap();
        assert_eq!((img.width, img.height), (16, 9));
        assert_eq!(img.rgba8.len(), 16 * 9 * 4);
        assert!((img.aspect() - 16.0 / 9.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_garbage_bytes() {
        assert!(decode_image(&[0u8, 1, 2, 3]).is_err());
    }
}
