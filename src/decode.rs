//! Loading images from disk or memory into [`PixelImage`].
//!
//! Decoding goes through the `image` crate (PNG and JPEG). Every input is
//! converted to 8-bit RGB; alpha and extra precision are dropped, so the
//! metrics always see three 8-bit channels.
//!
//! # Example
//!
//! ```ignore
//! use cipher_eval::decode::load_image;
//!
//! let original = load_image("imgs/lena.png".as_ref())?;
//! println!("{}x{}", original.width(), original.height());
//! ```

use std::path::Path;

use crate::error::{Error, Result};
use crate::raster::PixelImage;

/// Decode an image file, converting it to RGB8.
///
/// # Errors
///
/// Returns [`Error::ImageLoad`] if the file can't be read or decoded.
pub fn load_image(path: &Path) -> Result<PixelImage> {
    let decoded = ::image::open(path).map_err(|e| Error::ImageLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    tracing::debug!(path = %path.display(), color = ?decoded.color(), "decoded image");
    from_dynamic(decoded)
}

/// Decode an in-memory PNG or JPEG, converting it to RGB8.
///
/// # Errors
///
/// Returns [`Error::ImageLoad`] (with an empty path) if decoding fails.
pub fn decode_image(data: &[u8]) -> Result<PixelImage> {
    let decoded = ::image::load_from_memory(data).map_err(|e| Error::ImageLoad {
        path: Default::default(),
        reason: e.to_string(),
    })?;
    from_dynamic(decoded)
}

/// Write an image as PNG. Lossless, so a saved ciphertext keeps every bit.
///
/// # Errors
///
/// Returns [`Error::Report`] if encoding or writing fails.
pub fn save_png(image: &PixelImage, path: &Path) -> Result<()> {
    let buffer = ::image::RgbImage::from_raw(
        image.width() as u32,
        image.height() as u32,
        image.to_bytes(),
    )
    .ok_or_else(|| Error::Report(format!("image too large to encode: {}", path.display())))?;

    buffer
        .save_with_format(path, ::image::ImageFormat::Png)
        .map_err(|e| Error::Report(format!("{}: {e}", path.display())))
}

fn from_dynamic(decoded: ::image::DynamicImage) -> Result<PixelImage> {
    let rgb = decoded.to_rgb8();
    let (width, height) = rgb.dimensions();
    PixelImage::from_raw(rgb.into_raw(), width as usize, height as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rgb::RGB8;

    #[test]
    fn test_png_roundtrip_is_lossless() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gradient.png");
        let img = PixelImage::from_fn(9, 5, |row, col| {
            RGB8::new((row * 40) as u8, (col * 25) as u8, 255)
        });

        save_png(&img, &path).unwrap();
        let loaded = load_image(&path).unwrap();
        assert_eq!(loaded, img);

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(decode_image(&bytes).unwrap(), img);
    }

    #[test]
    fn test_missing_file() {
        let err = load_image(Path::new("/nonexistent/cipher-eval/missing.png")).unwrap_err();
        assert!(matches!(err, Error::ImageLoad { .. }));
    }

    #[test]
    fn test_garbage_bytes() {
        assert!(matches!(
            decode_image(b"not an image"),
            Err(Error::ImageLoad { .. })
        ));
    }
}
