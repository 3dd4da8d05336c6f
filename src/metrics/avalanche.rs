//! Bit-level avalanche ratio.

use crate::error::{Error, Result};
use crate::metrics::differential::ensure_comparable;
use crate::raster::PixelImage;

/// Percentage of differing bits between the byte serializations of two
/// images.
///
/// Both images are serialized with [`PixelImage::to_bytes`]. Around 50% is
/// ideal: a one-bit key change should flip half of the ciphertext bits.
///
/// # Errors
///
/// [`Error::ShapeMismatch`] or [`Error::EmptyInput`].
pub fn avalanche(a: &PixelImage, b: &PixelImage) -> Result<f64> {
    ensure_comparable(a, b, "avalanche")?;
    bit_difference_ratio(&a.to_bytes(), &b.to_bytes())
}

/// Percentage of differing bits between two equal-length byte buffers.
///
/// Bits are compared at the same position (MSB first within each byte);
/// the count of differences does not depend on that order.
///
/// # Errors
///
/// [`Error::BufferLength`] if the lengths differ, [`Error::EmptyInput`] if
/// both are empty.
pub fn bit_difference_ratio(a: &[u8], b: &[u8]) -> Result<f64> {
    if a.len() != b.len() {
        return Err(Error::BufferLength {
            expected: a.len(),
            actual: b.len(),
        });
    }
    if a.is_empty() {
        return Err(Error::EmptyInput { metric: "avalanche" });
    }

    let differing: u64 = a
        .iter()
        .zip(b)
        .map(|(x, y)| u64::from((x ^ y).count_ones()))
        .sum();
    let total_bits = a.len() as u64 * 8;

    Ok(100.0 * differing as f64 / total_bits as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use rgb::RGB8;

    fn random_image(width: usize, height: usize, seed: u64) -> PixelImage {
        let mut rng = StdRng::seed_from_u64(seed);
        PixelImage::from_fn(width, height, |_, _| {
            RGB8::new(rng.r#gen(), rng.r#gen(), rng.r#gen())
        })
    }

    #[test]
    fn test_identical_is_zero() {
        let img = random_image(16, 16, 5);
        assert_eq!(avalanche(&img, &img).unwrap(), 0.0);
    }

    #[test]
    fn test_single_bit_flip() {
        let img = random_image(10, 6, 9);
        let mut bytes = img.to_bytes();
        bytes[77] ^= 0b0001_0000;
        let flipped = PixelImage::from_raw(bytes, 10, 6).unwrap();

        let total_bits = (10 * 6 * 3 * 8) as f64;
        assert_eq!(avalanche(&img, &flipped).unwrap(), 100.0 / total_bits);
    }

    #[test]
    fn test_complement_is_hundred() {
        let a = [0x00u8, 0xF0, 0x5A];
        let b = [0xFFu8, 0x0F, 0xA5];
        assert_eq!(bit_difference_ratio(&a, &b).unwrap(), 100.0);
    }

    #[test]
    fn test_random_pair_near_half() {
        let a = random_image(128, 128, 30);
        let b = random_image(128, 128, 31);
        let ratio = avalanche(&a, &b).unwrap();
        assert!((ratio - 50.0).abs() < 0.5, "avalanche {ratio}");
    }

    #[test]
    fn test_length_mismatch() {
        assert!(matches!(
            bit_difference_ratio(&[1, 2, 3], &[1, 2]),
            Err(Error::BufferLength {
                expected: 3,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_shape_mismatch_before_serialization() {
        let a = PixelImage::filled(2, 6, RGB8::default());
        let b = PixelImage::filled(6, 2, RGB8::default());
        // Same byte length, different shape.
        assert!(matches!(avalanche(&a, &b), Err(Error::ShapeMismatch { .. })));
    }
}
