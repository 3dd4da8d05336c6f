//! Differential-attack metrics: NPCR and UACI.
//!
//! Both compare two same-shape images position by position. They are used
//! twice per analysis: plaintext vs. ciphertext, and ciphertext vs. the
//! ciphertext produced under a key differing in one bit.

use crate::error::{Error, Result};
use crate::raster::PixelImage;

/// Largest value an 8-bit sample can take.
const MAX_SAMPLE: f64 = 255.0;

/// Fail with [`Error::ShapeMismatch`] unless both images have the same
/// height and width, then with [`Error::EmptyInput`] if they have no pixels.
pub(crate) fn ensure_comparable(a: &PixelImage, b: &PixelImage, metric: &'static str) -> Result<()> {
    if a.shape() != b.shape() {
        return Err(Error::ShapeMismatch {
            expected: a.shape(),
            actual: b.shape(),
        });
    }
    if a.is_empty() {
        return Err(Error::EmptyInput { metric });
    }
    Ok(())
}

/// Number of Pixels Changed Rate, in percent.
///
/// A pixel position counts as changed when *any* of its three channels
/// differs; the count is divided by H x W, not by the sample count.
///
/// # Errors
///
/// [`Error::ShapeMismatch`] or [`Error::EmptyInput`].
pub fn npcr(a: &PixelImage, b: &PixelImage) -> Result<f64> {
    ensure_comparable(a, b, "NPCR")?;

    let changed = a
        .pixels()
        .iter()
        .zip(b.pixels())
        .filter(|(pa, pb)| pa != pb)
        .count();

    Ok(100.0 * changed as f64 / a.pixel_count() as f64)
}

/// Unified Average Changing Intensity, in percent.
///
/// `100 * sum(|a_i - b_i|) / (N * 255)` where `N` is the number of samples
/// (H x W x 3). Differences are taken in signed arithmetic.
///
/// # Errors
///
/// [`Error::ShapeMismatch`] or [`Error::EmptyInput`].
pub fn uaci(a: &PixelImage, b: &PixelImage) -> Result<f64> {
    ensure_comparable(a, b, "UACI")?;

    let total_diff: u64 = a
        .pixels()
        .iter()
        .zip(b.pixels())
        .map(|(pa, pb)| {
            abs_diff(pa.r, pb.r) + abs_diff(pa.g, pb.g) + abs_diff(pa.b, pb.b)
        })
        .sum();

    Ok(100.0 * total_diff as f64 / (a.sample_count() as f64 * MAX_SAMPLE))
}

#[inline]
fn abs_diff(x: u8, y: u8) -> u64 {
    (i16::from(x) - i16::from(y)).unsigned_abs() as u64
}
