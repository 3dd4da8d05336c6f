//! Per-channel Shannon entropy.

use crate::error::{Error, Result};
use crate::metrics::ChannelValues;
use crate::metrics::histogram::{ChannelHistogram, channel_histograms};
use crate::raster::PixelImage;

/// Maximum entropy of an 8-bit channel, in bits.
pub const MAX_ENTROPY: f64 = 8.0;

/// Shannon entropy of each channel, in bits.
///
/// Each value lies in `[0, 8]`. A well-encrypted image gets close to
/// [`MAX_ENTROPY`] on every channel; a channel holding a single value is 0.
///
/// # Errors
///
/// Returns [`Error::EmptyInput`] if the image has no pixels.
pub fn channel_entropy(image: &PixelImage) -> Result<ChannelValues> {
    if image.is_empty() {
        return Err(Error::EmptyInput { metric: "entropy" });
    }

    let [r, g, b] = channel_histograms(image);
    Ok(ChannelValues::new(
        shannon_entropy(&r),
        shannon_entropy(&g),
        shannon_entropy(&b),
    ))
}

/// `-sum(p * log2(p))` over the values present in `histogram`.
///
/// Returns 0.0 for an empty histogram.
#[must_use]
pub fn shannon_entropy(histogram: &ChannelHistogram) -> f64 {
    if histogram.total() == 0 {
        return 0.0;
    }
    // probabilities() never yields p == 0, so log2(0) is never evaluated
    // subtract from +0.0 so a single-valued channel is not -0.0
    0.0 - histogram.probabilities().map(|p| p * p.log2()).sum::<f64>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::Channel;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use rgb::RGB8;

    #[test]
    fn test_constant_image_is_zero() {
        let img = PixelImage::filled(16, 16, RGB8::new(12, 200, 0));
        let e = channel_entropy(&img).unwrap();
        assert_eq!(e.red, 0.0);
        assert_eq!(e.green, 0.0);
        assert_eq!(e.blue, 0.0);
        assert!(e.iter().all(|v| !v.is_sign_negative()));
        assert_eq!(e.to_string(), "[0, 0, 0]");
    }

    #[test]
    fn test_all_values_once_is_eight_bits() {
        let img = PixelImage::from_fn(256, 1, |_, col| {
            let v = col as u8;
            RGB8::new(v, v, v)
        });
        let e = channel_entropy(&img).unwrap();
        for v in e.iter() {
            assert!((v - MAX_ENTROPY).abs() < 1e-12);
        }
    }

    #[test]
    fn test_two_equal_halves_is_one_bit() {
        let img = PixelImage::from_fn(8, 8, |row, _| {
            if row < 4 {
                RGB8::new(0, 0, 0)
            } else {
                RGB8::new(255, 1, 77)
            }
        });
        let e = channel_entropy(&img).unwrap();
        assert!((e.red - 1.0).abs() < 1e-12);
        assert!((e.green - 1.0).abs() < 1e-12);
        assert!((e.blue - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_channels_independent() {
        let img = PixelImage::from_fn(256, 1, |_, col| RGB8::new(col as u8, 5, 5));
        let e = channel_entropy(&img).unwrap();
        assert!((e[Channel::Red] - 8.0).abs() < 1e-12);
        assert_eq!(e[Channel::Green], 0.0);
    }

    #[test]
    fn test_random_image_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let img = PixelImage::from_fn(128, 128, |_, _| RGB8::new(rng.r#gen(), rng.r#gen(), rng.r#gen()));
        let e = channel_entropy(&img).unwrap();
        for v in e.iter() {
            assert!((0.0..=MAX_ENTROPY).contains(&v));
            assert!(v > 7.9, "random channel entropy too low: {v}");
        }
    }

    #[test]
    fn test_empty_image_rejected() {
        let img = PixelImage::filled(0, 0, RGB8::default());
        assert!(matches!(
            channel_entropy(&img),
            Err(Error::EmptyInput { metric: "entropy" })
        ));
    }
}
