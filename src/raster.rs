//! Pixel data accepted by the metrics.
//!
//! [`PixelImage`] is an owned, row-major RGB8 raster. The metric functions
//! only ever borrow it, so one decoded image can feed every metric (and
//! several threads) at once.

use imgref::{ImgRef, ImgVec};
use rgb::RGB8;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One of the three color channels, in storage order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    /// Red, first sample of each pixel.
    Red,
    /// Green, second sample of each pixel.
    Green,
    /// Blue, third sample of each pixel.
    Blue,
}

impl Channel {
    /// All channels in storage order.
    pub const ALL: [Self; 3] = [Self::Red, Self::Green, Self::Blue];

    /// Position of this channel inside a pixel.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Red => 0,
            Self::Green => 1,
            Self::Blue => 2,
        }
    }

    /// Lowercase channel name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
        }
    }

    /// Extract this channel's sample from a pixel.
    #[inline]
    #[must_use]
    pub fn sample(self, px: RGB8) -> u8 {
        match self {
            Self::Red => px.r,
            Self::Green => px.g,
            Self::Blue => px.b,
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The samples of a single channel, flattened in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelVector {
    channel: Channel,
    samples: Vec<u8>,
}

impl ChannelVector {
    /// Channel these samples were taken from.
    #[must_use]
    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// Raw samples.
    #[must_use]
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether there are no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// An owned H x W x 3 image of 8-bit samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelImage {
    pixels: Vec<RGB8>,
    width: usize,
    height: usize,
}

impl PixelImage {
    /// Build an image from interleaved `R,G,B` bytes in row-major order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferLength`] if `data.len() != width * height * 3`.
    pub fn from_raw(data: Vec<u8>, width: usize, height: usize) -> Result<Self> {
        let expected = width * height * 3;
        if data.len() != expected {
            return Err(Error::BufferLength {
                expected,
                actual: data.len(),
            });
        }

        let pixels = data
            .chunks_exact(3)
            .map(|c| RGB8::new(c[0], c[1], c[2]))
            .collect();
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// Build an image from packed pixels in row-major order.
    pub fn from_pixels(pixels: Vec<RGB8>, width: usize, height: usize) -> Result<Self> {
        if pixels.len() != width * height {
            return Err(Error::BufferLength {
                expected: width * height * 3,
                actual: pixels.len() * 3,
            });
        }
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// An image where every pixel has the same color.
    #[must_use]
    pub fn filled(width: usize, height: usize, color: RGB8) -> Self {
        Self {
            pixels: vec![color; width * height],
            width,
            height,
        }
    }

    /// An image whose pixel at `(row, col)` is `f(row, col)`.
    #[must_use]
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> RGB8) -> Self {
        let mut pixels = Vec::with_capacity(width * height);
        for row in 0..height {
            for col in 0..width {
                pixels.push(f(row, col));
            }
        }
        Self {
            pixels,
            width,
            height,
        }
    }

    /// Image width in pixels.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// `(height, width)`, the shape compared by pairwise metrics.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    /// Number of pixel positions (H x W).
    #[must_use]
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    /// Number of individual samples (H x W x 3).
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.pixels.len() * 3
    }

    /// Whether the image has zero pixels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Pixel at `(row, col)`, if in bounds.
    #[must_use]
    pub fn pixel(&self, row: usize, col: usize) -> Option<RGB8> {
        if row < self.height && col < self.width {
            Some(self.pixels[row * self.width + col])
        } else {
            None
        }
    }

    /// All pixels in row-major order.
    #[must_use]
    pub fn pixels(&self) -> &[RGB8] {
        &self.pixels
    }

    /// Iterate over rows of pixels.
    pub fn rows(&self) -> impl Iterator<Item = &[RGB8]> {
        // chunks() rejects a zero size; an image with width 0 has no pixels anyway.
        self.pixels.chunks(self.width.max(1))
    }

    /// Flatten one channel into a [`ChannelVector`].
    #[must_use]
    pub fn channel(&self, channel: Channel) -> ChannelVector {
        ChannelVector {
            channel,
            samples: self.pixels.iter().map(|&p| channel.sample(p)).collect(),
        }
    }

    /// Raw byte serialization: interleaved `R,G,B`, row-major.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| [p.r, p.g, p.b]).collect()
    }

    /// Borrow as an `imgref` image. `None` for an empty image.
    #[must_use]
    pub fn as_img(&self) -> Option<ImgRef<'_, RGB8>> {
        if self.is_empty() {
            None
        } else {
            Some(ImgRef::new(self.pixels.as_slice(), self.width, self.height))
        }
    }
}

impl From<ImgVec<RGB8>> for PixelImage {
    fn from(img: ImgVec<RGB8>) -> Self {
        let width = img.width();
        let height = img.height();
        // pixels() skips stride padding
        let pixels = img.pixels().collect();
        Self {
            pixels,
            width,
            height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_layout() {
        let img = PixelImage::from_raw(vec![1, 2, 3, 4, 5, 6], 2, 1).unwrap();
        assert_eq!(img.shape(), (1, 2));
        assert_eq!(img.pixel(0, 1), Some(RGB8::new(4, 5, 6)));
        assert_eq!(img.pixel(1, 0), None);
        assert_eq!(img.to_bytes(), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_from_raw_wrong_length() {
        let err = PixelImage::from_raw(vec![0; 10], 2, 2).unwrap_err();
        assert!(matches!(
            err,
            Error::BufferLength {
                expected: 12,
                actual: 10
            }
        ));
    }

    #[test]
    fn test_from_pixels_wrong_length() {
        let err = PixelImage::from_pixels(vec![RGB8::default(); 3], 2, 2).unwrap_err();
        assert!(matches!(err, Error::BufferLength { .. }));
    }

    #[test]
    fn test_channel_extraction() {
        let img = PixelImage::from_fn(3, 2, |row, col| {
            RGB8::new((row * 3 + col) as u8, 100, 200)
        });
        let red = img.channel(Channel::Red);
        assert_eq!(red.channel(), Channel::Red);
        assert_eq!(red.samples(), &[0, 1, 2, 3, 4, 5]);
        assert!(img.channel(Channel::Blue).samples().iter().all(|&s| s == 200));
    }

    #[test]
    fn test_counts() {
        let img = PixelImage::filled(4, 3, RGB8::new(9, 9, 9));
        assert_eq!(img.pixel_count(), 12);
        assert_eq!(img.sample_count(), 36);
        assert_eq!(img.rows().count(), 3);
        assert!(!img.is_empty());
    }

    #[test]
    fn test_empty_image() {
        let img = PixelImage::filled(0, 5, RGB8::default());
        assert!(img.is_empty());
        assert_eq!(img.rows().count(), 0);
        assert!(img.as_img().is_none());
    }

    #[test]
    fn test_from_imgvec_roundtrip() {
        let pixels: Vec<RGB8> = (0..6u8).map(|i| RGB8::new(i, i, i)).collect();
        let img: PixelImage = ImgVec::new(pixels.clone(), 3, 2).into();
        assert_eq!(img.pixels(), pixels.as_slice());
        let view = img.as_img().unwrap();
        assert_eq!(view.width(), 3);
        assert_eq!(view.height(), 2);
    }
}
