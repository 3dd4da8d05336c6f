//! Adjacent-pixel Pearson correlation.
//!
//! Natural images have strong positive correlation between neighbouring
//! samples; a good cipher drives it towards zero along every axis.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::metrics::ChannelValues;
use crate::raster::{Channel, PixelImage};

/// Direction of the neighbour a pixel is paired with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CorrelationMode {
    /// `(r, c)` with `(r, c + 1)`.
    #[serde(rename = "H")]
    Horizontal,
    /// `(r, c)` with `(r + 1, c)`.
    #[serde(rename = "V")]
    Vertical,
    /// `(r, c)` with `(r + 1, c + 1)`.
    #[serde(rename = "D")]
    Diagonal,
}

impl CorrelationMode {
    /// All modes in report order.
    pub const ALL: [Self; 3] = [Self::Horizontal, Self::Vertical, Self::Diagonal];

    /// Single-letter code (`H`, `V`, `D`).
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Horizontal => "H",
            Self::Vertical => "V",
            Self::Diagonal => "D",
        }
    }

    /// Row and column offset of the neighbour.
    #[must_use]
    pub fn offset(self) -> (usize, usize) {
        match self {
            Self::Horizontal => (0, 1),
            Self::Vertical => (1, 0),
            Self::Diagonal => (1, 1),
        }
    }
}

impl FromStr for CorrelationMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "H" => Ok(Self::Horizontal),
            "V" => Ok(Self::Vertical),
            "D" => Ok(Self::Diagonal),
            other => Err(Error::InvalidMode(other.to_string())),
        }
    }
}

impl std::fmt::Display for CorrelationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Pearson correlation per channel between each pixel and its neighbour.
///
/// Every value lies in `[-1, 1]`. A channel that is constant on either side
/// of the pairing yields exactly `0.0`.
///
/// # Errors
///
/// Returns [`Error::EmptyInput`] if the image has no pixels.
pub fn pixel_correlation(image: &PixelImage, mode: CorrelationMode) -> Result<ChannelValues> {
    if image.is_empty() {
        return Err(Error::EmptyInput {
            metric: "correlation",
        });
    }

    Ok(ChannelValues::from_fn(|channel| {
        let (x, y) = neighbor_pairs(image, channel, mode);
        pearson(&x, &y)
    }))
}

/// Like [`pixel_correlation`], with the mode given as `"H"`, `"V"` or `"D"`.
///
/// # Errors
///
/// Returns [`Error::InvalidMode`] for any other string, before looking at
/// the image.
pub fn pixel_correlation_by_code(image: &PixelImage, mode: &str) -> Result<ChannelValues> {
    let mode = mode.parse::<CorrelationMode>()?;
    pixel_correlation(image, mode)
}

/// The two paired sample sequences for one channel.
///
/// `x` holds every pixel that has a neighbour in `mode`'s direction, `y` the
/// neighbour itself; both are row-major over the overlapping region.
#[must_use]
pub fn neighbor_pairs(
    image: &PixelImage,
    channel: Channel,
    mode: CorrelationMode,
) -> (Vec<f64>, Vec<f64>) {
    let (dr, dc) = mode.offset();
    let rows = image.height().saturating_sub(dr);
    let cols = image.width().saturating_sub(dc);

    let mut x = Vec::with_capacity(rows * cols);
    let mut y = Vec::with_capacity(rows * cols);
    let pixels = image.pixels();
    let width = image.width();

    for r in 0..rows {
        for c in 0..cols {
            let here = pixels[r * width + c];
            let there = pixels[(r + dr) * width + c + dc];
            x.push(f64::from(channel.sample(here)));
            y.push(f64::from(channel.sample(there)));
        }
    }

    (x, y)
}

/// Pearson correlation coefficient of two equal-length sequences.
///
/// ```text
/// r = sum((x - mx)(y - my)) / sqrt(sum((x - mx)^2) * sum((y - my)^2))
/// ```
///
/// A zero denominator (either sequence constant, or no pairs at all) gives
/// `0.0`, never NaN.
///
/// # Panics
///
/// Panics if the sequences differ in length.
#[must_use]
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    assert_eq!(x.len(), y.len());

    if x.is_empty() {
        return 0.0;
    }

    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (&xi, &yi) in x.iter().zip(y) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denominator = (var_x * var_y).sqrt();
    if denominator == 0.0 {
        return 0.0;
    }

    // Rounding can push |r| a hair past 1 for perfectly linear data.
    (cov / denominator).clamp(-1.0, 1.0)
}
