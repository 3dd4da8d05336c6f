//! # cipher-eval
//!
//! Statistical quality metrics for image encryption.
//!
//! Given an original image, its encryption, and a second encryption under a
//! key differing in one bit, this library measures how thoroughly the cipher
//! destroys structure in the pixel data: per-channel Shannon entropy,
//! adjacent-pixel correlation, NPCR, UACI and the bit-level avalanche ratio.
//!
//! ## Quick Start
//!
//! ```rust
//! use cipher_eval::metrics::{CorrelationMode, channel_entropy, npcr, pixel_correlation};
//! use cipher_eval::PixelImage;
//! use rgb::RGB8;
//!
//! let plain = PixelImage::from_fn(32, 32, |r, c| RGB8::new(r as u8, c as u8, 0));
//! let noisy = PixelImage::from_fn(32, 32, |r, c| {
//!     let v = ((r * 31 + c * 17) * 97 % 256) as u8;
//!     RGB8::new(v, v ^ 0x5a, v.wrapping_mul(3))
//! });
//!
//! let entropy = channel_entropy(&noisy)?;
//! let corr = pixel_correlation(&plain, CorrelationMode::Horizontal)?;
//! let changed = npcr(&plain, &noisy)?;
//! assert!(entropy.red <= 8.0 && corr.green > 0.9 && changed > 0.0);
//! # Ok::<(), cipher_eval::Error>(())
//! ```
//!
//! ## Modules
//!
//! - [`error`]: Error types for the library
//! - [`raster`]: The RGB8 image type the metrics operate on
//! - [`metrics`]: Entropy, correlation, NPCR, UACI, avalanche
//! - [`eval`]: Analysis session and report generation
//! - [`decode`]: Image loading via the `image` crate
//! - [`chart`]: SVG histogram charts

#[cfg(feature = "chart")]
pub mod chart;
#[cfg(feature = "decode")]
pub mod decode;
pub mod error;
pub mod eval;
pub mod metrics;
pub mod raster;

// Re-export commonly used types
pub use error::{Error, Result};
pub use eval::{
    report::AnalysisReport,
    session::{AnalysisConfig, AnalysisInputs, AnalysisSession, analyze},
};
pub use metrics::{ChannelValues, CorrelationMode, MetricResult, ModeCorrelations};
pub use raster::{Channel, ChannelVector, PixelImage};
