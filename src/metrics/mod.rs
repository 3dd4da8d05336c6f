//! Statistical metrics for encrypted images.
//!
//! Every function here is pure: it borrows its inputs, keeps no state and
//! can be called from any number of threads at once.
//!
//! | Metric | Function | Ideal ciphertext |
//! |--------|----------|------------------|
//! | Shannon entropy | [`entropy::channel_entropy`] | ~8 bits per channel |
//! | Adjacent correlation | [`correlation::pixel_correlation`] | ~0 for H, V and D |
//! | NPCR | [`differential::npcr`] | ~99.6% or more |
//! | UACI | [`differential::uaci`] | ~33.4% |
//! | Avalanche | [`avalanche::avalanche`] | ~50% |
//!
//! [`MetricResult`] bundles the full battery for one
//! (original, encrypted, encrypted-with-other-key) triple.

pub mod avalanche;
pub mod correlation;
pub mod differential;
pub mod entropy;
pub mod histogram;

use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::raster::Channel;

pub use avalanche::{avalanche, bit_difference_ratio};
pub use correlation::{CorrelationMode, pixel_correlation, pixel_correlation_by_code};
pub use differential::{npcr, uaci};
pub use entropy::channel_entropy;
pub use histogram::{ChannelHistogram, channel_histograms};

/// One value per color channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelValues {
    /// Red channel value.
    pub red: f64,
    /// Green channel value.
    pub green: f64,
    /// Blue channel value.
    pub blue: f64,
}

impl ChannelValues {
    /// Create from explicit per-channel values.
    #[must_use]
    pub fn new(red: f64, green: f64, blue: f64) -> Self {
        Self { red, green, blue }
    }

    /// Compute each channel's value with `f`.
    #[must_use]
    pub fn from_fn(mut f: impl FnMut(Channel) -> f64) -> Self {
        Self {
            red: f(Channel::Red),
            green: f(Channel::Green),
            blue: f(Channel::Blue),
        }
    }

    /// Values in storage order.
    #[must_use]
    pub fn to_array(self) -> [f64; 3] {
        [self.red, self.green, self.blue]
    }

    /// Iterate over values in storage order.
    pub fn iter(&self) -> impl Iterator<Item = f64> {
        self.to_array().into_iter()
    }
}

impl Index<Channel> for ChannelValues {
    type Output = f64;

    fn index(&self, channel: Channel) -> &f64 {
        match channel {
            Channel::Red => &self.red,
            Channel::Green => &self.green,
            Channel::Blue => &self.blue,
        }
    }
}

impl std::fmt::Display for ChannelValues {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}, {}]", self.red, self.green, self.blue)
    }
}

/// Per-channel correlation for each neighbour direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ModeCorrelations {
    /// Horizontal neighbours.
    #[serde(rename = "H")]
    pub horizontal: ChannelValues,
    /// Vertical neighbours.
    #[serde(rename = "V")]
    pub vertical: ChannelValues,
    /// Diagonal neighbours.
    #[serde(rename = "D")]
    pub diagonal: ChannelValues,
}

impl Index<CorrelationMode> for ModeCorrelations {
    type Output = ChannelValues;

    fn index(&self, mode: CorrelationMode) -> &ChannelValues {
        match mode {
            CorrelationMode::Horizontal => &self.horizontal,
            CorrelationMode::Vertical => &self.vertical,
            CorrelationMode::Diagonal => &self.diagonal,
        }
    }
}

impl ModeCorrelations {
    /// Assemble from `(mode, values)` pairs, one per mode.
    ///
    /// A mode missing from `values` stays at zero.
    #[must_use]
    pub fn from_modes(values: impl IntoIterator<Item = (CorrelationMode, ChannelValues)>) -> Self {
        let mut out = Self::default();
        for (mode, v) in values {
            match mode {
                CorrelationMode::Horizontal => out.horizontal = v,
                CorrelationMode::Vertical => out.vertical = v,
                CorrelationMode::Diagonal => out.diagonal = v,
            }
        }
        out
    }
}

/// A single scalar of a [`MetricResult`], flattened for tabular output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricEntry {
    /// Field name in [`MetricResult`].
    pub metric: &'static str,
    /// Neighbour direction, for correlation entries.
    pub mode: Option<CorrelationMode>,
    /// Channel, for entropy and correlation entries.
    pub channel: Option<Channel>,
    /// The value.
    pub value: f64,
}

impl MetricEntry {
    fn new(
        metric: &'static str,
        mode: Option<CorrelationMode>,
        channel: Option<Channel>,
        value: f64,
    ) -> Self {
        Self {
            metric,
            mode,
            channel,
            value,
        }
    }
}

/// The complete metric battery for one analysis run.
///
/// "Key sensitivity" values compare the two ciphertexts produced from the
/// same plaintext under keys differing in a single bit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricResult {
    /// Entropy of the plaintext image.
    pub original_entropy: ChannelValues,
    /// Entropy of the ciphertext image.
    pub encrypted_entropy: ChannelValues,
    /// Adjacent-pixel correlation of the plaintext image.
    pub original_correlation: ModeCorrelations,
    /// Adjacent-pixel correlation of the ciphertext image.
    pub encrypted_correlation: ModeCorrelations,
    /// NPCR between plaintext and ciphertext, in percent.
    pub npcr_original_encrypted: f64,
    /// NPCR between the two ciphertexts, in percent.
    pub npcr_key_sensitivity: f64,
    /// UACI between plaintext and ciphertext, in percent.
    pub uaci_original_encrypted: f64,
    /// UACI between the two ciphertexts, in percent.
    pub uaci_key_sensitivity: f64,
    /// Bit difference between the two ciphertexts, in percent.
    pub avalanche: f64,
}

impl MetricResult {
    /// Every scalar in the result, in text report order.
    #[must_use]
    pub fn entries(&self) -> Vec<MetricEntry> {
        let mut out = Vec::with_capacity(32);

        for (name, values) in [
            ("original_entropy", &self.original_entropy),
            ("encrypted_entropy", &self.encrypted_entropy),
        ] {
            for channel in Channel::ALL {
                out.push(MetricEntry::new(name, None, Some(channel), values[channel]));
            }
        }

        for (name, corr) in [
            ("original_correlation", &self.original_correlation),
            ("encrypted_correlation", &self.encrypted_correlation),
        ] {
            for mode in CorrelationMode::ALL {
                for channel in Channel::ALL {
                    out.push(MetricEntry::new(name, Some(mode), Some(channel), corr[mode][channel]));
                }
            }
        }

        out.extend([
            MetricEntry::new("npcr_original_encrypted", None, None, self.npcr_original_encrypted),
            MetricEntry::new("npcr_key_sensitivity", None, None, self.npcr_key_sensitivity),
            MetricEntry::new("uaci_original_encrypted", None, None, self.uaci_original_encrypted),
            MetricEntry::new("uaci_key_sensitivity", None, None, self.uaci_key_sensitivity),
            MetricEntry::new("avalanche", None, None, self.avalanche),
        ]);
        out
    }
}
