//! Fixed 256-bucket sample histograms.
//!
//! Shared by the entropy metric and the histogram chart. Counting into a
//! fixed array keeps both O(H x W) with no sorting.

use serde::{Deserialize, Serialize};

use crate::raster::{Channel, ChannelVector, PixelImage};

/// Occurrence count of every 8-bit sample value in one channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelHistogram {
    channel: Channel,
    #[serde(with = "counts_serde")]
    counts: [u64; 256],
}

impl ChannelHistogram {
    /// Count the samples of `channel` in `image`.
    #[must_use]
    pub fn of(image: &PixelImage, channel: Channel) -> Self {
        Self::from_vector(&image.channel(channel))
    }

    /// Count the samples of an already-extracted channel.
    #[must_use]
    pub fn from_vector(samples: &ChannelVector) -> Self {
        let mut counts = [0u64; 256];
        for &s in samples.samples() {
            counts[s as usize] += 1;
        }
        Self {
            channel: samples.channel(),
            counts,
        }
    }

    /// Channel this histogram describes.
    #[must_use]
    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// Count for one sample value.
    #[must_use]
    pub fn count(&self, value: u8) -> u64 {
        self.counts[value as usize]
    }

    /// All 256 counts, indexed by sample value.
    #[must_use]
    pub fn counts(&self) -> &[u64; 256] {
        &self.counts
    }

    /// Total number of samples counted.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Largest single bucket.
    #[must_use]
    pub fn max_count(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Empirical probability of each value that occurs at least once.
    ///
    /// Values with a zero count are skipped, never yielded as `0.0`.
    pub fn probabilities(&self) -> impl Iterator<Item = f64> + '_ {
        let total = self.total() as f64;
        self.counts
            .iter()
            .filter(|&&c| c > 0)
            .map(move |&c| c as f64 / total)
    }
}

/// Histograms for all three channels, in storage order.
#[must_use]
pub fn channel_histograms(image: &PixelImage) -> [ChannelHistogram; 3] {
    Channel::ALL.map(|c| ChannelHistogram::of(image, c))
}

// serde only derives arrays up to 32 elements
mod counts_serde {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(counts: &[u64; 256], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        counts.as_slice().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<[u64; 256], D::Error>
    where
        D: Deserializer<'de>,
    {
        let v = Vec::<u64>::deserialize(deserializer)?;
        let len = v.len();
        v.try_into()
            .map_err(|_| D::Error::custom(format!("expected 256 histogram buckets, got {len}")))
    }
}
