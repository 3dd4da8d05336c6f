//! Report types for analysis results.
//!
//! An [`AnalysisReport`] wraps a [`MetricResult`] with the image name and
//! shape. It renders to the plain-text report (one line per metric), to
//! CSV (one row per scalar) and, via serde, to JSON.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::metrics::{CorrelationMode, MetricResult};

/// Metrics for one plaintext image and its two ciphertexts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// File name of the original image.
    pub name: String,

    /// Image width in pixels.
    pub width: usize,

    /// Image height in pixels.
    pub height: usize,

    /// Computed metrics.
    pub metrics: MetricResult,

    /// When this report was generated.
    #[serde(with = "chrono_serde")]
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl AnalysisReport {
    /// Create a new report stamped with the current time.
    #[must_use]
    pub fn new(name: impl Into<String>, width: usize, height: usize, metrics: MetricResult) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            metrics,
            timestamp: chrono::Utc::now(),
        }
    }

    /// Name without its extension, used to prefix output files.
    ///
    /// `"lena.png"` becomes `"lena"`; a name without an extension is kept.
    #[must_use]
    pub fn stem(&self) -> &str {
        std::path::Path::new(&self.name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.name)
    }

    /// Text report lines, one per metric.
    #[must_use]
    pub fn text_lines(&self) -> Vec<String> {
        let m = &self.metrics;
        let mut lines = vec![
            format!("Original Entropy: {}", m.original_entropy),
            format!("Encrypted Entropy: {}", m.encrypted_entropy),
        ];

        for (when, corr) in [
            ("before", &m.original_correlation),
            ("after", &m.encrypted_correlation),
        ] {
            for mode in CorrelationMode::ALL {
                lines.push(format!("{}-Correlation ({}): {}", mode, when, corr[mode]));
            }
        }

        lines.extend([
            format!("NPCR Original-Encrypted: {}", m.npcr_original_encrypted),
            format!("NPCR One Bit Different Key: {}", m.npcr_key_sensitivity),
            format!("UACI Original-Encrypted: {}", m.uaci_original_encrypted),
            format!("UACI One Bit Different Key: {}", m.uaci_key_sensitivity),
            format!("Avalanche: {}", m.avalanche),
        ]);
        lines
    }

    /// Full text report, newline-separated, no trailing newline.
    #[must_use]
    pub fn render_text(&self) -> String {
        self.text_lines().join("\n")
    }

    /// Write one CSV row per scalar: `metric,mode,channel,value`.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(["metric", "mode", "channel", "value"])?;

        for entry in self.metrics.entries() {
            let value = entry.value.to_string();
            wtr.write_record([
                entry.metric,
                entry.mode.map_or("", |m| m.code()),
                entry.channel.map_or("", |c| c.name()),
                value.as_str(),
            ])?;
        }

        wtr.flush()?;
        Ok(())
    }
}

mod chrono_serde {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        dt.to_rfc3339().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
