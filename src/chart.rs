//! SVG histogram charts comparing plaintext and ciphertext.
//!
//! Renders a 2x3 grid: the top row holds the original image's red, green
//! and blue histograms, the bottom row the encrypted image's. A good cipher
//! turns the peaked top row into flat bottom panels.
//! All charts support light and dark mode via CSS media queries.

use std::fmt::Write as _;

use crate::metrics::histogram::{ChannelHistogram, channel_histograms};
use crate::raster::{Channel, PixelImage};

/// Chart configuration.
#[derive(Debug, Clone)]
pub struct HistogramChartConfig {
    /// Chart title.
    pub title: String,
    /// Caption prefix for the top row.
    pub original_label: String,
    /// Caption prefix for the bottom row.
    pub encrypted_label: String,
    /// Chart width in pixels.
    pub width: u32,
    /// Chart height in pixels.
    pub height: u32,
}

impl Default for HistogramChartConfig {
    fn default() -> Self {
        Self {
            title: "Channel Histograms".to_string(),
            original_label: "Original".to_string(),
            encrypted_label: "Encrypted".to_string(),
            width: 1200,
            height: 600,
        }
    }
}

impl HistogramChartConfig {
    /// Creates a new chart configuration with the given title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Sets the row captions.
    #[must_use]
    pub fn with_labels(mut self, original: impl Into<String>, encrypted: impl Into<String>) -> Self {
        self.original_label = original.into();
        self.encrypted_label = encrypted.into();
        self
    }

    /// Sets the chart dimensions.
    #[must_use]
    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

/// Bar colors per channel.
pub mod colors {
    /// Red channel bars.
    pub const RED: &str = "#e74c3c";
    /// Green channel bars.
    pub const GREEN: &str = "#27ae60";
    /// Blue channel bars.
    pub const BLUE: &str = "#3498db";
}

fn channel_color(channel: Channel) -> &'static str {
    match channel {
        Channel::Red => colors::RED,
        Channel::Green => colors::GREEN,
        Channel::Blue => colors::BLUE,
    }
}

/// Histogram chart for two images.
///
/// Returns an empty string if either image has no pixels.
#[must_use]
pub fn histogram_svg(
    original: &PixelImage,
    encrypted: &PixelImage,
    config: &HistogramChartConfig,
) -> String {
    if original.is_empty() || encrypted.is_empty() {
        return String::new();
    }
    generate_svg(
        &channel_histograms(original),
        &channel_histograms(encrypted),
        config,
    )
}

/// Generates the 2x3 histogram grid from precomputed histograms.
///
/// Each panel is scaled to its own tallest bucket. Returns an empty string
/// if any histogram is empty.
///
/// # Example
///
/// ```rust
/// use cipher_eval::chart::{generate_svg, HistogramChartConfig};
/// use cipher_eval::metrics::channel_histograms;
/// use cipher_eval::PixelImage;
/// use rgb::RGB8;
///
/// let plain = PixelImage::filled(8, 8, RGB8::new(10, 20, 30));
/// let cipher = PixelImage::from_fn(8, 8, |r, c| RGB8::new((r * 8 + c) as u8, 0, 255));
///
/// let svg = generate_svg(
///     &channel_histograms(&plain),
///     &channel_histograms(&cipher),
///     &HistogramChartConfig::new("lena.png"),
/// );
/// assert!(svg.starts_with("<svg"));
/// ```
#[must_use]
pub fn generate_svg(
    original: &[ChannelHistogram; 3],
    encrypted: &[ChannelHistogram; 3],
    config: &HistogramChartConfig,
) -> String {
    if original.iter().chain(encrypted).any(|h| h.total() == 0) {
        return String::new();
    }

    let mut svg = String::with_capacity(64 * 1024);

    let width = config.width;
    let height = config.height;
    let margin_top = 50;
    let gap = 40;
    let panel_width = (width.saturating_sub(gap * 4)) / 3;
    let panel_height = (height.saturating_sub(margin_top + gap * 2)) / 2;

    // SVG header
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}">"#,
        width, height
    );

    // CSS with dark mode support
    svg.push_str(
        r#"<style>
  :root {
    --bg-color: #ffffff;
    --text-color: #1a1a1a;
    --axis-color: #333333;
  }
  @media (prefers-color-scheme: dark) {
    :root {
      --bg-color: #1a1a1a;
      --text-color: #e0e0e0;
      --axis-color: #b0b0b0;
    }
  }
  .background { fill: var(--bg-color); }
  .title { font: bold 18px system-ui, sans-serif; fill: var(--text-color); }
  .panel-title { font: 13px system-ui, sans-serif; fill: var(--text-color); }
  .tick-label { font: 11px system-ui, sans-serif; fill: var(--text-color); }
  .axis { stroke: var(--axis-color); stroke-width: 1; }
</style>
"#,
    );

    let _ = writeln!(
        svg,
        r#"<rect class="background" width="{}" height="{}"/>"#,
        width, height
    );
    let _ = writeln!(
        svg,
        r#"<text x="{}" y="30" text-anchor="middle" class="title">{}</text>"#,
        f64::from(width) / 2.0,
        escape(&config.title)
    );

    for (row, (label, hists)) in [
        (&config.original_label, original),
        (&config.encrypted_label, encrypted),
    ]
    .into_iter()
    .enumerate()
    {
        for (col, hist) in hists.iter().enumerate() {
            let x0 = gap + col as u32 * (panel_width + gap);
            let y0 = margin_top + gap / 2 + row as u32 * (panel_height + gap);
            write_panel(
                &mut svg,
                hist,
                &format!("{} {}", label, hist.channel()),
                (x0, y0),
                (panel_width, panel_height),
            );
        }
    }

    svg.push_str("</svg>\n");
    svg
}

/// One histogram panel with its top-left corner at `origin`.
fn write_panel(
    svg: &mut String,
    hist: &ChannelHistogram,
    caption: &str,
    origin: (u32, u32),
    size: (u32, u32),
) {
    let (x0, y0) = origin;
    let (w, h) = size;
    let baseline = y0 + h;
    let max = hist.max_count().max(1) as f64;
    let bar_width = f64::from(w) / 256.0;

    let _ = writeln!(
        svg,
        r#"<text x="{}" y="{}" text-anchor="middle" class="panel-title">{}</text>"#,
        f64::from(x0) + f64::from(w) / 2.0,
        y0.saturating_sub(6),
        escape(caption)
    );

    // Bars, skipping empty buckets
    let _ = writeln!(svg, r#"<g fill="{}">"#, channel_color(hist.channel()));
    for (value, &count) in hist.counts().iter().enumerate() {
        if count == 0 {
            continue;
        }
        let bar_height = count as f64 / max * f64::from(h);
        let _ = writeln!(
            svg,
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}"/>"#,
            f64::from(x0) + value as f64 * bar_width,
            f64::from(baseline) - bar_height,
            bar_width,
            bar_height
        );
    }
    svg.push_str("</g>\n");

    // Axes
    let _ = writeln!(
        svg,
        r#"<line x1="{}" y1="{}" x2="{}" y2="{}" class="axis"/>"#,
        x0,
        baseline,
        x0 + w,
        baseline
    );
    let _ = writeln!(
        svg,
        r#"<line x1="{}" y1="{}" x2="{}" y2="{}" class="axis"/>"#,
        x0, y0, x0, baseline
    );

    // Sample-value ticks and the peak count
    for tick in [0u32, 128, 255] {
        let _ = writeln!(
            svg,
            r#"<text x="{:.2}" y="{}" text-anchor="middle" class="tick-label">{}</text>"#,
            f64::from(x0) + f64::from(tick) * bar_width,
            baseline + 14,
            tick
        );
    }
    let _ = writeln!(
        svg,
        r#"<text x="{}" y="{}" text-anchor="end" class="tick-label">{}</text>"#,
        x0.saturating_sub(4),
        y0 + 10,
        hist.max_count()
    );
}

/// Escape text for inclusion in SVG markup.
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
