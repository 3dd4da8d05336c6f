//! Analysis session: loading the three images, running the metric battery
//! and writing reports.
//!
//! The directory layout is configuration, not convention. The defaults
//! reproduce the classic layout (`imgs/`, `imgs/encrypted/`,
//! `results/metrics/`) but every path can be overridden through
//! [`AnalysisConfig::builder`].

use std::path::PathBuf;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::Result;
use crate::eval::report::AnalysisReport;
use crate::metrics::differential::ensure_comparable;
use crate::metrics::{
    ChannelValues, CorrelationMode, MetricResult, ModeCorrelations, avalanche, channel_entropy,
    npcr, pixel_correlation, uaci,
};
use crate::raster::PixelImage;

/// Run the full metric battery on one plaintext and its two ciphertexts.
///
/// `encrypted_alt` must be the same plaintext encrypted under a key that
/// differs from `encrypted`'s by one bit.
///
/// All three images are checked up front, so a bad input aborts the run
/// before any metric is computed. Independent metric groups run in
/// parallel on the rayon pool.
///
/// # Errors
///
/// [`Error::ShapeMismatch`](crate::Error::ShapeMismatch) if the images do
/// not share one shape, [`Error::EmptyInput`](crate::Error::EmptyInput) if
/// they have no pixels.
pub fn analyze(
    original: &PixelImage,
    encrypted: &PixelImage,
    encrypted_alt: &PixelImage,
) -> Result<MetricResult> {
    ensure_comparable(original, encrypted, "analysis")?;
    ensure_comparable(encrypted, encrypted_alt, "analysis")?;

    let ((plain, cipher), differential) = rayon::join(
        || {
            rayon::join(
                || single_image_metrics(original),
                || single_image_metrics(encrypted),
            )
        },
        || differential_metrics(original, encrypted, encrypted_alt),
    );
    let (original_entropy, original_correlation) = plain?;
    let (encrypted_entropy, encrypted_correlation) = cipher?;
    let differential = differential?;

    Ok(MetricResult {
        original_entropy,
        encrypted_entropy,
        original_correlation,
        encrypted_correlation,
        npcr_original_encrypted: differential.npcr_original_encrypted,
        npcr_key_sensitivity: differential.npcr_key_sensitivity,
        uaci_original_encrypted: differential.uaci_original_encrypted,
        uaci_key_sensitivity: differential.uaci_key_sensitivity,
        avalanche: differential.avalanche,
    })
}

/// Entropy plus correlation in every mode for one image.
fn single_image_metrics(image: &PixelImage) -> Result<(ChannelValues, ModeCorrelations)> {
    let entropy = channel_entropy(image)?;
    let correlations = CorrelationMode::ALL
        .as_slice()
        .par_iter()
        .map(|&mode| pixel_correlation(image, mode).map(|v| (mode, v)))
        .collect::<Result<Vec<_>>>()?;

    debug!(%entropy, "single-image metrics done");
    Ok((entropy, ModeCorrelations::from_modes(correlations)))
}

struct Differential {
    npcr_original_encrypted: f64,
    npcr_key_sensitivity: f64,
    uaci_original_encrypted: f64,
    uaci_key_sensitivity: f64,
    avalanche: f64,
}

fn differential_metrics(
    original: &PixelImage,
    encrypted: &PixelImage,
    encrypted_alt: &PixelImage,
) -> Result<Differential> {
    let out = Differential {
        npcr_original_encrypted: npcr(original, encrypted)?,
        npcr_key_sensitivity: npcr(encrypted, encrypted_alt)?,
        uaci_original_encrypted: uaci(original, encrypted)?,
        uaci_key_sensitivity: uaci(encrypted, encrypted_alt)?,
        avalanche: avalanche(encrypted, encrypted_alt)?,
    };
    debug!(
        npcr = out.npcr_key_sensitivity,
        uaci = out.uaci_key_sensitivity,
        avalanche = out.avalanche,
        "differential metrics done"
    );
    Ok(out)
}

/// Configuration for an analysis session.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Directory holding original (plaintext) images.
    pub images_dir: PathBuf,

    /// Directory holding encrypted images, `<images_dir>/encrypted` unless
    /// set explicitly.
    pub encrypted_dir: PathBuf,

    /// Directory for report output.
    pub report_dir: PathBuf,

    /// Also render `<stem>_histogram.svg`.
    pub write_histogram: bool,

    /// Also write `<stem>_results.json`.
    pub write_json: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            images_dir: PathBuf::from("imgs"),
            encrypted_dir: PathBuf::from("imgs").join("encrypted"),
            report_dir: PathBuf::from("results/metrics"),
            write_histogram: true,
            write_json: false,
        }
    }
}

impl AnalysisConfig {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::default()
    }
}

/// Builder for [`AnalysisConfig`].
#[derive(Debug, Default)]
pub struct AnalysisConfigBuilder {
    images_dir: Option<PathBuf>,
    encrypted_dir: Option<PathBuf>,
    report_dir: Option<PathBuf>,
    write_histogram: Option<bool>,
    write_json: Option<bool>,
}

impl AnalysisConfigBuilder {
    /// Set the directory original images are read from.
    #[must_use]
    pub fn images_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.images_dir = Some(path.into());
        self
    }

    /// Set the directory encrypted images are read from.
    #[must_use]
    pub fn encrypted_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.encrypted_dir = Some(path.into());
        self
    }

    /// Set the report output directory.
    #[must_use]
    pub fn report_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.report_dir = Some(path.into());
        self
    }

    /// Enable or disable the histogram chart.
    #[must_use]
    pub fn write_histogram(mut self, enabled: bool) -> Self {
        self.write_histogram = Some(enabled);
        self
    }

    /// Enable or disable the JSON report.
    #[must_use]
    pub fn write_json(mut self, enabled: bool) -> Self {
        self.write_json = Some(enabled);
        self
    }

    /// Build the configuration. Unset fields take their defaults; an unset
    /// encrypted directory follows the images directory.
    #[must_use]
    pub fn build(self) -> AnalysisConfig {
        let defaults = AnalysisConfig::default();
        let images_dir = self.images_dir.unwrap_or(defaults.images_dir);
        AnalysisConfig {
            encrypted_dir: self
                .encrypted_dir
                .unwrap_or_else(|| images_dir.join("encrypted")),
            images_dir,
            report_dir: self.report_dir.unwrap_or(defaults.report_dir),
            write_histogram: self.write_histogram.unwrap_or(defaults.write_histogram),
            write_json: self.write_json.unwrap_or(defaults.write_json),
        }
    }
}

/// The three decoded images of one analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisInputs {
    /// Plaintext image.
    pub original: PixelImage,
    /// Ciphertext under the reference key.
    pub encrypted: PixelImage,
    /// Ciphertext under the one-bit-different key.
    pub encrypted_alt: PixelImage,
}

/// Analysis session bound to one directory layout.
///
/// # Example
///
/// ```rust,ignore
/// use cipher_eval::{AnalysisConfig, AnalysisSession};
///
/// let config = AnalysisConfig::builder()
///     .images_dir("./imgs")
///     .report_dir("./reports")
///     .build();
///
/// let session = AnalysisSession::new(config);
/// let (report, files) = session.run("lena.png", "lena_enc.png", "lena_enc_alt.png")?;
/// println!("{}", report.render_text());
/// ```
#[derive(Debug, Clone)]
pub struct AnalysisSession {
    config: AnalysisConfig,
}

impl AnalysisSession {
    /// Create a new analysis session.
    #[must_use]
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// The session's configuration.
    #[must_use]
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Path of an original image.
    #[must_use]
    pub fn original_path(&self, name: &str) -> PathBuf {
        self.config.images_dir.join(name)
    }

    /// Path of an encrypted image.
    #[must_use]
    pub fn encrypted_path(&self, name: &str) -> PathBuf {
        self.config.encrypted_dir.join(name)
    }

    /// Decode the three images from the configured directories.
    #[cfg(feature = "decode")]
    pub fn load(
        &self,
        original: &str,
        encrypted: &str,
        encrypted_alt: &str,
    ) -> Result<AnalysisInputs> {
        use crate::decode::load_image;

        Ok(AnalysisInputs {
            original: load_image(&self.original_path(original))?,
            encrypted: load_image(&self.encrypted_path(encrypted))?,
            encrypted_alt: load_image(&self.encrypted_path(encrypted_alt))?,
        })
    }

    /// Compute the report for already-decoded images. Touches no files.
    pub fn evaluate(&self, name: &str, inputs: &AnalysisInputs) -> Result<AnalysisReport> {
        info!(
            image = name,
            width = inputs.original.width(),
            height = inputs.original.height(),
            "analyzing"
        );
        let metrics = analyze(&inputs.original, &inputs.encrypted, &inputs.encrypted_alt)?;
        Ok(AnalysisReport::new(
            name,
            inputs.original.width(),
            inputs.original.height(),
            metrics,
        ))
    }

    /// Write the report files into the configured report directory.
    ///
    /// Always writes `<stem>_results.txt` and `<stem>_results.csv`; the JSON
    /// report and histogram chart follow the config. Returns the paths
    /// written, in that order.
    pub fn write_report(
        &self,
        report: &AnalysisReport,
        inputs: &AnalysisInputs,
    ) -> Result<Vec<PathBuf>> {
        let dir = &self.config.report_dir;
        std::fs::create_dir_all(dir)?;
        let stem = report.stem();
        let mut written = Vec::new();

        let txt_path = dir.join(format!("{stem}_results.txt"));
        std::fs::write(&txt_path, report.render_text())?;
        written.push(txt_path);

        let csv_path = dir.join(format!("{stem}_results.csv"));
        report.write_csv(std::fs::File::create(&csv_path)?)?;
        written.push(csv_path);

        if self.config.write_json {
            let json_path = dir.join(format!("{stem}_results.json"));
            std::fs::write(&json_path, serde_json::to_string_pretty(report)?)?;
            written.push(json_path);
        }

        #[cfg(feature = "chart")]
        if self.config.write_histogram {
            use crate::chart::{HistogramChartConfig, histogram_svg};

            let svg_path = dir.join(format!("{stem}_histogram.svg"));
            let svg = histogram_svg(
                &inputs.original,
                &inputs.encrypted,
                &HistogramChartConfig::new(&report.name),
            );
            std::fs::write(&svg_path, svg)?;
            written.push(svg_path);
        }
        #[cfg(not(feature = "chart"))]
        let _ = inputs;

        info!(dir = %dir.display(), files = written.len(), "report written");
        Ok(written)
    }

    /// Load, analyze and write reports in one call.
    #[cfg(feature = "decode")]
    pub fn run(
        &self,
        original: &str,
        encrypted: &str,
        encrypted_alt: &str,
    ) -> Result<(AnalysisReport, Vec<PathBuf>)> {
        let inputs = self.load(original, encrypted, encrypted_alt)?;
        let report = self.evaluate(original, &inputs)?;
        let written = self.write_report(&report, &inputs)?;
        Ok((report, written))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use rgb::RGB8;

    fn gradient(width: usize, height: usize) -> PixelImage {
        PixelImage::from_fn(width, height, |row, col| {
            RGB8::new((row * 3) as u8, (col * 3) as u8, ((row + col) * 2) as u8)
        })
    }

    fn noise(width: usize, height: usize, seed: u64) -> PixelImage {
        let mut rng = StdRng::seed_from_u64(seed);
        PixelImage::from_fn(width, height, |_, _| {
            RGB8::new(rng.r#gen(), rng.r#gen(), rng.r#gen())
        })
    }

    fn sample_inputs() -> AnalysisInputs {
        AnalysisInputs {
            original: gradient(64, 48),
            encrypted: noise(64, 48, 1),
            encrypted_alt: noise(64, 48, 2),
        }
    }

    #[test]
    fn test_analyze_matches_individual_metrics() {
        let inputs = sample_inputs();
        let m = analyze(&inputs.original, &inputs.encrypted, &inputs.encrypted_alt).unwrap();

        assert_eq!(m.original_entropy, channel_entropy(&inputs.original).unwrap());
        assert_eq!(
            m.encrypted_correlation.vertical,
            pixel_correlation(&inputs.encrypted, CorrelationMode::Vertical).unwrap()
        );
        assert_eq!(
            m.uaci_key_sensitivity,
            uaci(&inputs.encrypted, &inputs.encrypted_alt).unwrap()
        );
        assert_eq!(
            m.avalanche,
            avalanche(&inputs.encrypted, &inputs.encrypted_alt).unwrap()
        );
    }

    #[test]
    fn test_analyze_separates_plain_from_cipher() {
        let inputs = sample_inputs();
        let m = analyze(&inputs.original, &inputs.encrypted, &inputs.encrypted_alt).unwrap();

        for v in m.original_correlation.horizontal.iter() {
            assert!(v > 0.9);
        }
        for v in m.encrypted_correlation.horizontal.iter() {
            assert!(v.abs() < 0.1);
        }
        assert!(m.encrypted_entropy.red > m.original_entropy.red);
    }

    #[test]
    fn test_analyze_is_idempotent() {
        let inputs = sample_inputs();
        let a = analyze(&inputs.original, &inputs.encrypted, &inputs.encrypted_alt).unwrap();
        let b = analyze(&inputs.original, &inputs.encrypted, &inputs.encrypted_alt).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_analyze_rejects_mismatched_alt_key_image() {
        let original = gradient(8, 8);
        let encrypted = noise(8, 8, 1);
        let alt = noise(8, 9, 2);
        assert!(matches!(
            analyze(&original, &encrypted, &alt),
            Err(Error::ShapeMismatch {
                expected: (8, 8),
                actual: (9, 8)
            })
        ));
    }

    #[test]
    fn test_analyze_rejects_empty() {
        let empty = PixelImage::filled(0, 0, RGB8::default());
        assert!(matches!(
            analyze(&empty, &empty, &empty),
            Err(Error::EmptyInput { .. })
        ));
    }

    #[test]
    fn test_config_defaults() {
        let config = AnalysisConfig::builder().build();
        assert_eq!(config.images_dir, PathBuf::from("imgs"));
        assert_eq!(config.encrypted_dir, PathBuf::from("imgs/encrypted"));
        assert_eq!(config.report_dir, PathBuf::from("results/metrics"));
        assert!(config.write_histogram);
        assert!(!config.write_json);
    }

    #[test]
    fn test_config_builder() {
        let config = AnalysisConfig::builder()
            .images_dir("/tmp/in")
            .encrypted_dir("/tmp/in/enc")
            .report_dir("/tmp/out")
            .write_histogram(false)
            .write_json(true)
            .build();

        let session = AnalysisSession::new(config);
        assert_eq!(session.original_path("a.png"), PathBuf::from("/tmp/in/a.png"));
        assert_eq!(session.encrypted_path("b.png"), PathBuf::from("/tmp/in/enc/b.png"));
        assert!(!session.config().write_histogram);
        assert!(session.config().write_json);
    }

    #[test]
    fn test_encrypted_dir_follows_images_dir() {
        let config = AnalysisConfig::builder().images_dir("/data/in").build();
        assert_eq!(config.encrypted_dir, PathBuf::from("/data/in/encrypted"));

        let session = AnalysisSession::new(config);
        assert_eq!(
            session.encrypted_path("lena_enc.png"),
            PathBuf::from("/data/in/encrypted/lena_enc.png")
        );

        let explicit = AnalysisConfig::builder()
            .encrypted_dir("/cipher")
            .images_dir("/data/in")
            .build();
        assert_eq!(explicit.encrypted_dir, PathBuf::from("/cipher"));
    }

    #[test]
    fn test_write_report_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = AnalysisConfig::builder()
            .report_dir(dir.path().join("results"))
            .write_json(true)
            .write_histogram(true)
            .build();
        let session = AnalysisSession::new(config);

        let inputs = sample_inputs();
        let report = session.evaluate("scene.png", &inputs).unwrap();
        let written = session.write_report(&report, &inputs).unwrap();

        let names: Vec<String> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(&names[..3], ["scene_results.txt", "scene_results.csv", "scene_results.json"]);

        let text = std::fs::read_to_string(&written[0]).unwrap();
        assert_eq!(text, report.render_text());

        let json = std::fs::read_to_string(&written[2]).unwrap();
        let back: AnalysisReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.metrics, report.metrics);
    }

    #[cfg(feature = "decode")]
    #[test]
    fn test_run_end_to_end() {
        use crate::decode::save_png;

        let root = tempfile::tempdir().unwrap();
        let images = root.path().join("imgs");
        let encrypted = images.join("encrypted");
        std::fs::create_dir_all(&encrypted).unwrap();

        let inputs = sample_inputs();
        save_png(&inputs.original, &images.join("scene.png")).unwrap();
        save_png(&inputs.encrypted, &encrypted.join("scene_k1.png")).unwrap();
        save_png(&inputs.encrypted_alt, &encrypted.join("scene_k2.png")).unwrap();

        let session = AnalysisSession::new(
            AnalysisConfig::builder()
                .images_dir(&images)
                .encrypted_dir(&encrypted)
                .report_dir(root.path().join("results/metrics"))
                .build(),
        );
        let (report, written) = session.run("scene.png", "scene_k1.png", "scene_k2.png").unwrap();

        assert_eq!((report.width, report.height), (64, 48));
        assert_eq!(
            report.metrics,
            analyze(&inputs.original, &inputs.encrypted, &inputs.encrypted_alt).unwrap()
        );
        assert!(written.iter().all(|p| p.exists()));
        assert!(
            root.path()
                .join("results/metrics/scene_histogram.svg")
                .exists()
        );
    }

    #[cfg(feature = "decode")]
    #[test]
    fn test_run_missing_file() {
        let root = tempfile::tempdir().unwrap();
        let session = AnalysisSession::new(
            AnalysisConfig::builder()
                .images_dir(root.path())
                .encrypted_dir(root.path())
                .report_dir(root.path().join("out"))
                .build(),
        );
        let err = session.run("a.png", "b.png", "c.png").unwrap_err();
        assert!(matches!(err, Error::ImageLoad { .. }));
        assert!(!root.path().join("out").exists());
    }
}
