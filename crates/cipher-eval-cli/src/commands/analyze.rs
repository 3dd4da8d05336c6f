//! Analyze command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use cipher_eval::{AnalysisConfig, AnalysisSession};

/// Arguments for one analysis run.
pub struct AnalyzeArgs {
    pub original: String,
    pub encrypted: String,
    pub encrypted_alt: String,
    pub images_dir: PathBuf,
    pub encrypted_dir: Option<PathBuf>,
    pub report_dir: PathBuf,
    pub histogram: bool,
    pub json: bool,
    pub print: bool,
    pub verbose: bool,
}

pub fn run(args: AnalyzeArgs) -> Result<()> {
    let mut builder = AnalysisConfig::builder()
        .images_dir(args.images_dir)
        .report_dir(args.report_dir)
        .write_histogram(args.histogram)
        .write_json(args.json);
    if let Some(dir) = args.encrypted_dir {
        builder = builder.encrypted_dir(dir);
    }
    let config = builder.build();
    let session = AnalysisSession::new(config);

    if args.verbose {
        eprintln!(
            "Original: {}",
            session.original_path(&args.original).display()
        );
        eprintln!(
            "Encrypted: {}, {}",
            session.encrypted_path(&args.encrypted).display(),
            session.encrypted_path(&args.encrypted_alt).display()
        );
    }

    let inputs = session
        .load(&args.original, &args.encrypted, &args.encrypted_alt)
        .context("Failed to load input images")?;
    let report = session
        .evaluate(&args.original, &inputs)
        .with_context(|| format!("Analysis of {} aborted", args.original))?;
    let written = session
        .write_report(&report, &inputs)
        .with_context(|| {
            format!(
                "Failed to write report to {}",
                session.config().report_dir.display()
            )
        })?;

    if args.print {
        println!("{}", report.render_text());
    }

    for path in &written {
        eprintln!("Wrote {}", path.display());
    }

    Ok(())
}
