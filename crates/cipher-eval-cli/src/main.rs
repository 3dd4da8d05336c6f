//! cipher-eval CLI - image encryption quality analysis

use std::path::PathBuf;

use clap::Parser;
use tracing::Level;
use tracing_subscriber::EnvFilter;

mod commands;

/// Measure how well an image cipher hides the plaintext.
///
/// Reads ORIGINAL from the images directory and both ciphertexts from the
/// encrypted directory, then writes a metrics report named after ORIGINAL.
#[derive(Parser)]
#[command(name = "cipher-eval")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Original (plaintext) image file name
    original: String,

    /// Encrypted image file name
    encrypted: String,

    /// Same image encrypted under a key differing in one bit
    encrypted_alt: String,

    /// Directory containing original images
    #[arg(long, env = "CIPHER_EVAL_IMAGES_DIR", default_value = "imgs")]
    images_dir: PathBuf,

    /// Directory containing encrypted images [default: <IMAGES_DIR>/encrypted]
    #[arg(long, env = "CIPHER_EVAL_ENCRYPTED_DIR")]
    encrypted_dir: Option<PathBuf>,

    /// Output directory for reports
    #[arg(long, env = "CIPHER_EVAL_REPORT_DIR", default_value = "results/metrics")]
    report_dir: PathBuf,

    /// Skip the histogram chart
    #[arg(long)]
    no_histogram: bool,

    /// Also write a JSON report
    #[arg(long)]
    json: bool,

    /// Print the text report to stdout
    #[arg(long)]
    print: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { Level::DEBUG } else { Level::WARN };
        EnvFilter::default().add_directive(level.into())
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    commands::analyze::run(commands::analyze::AnalyzeArgs {
        original: cli.original,
        encrypted: cli.encrypted,
        encrypted_alt: cli.encrypted_alt,
        images_dir: cli.images_dir,
        encrypted_dir: cli.encrypted_dir,
        report_dir: cli.report_dir,
        histogram: !cli.no_histogram,
        json: cli.json,
        print: cli.print,
        verbose: cli.verbose,
    })
}
