//! gelband CLI — command-line interface for gel band intensity analysis.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use gelband::{ColorNameMapping, ResultsStore, Session};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "gelband")]
#[command(about = "Measure band intensities in gel electrophoresis photographs")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect bands, group them into lanes and export per-lane integrals.
    Analyze(CliAnalyzeArgs),

    /// Print the estimated background threshold for an image.
    Threshold {
        /// Path to the input image.
        #[arg(long)]
        image: PathBuf,
    },
}

#[derive(Debug, Clone, Args)]
struct CliAnalyzeArgs {
    /// Path to the input image (3-channel PNG or JPEG).
    #[arg(long)]
    image: PathBuf,

    /// Path to write the per-lane CSV export.
    #[arg(long)]
    csv: PathBuf,

    /// Path to write full analysis results (JSON).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Color-name config (YAML `index: label`) merged in before export.
    #[arg(long)]
    names: Option<PathBuf>,

    /// Path to write the color-name config after export, including labels
    /// materialized by the export itself.
    #[arg(long)]
    names_out: Option<PathBuf>,
}

/// Machine-readable analysis dump written by `--out`.
#[derive(serde::Serialize)]
struct AnalysisReport<'a> {
    image_size: [u32; 2],
    background_threshold: u8,
    lanes: &'a ResultsStore,
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze(args) => run_analyze(&args),
        Commands::Threshold { image } => run_threshold(&image),
    }
}

// ── analyze ────────────────────────────────────────────────────────────

fn run_analyze(args: &CliAnalyzeArgs) -> CliResult<()> {
    tracing::info!("Loading image: {}", args.image.display());

    let mut session = Session::new();
    session.load(&args.image)?;
    let (w, h) = session.image_size().expect("image just loaded");
    let threshold = session
        .background_threshold()
        .expect("threshold derived on load");
    tracing::info!("Image size: {}x{}", w, h);

    session.analyze()?;
    let store = session.results();
    tracing::info!(
        "Detected {} bands in {} lanes",
        store.live_band_count(),
        store.len(),
    );

    let mut names = ColorNameMapping::new();
    if let Some(path) = &args.names {
        names.import_from_path(path)?;
        tracing::info!("Merged {} color names from {}", names.len(), path.display());
    }

    gelband::export_csv_path(store, &mut names, &args.csv)?;
    tracing::info!("CSV written to {}", args.csv.display());

    if let Some(out) = &args.out {
        let report = AnalysisReport {
            image_size: [w, h],
            background_threshold: threshold,
            lanes: store,
        };
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(out, &json)?;
        tracing::info!("Results written to {}", out.display());
    }

    if let Some(path) = &args.names_out {
        names.export_to_path(path)?;
        tracing::info!("Color names written to {}", path.display());
    }

    Ok(())
}

// ── threshold ──────────────────────────────────────────────────────────

fn run_threshold(path: &std::path::Path) -> CliResult<()> {
    let img = image::open(path)
        .map_err(|e| -> CliError { format!("Failed to open image {}: {}", path.display(), e).into() })?;
    let gray = img.to_luma8();

    let hist = gelband::intensity_histogram(&gray);
    let peak = hist
        .iter()
        .enumerate()
        .max_by_key(|&(bin, &count)| (count, std::cmp::Reverse(bin)))
        .map(|(bin, _)| bin)
        .unwrap_or(0);
    let threshold = gelband::estimate_background_threshold(&gray);

    println!("gelband background threshold estimate");
    println!("  image:          {}", path.display());
    println!("  size:           {}x{}", gray.width(), gray.height());
    println!("  histogram peak: {} ({} pixels)", peak, hist[peak]);
    println!("  threshold:      {}", threshold);

    Ok(())
}
