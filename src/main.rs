//! DH-LCM Analysis - Double Haploid Life Cycle Management statistics
//!
//! Loads a merged DH-LCM export, prints the yield summary and every
//! retained correlation and regression, and writes the result CSVs.
//!
//! # Usage
//!
//! ```bash
//! # Analyse an export with the default configuration
//! dh-lcm-analysis --csv merged.csv
//!
//! # Custom config, output directory, and JSON scatter specs
//! dh-lcm-analysis --csv merged.csv --config analysis_config.toml \
//!     --output-dir ./results --plots ./results/plots
//!
//! # Try it on generated data
//! synthetic-dataset --plants 300 --output merged.csv
//! ```
//!
//! # Environment Variables
//!
//! - `DHLCM_CONFIG`: Path to the analysis config (overridden by `--config`)
//! - `RUST_LOG`: Logging level (default: info)

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use dh_lcm::{
    AnalysisConfig, AnalysisContext, AnalysisOutcome, Analyzer, JsonPlotSink, NullPlotSink,
    PlotSink,
};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "dh-lcm-analysis")]
#[command(about = "Exploratory statistics over merged DH-LCM exports")]
#[command(version)]
struct CliArgs {
    /// Merged DH-LCM CSV export
    #[arg(long)]
    csv: PathBuf,

    /// Analysis config (TOML); otherwise $DHLCM_CONFIG, then ./analysis_config.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for correlation_results.csv / regression_results.csv
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Write one JSON scatter spec per retained finding into this directory
    #[arg(long)]
    plots: Option<PathBuf>,
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = CliArgs::parse();

    let mut config = AnalysisConfig::load(args.config.as_deref())
        .context("Failed to load analysis configuration")?;
    if let Some(dir) = args.output_dir {
        config.export.output_dir = dir;
    }
    if let Some(dir) = args.plots {
        config.plots.output_dir = Some(dir);
    }

    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    info!("  DH-LCM Analysis");
    info!("  Double Haploid Life Cycle Management statistics");
    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let mut sink: Box<dyn PlotSink> = match &config.plots.output_dir {
        Some(dir) => Box::new(
            JsonPlotSink::new(dir)
                .with_context(|| format!("Failed to prepare plot directory {}", dir.display()))?,
        ),
        None => Box::new(NullPlotSink),
    };

    let ctx = AnalysisContext::load(&args.csv, config)
        .with_context(|| format!("Failed to load {}", args.csv.display()))?;

    let outcome = Analyzer::run(&ctx, sink.as_mut()).context("Analysis failed")?;
    print_outcome(&outcome);

    info!("✓ Analysis complete");
    Ok(())
}

fn print_outcome(outcome: &AnalysisOutcome) {
    println!("{}", outcome.summary);
    println!();

    println!("=== Correlations (|r| > threshold): {} ===", outcome.correlations.len());
    for c in &outcome.correlations {
        println!(
            "  {} <-> {}: {} r={:.3} (p={:.2e}, n={})",
            c.column_a, c.column_b, c.direction, c.coefficient, c.p_value, c.sample_count
        );
    }
    println!();

    println!("=== Regressions (p < threshold, by std error): {} ===", outcome.regressions.len());
    for r in &outcome.regressions {
        println!(
            "  {} ~ {}: slope={:.4} se={:.4} t={:.2} p={:.2e} R²={:.3} (n={})",
            r.response,
            r.predictor,
            r.coefficient,
            r.std_error,
            r.t_value,
            r.p_value,
            r.r_squared,
            r.sample_count
        );
    }
    println!();

    println!("Correlations written to {}", outcome.correlation_csv.display());
    if let Some(path) = &outcome.regression_csv {
        println!("Regressions written to {}", path.display());
    }
    if outcome.plots_emitted > 0 {
        println!("{} scatter specs written", outcome.plots_emitted);
    }
}
