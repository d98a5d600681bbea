//! Synthetic DH-LCM dataset generator
//!
//! Writes a merged Induction / Laboratory / Hardening / Baby Nursery export
//! with known relationships, for trying out and testing the analysis.
//!
//! # Usage
//! ```bash
//! ./synthetic-dataset --plants 300 --seed 7 --output merged.csv
//! ./synthetic-dataset | head
//! ```

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use dh_lcm::synthetic::{generate, SyntheticConfig};

#[derive(Parser, Debug)]
#[command(name = "synthetic-dataset")]
#[command(about = "Generate a synthetic merged DH-LCM export")]
#[command(version = "1.0")]
struct Args {
    /// Number of distinct induction plants
    #[arg(short, long, default_value = "200")]
    plants: usize,

    /// RNG seed; identical seeds give identical files
    #[arg(short, long, default_value = "42")]
    seed: u64,

    /// Hardening rows per plant are drawn from 1..=N
    #[arg(long, default_value = "3", value_parser = clap::value_parser!(u64).range(1..=20))]
    max_hardening_rows: u64,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = SyntheticConfig {
        plants: args.plants,
        seed: args.seed,
        max_hardening_rows: usize::try_from(args.max_hardening_rows)
            .context("max-hardening-rows out of range")?,
        ..Default::default()
    };

    let stats = match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            generate(&config, BufWriter::new(file))?
        }
        None => generate(&config, io::stdout().lock())?,
    };

    if let Some(path) = &args.output {
        eprintln!(
            "Wrote {} rows for {} plants to {}",
            stats.rows,
            stats.plants,
            path.display()
        );
    }
    Ok(())
}
