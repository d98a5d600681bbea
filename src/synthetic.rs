//! Synthetic merged DH-LCM dataset
//!
//! Produces a plausible merged export: one Induction/Laboratory record per
//! plant, expanded many-to-one by Hardening / Baby Nursery rows. Built-in
//! relationships give the scanners something to find:
//! - haploid embryos ≈ 10% of total embryos
//! - selected seedlings ≈ half the haploid embryos
//! - nursery height tracks hardening survival
//! - rescue days is independent noise

use std::io::Write;

use chrono::{Duration, NaiveDate};
use rand::prelude::*;
use rand_distr::{Distribution, Normal, NormalError};

/// Header of the generated CSV
pub const HEADER: [&str; 14] = [
    "Induction Plant ID",
    "Induction Planting Number",
    "Induction Sow Date",
    "Induction Germination Date",
    "Induction Pollination Date",
    "Induction Harvest Date",
    "Laboratory Total Embryos",
    "Laboratory Haploid Embryos",
    "Laboratory Selected Seedlings",
    "Laboratory Rescue Days",
    "Hardening Tray",
    "Hardening Survival Pct",
    "Baby Nursery Height cm",
    "Baby Nursery Leaf Count",
];

const PLANTING_LABELS: [&str; 4] = ["1st", "2nd", "3rd", "4th"];

/// Probability a sown plant germinates
const GERMINATION_P: f64 = 0.85;
/// Probability a germinated plant is pollinated
const POLLINATION_P: f64 = 0.8;
/// Probability a pollinated plant is harvested
const HARVEST_P: f64 = 0.9;

#[derive(Debug, Clone)]
pub struct SyntheticConfig {
    pub plants: usize,
    pub seed: u64,
    /// Hardening rows per plant are drawn from 1..=max
    pub max_hardening_rows: usize,
    pub first_sow_date: NaiveDate,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            plants: 200,
            seed: 42,
            max_hardening_rows: 3,
            first_sow_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SyntheticError {
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid distribution: {0}")]
    Distribution(#[from] NormalError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Summary of what was written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntheticStats {
    pub plants: usize,
    pub rows: usize,
}

/// Write a synthetic dataset as CSV.
pub fn generate<W: Write>(
    config: &SyntheticConfig,
    writer: W,
) -> Result<SyntheticStats, SyntheticError> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let embryos = Normal::<f64>::new(40.0, 10.0)?;
    let haploid_share = Normal::<f64>::new(0.10, 0.01)?;
    let survival = Normal::<f64>::new(70.0, 12.0)?;
    let noise = Normal::<f64>::new(0.0, 2.0)?;

    let mut out = csv::Writer::from_writer(writer);
    out.write_record(HEADER)?;

    let fmt = |d: NaiveDate| d.format("%Y-%m-%d").to_string();
    let mut rows = 0;

    for i in 0..config.plants {
        let id = format!("DH-{:04}", i + 1);
        let planting = PLANTING_LABELS[i * PLANTING_LABELS.len() / config.plants.max(1)];
        let sow = config.first_sow_date + Duration::days(rng.gen_range(0..90));

        let germinated = rng.gen_bool(GERMINATION_P);
        let pollinated = germinated && rng.gen_bool(POLLINATION_P);
        let harvested = pollinated && rng.gen_bool(HARVEST_P);

        let germ_date = germinated.then(|| sow + Duration::days(rng.gen_range(7..15)));
        let poll_date = pollinated.then(|| sow + Duration::days(rng.gen_range(50..65)));
        let harv_date = harvested.then(|| sow + Duration::days(rng.gen_range(90..110)));

        let (total, haploid, selected) = if harvested {
            let total = embryos.sample(&mut rng).max(1.0).round();
            let haploid = (total * haploid_share.sample(&mut rng).max(0.0)).round();
            let selected = (haploid * 0.5 + rng.gen_range(-0.5..0.5)).round().max(0.0);
            (Some(total), Some(haploid), Some(selected))
        } else {
            (None, None, None)
        };
        let rescue_days = harvested.then(|| f64::from(rng.gen_range(3_u8..12)));

        let trays = rng.gen_range(1..=config.max_hardening_rows.max(1));
        for tray in 0..trays {
            let pct = survival.sample(&mut rng).clamp(0.0, 100.0);
            let height = pct * 0.4 + 5.0 + noise.sample(&mut rng);
            let leaves = rng.gen_range(4..12);

            out.write_record([
                id.clone(),
                planting.to_string(),
                fmt(sow),
                germ_date.map(fmt).unwrap_or_default(),
                poll_date.map(fmt).unwrap_or_default(),
                harv_date.map(fmt).unwrap_or_default(),
                opt(total),
                opt(haploid),
                opt(selected),
                opt(rescue_days),
                format!("T{}", tray + 1),
                format!("{pct:.1}"),
                format!("{height:.1}"),
                leaves.to_string(),
            ])?;
            rows += 1;
        }
    }

    out.flush()?;
    Ok(SyntheticStats {
        plants: config.plants,
        rows,
    })
}

fn opt(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
