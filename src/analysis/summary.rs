//! Yield Summary Reporter
//!
//! Aggregates over the plant-level (deduplicated) view:
//! - distinct plant count and sow-date range
//! - germination → pollination → harvest funnel, each rate relative to the
//!   previous stage
//! - embryo totals, haploid share and selected seedlings
//!
//! A rate whose denominator stage is empty is reported as undefined with
//! the reason, never as `inf` or `NaN`.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{ColumnConfig, SummaryConfig};
use crate::dataset::{Column, DataTable, DatasetError};

#[derive(Debug, thiserror::Error)]
pub enum SummaryError {
    #[error("undefined rate: no {0}")]
    UndefinedRate(&'static str),

    #[error(transparent)]
    Dataset(#[from] DatasetError),
}

/// Ratio between two stage counts.
pub fn rate(
    numerator: f64,
    denominator: f64,
    denominator_label: &'static str,
) -> Result<f64, SummaryError> {
    if denominator == 0.0 {
        return Err(SummaryError::UndefinedRate(denominator_label));
    }
    Ok(numerator / denominator)
}

/// A computed rate, or the reason it has no value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Rate {
    Value(f64),
    Undefined(String),
}

impl Rate {
    fn from_result(result: Result<f64, SummaryError>) -> Self {
        match result {
            Ok(v) => Self::Value(v),
            Err(e) => {
                warn!("{}", e);
                Self::Undefined(e.to_string())
            }
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(*v),
            Self::Undefined(_) => None,
        }
    }
}

impl std::fmt::Display for Rate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Value(v) => write!(f, "{:.1}%", v * 100.0),
            Self::Undefined(reason) => write!(f, "{reason}"),
        }
    }
}

/// Plant-level yield summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryReport {
    pub total_plants: usize,
    /// Earliest and latest parseable sow date
    pub sow_date_range: Option<(NaiveDate, NaiveDate)>,
    /// Non-empty sow dates no configured format could parse
    pub unparsed_sow_dates: usize,
    pub germinated: usize,
    pub pollinated: usize,
    pub harvested: usize,
    pub germination_rate: Rate,
    pub pollination_rate: Rate,
    pub harvest_rate: Rate,
    pub total_embryos: f64,
    pub haploid_embryos: f64,
    pub haploid_rate: Rate,
    pub selected_seedlings: f64,
}

pub struct SummaryReporter;

impl SummaryReporter {
    /// Build the report from the deduplicated plant view.
    ///
    /// Missing or mistyped columns are fatal.
    pub fn build(
        plants: &DataTable,
        columns: &ColumnConfig,
        config: &SummaryConfig,
    ) -> Result<SummaryReport, SummaryError> {
        let total_plants = plants.row_count();

        let (sow_date_range, unparsed_sow_dates) =
            Self::date_range(plants.column(&columns.sow_date)?, &config.date_formats);
        if unparsed_sow_dates > 0 {
            warn!(
                column = %columns.sow_date,
                count = unparsed_sow_dates,
                "Sow dates did not match any configured format"
            );
        }

        let germinated = Self::stage_count(plants.column(&columns.germination)?);
        let pollinated = Self::stage_count(plants.column(&columns.pollination)?);
        let harvested = Self::stage_count(plants.column(&columns.harvest)?);

        let total_embryos = Self::sum(plants.numeric(&columns.total_embryos)?);
        let haploid_embryos = Self::sum(plants.numeric(&columns.haploid_embryos)?);
        let selected_seedlings = Self::sum(plants.numeric(&columns.selected_seedlings)?);

        debug!(total_plants, germinated, pollinated, harvested, "Stage counts");

        Ok(SummaryReport {
            total_plants,
            sow_date_range,
            unparsed_sow_dates,
            germinated,
            pollinated,
            harvested,
            germination_rate: Rate::from_result(rate(
                germinated as f64,
                total_plants as f64,
                "plants",
            )),
            pollination_rate: Rate::from_result(rate(
                pollinated as f64,
                germinated as f64,
                "germinated plants",
            )),
            harvest_rate: Rate::from_result(rate(
                harvested as f64,
                pollinated as f64,
                "pollinated plants",
            )),
            total_embryos,
            haploid_embryos,
            haploid_rate: Rate::from_result(rate(haploid_embryos, total_embryos, "embryos")),
            selected_seedlings,
        })
    }

    /// A plant reached a stage when the stage column has a value; numeric
    /// stage columns (counts or 0/1 flags) must also be positive.
    fn stage_count(column: &Column) -> usize {
        match column {
            Column::Text(v) => v.iter().filter(|c| c.is_some()).count(),
            Column::Numeric(v) => v.iter().filter(|c| c.is_some_and(|x| x > 0.0)).count(),
        }
    }

    fn sum(values: &[Option<f64>]) -> f64 {
        values.iter().flatten().sum()
    }

    fn date_range(column: &Column, formats: &[String]) -> (Option<(NaiveDate, NaiveDate)>, usize) {
        let mut range: Option<(NaiveDate, NaiveDate)> = None;
        let mut unparsed = 0;

        for row in 0..column.len() {
            let Some(raw) = column.display_value(row) else {
                continue;
            };
            match parse_date(&raw, formats) {
                Some(date) => {
                    range = Some(match range {
                        Some((lo, hi)) => (lo.min(date), hi.max(date)),
                        None => (date, date),
                    });
                }
                None => unparsed += 1,
            }
        }

        (range, unparsed)
    }
}

/// First configured format that parses, as a date or a date-time.
pub fn parse_date(raw: &str, formats: &[String]) -> Option<NaiveDate> {
    formats.iter().find_map(|fmt| {
        NaiveDate::parse_from_str(raw, fmt)
            .ok()
            .or_else(|| NaiveDateTime::parse_from_str(raw, fmt).ok().map(|dt| dt.date()))
    })
}

impl std::fmt::Display for SummaryReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== DH-LCM Yield Summary ===")?;
        writeln!(f, "  Plants:        {} distinct induction plants", self.total_plants)?;
        match self.sow_date_range {
            Some((first, last)) => writeln!(f, "  Sow dates:     {first} to {last}")?,
            None => writeln!(f, "  Sow dates:     none recorded")?,
        }
        if self.unparsed_sow_dates > 0 {
            writeln!(f, "                 ({} unparsed)", self.unparsed_sow_dates)?;
        }
        writeln!(f, "  Germinated:    {} ({})", self.germinated, self.germination_rate)?;
        writeln!(f, "  Pollinated:    {} ({})", self.pollinated, self.pollination_rate)?;
        writeln!(f, "  Harvested:     {} ({})", self.harvested, self.harvest_rate)?;
        writeln!(f, "  Embryos:       {:.0} total", self.total_embryos)?;
        writeln!(
            f,
            "  Haploid:       {:.0} ({})",
            self.haploid_embryos, self.haploid_rate
        )?;
        write!(f, "  Selected:      {:.0} seedlings", self.selected_seedlings)
    }
}
