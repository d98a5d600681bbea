//! Analysis orchestrator
//!
//! Runs the stages in order against an [`AnalysisContext`]:
//! 1. Summary report on the plant-level view
//! 2. Correlation scan on all records
//! 3. Regression scan on all records
//! 4. Scatter specs for every retained finding (only if the sink wants them)
//! 5. CSV export

use std::path::PathBuf;

use tracing::info;

use super::{
    context::AnalysisContext,
    correlations::CorrelationEngine,
    regression::RegressionEngine,
    summary::{SummaryError, SummaryReport, SummaryReporter},
};
use crate::dataset::DatasetError;
use crate::export::{ExportError, Exporter};
use crate::plot::{planting_numbers, PlotError, PlotSink, ScatterSpec};
use crate::types::{CorrelationResult, RegressionResult};

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Summary failed: {0}")]
    Summary(#[from] SummaryError),

    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Plot(#[from] PlotError),
}

/// Everything one run produced.
#[derive(Debug)]
pub struct AnalysisOutcome {
    pub summary: SummaryReport,
    pub correlations: Vec<CorrelationResult>,
    /// Sorted by ascending standard error
    pub regressions: Vec<RegressionResult>,
    pub correlation_csv: PathBuf,
    pub regression_csv: Option<PathBuf>,
    pub plots_emitted: usize,
}

pub struct Analyzer;

impl Analyzer {
    pub fn run(
        ctx: &AnalysisContext,
        sink: &mut dyn PlotSink,
    ) -> Result<AnalysisOutcome, AnalysisError> {
        let config = &ctx.config;

        // Step 1: Summary on deduplicated plants
        let summary = SummaryReporter::build(&ctx.plants, &config.columns, &config.summary)?;
        info!(
            plants = summary.total_plants,
            germinated = summary.germinated,
            harvested = summary.harvested,
            "Summary computed"
        );

        // Steps 2-3: Scans over every record
        let correlations = CorrelationEngine::scan(&ctx.records, &config.correlation)?;
        let regressions = RegressionEngine::scan(&ctx.records, &config.regression)?;

        // Step 4: Plot specs
        let plots_emitted = Self::emit_plots(ctx, &correlations, &regressions, sink)?;

        // Step 5: Export
        let out_dir = &config.export.output_dir;
        let correlation_csv = Exporter::write_correlations(out_dir, &correlations)?;
        let regression_csv = if config.export.write_regressions {
            Some(Exporter::write_regressions(out_dir, &regressions)?)
        } else {
            None
        };

        Ok(AnalysisOutcome {
            summary,
            correlations,
            regressions,
            correlation_csv,
            regression_csv,
            plots_emitted,
        })
    }

    fn emit_plots(
        ctx: &AnalysisContext,
        correlations: &[CorrelationResult],
        regressions: &[RegressionResult],
        sink: &mut dyn PlotSink,
    ) -> Result<usize, AnalysisError> {
        if !sink.enabled() {
            return Ok(0);
        }

        let planting = planting_numbers(&ctx.records, &ctx.config.columns.planting_number)?;
        let unmapped = planting.iter().filter(|p| !p.is_mapped()).count();
        if unmapped > 0 {
            info!(rows = unmapped, "Planting numbers without a mapping plotted as ordinal 0");
        }

        let mut emitted = 0;
        for result in correlations {
            sink.emit(&ScatterSpec::for_correlation(&ctx.records, result, &planting)?)?;
            emitted += 1;
        }
        for result in regressions {
            sink.emit(&ScatterSpec::for_regression(&ctx.records, result, &planting)?)?;
            emitted += 1;
        }

        info!(sink = sink.sink_name(), plots = emitted, "Plot specs emitted");
        Ok(emitted)
    }
}
