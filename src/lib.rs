//! DH-LCM Analysis: Double Haploid Life Cycle Management statistics
//!
//! Exploratory analysis over a merged induction / laboratory / hardening /
//! baby-nursery export.
//!
//! ## Pipeline
//!
//! - **Loader**: CSV into a typed column-major table
//! - **Summary Reporter**: plant-level yield funnel on a deduplicated view
//! - **Correlation Scanner**: pairwise Pearson with a magnitude screen
//! - **Regression Scanner**: simple OLS with a slope significance screen
//! - **Exporter**: result CSVs; scatter specs go to a pluggable plot sink

pub mod config;
pub mod types;
pub mod dataset;
pub mod analysis;
pub mod plot;
pub mod export;
pub mod synthetic;

// Re-export configuration
pub use config::{AnalysisConfig, ConfigError};

// Re-export commonly used types
pub use types::{
    analysis_thresholds, CorrelationDirection, CorrelationResult, PlantingNumber, ProcessStage,
    RegressionResult,
};

// Re-export the data model
pub use dataset::{Column, DataTable, DatasetError};

// Re-export analysis stages
pub use analysis::{
    AnalysisContext, AnalysisError, AnalysisOutcome, Analyzer, CorrelationEngine, Rate,
    RegressionEngine, SummaryReport, SummaryReporter,
};

// Re-export output components
pub use export::{Exporter, ExportError, CORRELATION_FILE, REGRESSION_FILE};
pub use plot::{JsonPlotSink, NullPlotSink, PlotSink, ScatterSpec};
