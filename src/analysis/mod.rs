//! DH-LCM exploratory analysis
//!
//! Linear pipeline over one merged dataset:
//! 1. `context`: load + deduplicate into an explicit data context
//! 2. `summary`: plant-level yield funnel and embryo totals
//! 3. `correlations`: pairwise Pearson screen over numeric columns
//! 4. `regression`: simple OLS screen over numeric column pairs
//! 5. `analyzer`: runs the stages, emits plot specs, exports CSVs

pub mod paired;
pub mod context;
pub mod summary;
pub mod correlations;
pub mod regression;
pub mod analyzer;

pub use context::AnalysisContext;
pub use summary::{Rate, SummaryError, SummaryReport, SummaryReporter};
pub use correlations::CorrelationEngine;
pub use regression::{OlsFit, RegressionEngine};
pub use analyzer::{AnalysisError, AnalysisOutcome, Analyzer};
