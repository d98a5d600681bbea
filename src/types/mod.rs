//! Shared data structures for the DH-LCM analysis pipeline
//!
//! - `stage`: process stages derived from column-name prefixes
//! - `planting`: planting-number categorical to ordinal lookup
//! - `results`: correlation / regression result records
//! - `thresholds`: default statistical cut-offs

mod stage;
mod planting;
mod results;
// Public so callers can reach `types::thresholds::analysis_thresholds`.
pub mod thresholds;

pub use stage::*;
pub use planting::*;
pub use results::*;
pub use thresholds::*;
