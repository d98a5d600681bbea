//! Explicit data context shared by the pipeline stages
//!
//! Holds the full record table, its plant-level view and the run
//! configuration. Stages borrow what they need; nothing is mutated after
//! construction.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::config::AnalysisConfig;
use crate::dataset::{DataTable, DatasetError};
use crate::types::ProcessStage;

pub struct AnalysisContext {
    /// Every row of the merged dataset
    pub records: DataTable,
    /// One row per induction plant (first occurrence)
    pub plants: DataTable,
    pub config: AnalysisConfig,
}

impl AnalysisContext {
    /// Build the context from an already-loaded table.
    pub fn new(records: DataTable, config: AnalysisConfig) -> Result<Self, DatasetError> {
        let (plants, null_ids) = records.dedup_by(&config.columns.plant_id)?;
        if null_ids > 0 {
            warn!(
                column = %config.columns.plant_id,
                rows = null_ids,
                "Rows without a plant identifier excluded from plant-level view"
            );
        }
        info!(
            rows = records.row_count(),
            plants = plants.row_count(),
            "Deduplicated records by plant identifier"
        );
        for stage in [
            ProcessStage::Induction,
            ProcessStage::Laboratory,
            ProcessStage::Hardening,
            ProcessStage::BabyNursery,
            ProcessStage::Other,
        ] {
            let columns = records.columns_in_stage(stage);
            if !columns.is_empty() {
                debug!(
                    stage = %stage,
                    plant_level = stage.is_plant_level(),
                    columns = columns.len(),
                    "Stage columns"
                );
            }
        }
        Ok(Self {
            records,
            plants,
            config,
        })
    }

    /// Load the CSV named by `path` and build the context.
    pub fn load(path: impl AsRef<Path>, config: AnalysisConfig) -> Result<Self, DatasetError> {
        let records = DataTable::from_path(path, &config.loader)?;
        Self::new(records, config)
    }
}
