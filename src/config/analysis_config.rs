//! Analysis Configuration - column names and statistical cut-offs as TOML values
//!
//! Each section implements `Default` with the values the analysis has always
//! used, so running without a config file reproduces the standard report.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::types::analysis_thresholds;

/// Environment variable naming a config file
pub const CONFIG_ENV_VAR: &str = "DHLCM_CONFIG";

/// Config file looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "analysis_config.toml";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for one analysis run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// CSV parsing options
    #[serde(default)]
    pub loader: LoaderConfig,

    /// Column names of the merged dataset
    #[serde(default)]
    pub columns: ColumnConfig,

    /// Summary report options
    #[serde(default)]
    pub summary: SummaryConfig,

    /// Correlation scan options
    #[serde(default)]
    pub correlation: CorrelationConfig,

    /// Regression scan options
    #[serde(default)]
    pub regression: RegressionConfig,

    /// Result CSV output
    #[serde(default)]
    pub export: ExportConfig,

    /// Scatter plot specification output
    #[serde(default)]
    pub plots: PlotConfig,
}

impl AnalysisConfig {
    /// Load configuration using the standard search order.
    ///
    /// An explicitly requested file must load cleanly; the environment and
    /// working-directory candidates fall back to defaults with a warning.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        // 1. Explicit path
        if let Some(path) = explicit {
            let config = Self::load_from_file(path)?;
            info!(path = %path.display(), "Loaded analysis config");
            return Ok(config);
        }

        // 2. Env var
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(
                            path = %p.display(),
                            "Loaded analysis config from {}", CONFIG_ENV_VAR
                        );
                        return Ok(config);
                    }
                    Err(e) => {
                        warn!(
                            path = %p.display(),
                            error = %e,
                            "Failed to load config from {}, falling back", CONFIG_ENV_VAR
                        );
                    }
                }
            } else {
                warn!(path = %path, "{} points to non-existent file, falling back", CONFIG_ENV_VAR);
            }
        }

        // 3. ./analysis_config.toml
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!("Loaded analysis config from ./{}", LOCAL_CONFIG_FILE);
                    return Ok(config);
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./{}, using defaults", LOCAL_CONFIG_FILE);
                }
            }
        }

        // 4. Defaults
        info!("No {} found, using built-in defaults", LOCAL_CONFIG_FILE);
        Ok(Self::default())
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse(_, err) => ConfigError::Parse(path.to_path_buf(), err),
            other => other,
        })
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        // Unknown keys only warn
        for w in &super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let config: Self =
            toml::from_str(contents).map_err(|e| ConfigError::Parse(PathBuf::new(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to TOML (used to emit a starter config).
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Range checks; suspicious-but-legal values are logged as warnings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (errors, warnings) = super::validation::validate_ranges(self);
        for w in &warnings {
            warn!("{}", w);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(PathBuf, toml::de::Error),
    Serialize(toml::ser::Error),
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "Config I/O error ({}): {}", path.display(), e),
            ConfigError::Parse(path, e) => {
                write!(f, "Config parse error ({}): {}", path.display(), e)
            }
            ConfigError::Serialize(e) => write!(f, "Config serialization error: {}", e),
            ConfigError::Validation(errors) => {
                writeln!(f, "Config validation failed:")?;
                for e in errors {
                    writeln!(f, "  - {}", e)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loader
// ============================================================================

/// CSV parsing options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Field delimiter (single ASCII character)
    #[serde(default = "default_delimiter")]
    pub delimiter: String,

    /// Cell values read as missing (compared after trimming)
    #[serde(default = "default_null_tokens")]
    pub null_tokens: Vec<String>,
}

fn default_delimiter() -> String {
    ",".to_string()
}
fn default_null_tokens() -> Vec<String> {
    ["", "NA", "N/A", "NaN", "nan", "null", "NULL", "None"]
        .iter()
        .map(|s| (*s).to_string())
        .collect()
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            null_tokens: default_null_tokens(),
        }
    }
}

impl LoaderConfig {
    /// Delimiter as the byte the csv reader expects.
    pub fn delimiter_byte(&self) -> Option<u8> {
        match self.delimiter.as_bytes() {
            [b] if b.is_ascii() => Some(*b),
            _ => None,
        }
    }

    pub fn is_null(&self, cell: &str) -> bool {
        let cell = cell.trim();
        self.null_tokens.iter().any(|t| t == cell)
    }
}

// ============================================================================
// Columns
// ============================================================================

/// Names of the columns the summary report and plots rely on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnConfig {
    /// Induction-plant identifier; key of the deduplicated view
    #[serde(default = "default_plant_id")]
    pub plant_id: String,

    /// Categorical planting number used to colour scatter plots
    #[serde(default = "default_planting_number")]
    pub planting_number: String,

    #[serde(default = "default_sow_date")]
    pub sow_date: String,

    #[serde(default = "default_germination")]
    pub germination: String,

    #[serde(default = "default_pollination")]
    pub pollination: String,

    #[serde(default = "default_harvest")]
    pub harvest: String,

    #[serde(default = "default_total_embryos")]
    pub total_embryos: String,

    #[serde(default = "default_haploid_embryos")]
    pub haploid_embryos: String,

    #[serde(default = "default_selected_seedlings")]
    pub selected_seedlings: String,
}

fn default_plant_id() -> String {
    "Induction Plant ID".to_string()
}
fn default_planting_number() -> String {
    "Induction Planting Number".to_string()
}
fn default_sow_date() -> String {
    "Induction Sow Date".to_string()
}
fn default_germination() -> String {
    "Induction Germination Date".to_string()
}
fn default_pollination() -> String {
    "Induction Pollination Date".to_string()
}
fn default_harvest() -> String {
    "Induction Harvest Date".to_string()
}
fn default_total_embryos() -> String {
    "Laboratory Total Embryos".to_string()
}
fn default_haploid_embryos() -> String {
    "Laboratory Haploid Embryos".to_string()
}
fn default_selected_seedlings() -> String {
    "Laboratory Selected Seedlings".to_string()
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            plant_id: default_plant_id(),
            planting_number: default_planting_number(),
            sow_date: default_sow_date(),
            germination: default_germination(),
            pollination: default_pollination(),
            harvest: default_harvest(),
            total_embryos: default_total_embryos(),
            haploid_embryos: default_haploid_embryos(),
            selected_seedlings: default_selected_seedlings(),
        }
    }
}

// ============================================================================
// Summary
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryConfig {
    /// chrono formats tried in order when parsing sow dates
    #[serde(default = "default_date_formats")]
    pub date_formats: Vec<String>,
}

fn default_date_formats() -> Vec<String> {
    ["%Y-%m-%d", "%Y-%m-%d %H:%M:%S", "%d/%m/%Y", "%d-%b-%Y"]
        .iter()
        .map(|s| (*s).to_string())
        .collect()
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            date_formats: default_date_formats(),
        }
    }
}

// ============================================================================
// Correlation
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrelationConfig {
    /// Retain when |r| is strictly greater than this
    #[serde(default = "default_magnitude_threshold")]
    pub magnitude_threshold: f64,

    /// Pairs with fewer complete rows are undefined
    #[serde(default = "default_correlation_min_samples")]
    pub min_samples: usize,

    /// Collapse (A, B) and (B, A) into one record
    #[serde(default)]
    pub deduplicate_pairs: bool,

    /// Numeric columns left out of the scan
    #[serde(default)]
    pub exclude_columns: Vec<String>,
}

fn default_magnitude_threshold() -> f64 {
    analysis_thresholds::CORRELATION_MAGNITUDE
}
fn default_correlation_min_samples() -> usize {
    analysis_thresholds::MIN_CORRELATION_SAMPLES
}

impl Default for CorrelationConfig {
    fn default() -> Self {
        Self {
            magnitude_threshold: default_magnitude_threshold(),
            min_samples: default_correlation_min_samples(),
            deduplicate_pairs: false,
            exclude_columns: Vec::new(),
        }
    }
}

// ============================================================================
// Regression
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionConfig {
    /// Retain when 0 < p < this
    #[serde(default = "default_significance_threshold")]
    pub significance_threshold: f64,

    #[serde(default = "default_regression_min_samples")]
    pub min_samples: usize,

    /// Identifier columns never used as predictor or response
    #[serde(default = "default_regression_excludes")]
    pub exclude_columns: Vec<String>,
}

fn default_significance_threshold() -> f64 {
    analysis_thresholds::SIGNIFICANCE_THRESHOLD
}
fn default_regression_min_samples() -> usize {
    analysis_thresholds::MIN_REGRESSION_SAMPLES
}
fn default_regression_excludes() -> Vec<String> {
    vec![default_plant_id()]
}

impl Default for RegressionConfig {
    fn default() -> Self {
        Self {
            significance_threshold: default_significance_threshold(),
            min_samples: default_regression_min_samples(),
            exclude_columns: default_regression_excludes(),
        }
    }
}

// ============================================================================
// Export / Plots
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory receiving the result CSVs (created if missing)
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Also write the regression result CSV
    #[serde(default = "default_true")]
    pub write_regressions: bool,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./output")
}
fn default_true() -> bool {
    true
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            write_regressions: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlotConfig {
    /// Directory for JSON scatter specifications; `None` discards them
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}
