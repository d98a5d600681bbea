//! Config validation: unknown-key detection with Levenshtein suggestions
//! and statistical range checks.
//!
//! The raw TOML is first walked as a `toml::Value` tree and every dotted key
//! is compared against the known field names; unknown keys produce warnings
//! with "did you mean?" suggestions. Typos never break a config, but they
//! would otherwise silently fall back to a default column name.

use std::collections::HashSet;

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, " — did you mean '{s}'?")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Returns the complete set of valid dotted key paths for AnalysisConfig.
///
/// Any new field added to AnalysisConfig must be added here too.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        // [loader]
        "loader",
        "loader.delimiter",
        "loader.null_tokens",
        // [columns]
        "columns",
        "columns.plant_id",
        "columns.planting_number",
        "columns.sow_date",
        "columns.germination",
        "columns.pollination",
        "columns.harvest",
        "columns.total_embryos",
        "columns.haploid_embryos",
        "columns.selected_seedlings",
        // [summary]
        "summary",
        "summary.date_formats",
        // [correlation]
        "correlation",
        "correlation.magnitude_threshold",
        "correlation.min_samples",
        "correlation.deduplicate_pairs",
        "correlation.exclude_columns",
        // [regression]
        "regression",
        "regression.significance_threshold",
        "regression.min_samples",
        "regression.exclude_columns",
        // [export]
        "export",
        "export.output_dir",
        "export.write_regressions",
        // [plots]
        "plots",
        "plots.output_dir",
    ];
    keys.iter().copied().collect()
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Recursively walks a `toml::Value` tree and collects all dotted key paths.
///
/// For example, a table `{ a = { b = 1, c = 2 } }` yields:
/// `["a", "a.b", "a.c"]`
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(table) = value.as_table() {
        for (k, v) in table {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            keys.push(path.clone());
            if v.is_table() {
                keys.extend(walk_toml_keys(v, &path));
            }
        }
    }
    keys
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Suggest the closest known key for an unknown key, if within edit distance 3.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    known
        .iter()
        .map(|k| (*k, levenshtein(unknown, k)))
        .filter(|(_, dist)| *dist <= 3)
        // Tie-break on the key itself so the suggestion is deterministic
        .min_by(|(ka, da), (kb, db)| da.cmp(db).then_with(|| ka.cmp(kb)))
        .map(|(k, _)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Parse a raw TOML string and return warnings for any unknown config keys.
///
/// Parse errors are left to serde, which reports them with a location.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let Ok(value) = raw_toml.parse::<toml::Value>() else {
        return Vec::new();
    };

    let known = known_config_keys();
    walk_toml_keys(&value, "")
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .map(|key| {
            let suggestion = suggest_correction(&key, &known);
            ValidationWarning {
                message: format!("Unknown config key '{key}'"),
                field: key,
                suggestion,
            }
        })
        .collect()
}

// ============================================================================
// Range Validation
// ============================================================================

/// Validate value ranges on a parsed AnalysisConfig.
///
/// Returns (errors, warnings): errors make the analysis meaningless and
/// must stop the run; warnings are legal but unusual.
pub fn validate_ranges(config: &super::AnalysisConfig) -> (Vec<String>, Vec<ValidationWarning>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if config.loader.delimiter_byte().is_none() {
        errors.push(format!(
            "loader.delimiter = {:?} must be a single ASCII character",
            config.loader.delimiter
        ));
    }

    let r = config.correlation.magnitude_threshold;
    if !r.is_finite() || !(0.0..1.0).contains(&r) {
        errors.push(format!(
            "correlation.magnitude_threshold = {r} must be in [0, 1)"
        ));
    } else if r < 0.3 {
        warnings.push(ValidationWarning {
            field: "correlation.magnitude_threshold".to_string(),
            message: format!(
                "correlation.magnitude_threshold = {r:.2} will retain weak correlations"
            ),
            suggestion: None,
        });
    }

    // Pearson is undefined below two points
    if config.correlation.min_samples < 2 {
        errors.push(format!(
            "correlation.min_samples = {} must be >= 2",
            config.correlation.min_samples
        ));
    }

    let p = config.regression.significance_threshold;
    if !p.is_finite() || p <= 0.0 || p >= 1.0 {
        errors.push(format!(
            "regression.significance_threshold = {p} must be in (0, 1)"
        ));
    } else if p > 0.1 {
        warnings.push(ValidationWarning {
            field: "regression.significance_threshold".to_string(),
            message: format!(
                "regression.significance_threshold = {p:.3} is looser than the usual 0.05"
            ),
            suggestion: None,
        });
    }

    // Slope standard error needs n - 2 > 0 degrees of freedom
    if config.regression.min_samples < 3 {
        errors.push(format!(
            "regression.min_samples = {} must be >= 3",
            config.regression.min_samples
        ));
    }

    if config.summary.date_formats.is_empty() {
        errors.push("summary.date_formats must list at least one format".to_string());
    }

    let c = &config.columns;
    for (key, value) in [
        ("columns.plant_id", &c.plant_id),
        ("columns.planting_number", &c.planting_number),
        ("columns.sow_date", &c.sow_date),
        ("columns.germination", &c.germination),
        ("columns.pollination", &c.pollination),
        ("columns.harvest", &c.harvest),
        ("columns.total_embryos", &c.total_embryos),
        ("columns.haploid_embryos", &c.haploid_embryos),
        ("columns.selected_seedlings", &c.selected_seedlings),
    ] {
        if value.trim().is_empty() {
            errors.push(format!("{key} must not be empty"));
        }
    }

    (errors, warnings)
}
