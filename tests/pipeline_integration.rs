//! End-to-end pipeline tests
//!
//! Load → summarise → scan → export over small hand-written exports and a
//! generated synthetic dataset.

use std::fs;
use std::path::Path;

use dh_lcm::synthetic::{generate, SyntheticConfig};
use dh_lcm::{
    AnalysisConfig, AnalysisContext, Analyzer, CorrelationDirection, DataTable, JsonPlotSink,
    NullPlotSink, Rate, CORRELATION_FILE, REGRESSION_FILE,
};

fn config_for(out: &Path) -> AnalysisConfig {
    let mut config = AnalysisConfig::default();
    config.export.output_dir = out.to_path_buf();
    config
}

fn context_from(csv: &str, config: AnalysisConfig) -> AnalysisContext {
    let records = DataTable::from_reader(csv.as_bytes(), &config.loader).unwrap();
    AnalysisContext::new(records, config).unwrap()
}

fn read_rows(path: &Path) -> Vec<Vec<String>> {
    let mut reader = csv::Reader::from_path(path).unwrap();
    reader
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect()
}

const FUNNEL_CSV: &str = "\
Induction Plant ID,Induction Planting Number,Induction Sow Date,Induction Germination Date,Induction Pollination Date,Induction Harvest Date,Laboratory Total Embryos,Laboratory Haploid Embryos,Laboratory Selected Seedlings,Hardening Tray
A,1st,2024-01-01,2024-01-10,2024-03-01,2024-04-10,10,1,1,T1
A,1st,2024-01-01,2024-01-10,2024-03-01,2024-04-10,10,1,1,T2
A,1st,2024-01-01,2024-01-10,2024-03-01,2024-04-10,10,1,1,T3
B,1st,2024-01-02,2024-01-11,2024-03-02,,,,,T1
C,2nd,2024-01-03,,,,,,,T1
";

#[test]
fn summary_counts_distinct_plants_not_rows() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = context_from(FUNNEL_CSV, config_for(dir.path()));
    assert_eq!(ctx.records.row_count(), 5);

    let outcome = Analyzer::run(&ctx, &mut NullPlotSink).unwrap();
    let summary = &outcome.summary;
    assert_eq!(summary.total_plants, 3);
    assert_eq!(summary.germinated, 2);
    assert_eq!(summary.pollinated, 2);
    assert_eq!(summary.harvested, 1);
    assert_eq!(summary.pollination_rate, Rate::Value(1.0));
    assert_eq!(summary.harvest_rate, Rate::Value(0.5));
    // Embryos of plant A counted once despite three hardening rows
    assert!((summary.total_embryos - 10.0).abs() < 1e-9);
}

#[test]
fn no_germination_reports_undefined_rate() {
    let csv = "\
Induction Plant ID,Induction Planting Number,Induction Sow Date,Induction Germination Date,Induction Pollination Date,Induction Harvest Date,Laboratory Total Embryos,Laboratory Haploid Embryos,Laboratory Selected Seedlings
A,1st,2024-01-01,,,,,,
B,1st,2024-01-02,,,,,,
";
    let dir = tempfile::tempdir().unwrap();
    let ctx = context_from(csv, config_for(dir.path()));
    let outcome = Analyzer::run(&ctx, &mut NullPlotSink).unwrap();

    assert_eq!(outcome.summary.germination_rate, Rate::Value(0.0));
    let text = outcome.summary.to_string();
    assert!(text.contains("undefined rate: no germinated plants"), "{text}");
    assert!(!text.contains("NaN") && !text.contains("inf"));
}

#[test]
fn three_row_example_is_perfectly_positive() {
    let csv = "x,y\n1,2\n2,4\n3,6\n";
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path());
    let records = DataTable::from_reader(csv.as_bytes(), &config.loader).unwrap();
    let results = dh_lcm::CorrelationEngine::scan(&records, &config.correlation).unwrap();

    assert_eq!(results.len(), 2, "both visit orders are reported");
    for r in &results {
        assert!((r.coefficient - 1.0).abs() < 1e-12);
        assert_eq!(r.direction, CorrelationDirection::Positive);
    }
}

#[test]
fn nulls_only_affect_pairs_that_include_them() {
    let csv = "\
a,b,c
1,2,
2,4,
3,6,5
4,8,
5,10,1
";
    let config = AnalysisConfig::default();
    let records = DataTable::from_reader(csv.as_bytes(), &config.loader).unwrap();
    let results = dh_lcm::CorrelationEngine::scan(&records, &config.correlation).unwrap();

    let ab = results
        .iter()
        .find(|r| r.column_a == "a" && r.column_b == "b")
        .unwrap();
    assert_eq!(ab.sample_count, 5);

    // c is complete in two rows only; those two rows define its pairs
    let ac = results
        .iter()
        .find(|r| r.column_a == "a" && r.column_b == "c")
        .unwrap();
    assert_eq!(ac.sample_count, 2);
    assert_eq!(ac.direction, CorrelationDirection::Negative);
}

#[test]
fn two_complete_rows_define_a_correlation() {
    let config = AnalysisConfig::default();
    let records = DataTable::from_reader("a,b\n1,2\n2,5\n".as_bytes(), &config.loader).unwrap();
    let results = dh_lcm::CorrelationEngine::scan(&records, &config.correlation).unwrap();
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| (r.coefficient - 1.0).abs() < 1e-12));

    // Constant columns stay undefined at any length
    let records = DataTable::from_reader("a,b\n1,2\n2,2\n".as_bytes(), &config.loader).unwrap();
    assert!(dh_lcm::CorrelationEngine::scan(&records, &config.correlation)
        .unwrap()
        .is_empty());
}

#[test]
fn exports_are_overwritten_each_run() {
    let dir = tempfile::tempdir().unwrap();
    let strong = "\
Induction Plant ID,Induction Planting Number,Induction Sow Date,Induction Germination Date,Induction Pollination Date,Induction Harvest Date,Laboratory Total Embryos,Laboratory Haploid Embryos,Laboratory Selected Seedlings
A,1st,2024-01-01,2024-01-10,2024-03-01,2024-04-10,10,1,3
B,1st,2024-01-02,2024-01-11,2024-03-02,2024-04-11,20,2,1
C,2nd,2024-01-03,2024-01-12,2024-03-03,2024-04-12,30,3,4
D,2nd,2024-01-04,2024-01-13,2024-03-04,2024-04-13,40,4,2
";
    let first = Analyzer::run(&context_from(strong, config_for(dir.path())), &mut NullPlotSink)
        .unwrap();
    assert!(!first.correlations.is_empty());
    let before = read_rows(&dir.path().join(CORRELATION_FILE));
    assert_eq!(before.len(), first.correlations.len());

    // Second run with no numeric relationship at all
    let flat = "\
Induction Plant ID,Induction Planting Number,Induction Sow Date,Induction Germination Date,Induction Pollination Date,Induction Harvest Date,Laboratory Total Embryos,Laboratory Haploid Embryos,Laboratory Selected Seedlings
A,1st,2024-01-01,,,,5,0,0
B,1st,2024-01-02,,,,5,0,0
C,2nd,2024-01-03,,,,5,0,0
";
    let second = Analyzer::run(&context_from(flat, config_for(dir.path())), &mut NullPlotSink)
        .unwrap();
    assert!(second.correlations.is_empty());
    assert!(read_rows(&dir.path().join(CORRELATION_FILE)).is_empty());
    assert!(read_rows(&dir.path().join(REGRESSION_FILE)).is_empty());
}

#[test]
fn synthetic_dataset_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("merged.csv");
    let stats = generate(
        &SyntheticConfig {
            plants: 300,
            seed: 11,
            ..Default::default()
        },
        fs::File::create(&csv_path).unwrap(),
    )
    .unwrap();

    let config = config_for(&dir.path().join("out"));
    let ctx = AnalysisContext::load(&csv_path, config).unwrap();
    assert_eq!(ctx.records.row_count(), stats.rows);
    assert_eq!(ctx.plants.row_count(), 300);

    let mut sink = JsonPlotSink::new(dir.path().join("plots")).unwrap();
    let outcome = Analyzer::run(&ctx, &mut sink).unwrap();

    assert_eq!(outcome.summary.total_plants, 300);
    assert!(outcome.summary.germination_rate.value().is_some_and(|r| r > 0.7));
    let haploid = outcome.summary.haploid_rate.value().unwrap();
    assert!((haploid - 0.10).abs() < 0.02, "haploid share {haploid}");

    // Built-in relationships are found
    assert!(outcome.correlations.iter().any(|c| {
        c.column_a == "Laboratory Total Embryos" && c.column_b == "Laboratory Haploid Embryos"
    }));
    assert!(outcome.correlations.iter().any(|c| {
        c.column_a == "Hardening Survival Pct" && c.column_b == "Baby Nursery Height cm"
    }));
    // Pure noise is not
    assert!(!outcome.correlations.iter().any(|c| {
        c.column_a == "Laboratory Rescue Days" && c.column_b == "Baby Nursery Leaf Count"
    }));

    assert!(outcome
        .regressions
        .windows(2)
        .all(|w| w[0].std_error <= w[1].std_error));
    assert!(outcome
        .regressions
        .iter()
        .all(|r| r.p_value > 0.0 && r.p_value < 0.05));

    let rows = read_rows(&outcome.correlation_csv);
    assert_eq!(rows.len(), outcome.correlations.len());
    assert_eq!(
        sink.written().len(),
        outcome.correlations.len() + outcome.regressions.len()
    );
}
