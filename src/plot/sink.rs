//! Plot sinks

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{PlotError, PlotKind, ScatterSpec};

/// Where scatter specifications go.
pub trait PlotSink {
    /// Receive one specification.
    fn emit(&mut self, spec: &ScatterSpec) -> Result<(), PlotError>;

    /// False when specs would be discarded, letting callers skip building them.
    fn enabled(&self) -> bool {
        true
    }

    /// Human-readable name for logging.
    fn sink_name(&self) -> &str;
}

/// Discards everything.
#[derive(Debug, Default)]
pub struct NullPlotSink;

impl PlotSink for NullPlotSink {
    fn emit(&mut self, _spec: &ScatterSpec) -> Result<(), PlotError> {
        Ok(())
    }

    fn enabled(&self) -> bool {
        false
    }

    fn sink_name(&self) -> &str {
        "none"
    }
}

/// Writes one pretty-printed JSON file per spec.
#[derive(Debug)]
pub struct JsonPlotSink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl JsonPlotSink {
    /// Create the sink, creating `dir` if needed.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, PlotError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|source| PlotError::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(Self {
            dir,
            written: Vec::new(),
        })
    }

    /// Files written so far, in emission order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn file_name(&self, spec: &ScatterSpec) -> String {
        let kind = match spec.kind {
            PlotKind::Correlation => "corr",
            PlotKind::Regression => "reg",
        };
        format!(
            "{:03}_{}_{}__{}.json",
            self.written.len() + 1,
            kind,
            slug(&spec.x_column),
            slug(&spec.y_column)
        )
    }
}

fn slug(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect()
}

impl PlotSink for JsonPlotSink {
    fn emit(&mut self, spec: &ScatterSpec) -> Result<(), PlotError> {
        let path = self.dir.join(self.file_name(spec));
        let json = serde_json::to_string_pretty(spec)?;
        fs::write(&path, json).map_err(|source| PlotError::Io {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), points = spec.points.len(), "Wrote plot spec");
        self.written.push(path);
        Ok(())
    }

    fn sink_name(&self) -> &str {
        "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot::ScatterPoint;

    fn spec() -> ScatterSpec {
        ScatterSpec {
            kind: PlotKind::Correlation,
            x_column: "Laboratory Total Embryos".into(),
            y_column: "Hardening Survived (%)".into(),
            title: "t".into(),
            points: vec![ScatterPoint { x: 1.0, y: 2.0, ordinal: 1 }],
            fit_line: None,
        }
    }

    #[test]
    fn test_json_sink_writes_numbered_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = JsonPlotSink::new(dir.path().join("plots")).unwrap();
        sink.emit(&spec()).unwrap();
        sink.emit(&spec()).unwrap();

        let names: Vec<String> = sink
            .written()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names[0],
            "001_corr_laboratory_total_embryos__hardening_survived____.json"
        );
        assert!(names[1].starts_with("002_"));

        let back: ScatterSpec =
            serde_json::from_str(&fs::read_to_string(&sink.written()[0]).unwrap()).unwrap();
        assert_eq!(back, spec());
    }

    #[test]
    fn test_null_sink_is_disabled() {
        let mut sink = NullPlotSink;
        assert!(!sink.enabled());
        assert!(sink.emit(&spec()).is_ok());
    }
}
