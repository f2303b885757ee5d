use std::fs::{ self, File };
use std::path::{ Path, PathBuf };

use chrono::{ DateTime, Local };
use log::{ debug, info };

use crate::errors::{ BenchError, BenchResult };
use crate::models::record::EvaluationRecord;
use crate::traits::RecordSink;

/// Default location for results tables
pub const RESULTS_DIR: &str = "results";

/// Column layout of a results table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultTable {
    /// Domain requirements checked as ptLTL
    #[default]
    PtLtl,
    /// Lifted future-time LTL corpus
    Ltl,
}

impl ResultTable {
    pub fn header(self) -> [&'static str; 5] {
        match self {
            ResultTable::PtLtl => ["Summary", "ID", "ptLTL", "Generated ptLTL", "Equivalence Check"],
            ResultTable::Ltl =>
                ["true/total", "natural_language", "reference_ltl", "generated_ltl", "equivalent"],
        }
    }

    fn stem(self) -> &'static str {
        match self {
            ResultTable::PtLtl => "ptLTL",
            ResultTable::Ltl => "LTL",
        }
    }
}

/// `<dir>/<YYYYmmddHHMMSS>_<ptLTL|LTL>_results[_<temperature>].csv`.
/// The suffix is omitted at temperature zero.
pub fn default_results_path(
    dir: &Path,
    at: DateTime<Local>,
    temperature: f32,
    table: ResultTable
) -> PathBuf {
    let stamp = at.format("%Y%m%d%H%M%S");
    let name = if temperature == 0.0 {
        format!("{}_{}_results.csv", stamp, table.stem())
    } else {
        format!("{}_{}_results_{}.csv", stamp, table.stem(), temperature)
    };
    dir.join(name)
}

/// Append-only CSV writer for evaluation records
pub struct ResultSink {
    path: PathBuf,
    writer: csv::Writer<File>,
    written: usize,
}

impl ResultSink {
    /// Create a sink at `path`, creating parent directories as needed
    pub fn create(path: &Path, table: ResultTable) -> BenchResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let output_error = |e: csv::Error| BenchError::OutputError(format!("{}: {}", path.display(), e));
        let mut writer = csv::WriterBuilder
            ::new()
            .has_headers(false)
            .from_path(path)
            .map_err(output_error)?;
        // Header goes out even when the run produces no rows
        writer.write_record(table.header()).map_err(output_error)?;
        writer.flush()?;
        debug!("Writing results to {}", path.display());
        Ok(Self {
            path: path.to_path_buf(),
            writer,
            written: 0,
        })
    }

    /// Explicit path when given, otherwise a timestamped file under `results/`
    pub fn for_run(output: Option<&Path>, temperature: f32, table: ResultTable) -> BenchResult<Self> {
        match output {
            Some(path) => Self::create(path, table),
            None => {
                let path = default_results_path(Path::new(RESULTS_DIR), Local::now(), temperature, table);
                Self::create(&path, table)
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn written(&self) -> usize {
        self.written
    }

    /// Write one record and flush, so an interrupted run keeps its rows
    pub fn write(&mut self, record: &EvaluationRecord) -> BenchResult<()> {
        self.writer
            .serialize(record)
            .map_err(|e| BenchError::OutputError(e.to_string()))?;
        self.writer.flush()?;
        self.written += 1;
        Ok(())
    }

    /// Flush and return the path written to
    pub fn finish(mut self) -> BenchResult<PathBuf> {
        self.writer.flush()?;
        info!("Saved {} results to {}", self.written, self.path.display());
        Ok(self.path)
    }
}

impl RecordSink for ResultSink {
    fn write(&mut self, record: &EvaluationRecord) -> BenchResult<()> {
        ResultSink::write(self, record)
    }
}
