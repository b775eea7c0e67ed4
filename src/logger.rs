use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use chrono::Local;
use csv::{Writer, WriterBuilder};
use tracing::info;

use crate::error::{EvalError, Result};

/// One row of the run log.
#[derive(Debug, Clone, PartialEq)]
pub struct StepRecord {
    pub epoch: usize,
    pub step: usize,
    pub split: String,
    pub loss: f64,
    /// `(pos, neg)` per tracked metric, in the order the logger was built with.
    pub metrics: Vec<(f64, f64)>,
}

/// Appends per-step rows to `<log_dir>/<start time>.csv`.
#[derive(Debug)]
pub struct RunLogger {
    log_path: PathBuf,
    metrics: Vec<String>,
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> EvalError + '_ {
    move |source| EvalError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn csv_error(path: &Path) -> impl FnOnce(csv::Error) -> EvalError + '_ {
    move |source| EvalError::Csv {
        path: path.to_path_buf(),
        source,
    }
}

impl RunLogger {
    /// Create the log directory if needed and write the CSV header.
    pub fn new(log_dir: impl AsRef<Path>, metrics: Vec<String>) -> Result<Self> {
        let log_dir = log_dir.as_ref();
        fs::create_dir_all(log_dir).map_err(io_error(log_dir))?;
        let log_path = log_dir.join(format!("{}.csv", Local::now().format("%Y-%m-%d_%H-%M-%S")));

        let mut header = vec![
            String::from("epoch"),
            String::from("step"),
            String::from("split"),
            String::from("loss"),
        ];
        for metric in metrics.iter() {
            header.push(format!("pos_{}", metric));
            header.push(format!("neg_{}", metric));
        }
        let mut writer = Writer::from_path(&log_path).map_err(csv_error(&log_path))?;
        writer.write_record(&header).map_err(csv_error(&log_path))?;
        writer.flush().map_err(io_error(&log_path))?;

        Ok(RunLogger { log_path, metrics })
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    pub fn log_step(&self, record: &StepRecord, verbose: bool) -> Result<()> {
        let mut row = vec![
            record.epoch.to_string(),
            record.step.to_string(),
            record.split.clone(),
            record.loss.to_string(),
        ];
        for idx in 0..self.metrics.len() {
            let (pos, neg) = record.metrics.get(idx).copied().unwrap_or((0.0, 0.0));
            row.push(pos.to_string());
            row.push(neg.to_string());
        }

        let file = OpenOptions::new()
            .append(true)
            .open(&self.log_path)
            .map_err(io_error(&self.log_path))?;
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
        writer.write_record(&row).map_err(csv_error(&self.log_path))?;
        writer.flush().map_err(io_error(&self.log_path))?;

        if verbose {
            let mut summary = format!("Epoch {}: {} loss: {:.3}", record.epoch, record.split, record.loss);
            for (idx, metric) in self.metrics.iter().enumerate() {
                let (pos, neg) = record.metrics.get(idx).copied().unwrap_or((0.0, 0.0));
                summary.push_str(&format!(", pos_{}: {:.3}, neg_{}: {:.3}", metric, pos, metric, neg));
            }
            info!("{}", summary);
        }
        Ok(())
    }
}
