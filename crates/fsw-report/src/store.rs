//! Report persistence.

use crate::types::SweepReport;
use crate::{ReportError, ReportResult};
use std::fs;
use std::path::{Path, PathBuf};

pub const REPORT_FILE: &str = "report.json";
pub const SUMMARY_FILE: &str = "summary.csv";

#[derive(Clone)]
pub struct ReportStore {
    results_dir: PathBuf,
}

impl ReportStore {
    pub fn new(results_dir: PathBuf) -> ReportResult<Self> {
        if !results_dir.exists() {
            fs::create_dir_all(&results_dir)?;
        }
        Ok(Self { results_dir })
    }

    pub fn report_path(&self) -> PathBuf {
        self.results_dir.join(REPORT_FILE)
    }

    pub fn summary_path(&self) -> PathBuf {
        self.results_dir.join(SUMMARY_FILE)
    }

    /// Write the report fully formed before it becomes visible: serialize to
    /// a sibling temp file, then rename over the target.
    pub fn save_report(&self, report: &SweepReport) -> ReportResult<()> {
        let json = serde_json::to_string_pretty(report)?;
        write_atomic(&self.report_path(), &json)?;
        Ok(())
    }

    pub fn load_report(&self) -> ReportResult<SweepReport> {
        let path = self.report_path();
        if !path.exists() {
            return Err(ReportError::ReportNotFound { path });
        }
        let content = fs::read_to_string(path)?;
        let report = serde_json::from_str(&content)?;
        Ok(report)
    }

    /// Tabular summary, one row per case. The column set matches the legacy
    /// report consumers and stays stable within a sweep.
    pub fn save_summary(&self, report: &SweepReport) -> ReportResult<()> {
        let mut csv = String::from("Reynolds,Status,Runtime,FinalResidual,CaseDir\n");
        for record in &report.results {
            let residual = record
                .final_p_residual
                .map(|r| r.to_string())
                .unwrap_or_else(|| "N/A".to_string());
            csv.push_str(&format!(
                "{},{},{:.1},{},{}\n",
                record.reynolds,
                record.status.as_str(),
                record.runtime_s,
                residual,
                record.case_dir.display()
            ));
        }
        write_atomic(&self.summary_path(), &csv)?;
        Ok(())
    }
}

fn write_atomic(path: &Path, content: &str) -> std::io::Result<()> {
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, content)?;
    fs::rename(&tmp, path)
}
