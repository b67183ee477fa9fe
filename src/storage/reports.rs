//! Run summary and balance report storage

use chrono::Utc;
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;
use crate::{
    errors::{WorkflowError, WorkflowResult},
    types::BalanceReport,
    workflow::RunSummary,
};

fn append_jsonl<T: Serialize>(path: &Path, value: &T) -> WorkflowResult<()> {
    let context = || format!("appending to {}", path.display());
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| WorkflowError::storage(context(), e))?;
    }
    let line = serde_json::to_string(value).map_err(|e| WorkflowError::storage(context(), e))?;

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| WorkflowError::storage(context(), e))?;
    writeln!(file, "{}", line).map_err(|e| WorkflowError::storage(context(), e))?;
    Ok(())
}

fn dated(reports_dir: &Path, prefix: &str) -> PathBuf {
    reports_dir.join(format!("{}_{}.jsonl", prefix, Utc::now().format("%Y-%m-%d")))
}

pub fn save_run_summary(reports_dir: &Path, summary: &RunSummary) -> WorkflowResult<PathBuf> {
    let path = dated(reports_dir, "runs");
    append_jsonl(&path, summary)?;

    info!(
        run_id = %summary.run_id,
        pool = %summary.pool(),
        consistent = summary.is_consistent(),
        "Saved run summary"
    );
    Ok(path)
}

pub fn save_balance_report(reports_dir: &Path, report: &BalanceReport) -> WorkflowResult<PathBuf> {
    let path = dated(reports_dir, "balances");
    append_jsonl(&path, report)?;

    info!(label = %report.label, rows = report.entries.len(), "Saved balance report");
    Ok(path)
}
