//! Salida de la corrida: líneas legibles para stdout y reporte JSON opcional.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

use multidrop_core::{ColumnOutcome, ColumnResult, PatchReport, Verification, MIGRATION_NAME};

use crate::errors::AppError;

#[derive(Serialize)]
struct ReportFile<'a> {
    timestamp: DateTime<Utc>,
    migration: &'static str,
    committed: bool,
    applied: usize,
    failed: usize,
    total: usize,
    columns: &'a [ColumnResult],
    #[serde(skip_serializing_if = "Option::is_none")]
    verification: Option<&'a Verification>,
}

pub fn render_lines(report: &PatchReport) -> Vec<String> {
    let mut lines: Vec<String> = report.results
                                       .iter()
                                       .map(|r| match &r.outcome {
                                           ColumnOutcome::Applied { already_present: Some(true) } => {
                                               format!("  ✓ {} (already present)", r.spec.qualified_name())
                                           }
                                           ColumnOutcome::Applied { .. } => format!("  ✓ {}", r.spec.qualified_name()),
                                           ColumnOutcome::Failed { error } => format!("  ✗ {}: {error}", r.spec.qualified_name()),
                                       })
                                       .collect();
    if let Some(v) = &report.verification {
        if v.is_ok() {
            lines.push(format!("  ✓ verification: all {} columns present", report.total()));
        } else {
            lines.extend(v.missing.iter().map(|m| format!("  ⚠ missing after run: {m}")));
            lines.extend(v.mismatched
                          .iter()
                          .map(|m| format!("  ⚠ type mismatch: {} is {}, expected {}", m.column, m.found, m.expected)));
        }
    }
    let mut summary = format!("✅ Applied {}/{} schema changes", report.applied(), report.total());
    if !report.committed {
        summary.push_str(" (dry run, nothing committed)");
    }
    lines.push(summary);
    lines
}

pub fn to_json(report: &PatchReport, timestamp: DateTime<Utc>) -> Result<String, AppError> {
    let file = ReportFile { timestamp,
                            migration: MIGRATION_NAME,
                            committed: report.committed,
                            applied: report.applied(),
                            failed: report.failed(),
                            total: report.total(),
                            columns: &report.results,
                            verification: report.verification.as_ref() };
    Ok(serde_json::to_string_pretty(&file)?)
}

pub fn write_json(report: &PatchReport, path: &Path) -> Result<(), AppError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    fs::write(path, to_json(report, Utc::now())?)?;
    Ok(())
}
