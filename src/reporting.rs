use crate::validator::{DocumentReport, ReferenceError};
use anyhow::Result;
use chrono::Local;
use std::collections::BTreeSet;
use std::io::{self, Write};

/// Formats a message with a timestamp, level and `doc_check` prefix.
fn format_line(timestamp: &impl std::fmt::Display, level: &str, message: &str) -> String {
    format!("{} [{}] (doc_check): {}", timestamp, level, message)
}

/// Writes the per-document trace: `CHECK <path>` followed by one indented
/// line per reference examined. The `path#anchor` form is used only when the
/// anchor was looked up in an indexed document.
pub fn write_trace<W: Write>(out: &mut W, report: &DocumentReport) -> io::Result<()> {
    writeln!(out, "CHECK {}", report.path.display())?;
    for checked in &report.checked {
        writeln!(out, "  {}", checked)?;
    }
    Ok(())
}

/// Prints the trace of every report to stdout.
pub fn print_trace(reports: &[DocumentReport]) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for report in reports {
        write_trace(&mut out, report)?;
    }
    out.flush()?;
    Ok(())
}

/// Reports broken references to stderr.
///
/// # Errors
///
/// Returns an error after printing all violations (to fail the run).
pub fn report_reference_errors(errors: &[&ReferenceError]) -> Result<()> {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");

    for error in errors {
        eprintln!("{}", format_line(&timestamp, "ERROR", &error.to_string()));
    }

    let failed_files: BTreeSet<_> = errors.iter().map(|e| e.source_document()).collect();
    eprintln!(
        "{}",
        format_line(&timestamp, "ERROR", "Broken references in the following files:")
    );
    for file in failed_files {
        eprintln!(
            "{}",
            format_line(&timestamp, "ERROR", &format!("  {}", file.display()))
        );
    }

    anyhow::bail!("{} broken reference(s)", errors.len());
}

/// Prints a one-line summary of a clean validation run to stderr.
pub fn print_reference_statistics(reports: &[DocumentReport]) {
    let total: usize = reports.iter().map(|r| r.checked.len()).sum();
    let anchored = reports
        .iter()
        .flat_map(|r| &r.checked)
        .filter(|checked| checked.anchor_validated)
        .count();

    eprintln!(
        "{}",
        format_line(
            &Local::now().format("%Y-%m-%d %H:%M:%S"),
            "INFO",
            &format!(
                "Validated {} reference(s) ({} anchor(s) looked up) in {} document(s)",
                total,
                anchored,
                reports.len()
            )
        )
    );
}
