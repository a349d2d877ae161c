use crate::assembler::{assemble_program, write_program};
use crate::config::ExampleConfig;
use crate::extractor::{extract_example, ExampleLines};
use crate::reporting::{print_reference_statistics, print_trace, report_reference_errors};
use crate::validator::{validate_batch, Batch, DocumentReport, ValidationMode};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Indexes every document in `paths`, then validates each one against the
/// whole batch.
///
/// All files are indexed before any validation starts, so a document may
/// link to a heading of any other document in the batch. The returned
/// reports are in input order.
pub fn check_references<P: AsRef<Path>>(
    paths: &[P],
    mode: ValidationMode,
) -> Result<Vec<DocumentReport>> {
    let batch = Batch::from_paths(paths)?;
    log::info!("Indexed {} document(s)", batch.len());

    Ok(validate_batch(&batch, mode))
}

/// Runs [`check_references`], prints the trace and fails if any reference
/// is broken.
pub fn run_reference_check<P: AsRef<Path>>(paths: &[P], mode: ValidationMode) -> Result<()> {
    let reports = check_references(paths, mode)?;
    print_trace(&reports)?;

    let errors: Vec<_> = reports.iter().flat_map(|r| &r.errors).collect();
    if !errors.is_empty() {
        return report_reference_errors(&errors);
    }

    print_reference_statistics(&reports);
    Ok(())
}

/// Extracts the code samples of `input` and writes the assembled program
/// to `output`.
pub fn generate_example(
    input: &Path,
    output: &Path,
    config: &ExampleConfig,
) -> Result<ExampleLines> {
    config.validate()?;

    let content = fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;

    log::info!("Extracting examples from {}", input.display());
    let example = extract_example(&content, config);
    if example.directive_lines.is_empty() && example.statement_lines.is_empty() {
        log::warn!(
            "No {} code blocks found in {}",
            config.fence_markers.join("/"),
            input.display()
        );
    }

    let program = assemble_program(&example, config);
    write_program(output, &program)?;

    Ok(example)
}
