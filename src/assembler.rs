use crate::config::ExampleConfig;
use crate::extractor::ExampleLines;
use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Header included ahead of everything else in the assembled program.
const STDIO_INCLUDE: &str = "#include <cstdio>";

/// Builds the text of a standalone program around the extracted lines.
///
/// The layout is fixed:
///
/// ```text
/// #include <cstdio>
/// #include "<configured header>"...
/// <directive lines>
/// int main() {
/// <statement lines>
///     return 0;
/// }
/// ```
///
/// Nothing checks that the result compiles.
pub fn assemble_program(example: &ExampleLines, config: &ExampleConfig) -> String {
    let mut program = String::new();

    program.push_str(STDIO_INCLUDE);
    program.push('\n');
    for header in &config.includes {
        // Writing to a String cannot fail
        let _ = writeln!(program, "#include \"{}\"", header);
    }

    for line in &example.directive_lines {
        program.push_str(line);
        program.push('\n');
    }

    program.push_str("int main() {\n");
    for line in &example.statement_lines {
        program.push_str(line);
        program.push('\n');
    }
    let _ = writeln!(program, "{}return 0;", config.indent);
    program.push_str("}\n");

    program
}

/// Writes an assembled program to `path`, replacing any previous content.
pub fn write_program(path: &Path, program: &str) -> Result<()> {
    fs::write(path, program).with_context(|| format!("Failed to write {}", path.display()))?;
    log::info!("Wrote {} ({} bytes)", path.display(), program.len());
    Ok(())
}
