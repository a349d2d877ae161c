//! Integration tests for doc-check
//!
//! These tests exercise both pipelines end to end against documentation
//! trees written into isolated temporary directories.
//!
//! ## Test Architecture
//!
//! Each test uses `TestFixture` to create an isolated environment with:
//! - Temporary docs directory holding the markdown under test
//! - Automatic cleanup via RAII (Drop trait)

mod common;

use anyhow::Result;
use common::TestFixture;
use doc_check::{
    check_references, generate_example, run_reference_check, DocCheckConfig, ExampleConfig,
    ReferenceError, ValidationMode,
};
use std::fs;

const MANUAL: &str = r#"# Manual

## Getting Started

Read the [API notes](api/notes.md#cursor-usage) and the [license](../LICENSE).
Jump back to [the start](#getting-started).

## Advanced Topics

See [images](images) for diagrams.
"#;

const NOTES: &str = r#"## Cursor Usage

Return to the [manual](../manual.md#advanced-topics).
"#;

fn manual_fixture() -> Result<TestFixture> {
    let fixture = TestFixture::with_files(&[
        ("docs/manual.md", MANUAL),
        ("docs/api/notes.md", NOTES),
        ("LICENSE", "license text"),
    ])?;
    fs::create_dir_all(fixture.path("docs/images"))?;
    Ok(fixture)
}

// ===== Reference checking =====

#[test]
fn integration_valid_batch_passes() -> Result<()> {
    let fixture = manual_fixture()?;
    let files = [fixture.path("docs/manual.md"), fixture.path("docs/api/notes.md")];

    let reports = check_references(&files, ValidationMode::Collect)?;

    assert_eq!(reports.len(), 2);
    assert!(reports.iter().all(|r| r.is_ok()), "{:?}", reports);
    assert_eq!(reports[0].checked.len(), 4);
    assert_eq!(reports[1].checked.len(), 1);

    run_reference_check(&files, ValidationMode::Collect)?;
    Ok(())
}

#[test]
fn integration_anchor_into_unchecked_document_only_needs_the_file() -> Result<()> {
    let fixture = manual_fixture()?;

    // notes.md is not in the batch, so #cursor-usage is not looked up
    fixture.write("docs/api/notes.md", "no headings at all")?;
    let reports = check_references(&[fixture.path("docs/manual.md")], ValidationMode::Collect)?;

    assert!(reports[0].is_ok(), "{:?}", reports[0].errors);
    Ok(())
}

#[test]
fn integration_dangling_anchor_detected() -> Result<()> {
    let fixture = manual_fixture()?;
    fixture.write("docs/api/notes.md", "## Something Else\n")?;
    let files = [fixture.path("docs/manual.md"), fixture.path("docs/api/notes.md")];

    let reports = check_references(&files, ValidationMode::Collect)?;
    let errors: Vec<_> = reports.iter().flat_map(|r| &r.errors).collect();

    assert_eq!(errors.len(), 1);
    match errors[0] {
        ReferenceError::DanglingAnchor { anchor, .. } => assert_eq!(anchor, "cursor-usage"),
        other => panic!("unexpected error: {}", other),
    }

    let result = run_reference_check(&files, ValidationMode::Collect);
    assert!(result.is_err());
    Ok(())
}

#[test]
fn integration_missing_file_detected() -> Result<()> {
    let fixture = TestFixture::with_files(&[("guide.md", "See [old](removed.md).\n")])?;

    let reports = check_references(&[fixture.path("guide.md")], ValidationMode::FailFast)?;

    assert_eq!(reports[0].errors.len(), 1);
    assert!(matches!(
        &reports[0].errors[0],
        ReferenceError::MissingFile { target, .. } if target.ends_with("removed.md")
    ));
    Ok(())
}

#[test]
fn integration_unreadable_input_is_an_error() -> Result<()> {
    let fixture = TestFixture::new()?;

    let result = check_references(&[fixture.path("nope.md")], ValidationMode::Collect);

    let message = format!("{:#}", result.unwrap_err());
    assert!(message.contains("Failed to read"), "{}", message);
    Ok(())
}

// ===== Example extraction =====

const TUTORIAL: &str = r#"# Tutorial

```c++
#include <vector>
```

Create a value:

```C++
int x = 1;
std::vector<int> v{x};
```

```python
print("not part of the program")
```
"#;

#[test]
fn integration_example_program_written() -> Result<()> {
    let fixture = TestFixture::with_files(&[("tutorial.md", TUTORIAL)])?;
    let output = fixture.path("tutorial.cpp");

    let example =
        generate_example(&fixture.path("tutorial.md"), &output, &ExampleConfig::default())?;

    assert_eq!(example.directive_lines, vec!["#include <vector>"]);
    assert_eq!(
        example.statement_lines,
        vec!["    int x = 1;", "    std::vector<int> v{x};"]
    );
    assert_eq!(
        fs::read_to_string(&output)?,
        "#include <cstdio>\n\
         #include <vector>\n\
         int main() {\n    int x = 1;\n    std::vector<int> v{x};\n    return 0;\n}\n"
    );
    Ok(())
}

#[test]
fn integration_example_with_config_file() -> Result<()> {
    let fixture = TestFixture::with_files(&[
        ("tutorial.md", TUTORIAL),
        (
            "doc-check.toml",
            "[example]\nincludes = [\"calicodb/db.h\"]\nindent = \"  \"\n",
        ),
    ])?;
    let config = DocCheckConfig::load(Some(fixture.path("doc-check.toml").as_path()))?;
    let output = fixture.path("out.cpp");

    generate_example(&fixture.path("tutorial.md"), &output, &config.example)?;

    let program = fs::read_to_string(&output)?;
    let include = program.find("#include \"calicodb/db.h\"").expect("include missing");
    let entry = program.find("int main() {").expect("entry point missing");
    assert!(include < entry);
    assert!(program.contains("\n  int x = 1;\n"));
    assert!(program.ends_with("  return 0;\n}\n"));
    Ok(())
}

#[test]
fn integration_example_without_samples_keeps_skeleton() -> Result<()> {
    let fixture = TestFixture::with_files(&[("empty.md", "## Nothing to compile\n")])?;
    let output = fixture.write("empty.cpp", "previous contents")?;

    let example =
        generate_example(&fixture.path("empty.md"), &output, &ExampleConfig::default())?;

    assert!(example.directive_lines.is_empty());
    assert!(example.statement_lines.is_empty());
    assert_eq!(
        fs::read_to_string(&output)?,
        "#include <cstdio>\nint main() {\n    return 0;\n}\n"
    );
    Ok(())
}

#[test]
fn integration_invalid_config_rejected() -> Result<()> {
    let fixture = TestFixture::with_files(&[("tutorial.md", TUTORIAL)])?;
    let config = ExampleConfig {
        fence_markers: Vec::new(),
        ..ExampleConfig::default()
    };

    let result =
        generate_example(&fixture.path("tutorial.md"), &fixture.path("out.cpp"), &config);

    assert!(result.is_err());
    assert!(!fixture.path("out.cpp").exists());
    Ok(())
}
