//! doc-check library
//!
//! Verification helpers for a project's markdown manuals. The primary
//! interface is the `doc-check` binary, but the library can be used
//! programmatically for testing or custom integrations.
//!
//! ## Reference checking
//!
//! [`index_document`] scans a document for headings and links,
//! [`Batch`] holds the indexed documents of one run and
//! [`validate_batch`] checks every link against the batch and the
//! filesystem.
//!
//! ## Example extraction
//!
//! [`extract_example`] collects the lines of matching fenced code blocks
//! and [`assemble_program`] wraps them into a compilable program.

mod assembler;
mod commands;
mod config;
mod extractor;
mod reference;
mod reporting;
mod validator;

pub use assembler::{assemble_program, write_program};
pub use commands::{check_references, generate_example, run_reference_check};
pub use config::{DocCheckConfig, ExampleConfig};
pub use extractor::{extract_code_blocks, extract_example, CodeBlock, ExampleLines};
pub use reference::{
    anchor_from_heading, index_document, index_file, normalize_path, DocumentIndex, Reference,
};
pub use reporting::write_trace;
pub use validator::{
    check_reference, validate_batch, validate_document, Batch, CheckedReference, DocumentReport,
    ReferenceError, ValidationMode,
};
