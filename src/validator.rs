use crate::reference::{index_file, normalize_path, DocumentIndex, Reference};
use anyhow::Result;
use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::path::{Path, PathBuf};

/// A reference that does not resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceError {
    /// The target path does not exist on disk.
    MissingFile { source: PathBuf, target: PathBuf },
    /// The target is an indexed document without a heading for `anchor`.
    DanglingAnchor {
        source: PathBuf,
        target: PathBuf,
        anchor: String,
    },
}

impl ReferenceError {
    /// The document containing the broken link.
    pub fn source_document(&self) -> &Path {
        match self {
            ReferenceError::MissingFile { source, .. }
            | ReferenceError::DanglingAnchor { source, .. } => source,
        }
    }
}

impl fmt::Display for ReferenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceError::MissingFile { source, target } => write!(
                f,
                "{}: reference to missing file {}",
                source.display(),
                target.display()
            ),
            ReferenceError::DanglingAnchor {
                source,
                target,
                anchor,
            } => write!(
                f,
                "{}: reference to missing heading {}#{}",
                source.display(),
                target.display(),
                anchor
            ),
        }
    }
}

impl Error for ReferenceError {}

/// How [`validate_batch`] reacts to a broken reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// Check every document and collect all violations.
    #[default]
    Collect,
    /// Stop at the first violation.
    FailFast,
}

/// The set of documents checked together, indexed before validation starts.
///
/// Keys are lexically normalized paths. Documents keep the order in which
/// they were added.
#[derive(Debug, Default)]
pub struct Batch {
    order: Vec<PathBuf>,
    documents: HashMap<PathBuf, DocumentIndex>,
}

impl Batch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indexes every file in `paths`. Fails on the first unreadable file.
    pub fn from_paths<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut batch = Self::new();
        for path in paths {
            let path = path.as_ref();
            batch.insert(path, index_file(path)?);
        }
        Ok(batch)
    }

    /// Adds an already indexed document. Re-adding a path replaces its index.
    pub fn insert(&mut self, path: &Path, index: DocumentIndex) {
        let key = normalize_path(path);
        if self.documents.insert(key.clone(), index).is_none() {
            self.order.push(key);
        }
    }

    pub fn get(&self, path: &Path) -> Option<&DocumentIndex> {
        self.documents.get(&normalize_path(path))
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.get(path).is_some()
    }

    /// Document paths in insertion order.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.order.iter().map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// A reference as it was examined by the validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckedReference {
    pub reference: Reference,
    /// True when the anchor was looked up in an indexed document. Otherwise
    /// only the existence of the target path was checked.
    pub anchor_validated: bool,
}

impl fmt::Display for CheckedReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.reference.anchor, self.anchor_validated) {
            (Some(anchor), true) => write!(f, "{}#{}", self.reference.target.display(), anchor),
            _ => write!(f, "{}", self.reference.target.display()),
        }
    }
}

/// Outcome of checking one document's references.
#[derive(Debug, Clone)]
pub struct DocumentReport {
    pub path: PathBuf,
    /// Every reference examined, in document order.
    pub checked: Vec<CheckedReference>,
    pub errors: Vec<ReferenceError>,
}

impl DocumentReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// The batch document and anchor `reference` has to be checked against,
/// or `None` when only the target path has to exist.
fn anchor_lookup<'a>(
    reference: &'a Reference,
    batch: &'a Batch,
) -> Option<(&'a DocumentIndex, &'a str)> {
    let anchor = reference.anchor.as_deref().filter(|a| !a.is_empty())?;
    batch.get(&reference.target).map(|target| (target, anchor))
}

/// Checks a single reference made from `source` against the batch.
///
/// The existence check uses the target path as written, so a link through a
/// missing directory such as `nosuchdir/../b.md` is reported even though it
/// normalizes to an existing file.
pub fn check_reference(
    source: &Path,
    reference: &Reference,
    batch: &Batch,
) -> Result<(), ReferenceError> {
    match anchor_lookup(reference, batch) {
        Some((target, anchor)) => {
            if target.has_anchor(anchor) {
                Ok(())
            } else {
                Err(ReferenceError::DanglingAnchor {
                    source: source.to_path_buf(),
                    target: reference.target.clone(),
                    anchor: anchor.to_string(),
                })
            }
        }
        // Not part of the batch, or no anchor: the path only has to exist
        None => {
            if reference.target.exists() {
                Ok(())
            } else {
                Err(ReferenceError::MissingFile {
                    source: source.to_path_buf(),
                    target: reference.target.clone(),
                })
            }
        }
    }
}

/// Validates the references of the batch document at `path`.
///
/// With [`ValidationMode::FailFast`] checking stops after the first broken
/// reference. A path that is not part of the batch yields an empty report.
pub fn validate_document(path: &Path, batch: &Batch, mode: ValidationMode) -> DocumentReport {
    let mut report = DocumentReport {
        path: path.to_path_buf(),
        checked: Vec::new(),
        errors: Vec::new(),
    };

    let Some(index) = batch.get(path) else {
        log::warn!("{} is not part of the checked batch", path.display());
        return report;
    };

    for reference in &index.references {
        report.checked.push(CheckedReference {
            reference: reference.clone(),
            anchor_validated: anchor_lookup(reference, batch).is_some(),
        });
        if let Err(e) = check_reference(path, reference, batch) {
            log::debug!("Broken reference: {}", e);
            report.errors.push(e);
            if mode == ValidationMode::FailFast {
                break;
            }
        }
    }

    report
}

/// Validates every document of the batch in insertion order.
///
/// In fail-fast mode the returned list ends with the first failing document.
pub fn validate_batch(batch: &Batch, mode: ValidationMode) -> Vec<DocumentReport> {
    let mut reports = Vec::with_capacity(batch.len());
    for path in batch.paths() {
        let report = validate_document(path, batch, mode);
        let failed = !report.is_ok();
        reports.push(report);
        if failed && mode == ValidationMode::FailFast {
            break;
        }
    }
    reports
}
